//! Sprite vs. boundary circle collision
//!
//! The sprite is treated as a circle of radius `half_size` around its center.
//! Checked on every physics sub-step so fast motion cannot skip past the wall.

use glam::Vec2;

use super::geometry::Boundary;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the sprite crossed the boundary
    pub hit: bool,
    /// Outward surface normal at the crossing (zero when undefined)
    pub normal: Vec2,
    /// How far past the boundary the sprite's bounding circle reaches
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Whether a sprite centered at `center` pokes out of the boundary
#[inline]
pub fn crosses_boundary(center: Vec2, half_size: f32, boundary: &Boundary) -> bool {
    center.distance(boundary.center) + half_size > boundary.radius
}

/// Check collision between the sprite and the boundary wall
pub fn sprite_boundary_collision(
    center: Vec2,
    half_size: f32,
    boundary: &Boundary,
) -> CollisionResult {
    if !crosses_boundary(center, half_size, boundary) {
        return CollisionResult::miss();
    }

    let dist = center.distance(boundary.center);
    CollisionResult {
        hit: true,
        normal: boundary.outward_normal_at(center).unwrap_or(Vec2::ZERO),
        penetration: dist + half_size - boundary.radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary() -> Boundary {
        Boundary::new(Vec2::splat(384.0), 320.0)
    }

    #[test]
    fn test_inside_is_miss() {
        let result = sprite_boundary_collision(Vec2::new(384.0 + 200.0, 384.0), 64.0, &boundary());
        assert!(!result.hit);
        assert_eq!(result.normal, Vec2::ZERO);
    }

    #[test]
    fn test_touching_exactly_is_not_a_crossing() {
        // 256 + 64 == 320
        assert!(!crosses_boundary(Vec2::new(384.0 + 256.0, 384.0), 64.0, &boundary()));
        assert!(crosses_boundary(Vec2::new(384.0 + 256.5, 384.0), 64.0, &boundary()));
    }

    #[test]
    fn test_hit_reports_outward_normal() {
        let result = sprite_boundary_collision(Vec2::new(384.0, 384.0 - 260.0), 64.0, &boundary());
        assert!(result.hit);
        assert!((result.normal - Vec2::new(0.0, -1.0)).length() < 1e-6);
        assert!((result.penetration - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_sprite_larger_than_circle_at_center() {
        // Degenerate: always crossing, but the normal is undefined
        let result = sprite_boundary_collision(Vec2::splat(384.0), 400.0, &boundary());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::ZERO);
    }
}
