//! Boundary circle and sprite-center helpers
//!
//! Positions throughout the simulation are sprite top-left corners; collision
//! and alignment tests work on the sprite center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::ReelConfig;

/// The circle the sprite bounces inside. Fixed for a whole simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub center: Vec2,
    pub radius: f32,
}

impl Boundary {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Circle centered on the canvas with the configured radius
    pub fn from_config(config: &ReelConfig) -> Self {
        Self::new(config.canvas_center(), config.circle_radius() as f32)
    }

    /// Unit vector from the circle center out through `point`
    ///
    /// `None` when `point` sits exactly on the center.
    #[inline]
    pub fn outward_normal_at(&self, point: Vec2) -> Option<Vec2> {
        (point - self.center).try_normalize()
    }

    /// Unit vector from `point` toward the circle center
    #[inline]
    pub fn direction_to_center(&self, point: Vec2) -> Option<Vec2> {
        (self.center - point).try_normalize()
    }
}

/// Center of a square sprite whose top-left corner is at `position`
#[inline]
pub fn sprite_center(position: Vec2, half_size: f32) -> Vec2 {
    position + Vec2::splat(half_size)
}

/// Top-left corner of a square sprite centered on `center`
#[inline]
pub fn sprite_origin(center: Vec2, half_size: f32) -> Vec2 {
    center - Vec2::splat(half_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normals_point_away_and_toward_center() {
        let boundary = Boundary::new(Vec2::new(100.0, 100.0), 80.0);
        let point = Vec2::new(160.0, 100.0);
        assert_eq!(boundary.outward_normal_at(point), Some(Vec2::X));
        assert_eq!(boundary.direction_to_center(point), Some(-Vec2::X));
    }

    #[test]
    fn test_degenerate_center_has_no_normal() {
        let boundary = Boundary::new(Vec2::new(100.0, 100.0), 80.0);
        assert_eq!(boundary.outward_normal_at(boundary.center), None);
        assert_eq!(boundary.direction_to_center(boundary.center), None);
    }

    #[test]
    fn test_sprite_center_origin_inverse() {
        let origin = Vec2::new(320.0, 300.5);
        let center = sprite_center(origin, 64.0);
        assert_eq!(center, Vec2::new(384.0, 364.5));
        assert_eq!(sprite_origin(center, 64.0), origin);
    }

    #[test]
    fn test_from_config_uses_canvas_center() {
        let boundary = Boundary::from_config(&ReelConfig::default());
        assert_eq!(boundary.center, Vec2::splat(384.0));
        assert_eq!(boundary.radius, 320.0);
    }
}
