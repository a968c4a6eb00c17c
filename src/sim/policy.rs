//! When the bounce phase may end
//!
//! The sprite heads home only after enough bounces AND once it is already
//! travelling roughly toward the center, so the glide needs no sharp turn.

use glam::Vec2;

use super::geometry::Boundary;
use crate::consts::RETURN_ALIGNMENT;

/// Cosine between the heading and the direction to the circle center
///
/// `None` when either vector is degenerate (sprite exactly centered, or
/// zero velocity).
pub fn center_alignment(center: Vec2, velocity: Vec2, boundary: &Boundary) -> Option<f32> {
    let to_center = boundary.direction_to_center(center)?;
    let heading = velocity.try_normalize()?;
    Some(to_center.dot(heading))
}

/// Termination check, evaluated once per bouncing frame
pub fn should_return(
    bounce_count: u32,
    required_bounces: u32,
    center: Vec2,
    velocity: Vec2,
    boundary: &Boundary,
) -> bool {
    if bounce_count < required_bounces {
        return false;
    }
    center_alignment(center, velocity, boundary).is_some_and(|cos| cos > RETURN_ALIGNMENT)
}
