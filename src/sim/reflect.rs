//! Reflection off the boundary wall with randomized jitter
//!
//! The wall is treated as locally flat at the contact point: the tangential
//! component of the velocity is kept, the normal component flips. A small
//! random rotation is then applied so the trajectory never settles into a
//! periodic pattern, and the result is rebuilt at the fixed speed.

use glam::Vec2;
use rand::Rng;

use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Smallest inward component (cosine) a reflected heading may have
const MIN_INWARD: f32 = 1e-3;

/// Flip the normal component of `velocity`, keep the tangential one
///
/// `normal` must be unit length.
#[inline]
pub fn mirror_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    let tangent = normal.perp();
    let v_tangent = velocity.dot(tangent) * tangent;
    let v_normal = velocity.dot(normal) * normal;
    v_tangent - v_normal
}

/// Post-collision velocity, magnitude exactly `speed`
///
/// `normal` is the outward boundary normal at the contact. One jitter sample
/// in `[-jitter_degrees, +jitter_degrees]` is drawn per call. The returned
/// heading always points strictly back inside the circle: if the jittered
/// heading would not, the jitter is mirrored, then dropped, and as a last
/// resort the sprite heads straight back along the inward normal.
pub fn reflect_off_boundary<R: Rng + ?Sized>(
    velocity: Vec2,
    normal: Vec2,
    jitter_degrees: f32,
    speed: f32,
    rng: &mut R,
) -> Vec2 {
    // Undefined normal: treat the hit as head-on
    let normal = normal
        .try_normalize()
        .or_else(|| velocity.try_normalize())
        .unwrap_or(Vec2::X);

    let reflected = mirror_velocity(velocity, normal);
    let (_, base_angle) = cartesian_to_polar(reflected);
    let jitter = rng.random_range(-jitter_degrees..=jitter_degrees).to_radians();

    let heading = [base_angle + jitter, base_angle - jitter, base_angle]
        .into_iter()
        .map(|angle| polar_to_cartesian(1.0, normalize_angle(angle)))
        .find(|dir| dir.dot(normal) < -MIN_INWARD)
        .unwrap_or(-normal);

    heading * speed
}
