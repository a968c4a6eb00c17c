//! Bounce Reel - a sprite bouncing inside a circle, rendered as a looping animation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sub-stepped bouncing, reflection, return glide)
//! - `renderer`: Sprite compositing into transparent frames
//! - `anim`: Frame timing/looping metadata and the APNG encoder
//! - `settings`: Configuration surface
//! - `assets`: Sprite image loading

pub mod anim;
pub mod assets;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ReelError, ReelResult};
pub use settings::ReelConfig;

use glam::Vec2;

/// Reference animation constants
pub mod consts {
    /// Canvas edge length (pixels)
    pub const CANVAS_SIZE: u32 = 768;
    /// Diameter of the bounding circle (pixels)
    pub const CIRCLE_DIAMETER: u32 = 640;
    /// Sprite edge length after resizing (pixels)
    pub const SPRITE_SIZE: u32 = 128;
    /// Display time of one frame (milliseconds)
    pub const FRAME_DURATION_MS: u32 = 16;

    /// Physics sub-steps per rendered frame
    pub const SUB_STEPS_PER_FRAME: u32 = 10;
    /// Random rotation applied to each reflection, +/- degrees
    pub const JITTER_DEGREES: f32 = 15.0;
    /// Bounces before the sprite may head home
    pub const REQUIRED_BOUNCES: u32 = 3;
    /// Distance travelled per frame (pixels)
    pub const SPEED: f32 = 7.0;

    /// Return glide length bounds (frames)
    pub const RETURN_MIN_STEPS: u32 = 5;
    pub const RETURN_MAX_STEPS: u32 = 30;

    /// Bouncing frames allowed before the return is forced (~10 s at 16 ms)
    pub const MAX_BOUNCE_FRAMES: u32 = 600;

    /// Minimum cosine between velocity and the direction to center for the return
    pub const RETURN_ALIGNMENT: f32 = 0.95;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
