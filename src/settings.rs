//! Animation configuration
//!
//! Loaded from an optional JSON file; missing fields keep their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ReelError, ReelResult};

/// Every tunable of the bounce animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    // === Canvas ===
    /// Canvas edge length (pixels, square)
    pub canvas_size: u32,
    /// Bounding circle diameter (pixels)
    pub circle_diameter: u32,
    /// Sprite edge length (pixels, square)
    pub sprite_size: u32,
    /// Sprite border color (straight RGBA)
    pub border_color: [u8; 4],

    // === Timing ===
    /// Display time per frame (milliseconds)
    pub frame_duration_ms: u32,
    /// Physics sub-steps per rendered frame
    pub sub_steps_per_frame: u32,

    // === Motion ===
    /// Distance covered per frame (pixels)
    pub speed: f32,
    /// Reflection jitter range, +/- degrees
    pub jitter_degrees: f32,
    /// Bounces required before the return glide
    pub required_bounces: u32,
    /// Return glide length bounds (frames, inclusive)
    pub return_min_steps: u32,
    pub return_max_steps: u32,
    /// Bouncing frames after which the return glide is forced
    pub max_bounce_frames: u32,

    /// Fixed RNG seed (drawn at random when absent)
    pub seed: Option<u64>,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            circle_diameter: CIRCLE_DIAMETER,
            sprite_size: SPRITE_SIZE,
            border_color: [255, 0, 0, 255],

            frame_duration_ms: FRAME_DURATION_MS,
            sub_steps_per_frame: SUB_STEPS_PER_FRAME,

            speed: SPEED,
            jitter_degrees: JITTER_DEGREES,
            required_bounces: REQUIRED_BOUNCES,
            return_min_steps: RETURN_MIN_STEPS,
            return_max_steps: RETURN_MAX_STEPS,
            max_bounce_frames: MAX_BOUNCE_FRAMES,

            seed: None,
        }
    }
}

impl ReelConfig {
    /// Read a JSON config file and validate it
    pub fn load(path: &Path) -> ReelResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations that cannot produce a bounded animation
    pub fn validate(&self) -> ReelResult<()> {
        if self.canvas_size == 0 || self.circle_diameter == 0 || self.sprite_size == 0 {
            return Err(ReelError::config("canvas, circle and sprite sizes must be non-zero"));
        }
        if self.circle_diameter > self.canvas_size {
            return Err(ReelError::config(format!(
                "circle diameter {} exceeds canvas size {}",
                self.circle_diameter, self.canvas_size
            )));
        }
        // The sprite must be able to sit at the center without touching the circle
        if self.sprite_size >= self.circle_radius() {
            return Err(ReelError::config(format!(
                "sprite size {} leaves no room inside circle radius {}",
                self.sprite_size,
                self.circle_radius()
            )));
        }
        if self.sub_steps_per_frame == 0 {
            return Err(ReelError::config("sub_steps_per_frame must be at least 1"));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ReelError::config(format!("speed must be positive, got {}", self.speed)));
        }
        // One sub-step must not carry the sprite across its free room in the circle
        let room = self.circle_radius() as f32 - self.sprite_half();
        if self.sub_step_distance() >= room {
            return Err(ReelError::config(format!(
                "sub-step travel {} px must be below the {} px of room inside the circle",
                self.sub_step_distance(),
                room
            )));
        }
        if !(0.0..90.0).contains(&self.jitter_degrees) {
            return Err(ReelError::config(format!(
                "jitter_degrees must be in [0, 90), got {}",
                self.jitter_degrees
            )));
        }
        if self.return_min_steps == 0 || self.return_min_steps > self.return_max_steps {
            return Err(ReelError::config(format!(
                "return steps must satisfy 1 <= min <= max, got [{}, {}]",
                self.return_min_steps, self.return_max_steps
            )));
        }
        if self.frame_duration_ms == 0 || self.frame_duration_ms > u16::MAX as u32 {
            return Err(ReelError::config(format!(
                "frame_duration_ms must be in [1, {}], got {}",
                u16::MAX,
                self.frame_duration_ms
            )));
        }
        if self.max_bounce_frames == 0 {
            return Err(ReelError::config("max_bounce_frames must be at least 1"));
        }
        Ok(())
    }

    /// Bounding circle radius (integer half of the diameter)
    #[inline]
    pub fn circle_radius(&self) -> u32 {
        self.circle_diameter / 2
    }

    #[inline]
    pub fn canvas_center(&self) -> Vec2 {
        Vec2::splat(self.canvas_size as f32 / 2.0)
    }

    /// Half the sprite edge, the radius of its bounding circle in collisions
    #[inline]
    pub fn sprite_half(&self) -> f32 {
        self.sprite_size as f32 / 2.0
    }

    /// Distance the sprite covers in one physics sub-step
    #[inline]
    pub fn sub_step_distance(&self) -> f32 {
        self.speed / self.sub_steps_per_frame as f32
    }
}
