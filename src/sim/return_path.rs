//! Straight, constant-velocity glide back to the circle center

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A planned return glide: `steps` frames, each moving by `step`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPath {
    pub steps: u32,
    pub step: Vec2,
}

impl ReturnPath {
    /// Plan the glide from sprite center `from` to `target`
    ///
    /// The frame count is the distance measured in sub-step lengths, clamped
    /// to `[min_steps, max_steps]`; distance only changes the step size.
    /// `min_steps` must be at least 1.
    pub fn plan(
        from: Vec2,
        target: Vec2,
        sub_step_distance: f32,
        min_steps: u32,
        max_steps: u32,
    ) -> Self {
        let displacement = target - from;
        let raw = (displacement.length() / sub_step_distance).round();
        // Float-to-int casts saturate, NaN becomes 0
        let steps = (raw as u32).clamp(min_steps, max_steps);
        Self {
            steps,
            step: displacement / steps as f32,
        }
    }

    /// Positions visited after `start`, one per frame, ending at the target
    pub fn positions(&self, start: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        (1..=self.steps).map(move |i| start + self.step * i as f32)
    }
}
