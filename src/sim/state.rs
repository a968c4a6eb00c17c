//! Simulation state and outputs
//!
//! `SimState` is owned by the simulator and never shared; the position log
//! is the only thing handed on to rendering.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::sprite_origin;
use crate::polar_to_cartesian;
use crate::settings::ReelConfig;

/// Simulation phase. Only ever advances `Bouncing -> Returning -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Chaotic motion inside the circle
    Bouncing,
    /// Straight glide back to the center
    Returning,
    /// Nothing left to emit
    Done,
}

impl Phase {
    /// The phase that follows this one (`Done` is terminal)
    pub fn next(self) -> Self {
        match self {
            Phase::Bouncing => Phase::Returning,
            Phase::Returning | Phase::Done => Phase::Done,
        }
    }
}

/// Why the bounce phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Enough bounces, and already heading toward the center
    Aligned,
    /// Frame cap reached before the alignment condition held
    Forced,
}

/// Mutable simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    /// Sprite top-left corner
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    pub bounce_count: u32,
    pub phase: Phase,
}

impl SimState {
    /// Sprite centered on the canvas, heading in a random direction at `speed`
    pub fn launch<R: Rng + ?Sized>(config: &ReelConfig, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        Self {
            position: sprite_origin(config.canvas_center(), config.sprite_half()),
            velocity: polar_to_cartesian(config.speed, angle),
            bounce_count: 0,
            phase: Phase::Bouncing,
        }
    }

    /// Move to the next phase
    pub fn advance_phase(&mut self) {
        self.phase = self.phase.next();
    }
}

/// Sprite positions, one per rendered frame, in playback order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionLog {
    positions: Vec<Vec2>,
}

impl PositionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, position: Vec2) {
        self.positions.push(position);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec2> {
        self.positions.iter()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.positions.last().copied()
    }
}

impl FromIterator<Vec2> for PositionLog {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Completed simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub positions: PositionLog,
    /// Bounces during the bouncing phase
    pub bounce_count: u32,
    /// Frames logged while bouncing (the rest are the return glide)
    pub bounce_frames: u32,
    /// Frames in the return glide
    pub return_steps: u32,
    pub termination: Termination,
}

impl Trajectory {
    /// Bouncing-phase positions
    pub fn bounce_positions(&self) -> &[Vec2] {
        &self.positions.as_slice()[..self.bounce_frames as usize]
    }

    /// Return-glide positions
    pub fn return_positions(&self) -> &[Vec2] {
        &self.positions.as_slice()[self.bounce_frames as usize..]
    }
}
