//! CPU frame rendering
//!
//! Every logged position becomes one canvas-sized frame with the sprite
//! composited at that spot. Frames are independent, so they render in
//! parallel; output order always matches the position log.

pub mod composite;
pub mod sprite;

pub use composite::{Frame, render_frame};
pub use sprite::Sprite;

use rayon::prelude::*;

use crate::sim::PositionLog;

/// Render one frame per logged position, in log order
pub fn render_frames(sprite: &Sprite, positions: &PositionLog, canvas_size: u32) -> Vec<Frame> {
    let frames: Vec<Frame> = positions
        .as_slice()
        .par_iter()
        .map(|&position| render_frame(sprite, position, canvas_size))
        .collect();
    log::info!("Rendered {} frames at {}x{}", frames.len(), canvas_size, canvas_size);
    frames
}
