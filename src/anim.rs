//! Animation assembly and encoding
//!
//! Rendered frames get a fixed per-frame delay, infinite looping and a
//! clear-before-draw disposal, then go to an encoder that produces the file
//! bytes. Nothing touches the file system until encoding has succeeded.

use std::path::Path;

use crate::error::{ReelError, ReelResult};
use crate::renderer::Frame;
use crate::settings::ReelConfig;

/// How a player treats the canvas before drawing the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposal {
    /// Reset the frame region to fully transparent
    ClearBeforeDraw,
}

/// Ordered frames plus playback metadata
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<Frame>,
    width: u32,
    height: u32,
    /// Display time of every frame
    pub frame_duration_ms: u32,
    /// Number of plays, 0 = loop forever
    pub loop_count: u32,
    pub disposal: Disposal,
}

impl Animation {
    /// Attach the configured timing to `frames`, looping forever
    pub fn assemble(frames: Vec<Frame>, config: &ReelConfig) -> ReelResult<Self> {
        let Some(first) = frames.first() else {
            return Err(ReelError::encode("animation has no frames"));
        };
        let (width, height) = first.dimensions();
        if let Some(i) = frames.iter().position(|f| f.dimensions() != (width, height)) {
            return Err(ReelError::encode(format!(
                "frame {} is {:?}, expected {}x{}",
                i,
                frames[i].dimensions(),
                width,
                height
            )));
        }

        Ok(Self {
            frames,
            width,
            height,
            frame_duration_ms: config.frame_duration_ms,
            loop_count: 0,
            disposal: Disposal::ClearBeforeDraw,
        })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total playback time of one loop
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.len() as u64 * self.frame_duration_ms as u64
    }
}

/// Turns an assembled animation into file bytes
pub trait AnimationEncoder {
    fn encode(&self, animation: &Animation) -> ReelResult<Vec<u8>>;
}

/// Animated PNG encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct ApngEncoder;

impl AnimationEncoder for ApngEncoder {
    fn encode(&self, animation: &Animation) -> ReelResult<Vec<u8>> {
        let (width, height) = animation.dimensions();
        let delay_ms = u16::try_from(animation.frame_duration_ms).map_err(|_| {
            ReelError::encode(format!(
                "frame duration {} ms does not fit an APNG delay",
                animation.frame_duration_ms
            ))
        })?;
        let dispose_op = match animation.disposal {
            Disposal::ClearBeforeDraw => png::DisposeOp::Background,
        };

        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder
                .set_animated(animation.frames.len() as u32, animation.loop_count)
                .map_err(png_error)?;
            encoder.set_frame_delay(delay_ms, 1000).map_err(png_error)?;
            encoder.set_dispose_op(dispose_op).map_err(png_error)?;
            encoder.set_blend_op(png::BlendOp::Source).map_err(png_error)?;

            let mut writer = encoder.write_header().map_err(png_error)?;
            for frame in &animation.frames {
                writer
                    .write_image_data(frame.image().as_raw())
                    .map_err(png_error)?;
            }
            writer.finish().map_err(png_error)?;
        }

        log::debug!(
            "Encoded {} APNG frames into {} bytes",
            animation.frames.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn png_error(err: png::EncodingError) -> ReelError {
    ReelError::encode(err.to_string())
}

/// Encode fully in memory, then write the file in one go
pub fn save_animation<E: AnimationEncoder>(
    animation: &Animation,
    encoder: &E,
    path: &Path,
) -> ReelResult<usize> {
    let bytes = encoder.encode(animation)?;
    std::fs::write(path, &bytes)?;
    log::info!(
        "Wrote {} frames ({} ms per loop) to {}",
        animation.frames.len(),
        animation.total_duration_ms(),
        path.display()
    );
    Ok(bytes.len())
}
