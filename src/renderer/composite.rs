//! Per-frame compositing on the CPU
//!
//! Frames are built premultiplied, then converted to straight alpha for the
//! encoder.

use glam::Vec2;
use image::RgbaImage;

use super::sprite::Sprite;

/// A rendered canvas-sized frame (straight RGBA8)
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Composite `sprite` onto a transparent `canvas_size` square canvas
///
/// The top-left corner is `position` truncated toward zero. Parts of the
/// sprite outside the canvas are clipped.
pub fn render_frame(sprite: &Sprite, position: Vec2, canvas_size: u32) -> Frame {
    let mut image = RgbaImage::new(canvas_size, canvas_size);
    let x0 = position.x as i64;
    let y0 = position.y as i64;
    let canvas = canvas_size as i64;
    let size = sprite.size() as i64;

    // Visible sprite columns
    let sx_start = (-x0).clamp(0, size);
    let sx_end = (canvas - x0).clamp(0, size);
    if sx_start < sx_end {
        let buf: &mut [u8] = &mut image;
        for sy in 0..size {
            let cy = y0 + sy;
            if cy < 0 || cy >= canvas {
                continue;
            }
            let src = &sprite.row(sy as u32)[(sx_start * 4) as usize..(sx_end * 4) as usize];
            let dst_start = ((cy * canvas + x0 + sx_start) * 4) as usize;
            let dst = &mut buf[dst_start..dst_start + src.len()];
            over_premul_in_place(dst, src);
        }
        unpremultiply_rgba8_in_place(buf);
    }

    Frame { image }
}

/// Source-over blend of premultiplied `src` onto premultiplied `dst`
pub fn over_premul_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let inv = 255 - u16::from(s[3]);
        for i in 0..4 {
            d[i] = (u16::from(s[i]) + mul_div255(u16::from(d[i]), inv)).min(255) as u8;
        }
    }
}

#[inline]
fn mul_div255(a: u16, b: u16) -> u16 {
    (a * b + 127) / 255
}

/// Scale color channels by alpha (straight -> premultiplied)
pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Divide color channels by alpha (premultiplied -> straight)
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in 0..3 {
            px[c] = ((px[c] as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
