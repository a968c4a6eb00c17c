//! The bordered sprite composited into every frame

use image::{Rgba, RgbaImage};

use super::composite::premultiply_rgba8_in_place;
use crate::error::{ReelError, ReelResult};

/// Square sprite with a 1 px border, stored as premultiplied RGBA8
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    size: u32,
    rgba8_premul: Vec<u8>,
}

impl Sprite {
    /// Draw the border over `image` and premultiply it
    ///
    /// The image must already be resized to its final square size.
    pub fn new(mut image: RgbaImage, border: Rgba<u8>) -> ReelResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || width != height {
            return Err(ReelError::asset(format!(
                "sprite must be a non-empty square, got {}x{}",
                width, height
            )));
        }

        draw_border(&mut image, border);
        let mut rgba8_premul = image.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);

        Ok(Self {
            size: width,
            rgba8_premul,
        })
    }

    /// Edge length in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Premultiplied RGBA8 row for sprite row `y`
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.size as usize * 4;
        let start = y as usize * stride;
        &self.rgba8_premul[start..start + stride]
    }
}

/// Replace the outermost ring of pixels with `color`
fn draw_border(image: &mut RgbaImage, color: Rgba<u8>) {
    let last = image.width() - 1;
    for i in 0..=last {
        image.put_pixel(i, 0, color);
        image.put_pixel(i, last, color);
        image.put_pixel(0, i, color);
        image.put_pixel(last, i, color);
    }
}
