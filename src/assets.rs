//! Sprite image loading

use std::path::Path;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::error::{ReelError, ReelResult};

/// Load the sprite image and resize it to `size x size`
///
/// Any decode or read failure is an asset error; there is nothing to render
/// without the sprite.
pub fn load_sprite_image(path: &Path, size: u32) -> ReelResult<RgbaImage> {
    let img = image::open(path).map_err(|err| {
        ReelError::asset(format!("failed to load sprite {}: {}", path.display(), err))
    })?;
    let rgba = img.to_rgba8();
    log::debug!(
        "Loaded sprite {} ({}x{}), resizing to {}",
        path.display(),
        rgba.width(),
        rgba.height(),
        size
    );
    Ok(imageops::resize(&rgba, size, size, FilterType::Lanczos3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_loads_and_resizes() {
        let path =
            std::env::temp_dir().join(format!("bounce_reel_sprite_{}.png", std::process::id()));
        RgbaImage::from_pixel(20, 10, Rgba([0, 255, 0, 255]))
            .save(&path)
            .unwrap();
        let sprite = load_sprite_image(&path, 8).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(sprite.dimensions(), (8, 8));
        assert!(sprite.get_pixel(4, 4)[1] >= 250);
    }

    #[test]
    fn test_missing_file_is_asset_error() {
        let result = load_sprite_image(Path::new("/nonexistent/bounce_reel_sprite.png"), 8);
        assert!(matches!(result, Err(ReelError::Asset(_))));
    }

    #[test]
    fn test_corrupt_file_is_asset_error() {
        let path =
            std::env::temp_dir().join(format!("bounce_reel_corrupt_{}.png", std::process::id()));
        std::fs::write(&path, b"not an image").unwrap();
        let result = load_sprite_image(&path, 8);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ReelError::Asset(_))));
    }
}
