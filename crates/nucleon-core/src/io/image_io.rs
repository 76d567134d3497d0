use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::Result;

/// Save an 8-bit RGB rendering as PNG.
pub fn save_rgb_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
