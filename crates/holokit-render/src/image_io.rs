//! Image decoding and encoding at the edges of the engine.
//! Artwork comes in from disk, rendered cards go out as PNG.

use std::path::Path;

use holokit_core::{FrameBuffer, HoloError, HoloResult};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Load an image file and convert it to a FrameBuffer.
pub fn load_image(path: &Path) -> HoloResult<FrameBuffer> {
    let img = image::open(path).map_err(|e| {
        HoloError::asset(
            format!("failed to load image '{}': {}", path.display(), e),
            path,
        )
    })?;
    Ok(from_rgba_image(img.to_rgba8()))
}

/// Write a raster as an RGBA PNG, creating parent directories as needed.
pub fn save_png(fb: &FrameBuffer, path: &Path) -> HoloResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let img = to_rgba_image(fb)?;
    img.save(path)
        .map_err(|e| HoloError::Image(format!("failed to write '{}': {}", path.display(), e)))
}

/// Resample to exactly `width` x `height`, stretching if the aspect ratio
/// differs. Artwork rects are fitted this way by the compositing surface.
pub fn resize_exact(fb: &FrameBuffer, width: u32, height: u32) -> FrameBuffer {
    if fb.width == width && fb.height == height {
        return fb.clone();
    }
    if fb.is_empty() || width == 0 || height == 0 {
        return FrameBuffer::new(width, height);
    }
    match to_rgba_image(fb) {
        Ok(img) => from_rgba_image(imageops::resize(&img, width, height, FilterType::Triangle)),
        Err(_) => FrameBuffer::new(width, height),
    }
}

fn to_rgba_image(fb: &FrameBuffer) -> HoloResult<RgbaImage> {
    RgbaImage::from_raw(fb.width, fb.height, fb.data.clone()).ok_or_else(|| {
        HoloError::Image(format!(
            "pixel data does not match {}x{} RGBA",
            fb.width, fb.height
        ))
    })
}

fn from_rgba_image(img: RgbaImage) -> FrameBuffer {
    let (width, height) = img.dimensions();
    FrameBuffer {
        data: img.into_raw(),
        width,
        height,
    }
}
