use crate::error::{HoloError, HoloResult};
use crate::Color;

/// A card raster as a straight-alpha RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Raw pixel data, 4 bytes per pixel, row-major.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Largest raster edge in pixels.
    pub const MAX_DIMENSION: u32 = 16_384;

    /// Allocate a transparent raster, rejecting edges past
    /// [`FrameBuffer::MAX_DIMENSION`].
    pub fn try_new(width: u32, height: u32) -> HoloResult<Self> {
        let len = (width <= Self::MAX_DIMENSION && height <= Self::MAX_DIMENSION)
            .then(|| (width as usize).checked_mul(height as usize)?.checked_mul(4))
            .flatten()
            .ok_or_else(|| {
                HoloError::InvalidArgument(format!(
                    "raster {}x{} exceeds {} pixels per edge",
                    width,
                    height,
                    Self::MAX_DIMENSION
                ))
            })?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
        })
    }

    /// Transparent raster. Oversized requests degrade to an empty 0x0 buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::try_new(width, height).unwrap_or_else(|_| Self {
            data: Vec::new(),
            width: 0,
            height: 0,
        })
    }

    pub fn solid(width: u32, height: u32, color: &Color) -> Self {
        let mut fb = Self::new(width, height);
        let pixel = color.to_rgba8();
        for px in fb.data.chunks_exact_mut(4) {
            px.copy_from_slice(&pixel);
        }
        fb
    }

    /// Fill with a multi-stop gradient running from the top-leading corner to
    /// the bottom-trailing corner. Stops are evenly spaced.
    pub fn diagonal_gradient(width: u32, height: u32, stops: &[Color]) -> Self {
        let mut fb = Self::new(width, height);
        let Some(first) = stops.first() else {
            return fb;
        };
        let segments = stops.len().saturating_sub(1);
        let w = fb.width.max(1) as f32;
        let h = fb.height.max(1) as f32;
        for y in 0..fb.height {
            for x in 0..fb.width {
                // Project onto the corner-to-corner diagonal.
                let u = (x as f32 + 0.5) / w;
                let v = (y as f32 + 0.5) / h;
                let t = ((u + v) * 0.5).clamp(0.0, 1.0);
                let color = if segments == 0 {
                    *first
                } else {
                    let scaled = t * segments as f32;
                    let i = (scaled.floor() as usize).min(segments - 1);
                    stops[i].lerp(&stops[i + 1], scaled - i as f32)
                };
                fb.set_pixel(x, y, color.to_rgba8());
            }
        }
        fb
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Total byte size of the pixel data.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// True when the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the RGBA value at a pixel coordinate. Returns None if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ])
    }

    /// Set the RGBA value at a pixel coordinate. No-op if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[offset..offset + 4].copy_from_slice(&rgba);
    }

    /// Clear every pixel outside a rounded rectangle covering the whole
    /// buffer. Edge pixels get fractional coverage.
    pub fn clip_rounded_rect(&mut self, radius: f32) {
        let w = self.width as f32;
        let h = self.height as f32;
        let r = radius.max(0.0).min(w * 0.5).min(h * 0.5);
        if r <= 0.0 {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                // Distance from the nearest corner circle center, if the pixel
                // lies inside a corner square.
                let cx = if px < r { r } else if px > w - r { w - r } else { px };
                let cy = if py < r { r } else if py > h - r { h - r } else { py };
                let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                let coverage = (r + 0.5 - dist).clamp(0.0, 1.0);
                if coverage < 1.0 {
                    let offset = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
                    let a = self.data[offset + 3] as f32 * coverage;
                    self.data[offset + 3] = a.round() as u8;
                }
            }
        }
    }

    /// Alpha-composite `src` on top of `self` at position (dx, dy).
    /// Integer math over 4-byte chunks so the inner loop auto-vectorizes.
    pub fn composite_over(&mut self, src: &FrameBuffer, dx: i32, dy: i32) {
        let dst_width = self.width as i32;
        let dst_height = self.height as i32;

        let mut start_y = 0;
        let mut end_y = src.height as i32;
        let mut start_x = 0;
        let mut end_x = src.width as i32;

        if dy < 0 {
            start_y = -dy;
        }
        if dy + end_y > dst_height {
            end_y = dst_height - dy;
        }
        if dx < 0 {
            start_x = -dx;
        }
        if dx + end_x > dst_width {
            end_x = dst_width - dx;
        }

        if start_x >= end_x || start_y >= end_y {
            return;
        }

        let src_stride = (src.width * 4) as usize;
        let dst_stride = (self.width * 4) as usize;

        for sy in start_y..end_y {
            let dst_y = dy + sy;
            let src_row_start = (sy as usize * src_stride) + (start_x as usize * 4);
            let dst_row_start = (dst_y as usize * dst_stride) + ((dx + start_x) as usize * 4);
            let len = (end_x - start_x) as usize * 4;

            let src_slice = &src.data[src_row_start..src_row_start + len];
            let dst_slice = &mut self.data[dst_row_start..dst_row_start + len];

            for (s, d) in src_slice.chunks_exact(4).zip(dst_slice.chunks_exact_mut(4)) {
                let sa = s[3] as u32;
                if sa == 0 {
                    continue;
                }
                if sa == 255 {
                    d.copy_from_slice(s);
                    continue;
                }

                let da = d[3] as u32;
                let inv_sa = 255 - sa;
                let out_a = sa + ((da * inv_sa) / 255);

                if out_a == 0 {
                    continue;
                }

                for c in 0..3 {
                    let v = (s[c] as u32 * sa * 255 + d[c] as u32 * da * inv_sa) / (out_a * 255);
                    d[c] = v as u8;
                }
                d[3] = out_a as u8;
            }
        }
    }
}
