//! Compositing surface.
//!
//! Card content is a small declarative tree. The surface rasterizes it once
//! per frame into a single straight-alpha buffer and clips the card outline,
//! so effect passes never see the tree itself.

use std::sync::Arc;

use holokit_core::{Color, FrameBuffer, Size2D, WindowRect};

use crate::image_io::resize_exact;

const MIN_SCALE: f32 = 0.25;
const MAX_SCALE: f32 = 4.0;

/// One node of card content. Rects are normalized to the card bounds and
/// lengths are in surface points.
#[derive(Debug, Clone, PartialEq)]
pub enum CardContent {
    /// Full-card gradient from the top-leading to the bottom-trailing corner.
    Gradient { stops: Vec<Color> },
    /// Solid rounded panel.
    Panel {
        rect: WindowRect,
        color: Color,
        corner_radius: f32,
    },
    /// Image stretched to fill `rect`.
    Image {
        rect: WindowRect,
        image: Arc<FrameBuffer>,
    },
    /// Ring just inside the card outline.
    Border { width: f32, color: Color },
    /// Children drawn in order, later ones on top.
    Stack(Vec<CardContent>),
}

impl CardContent {
    pub fn gradient(stops: &[Color]) -> Self {
        CardContent::Gradient {
            stops: stops.to_vec(),
        }
    }

    pub fn panel(rect: WindowRect, color: Color, corner_radius: f32) -> Self {
        CardContent::Panel {
            rect,
            color,
            corner_radius,
        }
    }

    pub fn image(rect: WindowRect, image: Arc<FrameBuffer>) -> Self {
        CardContent::Image { rect, image }
    }

    pub fn border(width: f32, color: Color) -> Self {
        CardContent::Border { width, color }
    }
}

/// The raster every pass of a card operates on.
#[derive(Debug, Clone)]
pub struct CompositingSurface {
    size: Size2D,
    scale: f32,
    corner_radius: f32,
    content: CardContent,
}

impl CompositingSurface {
    pub fn new(size: Size2D, content: CardContent) -> Self {
        Self {
            size,
            scale: 1.0,
            corner_radius: 0.0,
            content,
        }
    }

    /// Raster pixels per surface point, clamped to [0.25, 4].
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = if scale.is_finite() {
            scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            1.0
        };
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        self
    }

    pub fn size(&self) -> Size2D {
        self.size
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn content(&self) -> &CardContent {
        &self.content
    }

    /// Raster dimensions. Zero in both axes when the surface size is not
    /// renderable; huge sizes saturate and are rejected by [`Self::flatten`].
    pub fn pixel_size(&self) -> (u32, u32) {
        if !self.size.is_renderable() {
            return (0, 0);
        }
        let w = (self.size.width * self.scale).round().max(1.0) as u32;
        let h = (self.size.height * self.scale).round().max(1.0) as u32;
        (w, h)
    }

    /// Rasterize the content tree and clip to the card outline.
    pub fn flatten(&self) -> FrameBuffer {
        let (w, h) = self.pixel_size();
        let mut fb = match FrameBuffer::try_new(w, h) {
            Ok(fb) => fb,
            Err(e) => {
                tracing::warn!("not flattening surface: {}", e);
                return FrameBuffer::new(0, 0);
            }
        };
        if fb.is_empty() {
            return fb;
        }
        self.draw(&mut fb, &self.content);
        fb.clip_rounded_rect(self.corner_radius * self.scale);
        fb
    }

    fn draw(&self, fb: &mut FrameBuffer, node: &CardContent) {
        match node {
            CardContent::Gradient { stops } => {
                let layer = FrameBuffer::diagonal_gradient(fb.width, fb.height, stops);
                fb.composite_over(&layer, 0, 0);
            }
            CardContent::Panel {
                rect,
                color,
                corner_radius,
            } => {
                if let Some((x, y, w, h)) = pixel_rect(fb, rect) {
                    let mut patch = FrameBuffer::solid(w, h, color);
                    patch.clip_rounded_rect(corner_radius * self.scale);
                    fb.composite_over(&patch, x, y);
                }
            }
            CardContent::Image { rect, image } => {
                if let Some((x, y, w, h)) = pixel_rect(fb, rect) {
                    fb.composite_over(&resize_exact(image, w, h), x, y);
                }
            }
            CardContent::Border { width, color } => {
                let ring = border_ring(
                    fb.width,
                    fb.height,
                    self.corner_radius * self.scale,
                    width * self.scale,
                    color,
                );
                fb.composite_over(&ring, 0, 0);
            }
            CardContent::Stack(children) => {
                for child in children {
                    self.draw(fb, child);
                }
            }
        }
    }
}

/// Snap a normalized rect to whole pixels. `None` when nothing is covered.
fn pixel_rect(fb: &FrameBuffer, rect: &WindowRect) -> Option<(i32, i32, u32, u32)> {
    let r = rect.sanitized();
    let (fw, fh) = (fb.width as f32, fb.height as f32);
    let x0 = (r.x * fw).round();
    let y0 = (r.y * fh).round();
    let x1 = ((r.x + r.w) * fw).round();
    let y1 = ((r.y + r.h) * fh).round();
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32))
}

/// A ring `width` pixels thick following the inside of a rounded rectangle
/// that covers the whole raster.
fn border_ring(width: u32, height: u32, radius: f32, thickness: f32, color: &Color) -> FrameBuffer {
    let mut ring = FrameBuffer::new(width, height);
    if thickness <= 0.0 || !thickness.is_finite() {
        return ring;
    }
    let (w, h) = (width as f32, height as f32);
    let r = radius.max(0.0).min(w * 0.5).min(h * 0.5);
    let (hx, hy) = (w * 0.5, h * 0.5);
    for y in 0..ring.height {
        for x in 0..ring.width {
            // Signed distance to the rounded outline, negative inside.
            let qx = (x as f32 + 0.5 - hx).abs() - (hx - r);
            let qy = (y as f32 + 0.5 - hy).abs() - (hy - r);
            let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
            let sdf = outside + qx.max(qy).min(0.0) - r;
            let coverage = (thickness + sdf + 0.5).clamp(0.0, 1.0);
            if coverage > 0.0 {
                ring.set_pixel(x, y, color.with_alpha(color.a * coverage).to_rgba8());
            }
        }
    }
    ring
}
