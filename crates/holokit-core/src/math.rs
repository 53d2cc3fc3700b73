use serde::{Deserialize, Serialize};

/// Clamp to [0, 1]. NaN maps to 0.
pub fn sanitize_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp to [-1, 1]. NaN maps to 0.
pub fn sanitize_signed_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// A 2D point, used mostly for normalized surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 2D size in surface points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size2D {
    pub width: f32,
    pub height: f32,
}

impl Size2D {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_renderable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Compute the aspect ratio (width / height). Zero for degenerate sizes.
    pub fn aspect_ratio(&self) -> f32 {
        if !self.is_renderable() {
            return 0.0;
        }
        self.width / self.height
    }
}

/// Normalized device tilt. `x` follows roll, `y` follows pitch, both in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltVector {
    pub x: f32,
    pub y: f32,
}

impl TiltVector {
    pub const ZERO: TiltVector = TiltVector { x: 0.0, y: 0.0 };

    /// Build a tilt vector, clamping each component into [-1, 1].
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: sanitize_signed_unit(x),
            y: sanitize_signed_unit(y),
        }
    }

    /// Map a raw device attitude (radians) to a tilt vector.
    ///
    /// Each axis is `clamp(angle / π * 2, -1, 1)`: no deadzone, and a quarter
    /// turn of physical rotation saturates the signal.
    pub fn from_attitude(pitch: f64, roll: f64) -> Self {
        let normalize = |angle: f64| (angle / std::f64::consts::PI * 2.0) as f32;
        Self::new(normalize(roll), normalize(pitch))
    }

    /// Length of the vector, in [0, √2].
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Re-clamp components that may have been assigned directly.
    pub fn sanitized(&self) -> Self {
        Self::new(self.x, self.y)
    }
}

/// A normalized sub-rectangle `{x, y, w, h}` of the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl WindowRect {
    /// The whole surface.
    pub const FULL: WindowRect = WindowRect {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Clamp the rectangle into the unit square. Width and height shrink so
    /// the far edges never exceed 1.
    pub fn sanitized(&self) -> Self {
        let x = sanitize_unit(self.x);
        let y = sanitize_unit(self.y);
        Self {
            x,
            y,
            w: sanitize_unit(self.w).min(1.0 - x),
            h: sanitize_unit(self.h).min(1.0 - y),
        }
    }

    /// Half-open containment: `x <= u < x + w` and `y <= v < y + h`.
    pub fn contains(&self, uv: Point2D) -> bool {
        uv.x >= self.x && uv.x < self.x + self.w && uv.y >= self.y && uv.y < self.y + self.h
    }

    /// Map a surface coordinate into window-local [0, 1] coordinates.
    pub fn local(&self, uv: Point2D) -> Point2D {
        let w = if self.w > 0.0 { self.w } else { 1.0 };
        let h = if self.h > 0.0 { self.h } else { 1.0 };
        Point2D::new((uv.x - self.x) / w, (uv.y - self.y) / h)
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self::FULL
    }
}
