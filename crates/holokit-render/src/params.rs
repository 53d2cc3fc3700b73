use holokit_core::math::sanitize_unit;
use holokit_core::{Color, ElapsedTime, Size2D, TiltVector, WindowRect};

/// Optional per-invocation uniforms. Each one, when set, overrides the
/// value baked into the pipeline template for every pass that uses it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassExtras {
    /// First color of a color pair (snowfall sky, sweep tint).
    pub primary: Option<Color>,
    /// Second color of a color pair.
    pub secondary: Option<Color>,
    /// Density scalar, in the units of the pass that reads it.
    pub density: Option<f32>,
    /// Window applied to every windowed pass.
    pub window: Option<WindowRect>,
}

impl PassExtras {
    pub fn with_colors(mut self, primary: Color, secondary: Color) -> Self {
        self.primary = Some(primary);
        self.secondary = Some(secondary);
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_window(mut self, window: WindowRect) -> Self {
        self.window = Some(window);
        self
    }

    /// Fill unset fields from `defaults`.
    pub fn or(self, defaults: PassExtras) -> PassExtras {
        PassExtras {
            primary: self.primary.or(defaults.primary),
            secondary: self.secondary.or(defaults.secondary),
            density: self.density.or(defaults.density),
            window: self.window.or(defaults.window),
        }
    }

    pub fn sanitized(&self) -> PassExtras {
        let color = |c: Color| {
            Color::rgba(
                sanitize_unit(c.r),
                sanitize_unit(c.g),
                sanitize_unit(c.b),
                sanitize_unit(c.a),
            )
        };
        PassExtras {
            primary: self.primary.map(color),
            secondary: self.secondary.map(color),
            density: self.density.filter(|d| d.is_finite()).map(|d| d.max(0.0)),
            window: self.window.map(|w| w.sanitized()),
        }
    }
}

/// Everything one pipeline evaluation reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    pub size: Size2D,
    pub tilt: TiltVector,
    pub time: ElapsedTime,
    pub intensity: f32,
    pub extras: PassExtras,
}

impl EffectParams {
    /// Zero tilt, zero time, full intensity, no extras.
    pub fn new(size: Size2D) -> Self {
        Self {
            size,
            tilt: TiltVector::ZERO,
            time: ElapsedTime::zero(),
            intensity: 1.0,
            extras: PassExtras::default(),
        }
    }

    pub fn with_tilt(mut self, tilt: TiltVector) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_time(mut self, seconds: f64) -> Self {
        self.time = ElapsedTime::from_seconds(seconds);
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_extras(mut self, extras: PassExtras) -> Self {
        self.extras = extras;
        self
    }

    /// Clamp every input into its documented range.
    pub fn sanitized(&self) -> Self {
        Self {
            size: self.size,
            tilt: self.tilt.sanitized(),
            time: ElapsedTime::from_seconds(self.time.as_seconds()),
            intensity: sanitize_unit(self.intensity),
            extras: self.extras.sanitized(),
        }
    }
}
