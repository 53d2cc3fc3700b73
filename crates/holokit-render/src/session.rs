//! Per-visible-card lifecycle.
//!
//! A [`CardSession`] exists while its card is on screen. Attaching starts a
//! fresh clock at zero; each tick reads one tilt snapshot, flattens the
//! surface once and runs the variant's pipeline over it.

use holokit_core::{ElapsedTime, FrameBuffer, FrameClock, Point2D, TiltVector};
use holokit_motion::TiltReader;

use crate::catalog::{CardGeometry, CardVariant, VariantDefaults};
use crate::params::{EffectParams, PassExtras};
use crate::pipeline::EffectPipeline;
use crate::surface::CompositingSurface;

/// Drop shadow travel in points per unit of tilt.
const SHADOW_TRAVEL: f32 = 12.0;

/// How the card container presents a tilted card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    /// Rotation about the horizontal axis, from pitch.
    pub rotation_x_deg: f32,
    /// Rotation about the vertical axis, from roll.
    pub rotation_y_deg: f32,
    /// Shadow displacement in points, opposite the tilt.
    pub shadow_offset: Point2D,
}

impl CardPose {
    pub fn from_tilt(tilt: TiltVector, geometry: &CardGeometry) -> Self {
        let tilt = tilt.sanitized();
        let m = geometry.rotation_multiplier;
        Self {
            rotation_x_deg: tilt.y * m,
            rotation_y_deg: -tilt.x * m,
            shadow_offset: Point2D::new(-tilt.x * SHADOW_TRAVEL, -tilt.y * SHADOW_TRAVEL),
        }
    }
}

pub struct CardSession {
    variant: CardVariant,
    pipeline: EffectPipeline,
    defaults: VariantDefaults,
    surface: CompositingSurface,
    clock: FrameClock,
    tilt: TiltReader,
    intensity: f32,
    extras: PassExtras,
}

impl CardSession {
    /// Bind a variant to a surface and a tilt source. Time starts at zero and
    /// intensity at the variant default.
    pub fn attach(variant: CardVariant, surface: CompositingSurface, tilt: TiltReader) -> Self {
        let pipeline = variant.pipeline();
        let defaults = variant.defaults();
        tracing::debug!(
            "attached {} ({} passes: {})",
            variant,
            pipeline.len(),
            pipeline.pass_ids().join(", ")
        );
        Self {
            variant,
            pipeline,
            defaults,
            surface,
            clock: FrameClock::new(),
            tilt,
            intensity: defaults.intensity,
            extras: PassExtras::default(),
        }
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Extras layered over the variant's own for every frame.
    pub fn with_extras(mut self, extras: PassExtras) -> Self {
        self.extras = extras;
        self
    }

    pub fn variant(&self) -> CardVariant {
        self.variant
    }

    pub fn elapsed(&self) -> ElapsedTime {
        self.clock.elapsed()
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// Advance the clock by `dt` seconds and render one frame.
    pub fn render_frame(&mut self, dt: f64) -> FrameBuffer {
        let time = self.clock.advance(dt);
        let params = EffectParams {
            size: self.surface.size(),
            tilt: self.tilt.snapshot(),
            time,
            intensity: self.intensity,
            extras: self.extras.or(self.defaults.extras),
        };
        let base = self.surface.flatten();
        self.pipeline.apply(&base, &params)
    }

    /// Pose for the current tilt snapshot.
    pub fn pose(&self) -> CardPose {
        CardPose::from_tilt(self.tilt.snapshot(), &self.defaults.geometry)
    }

    /// End the session when the card leaves view.
    pub fn detach(self) {
        tracing::debug!(
            "detached {} after {} frames ({})",
            self.variant,
            self.clock.frames(),
            self.clock.elapsed()
        );
    }
}
