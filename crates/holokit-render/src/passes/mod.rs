//! Procedural pass kinds.
//!
//! Every kind is a pure function of a [`PassInput`] returning a straight-alpha
//! contribution whose alpha is the blend weight. All weights scale linearly
//! with `intensity`, so zero intensity leaves the raster untouched.
//!
//! Coordinates: `uv` is in [0, 1]² with y growing downwards, `aspect` is
//! width / height of the region being shaded. Lattice-based patterns divide
//! `v` by `aspect` so their cells stay square on non-square cards.

mod foil;
mod glitter;
mod sweep;
mod texture;

use holokit_core::math::sanitize_unit;
use holokit_core::{Color, Point2D, TiltVector};

use crate::params::PassExtras;

/// Per-pixel input to a pass.
#[derive(Debug, Clone, Copy)]
pub struct PassInput {
    /// Pixel center on the whole surface.
    pub uv: Point2D,
    /// Pixel center inside the pass window; equals `uv` for unwindowed passes.
    pub local: Point2D,
    pub tilt: TiltVector,
    /// Seconds since attach.
    pub time: f32,
    /// This pass's intensity in [0, 1].
    pub intensity: f32,
    /// Surface width / height.
    pub aspect: f32,
    /// Window width / height in pixels; equals `aspect` when unwindowed.
    pub local_aspect: f32,
    /// The accumulated pixel the pass lands on.
    pub dst: Color,
}

/// The closed set of procedural effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassKind {
    /// Diagonal rainbow foil rotating with tilt.
    Foil { bands: f32, saturation: f32 },
    /// Foil whose hue also follows the luminance underneath.
    BlendedHolo { saturation: f32 },
    /// Inverted foil with a tilt-tracking shine streak.
    ReverseHolo { foil: f32 },
    /// Vertical rainbow beams.
    RegularHolo { beams: f32 },
    /// Nebula noise with a rainbow gradient and a sparse star field.
    /// `star_density` is the fraction of lattice cells holding a star.
    CosmosHolo { star_density: f32 },
    /// Rainbow glitter weighted by the luminance underneath.
    RainbowRare { density: f32 },
    /// Diagonal holographic stripes.
    PokemonV { stripes: f32 },
    /// Broad low-contrast gradient over value-noise grain.
    VMax { grain: f32 },
    /// V-shaped band inside a radial fade.
    VStar,
    /// Criss-cross diamond lattice.
    RadiantHolo { cells: f32 },
    /// Radial rays around a tilt-shifted center.
    Starburst { rays: f32 },
    /// Radial highlight following tilt.
    Glare,
    /// Straight highlight band swept by tilt and drifting with time.
    Sweep {
        width: f32,
        angle_deg: f32,
        drift: f32,
        tint: Color,
    },
    /// Metallic sun pillar: a vertical and a weaker horizontal light shaft.
    SunPillar,
    /// Round glitter points, `density` cells across the width.
    Glitter { density: f32, threshold: f32 },
    /// Four-pointed sparkles, `density` cells across the window.
    Sparkle { density: f32 },
    /// Gold shimmer with dense glitter.
    SecretGold { density: f32 },
    /// Metallic multi-tone shimmer with glitter.
    AmazingRare { density: f32 },
    /// Icy tint with twinkling stars. `star_density` is a cell fraction.
    Frozen { star_density: f32 },
    /// Two-color sky with falling flakes.
    Snowfall { primary: Color, secondary: Color },
    /// Tilt-independent diagonal hatching.
    Crosshatch { frequency: f32 },
}

const MAX_CELLS: f32 = 400.0;

fn cells(d: f32) -> f32 {
    if d.is_finite() {
        d.clamp(1.0, MAX_CELLS)
    } else {
        1.0
    }
}

impl PassKind {
    /// Short machine name, used in logs and pipeline listings.
    pub fn name(&self) -> &'static str {
        match self {
            PassKind::Foil { .. } => "foil",
            PassKind::BlendedHolo { .. } => "blended-holo",
            PassKind::ReverseHolo { .. } => "reverse-holo",
            PassKind::RegularHolo { .. } => "regular-holo",
            PassKind::CosmosHolo { .. } => "cosmos-holo",
            PassKind::RainbowRare { .. } => "rainbow-rare",
            PassKind::PokemonV { .. } => "pokemon-v",
            PassKind::VMax { .. } => "vmax",
            PassKind::VStar => "vstar",
            PassKind::RadiantHolo { .. } => "radiant-holo",
            PassKind::Starburst { .. } => "starburst",
            PassKind::Glare => "glare",
            PassKind::Sweep { .. } => "sweep",
            PassKind::SunPillar => "sun-pillar",
            PassKind::Glitter { .. } => "glitter",
            PassKind::Sparkle { .. } => "sparkle",
            PassKind::SecretGold { .. } => "secret-gold",
            PassKind::AmazingRare { .. } => "amazing-rare",
            PassKind::Frozen { .. } => "frozen",
            PassKind::Snowfall { .. } => "snowfall",
            PassKind::Crosshatch { .. } => "crosshatch",
        }
    }

    /// Apply caller extras and clamp uniforms into their usable ranges.
    pub fn resolved(&self, extras: &PassExtras) -> PassKind {
        let density = |d: f32| cells(extras.density.unwrap_or(d));
        let fraction = |d: f32| sanitize_unit(extras.density.unwrap_or(d));
        match *self {
            PassKind::CosmosHolo { star_density } => PassKind::CosmosHolo {
                star_density: fraction(star_density),
            },
            PassKind::RainbowRare { density: d } => PassKind::RainbowRare { density: density(d) },
            PassKind::Glitter { density: d, threshold } => PassKind::Glitter {
                density: density(d),
                threshold: sanitize_unit(threshold),
            },
            PassKind::Sparkle { density: d } => PassKind::Sparkle { density: density(d) },
            PassKind::SecretGold { density: d } => PassKind::SecretGold { density: density(d) },
            PassKind::AmazingRare { density: d } => PassKind::AmazingRare { density: density(d) },
            PassKind::Frozen { star_density } => PassKind::Frozen {
                star_density: fraction(star_density),
            },
            PassKind::Snowfall { primary, secondary } => PassKind::Snowfall {
                primary: extras.primary.unwrap_or(primary),
                secondary: extras.secondary.unwrap_or(secondary),
            },
            PassKind::Sweep {
                width,
                angle_deg,
                drift,
                tint,
            } => PassKind::Sweep {
                width: width.max(1e-3),
                angle_deg,
                drift,
                tint: extras.primary.unwrap_or(tint),
            },
            other => other,
        }
    }

    /// Evaluate one pixel.
    pub fn evaluate(&self, input: &PassInput) -> Color {
        match *self {
            PassKind::Foil { bands, saturation } => foil::foil(input, bands, saturation),
            PassKind::BlendedHolo { saturation } => foil::blended_holo(input, saturation),
            PassKind::ReverseHolo { foil } => foil::reverse_holo(input, foil),
            PassKind::RegularHolo { beams } => foil::regular_holo(input, beams),
            PassKind::CosmosHolo { star_density } => glitter::cosmos_holo(input, star_density),
            PassKind::RainbowRare { density } => glitter::rainbow_rare(input, density),
            PassKind::PokemonV { stripes } => foil::pokemon_v(input, stripes),
            PassKind::VMax { grain } => texture::vmax(input, grain),
            PassKind::VStar => foil::vstar(input),
            PassKind::RadiantHolo { cells } => foil::radiant_holo(input, cells),
            PassKind::Starburst { rays } => foil::starburst(input, rays),
            PassKind::Glare => sweep::glare(input),
            PassKind::Sweep {
                width,
                angle_deg,
                drift,
                tint,
            } => sweep::sweep(input, width, angle_deg, drift, tint),
            PassKind::SunPillar => sweep::sun_pillar(input),
            PassKind::Glitter { density, threshold } => glitter::glitter(input, density, threshold),
            PassKind::Sparkle { density } => glitter::sparkle(input, density),
            PassKind::SecretGold { density } => glitter::secret_gold(input, density),
            PassKind::AmazingRare { density } => glitter::amazing_rare(input, density),
            PassKind::Frozen { star_density } => glitter::frozen(input, star_density),
            PassKind::Snowfall { primary, secondary } => glitter::snowfall(input, primary, secondary),
            PassKind::Crosshatch { frequency } => texture::crosshatch(input, frequency),
        }
    }
}

/// Fully saturated-value color for a hue in turns.
fn hue(h: f32, saturation: f32) -> Color {
    Color::from_hsv(h, saturation, 1.0)
}

/// Attach a clamped blend weight.
fn contribution(color: Color, weight: f32) -> Color {
    color.with_alpha(sanitize_unit(weight))
}
