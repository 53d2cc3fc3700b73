//! The closed card variant catalog.
//!
//! Every variant maps to one static [`CatalogEntry`] through an exhaustive
//! match, so adding a variant without an entry does not compile. Two
//! families live here: the curated multi-pass hologram cards and the
//! single-effect special shaders.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use holokit_core::{BlendMode, Color, FrameBuffer, HoloError, Size2D, WindowRect};

use crate::params::{EffectParams, PassExtras};
use crate::pass::ShaderPass;
use crate::passes::PassKind;
use crate::pipeline::EffectPipeline;
use crate::surface::{CardContent, CompositingSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardVariant {
    CardOne,
    CardTwo,
    CardThree,
    CardFour,
    CardFive,
    CardSix,
    BasicGlare,
    RegularHolo,
    ReverseHolo,
    CosmosHolo,
    RainbowRare,
    ShinyRare,
    PokemonV,
    VMax,
    VStar,
    SecretGold,
    RadiantHolo,
    AmazingRare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantFamily {
    /// Curated multi-pass composites.
    Hologram,
    /// One primary effect each.
    Special,
}

impl fmt::Display for VariantFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantFamily::Hologram => write!(f, "hologram"),
            VariantFamily::Special => write!(f, "special"),
        }
    }
}

/// Card size and corner rounding in points, plus how many degrees the card
/// turns per unit of tilt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardGeometry {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub rotation_multiplier: f32,
}

impl CardGeometry {
    pub const DEFAULT_CORNER_RADIUS: f32 = 16.0;
    pub const DEFAULT_ROTATION_MULTIPLIER: f32 = 15.0;

    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            corner_radius: Self::DEFAULT_CORNER_RADIUS,
            rotation_multiplier: Self::DEFAULT_ROTATION_MULTIPLIER,
        }
    }

    pub const fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub const fn with_rotation_multiplier(mut self, multiplier: f32) -> Self {
        self.rotation_multiplier = multiplier;
        self
    }

    pub fn size(&self) -> Size2D {
        Size2D::new(self.width, self.height)
    }
}

/// Everything a variant brings besides its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariantDefaults {
    pub geometry: CardGeometry,
    pub shadow_color: Color,
    /// Background gradient stops, top-leading to bottom-trailing.
    pub palette: &'static [Color],
    pub intensity: f32,
    /// Where artwork sits on the card.
    pub artwork_window: WindowRect,
    #[serde(skip)]
    pub extras: PassExtras,
}

impl VariantDefaults {
    /// Parameters for a level, freshly attached card at its default size.
    pub fn params(&self) -> EffectParams {
        EffectParams::new(self.geometry.size())
            .with_intensity(self.intensity)
            .with_extras(self.extras)
    }
}

struct CatalogEntry {
    id: &'static str,
    display_name: &'static str,
    description: &'static str,
    family: VariantFamily,
    defaults: VariantDefaults,
    template: fn() -> Vec<ShaderPass>,
}

const NO_EXTRAS: PassExtras = PassExtras {
    primary: None,
    secondary: None,
    density: None,
    window: None,
};

const ARTWORK: WindowRect = WindowRect::new(0.06, 0.1, 0.88, 0.45);
const CARD_FIVE_ARTWORK: WindowRect = WindowRect::new(0.04, 0.11, 0.92, 0.44);
const CARD_SIX_ARTWORK: WindowRect = WindowRect::new(0.04, 0.11, 0.96, 0.55);

const SPECIAL_GEOMETRY: CardGeometry = CardGeometry::new(260.0, 380.0);
const SHORT_GEOMETRY: CardGeometry = CardGeometry::new(260.0, 364.0).with_rotation_multiplier(12.0);

const AMBER: Color = Color::rgb(1.0, 0.85, 0.2);

const fn special(
    id: &'static str,
    display_name: &'static str,
    description: &'static str,
    shadow_color: Color,
    palette: &'static [Color],
    intensity: f32,
    template: fn() -> Vec<ShaderPass>,
) -> CatalogEntry {
    CatalogEntry {
        id,
        display_name,
        description,
        family: VariantFamily::Special,
        defaults: VariantDefaults {
            geometry: SPECIAL_GEOMETRY,
            shadow_color,
            palette,
            intensity,
            artwork_window: ARTWORK,
            extras: NO_EXTRAS,
        },
        template,
    }
}

const CARD_ONE: CatalogEntry = CatalogEntry {
    id: "cardOne",
    display_name: "Charizard",
    description: "Stage 2 foil card with glitter and a sweeping shine",
    family: VariantFamily::Hologram,
    defaults: VariantDefaults {
        geometry: CardGeometry::new(260.0, 380.0).with_rotation_multiplier(12.0),
        shadow_color: Color::ORANGE,
        palette: &[
            Color::rgb(0.95, 0.85, 0.5),
            Color::rgb(0.9, 0.75, 0.4),
            Color::rgb(0.85, 0.7, 0.35),
        ],
        intensity: 1.0,
        artwork_window: ARTWORK,
        extras: NO_EXTRAS,
    },
    template: foil_glitter_sweep,
};

const CARD_TWO: CatalogEntry = CatalogEntry {
    id: "cardTwo",
    display_name: "Ultra Rare",
    description: "Secret rare holographic on a sunset gradient",
    family: VariantFamily::Hologram,
    defaults: VariantDefaults {
        geometry: CardGeometry::new(280.0, 400.0).with_corner_radius(20.0),
        shadow_color: Color::ORANGE,
        palette: &[Color::PINK, Color::PURPLE, Color::rgb(0.0, 0.48, 1.0), Color::ORANGE],
        intensity: 1.0,
        artwork_window: ARTWORK,
        extras: NO_EXTRAS,
    },
    template: foil_glitter_sweep,
};

const CARD_THREE: CatalogEntry = CatalogEntry {
    id: "cardThree",
    display_name: "Starlight",
    description: "Basic card with full-bleed foil over a purple field",
    family: VariantFamily::Hologram,
    defaults: VariantDefaults {
        geometry: CardGeometry::new(280.0, 392.0),
        shadow_color: Color::PURPLE,
        palette: &[Color::PURPLE, Color::PINK, Color::rgba(0.69, 0.32, 0.87, 0.8)],
        intensity: 1.0,
        artwork_window: ARTWORK,
        extras: NO_EXTRAS,
    },
    template: foil_glitter_sweep,
};

const CARD_FOUR: CatalogEntry = CatalogEntry {
    id: "cardFour",
    display_name: "Golden Burst",
    description: "Starburst rays with a shine band and fine glitter",
    family: VariantFamily::Hologram,
    defaults: VariantDefaults {
        geometry: SHORT_GEOMETRY,
        shadow_color: Color::YELLOW,
        palette: &[
            AMBER,
            Color::rgba(1.0, 0.85, 0.2, 0.9),
            Color::rgba(1.0, 0.7, 0.0, 0.7),
        ],
        intensity: 1.0,
        artwork_window: ARTWORK,
        extras: NO_EXTRAS,
    },
    template: starburst_sweep_glitter,
};

const CARD_FIVE: CatalogEntry = CatalogEntry {
    id: "cardFive",
    display_name: "Blended Holo",
    description: "Luminance-blended holo with sparkles on the artwork",
    family: VariantFamily::Hologram,
    defaults: VariantDefaults {
        geometry: SHORT_GEOMETRY,
        shadow_color: Color::YELLOW,
        palette: &[AMBER, Color::rgba(1.0, 0.85, 0.2, 0.95), Color::rgb(1.0, 0.7, 0.0)],
        intensity: 1.0,
        artwork_window: CARD_FIVE_ARTWORK,
        extras: NO_EXTRAS,
    },
    template: blended_sparkle_sweep,
};

const CARD_SIX: CatalogEntry = CatalogEntry {
    id: "cardSix",
    display_name: "Reverse Trainer",
    description: "Reverse holo, sparkles and crosshatch confined to the artwork",
    family: VariantFamily::Hologram,
    defaults: VariantDefaults {
        geometry: SHORT_GEOMETRY,
        shadow_color: Color::YELLOW,
        palette: &[
            Color::rgb(0.95, 0.9, 0.6),
            Color::rgb(0.92, 0.85, 0.5),
            Color::rgb(0.88, 0.8, 0.45),
        ],
        intensity: 1.0,
        artwork_window: CARD_SIX_ARTWORK,
        extras: NO_EXTRAS,
    },
    template: windowed_reverse_holo,
};

const BASIC_GLARE: CatalogEntry = special(
    "basicGlare",
    "Basic Glare",
    "Simple radial glare following tilt position",
    Color::WHITE,
    &[
        Color::rgb(0.95, 0.9, 0.8),
        Color::rgb(0.9, 0.85, 0.75),
        Color::rgb(0.85, 0.8, 0.7),
    ],
    0.8,
    || vec![screen(PassKind::Glare)],
);

const REGULAR_HOLO: CatalogEntry = special(
    "regularHolo",
    "Regular Holo",
    "Rainbow vertical beams that shift with tilt",
    Color::CYAN,
    &[
        Color::rgb(0.15, 0.2, 0.35),
        Color::rgb(0.1, 0.15, 0.3),
        Color::rgb(0.12, 0.18, 0.32),
    ],
    0.7,
    || vec![screen(PassKind::RegularHolo { beams: 6.0 })],
);

const REVERSE_HOLO: CatalogEntry = special(
    "reverseHolo",
    "Reverse Holo",
    "Inverted foil effect with shine overlay",
    Color::PURPLE,
    &[
        Color::rgb(0.25, 0.2, 0.35),
        Color::rgb(0.2, 0.15, 0.3),
        Color::rgb(0.22, 0.18, 0.32),
    ],
    0.65,
    || vec![screen(PassKind::ReverseHolo { foil: 1.0 })],
);

const COSMOS_HOLO: CatalogEntry = special(
    "cosmosHolo",
    "Cosmos Holo",
    "Galaxy background with rainbow gradient",
    Color::rgb(0.0, 0.48, 1.0),
    &[
        Color::rgb(0.05, 0.05, 0.15),
        Color::rgb(0.08, 0.08, 0.2),
        Color::rgb(0.03, 0.03, 0.12),
    ],
    0.7,
    || vec![screen(PassKind::CosmosHolo { star_density: 0.04 })],
);

const RAINBOW_RARE: CatalogEntry = special(
    "rainbowRare",
    "Rainbow Rare",
    "Glittery rainbow with luminosity blending",
    Color::PINK,
    &[
        Color::rgb(0.3, 0.2, 0.4),
        Color::rgb(0.25, 0.15, 0.35),
        Color::rgb(0.35, 0.2, 0.4),
    ],
    0.75,
    || vec![screen(PassKind::RainbowRare { density: 120.0 })],
);

const SHINY_RARE: CatalogEntry = special(
    "shinyRare",
    "Shiny Rare",
    "Metallic sun-pillar effect with crosshatch",
    Color::YELLOW,
    &[
        Color::rgb(0.2, 0.2, 0.25),
        Color::rgb(0.15, 0.15, 0.2),
        Color::rgb(0.18, 0.18, 0.22),
    ],
    0.8,
    || {
        vec![
            screen(PassKind::SunPillar),
            ShaderPass::new(PassKind::Crosshatch { frequency: 60.0 }, BlendMode::Normal),
        ]
    },
);

const POKEMON_V: CatalogEntry = special(
    "pokemonV",
    "Pokemon V",
    "Diagonal holographic lines creating depth",
    Color::RED,
    &[
        Color::rgb(0.3, 0.1, 0.15),
        Color::rgb(0.25, 0.08, 0.12),
        Color::rgb(0.35, 0.12, 0.18),
    ],
    0.7,
    || vec![screen(PassKind::PokemonV { stripes: 8.0 })],
);

const V_MAX: CatalogEntry = special(
    "vMax",
    "VMax",
    "Large-scale subtle gradient with texture",
    Color::ORANGE,
    &[
        Color::rgb(0.35, 0.25, 0.15),
        Color::rgb(0.3, 0.2, 0.1),
        Color::rgb(0.4, 0.28, 0.18),
    ],
    0.65,
    || vec![screen(PassKind::VMax { grain: 36.0 })],
);

const V_STAR: CatalogEntry = special(
    "vStar",
    "VStar",
    "V effect with radial mask fade",
    Color::YELLOW,
    &[
        Color::rgb(0.4, 0.35, 0.2),
        Color::rgb(0.35, 0.3, 0.15),
        Color::rgb(0.45, 0.38, 0.22),
    ],
    0.7,
    || vec![screen(PassKind::VStar)],
);

const SECRET_GOLD: CatalogEntry = special(
    "secretGold",
    "Secret Gold",
    "Shimmering gold glitter overlay",
    Color::YELLOW,
    &[
        Color::rgb(0.5, 0.4, 0.2),
        Color::rgb(0.45, 0.35, 0.15),
        Color::rgb(0.55, 0.42, 0.22),
    ],
    0.85,
    || vec![screen(PassKind::SecretGold { density: 90.0 })],
);

const RADIANT_HOLO: CatalogEntry = special(
    "radiantHolo",
    "Radiant Holo",
    "Criss-cross diamond pattern",
    Color::CYAN,
    &[
        Color::rgb(0.15, 0.25, 0.35),
        Color::rgb(0.1, 0.2, 0.3),
        Color::rgb(0.12, 0.22, 0.32),
    ],
    0.75,
    || vec![screen(PassKind::RadiantHolo { cells: 10.0 })],
);

const AMAZING_RARE: CatalogEntry = special(
    "amazingRare",
    "Amazing Rare",
    "Glittery metallic shimmer effect",
    Color::PURPLE,
    &[
        Color::rgb(0.2, 0.1, 0.3),
        Color::rgb(0.1, 0.1, 0.2),
        Color::rgb(0.15, 0.05, 0.25),
    ],
    0.8,
    || vec![screen(PassKind::AmazingRare { density: 100.0 })],
);

fn screen(kind: PassKind) -> ShaderPass {
    ShaderPass::new(kind, BlendMode::Screen)
}

fn foil_glitter_sweep() -> Vec<ShaderPass> {
    vec![
        screen(PassKind::Foil {
            bands: 1.5,
            saturation: 0.7,
        }),
        ShaderPass::new(
            PassKind::Glitter {
                density: 50.0,
                threshold: 0.82,
            },
            BlendMode::Additive,
        ),
        screen(PassKind::Sweep {
            width: 0.18,
            angle_deg: 60.0,
            drift: 1.0,
            tint: Color::WHITE,
        }),
    ]
}

fn starburst_sweep_glitter() -> Vec<ShaderPass> {
    vec![
        screen(PassKind::Starburst { rays: 12.0 }),
        screen(PassKind::Sweep {
            width: 0.15,
            angle_deg: 45.0,
            drift: 1.0,
            tint: Color::WHITE,
        }),
        ShaderPass::new(
            PassKind::Glitter {
                density: 80.0,
                threshold: 0.85,
            },
            BlendMode::Additive,
        ),
    ]
}

fn blended_sparkle_sweep() -> Vec<ShaderPass> {
    vec![
        screen(PassKind::BlendedHolo { saturation: 0.75 }).with_strength(0.7),
        ShaderPass::new(PassKind::Sparkle { density: 24.0 }, BlendMode::Additive)
            .with_id("artwork-sparkle")
            .windowed(CARD_FIVE_ARTWORK),
        screen(PassKind::Sweep {
            width: 0.2,
            angle_deg: 60.0,
            drift: 1.0,
            tint: Color::WHITE,
        }),
    ]
}

fn windowed_reverse_holo() -> Vec<ShaderPass> {
    vec![
        screen(PassKind::ReverseHolo { foil: 1.0 }).windowed(CARD_SIX_ARTWORK),
        ShaderPass::new(PassKind::Sparkle { density: 24.0 }, BlendMode::Additive).windowed(CARD_SIX_ARTWORK),
        ShaderPass::new(PassKind::Crosshatch { frequency: 40.0 }, BlendMode::Normal).windowed(CARD_SIX_ARTWORK),
    ]
}

impl CardVariant {
    pub const ALL: [CardVariant; 18] = [
        CardVariant::CardOne,
        CardVariant::CardTwo,
        CardVariant::CardThree,
        CardVariant::CardFour,
        CardVariant::CardFive,
        CardVariant::CardSix,
        CardVariant::BasicGlare,
        CardVariant::RegularHolo,
        CardVariant::ReverseHolo,
        CardVariant::CosmosHolo,
        CardVariant::RainbowRare,
        CardVariant::ShinyRare,
        CardVariant::PokemonV,
        CardVariant::VMax,
        CardVariant::VStar,
        CardVariant::SecretGold,
        CardVariant::RadiantHolo,
        CardVariant::AmazingRare,
    ];

    fn entry(&self) -> &'static CatalogEntry {
        match self {
            CardVariant::CardOne => &CARD_ONE,
            CardVariant::CardTwo => &CARD_TWO,
            CardVariant::CardThree => &CARD_THREE,
            CardVariant::CardFour => &CARD_FOUR,
            CardVariant::CardFive => &CARD_FIVE,
            CardVariant::CardSix => &CARD_SIX,
            CardVariant::BasicGlare => &BASIC_GLARE,
            CardVariant::RegularHolo => &REGULAR_HOLO,
            CardVariant::ReverseHolo => &REVERSE_HOLO,
            CardVariant::CosmosHolo => &COSMOS_HOLO,
            CardVariant::RainbowRare => &RAINBOW_RARE,
            CardVariant::ShinyRare => &SHINY_RARE,
            CardVariant::PokemonV => &POKEMON_V,
            CardVariant::VMax => &V_MAX,
            CardVariant::VStar => &V_STAR,
            CardVariant::SecretGold => &SECRET_GOLD,
            CardVariant::RadiantHolo => &RADIANT_HOLO,
            CardVariant::AmazingRare => &AMAZING_RARE,
        }
    }

    /// The camelCase identifier, e.g. `"basicGlare"`.
    pub fn id(&self) -> &'static str {
        self.entry().id
    }

    pub fn display_name(&self) -> &'static str {
        self.entry().display_name
    }

    pub fn description(&self) -> &'static str {
        self.entry().description
    }

    pub fn family(&self) -> VariantFamily {
        self.entry().family
    }

    pub fn defaults(&self) -> VariantDefaults {
        self.entry().defaults
    }

    /// A fresh pipeline built from the variant's template.
    pub fn pipeline(&self) -> EffectPipeline {
        EffectPipeline::new((self.entry().template)())
    }

    /// Default card face: the palette gradient, an artwork slot and a thin
    /// border. Without artwork the slot is a translucent panel.
    pub fn content(&self, artwork: Option<Arc<FrameBuffer>>) -> CardContent {
        let defaults = self.defaults();
        let slot = match artwork {
            Some(image) => CardContent::image(defaults.artwork_window, image),
            None => CardContent::panel(defaults.artwork_window, Color::rgba(1.0, 1.0, 1.0, 0.18), 6.0),
        };
        CardContent::Stack(vec![
            CardContent::gradient(defaults.palette),
            slot,
            CardContent::border(3.0, Color::rgba(1.0, 1.0, 1.0, 0.6)),
        ])
    }

    /// A surface at the variant's default geometry.
    pub fn surface(&self, artwork: Option<Arc<FrameBuffer>>) -> CompositingSurface {
        let geometry = self.defaults().geometry;
        CompositingSurface::new(geometry.size(), self.content(artwork))
            .with_corner_radius(geometry.corner_radius)
    }

    /// Render one frame of this variant's default card face. Caller extras
    /// win over the variant's own.
    pub fn render(&self, params: &EffectParams) -> FrameBuffer {
        let (pipeline, defaults) = resolve(*self);
        let surface = CompositingSurface::new(params.size, self.content(None))
            .with_corner_radius(defaults.geometry.corner_radius);
        let params = params.with_extras(params.extras.or(defaults.extras));
        pipeline.apply(&surface.flatten(), &params)
    }
}

/// Pipeline and defaults for a variant. Total over the closed set.
pub fn resolve(variant: CardVariant) -> (EffectPipeline, VariantDefaults) {
    (variant.pipeline(), variant.defaults())
}

impl fmt::Display for CardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CardVariant {
    type Err = HoloError;

    /// Accepts the exact camelCase id, or a kebab/snake spelling such as
    /// `basic-glare` or `card_one`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(v) = CardVariant::ALL.iter().find(|v| v.id() == s) {
            return Ok(*v);
        }
        if s.contains(['-', '_']) {
            let folded: String = s
                .chars()
                .filter(|c| *c != '-' && *c != '_')
                .map(|c| c.to_ascii_lowercase())
                .collect();
            if let Some(v) = CardVariant::ALL
                .iter()
                .find(|v| v.id().eq_ignore_ascii_case(&folded))
            {
                return Ok(*v);
            }
        }
        Err(HoloError::UnknownVariant(s.to_string()))
    }
}
