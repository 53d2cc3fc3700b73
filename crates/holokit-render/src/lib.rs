//! # holokit-render
//!
//! The HoloKit effect engine. A card's content is flattened once per frame
//! by a [`CompositingSurface`], then an [`EffectPipeline`] runs its ordered
//! [`ShaderPass`]es over the raster, each one blending a procedural
//! contribution driven by tilt, time and intensity.
//!
//! Rendering never fails: inputs are clamped and degenerate sizes return the
//! base raster untouched. Errors only arise at the edges (artwork loading,
//! PNG output, parsing variant ids).

pub mod blend;
pub mod catalog;
pub mod image_io;
pub mod noise;
pub mod params;
pub mod pass;
pub mod passes;
pub mod pipeline;
pub mod session;
pub mod surface;

pub use catalog::{resolve, CardGeometry, CardVariant, VariantDefaults, VariantFamily};
pub use params::{EffectParams, PassExtras};
pub use pass::ShaderPass;
pub use passes::PassKind;
pub use pipeline::{BasicShader, EffectPipeline};
pub use session::{CardPose, CardSession};
pub use surface::{CardContent, CompositingSurface};
