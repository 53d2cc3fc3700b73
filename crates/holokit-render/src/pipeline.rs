use std::sync::Arc;

use holokit_core::math::sanitize_unit;
use holokit_core::{BlendMode, Color, FrameBuffer, Point2D};

use crate::blend::blend_into;
use crate::params::EffectParams;
use crate::pass::ShaderPass;
use crate::passes::{PassInput, PassKind};

/// Stand-alone shaders for borders and backgrounds. These are not card
/// variants; each one becomes a single-pass pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BasicShader {
    Foil { intensity: f32 },
    Glitter { density: f32 },
    Frozen { intensity: f32, star_density: f32 },
    Snowfall { primary: Color, secondary: Color },
}

/// An ordered, immutable list of passes bound to one card.
///
/// Cloning shares the pass list. Passes run strictly in order, each one
/// reading the raster the previous one produced.
#[derive(Debug, Clone)]
pub struct EffectPipeline {
    passes: Arc<[ShaderPass]>,
}

impl EffectPipeline {
    pub fn new(passes: Vec<ShaderPass>) -> Self {
        Self {
            passes: passes.into(),
        }
    }

    pub fn basic(shader: BasicShader) -> Self {
        let pass = match shader {
            BasicShader::Foil { intensity } => ShaderPass::new(
                PassKind::Foil {
                    bands: 1.0,
                    saturation: 0.8,
                },
                BlendMode::Screen,
            )
            .with_strength(intensity),
            BasicShader::Glitter { density } => ShaderPass::new(
                PassKind::Glitter {
                    density,
                    threshold: 0.8,
                },
                BlendMode::Additive,
            ),
            BasicShader::Frozen {
                intensity,
                star_density,
            } => ShaderPass::new(PassKind::Frozen { star_density }, BlendMode::Screen)
                .with_strength(intensity),
            BasicShader::Snowfall { primary, secondary } => {
                ShaderPass::new(PassKind::Snowfall { primary, secondary }, BlendMode::Normal)
            }
        };
        Self::new(vec![pass])
    }

    pub fn passes(&self) -> &[ShaderPass] {
        &self.passes
    }

    pub fn pass_ids(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Compose every pass over `base` and return the result.
    ///
    /// Never fails. Inputs are clamped first; a surface size that is not
    /// strictly positive returns `base` unchanged. Pixel UVs come from the
    /// raster dimensions, the aspect ratio from `params.size`.
    pub fn apply(&self, base: &FrameBuffer, params: &EffectParams) -> FrameBuffer {
        if !(params.intensity.is_finite() && params.tilt.x.is_finite() && params.tilt.y.is_finite()) {
            tracing::warn!("non-finite tilt or intensity, clamping");
        }
        let params = params.sanitized();
        let mut out = base.clone();
        if !params.size.is_renderable() {
            tracing::warn!(
                "degenerate surface size {}x{}, skipping effects",
                params.size.width,
                params.size.height
            );
            return out;
        }
        if out.is_empty() {
            return out;
        }
        for pass in self.passes.iter() {
            apply_pass(&mut out, pass, &params);
        }
        tracing::debug!(
            "applied {} passes at tilt ({:.2}, {:.2}), t={}",
            self.passes.len(),
            params.tilt.x,
            params.tilt.y,
            params.time
        );
        out
    }
}

fn apply_pass(out: &mut FrameBuffer, pass: &ShaderPass, params: &EffectParams) {
    let intensity = sanitize_unit(params.intensity * pass.strength);
    if intensity <= 0.0 {
        return;
    }
    let window = match pass.window {
        Some(template) => {
            let rect = params.extras.window.unwrap_or(template).sanitized();
            if rect.w <= 0.0 || rect.h <= 0.0 {
                return;
            }
            Some(rect)
        }
        None => None,
    };

    let kind = pass.kind.resolved(&params.extras);
    let aspect = params.size.aspect_ratio();
    let local_aspect = window.map_or(aspect, |r| aspect * r.w / r.h);
    let time = params.time.as_f32();
    let (w, h) = (out.width as f32, out.height as f32);
    let stride = out.width as usize * 4;

    for (y, row) in out.data.chunks_exact_mut(stride).enumerate() {
        let v = (y as f32 + 0.5) / h;
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            let uv = Point2D::new((x as f32 + 0.5) / w, v);
            let local = match window {
                Some(rect) if rect.contains(uv) => rect.local(uv),
                Some(_) => continue,
                None => uv,
            };
            let input = PassInput {
                uv,
                local,
                tilt: params.tilt,
                time,
                intensity,
                aspect,
                local_aspect,
                dst: Color::from_rgba8([px[0], px[1], px[2], px[3]]),
            };
            blend_into(px, kind.evaluate(&input), pass.blend);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PassExtras;
    use holokit_core::{Size2D, TiltVector, WindowRect};

    fn base() -> FrameBuffer {
        FrameBuffer::diagonal_gradient(52, 76, &[Color::rgb(0.2, 0.2, 0.3), Color::rgb(0.5, 0.4, 0.6)])
    }

    fn params() -> EffectParams {
        EffectParams::new(Size2D::new(52.0, 76.0))
            .with_tilt(TiltVector::new(0.3, -0.2))
            .with_time(1.25)
    }

    fn flat(color: Color) -> ShaderPass {
        // Snowfall over a flat sky covers most of the raster with one color.
        ShaderPass::new(
            PassKind::Snowfall {
                primary: color,
                secondary: color,
            },
            BlendMode::Normal,
        )
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let out = EffectPipeline::new(vec![]).apply(&base(), &params());
        assert_eq!(out, base());
    }

    #[test]
    fn test_degenerate_size_is_identity() {
        let pipeline = EffectPipeline::basic(BasicShader::Foil { intensity: 0.9 });
        for size in [Size2D::new(0.0, 76.0), Size2D::new(52.0, -3.0), Size2D::new(f32::NAN, 1.0)] {
            let p = EffectParams { size, ..params() };
            assert_eq!(pipeline.apply(&base(), &p), base());
        }
    }

    #[test]
    fn test_zero_intensity_is_identity() {
        let pipeline = EffectPipeline::new(vec![
            ShaderPass::new(PassKind::Glare, BlendMode::Screen),
            ShaderPass::new(PassKind::Glitter { density: 50.0, threshold: 0.5 }, BlendMode::Additive),
        ]);
        let out = pipeline.apply(&base(), &params().with_intensity(0.0));
        assert_eq!(out, base());
    }

    #[test]
    fn test_order_is_significant() {
        let ab = EffectPipeline::new(vec![flat(Color::RED), flat(Color::BLUE)]);
        let ba = EffectPipeline::new(vec![flat(Color::BLUE), flat(Color::RED)]);
        let out_ab = ab.apply(&base(), &params());
        let out_ba = ba.apply(&base(), &params());
        assert_ne!(out_ab, out_ba);
    }

    #[test]
    fn test_passes_compose_sequentially() {
        // Blended holo keys on luminance underneath, so a white first pass
        // changes what the second contributes.
        let holo = ShaderPass::new(PassKind::BlendedHolo { saturation: 0.75 }, BlendMode::Screen);
        let alone = EffectPipeline::new(vec![holo]).apply(&base(), &params());
        let stacked = EffectPipeline::new(vec![flat(Color::WHITE).with_strength(0.5), holo]);
        let only_white = EffectPipeline::new(vec![flat(Color::WHITE).with_strength(0.5)]);
        let expected_if_independent = EffectPipeline::new(vec![holo]).apply(&only_white.apply(&base(), &params()), &params());
        assert_eq!(stacked.apply(&base(), &params()), expected_if_independent);
        assert_ne!(alone, expected_if_independent);
    }

    #[test]
    fn test_transparent_pixels_untouched() {
        let mut fb = base();
        fb.set_pixel(3, 3, [0, 0, 0, 0]);
        let out = EffectPipeline::new(vec![flat(Color::GREEN)]).apply(&fb, &params());
        assert_eq!(out.get_pixel(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_window_override_from_extras() {
        let pipeline = EffectPipeline::new(vec![flat(Color::RED).windowed(WindowRect::new(0.0, 0.0, 0.5, 0.5))]);
        let extras = PassExtras::default().with_window(WindowRect::new(0.5, 0.5, 0.5, 0.5));
        let out = pipeline.apply(&base(), &params().with_extras(extras));
        assert_eq!(out.get_pixel(0, 0), base().get_pixel(0, 0));
        assert_ne!(out.get_pixel(51, 75), base().get_pixel(51, 75));
    }

    #[test]
    fn test_empty_window_skips_pass() {
        let pipeline = EffectPipeline::new(vec![flat(Color::RED).windowed(WindowRect::new(0.2, 0.2, 0.0, 0.5))]);
        assert_eq!(pipeline.apply(&base(), &params()), base());
    }

    #[test]
    fn test_basic_shaders() {
        assert_eq!(
            EffectPipeline::basic(BasicShader::Glitter { density: 80.0 }).pass_ids(),
            vec!["glitter"]
        );
        let frozen = EffectPipeline::basic(BasicShader::Frozen {
            intensity: 0.6,
            star_density: 0.3,
        });
        assert_eq!(frozen.passes()[0].strength, 0.6);
        let snow = EffectPipeline::basic(BasicShader::Snowfall {
            primary: Color::rgba(0.3, 0.5, 0.7, 1.0),
            secondary: Color::rgba(0.2, 0.4, 0.6, 1.0),
        });
        let out = snow.apply(&base(), &params());
        assert_ne!(out, base());
        assert_eq!(snow.len(), 1);
        assert!(!snow.is_empty());
    }
}
