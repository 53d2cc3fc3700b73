use std::collections::HashSet;

use holokit_core::{hash_frame, Color, FrameBuffer, Size2D, TiltVector, WindowRect};
use holokit_render::{resolve, CardVariant, EffectParams, PassExtras, VariantFamily};

fn luminance(px: [u8; 4]) -> f32 {
    Color::from_rgba8(px).luminance()
}

/// Variance of the per-pixel luminance change between two rasters.
fn delta_variance(base: &FrameBuffer, out: &FrameBuffer) -> f64 {
    let deltas: Vec<f64> = base
        .data
        .chunks_exact(4)
        .zip(out.data.chunks_exact(4))
        .map(|(b, o)| {
            (luminance([o[0], o[1], o[2], o[3]]) - luminance([b[0], b[1], b[2], b[3]])) as f64
        })
        .collect();
    let n = deltas.len() as f64;
    let mean = deltas.iter().sum::<f64>() / n;
    deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n
}

fn render_on_base(variant: CardVariant, params: &EffectParams) -> (FrameBuffer, FrameBuffer) {
    let base = variant.surface(None).flatten();
    let (pipeline, _) = resolve(variant);
    let out = pipeline.apply(&base, params);
    (base, out)
}

#[test]
fn test_catalog_is_total() {
    let mut ids = HashSet::new();
    for variant in CardVariant::ALL {
        assert!(ids.insert(variant.id()), "duplicate id {}", variant.id());
        let (pipeline, defaults) = resolve(variant);
        assert!(!pipeline.is_empty(), "{variant} has no passes");
        assert!(defaults.geometry.size().is_renderable());
        assert!(defaults.geometry.corner_radius >= 0.0);
        assert!(defaults.geometry.rotation_multiplier > 0.0);
        assert!(defaults.palette.len() >= 2, "{variant} palette too short");
        assert!(defaults.intensity > 0.0 && defaults.intensity <= 1.0);
        assert!(!variant.display_name().is_empty());
        assert!(!variant.description().is_empty());
    }
    assert_eq!(ids.len(), 18);
    let specials = CardVariant::ALL
        .iter()
        .filter(|v| v.family() == VariantFamily::Special)
        .count();
    assert_eq!(specials, 12);
}

#[test]
fn test_every_variant_renders_at_default_size() {
    for variant in CardVariant::ALL {
        let defaults = variant.defaults();
        let params = defaults.params().with_tilt(TiltVector::new(0.3, -0.5)).with_time(2.0);
        let (base, out) = render_on_base(variant, &params);
        assert_eq!((out.width, out.height), (base.width, base.height));
        assert_ne!(out, base, "{variant} left the card untouched");
    }
}

#[test]
fn test_windowed_pass_leaves_outside_untouched() {
    let variant = CardVariant::CardSix;
    let params = variant
        .defaults()
        .params()
        .with_tilt(TiltVector::new(-0.6, 0.8))
        .with_time(3.25);
    let (base, out) = render_on_base(variant, &params);
    let h = out.height as f32;
    let w = out.width as f32;
    let mut inside_changed = false;
    for y in 0..out.height {
        let v = (y as f32 + 0.5) / h;
        for x in 0..out.width {
            let u = (x as f32 + 0.5) / w;
            let outside = v < 0.11 || v >= 0.66 || u < 0.04;
            if outside {
                assert_eq!(out.get_pixel(x, y), base.get_pixel(x, y), "pixel ({x}, {y}) changed");
            } else if out.get_pixel(x, y) != base.get_pixel(x, y) {
                inside_changed = true;
            }
        }
    }
    assert!(inside_changed);
}

#[test]
fn test_extras_window_moves_the_artwork_effects() {
    let variant = CardVariant::CardSix;
    let window = WindowRect::new(0.0, 0.7, 1.0, 0.3);
    let params = variant
        .defaults()
        .params()
        .with_tilt(TiltVector::new(0.4, 0.4))
        .with_extras(PassExtras::default().with_window(window));
    let (base, out) = render_on_base(variant, &params);
    // Upper half is outside the new window.
    for y in 0..out.height / 2 {
        for x in 0..out.width {
            assert_eq!(out.get_pixel(x, y), base.get_pixel(x, y));
        }
    }
    assert_ne!(out, base);
}

#[test]
fn test_render_is_deterministic() {
    for variant in CardVariant::ALL {
        let params = variant
            .defaults()
            .params()
            .with_tilt(TiltVector::new(0.25, 0.75))
            .with_time(1.5)
            .with_extras(PassExtras::default().with_density(64.0));
        let first = hash_frame(&variant.render(&params));
        let second = hash_frame(&variant.render(&params));
        assert_eq!(first, second, "{variant} is not deterministic");
    }
}

#[test]
fn test_tilt_changes_output() {
    for variant in [CardVariant::CardOne, CardVariant::BasicGlare, CardVariant::RadiantHolo] {
        let params = variant.defaults().params();
        let level = hash_frame(&variant.render(&params));
        let tilted = hash_frame(&variant.render(&params.with_tilt(TiltVector::new(0.9, -0.4))));
        assert_ne!(level, tilted, "{variant} ignores tilt");
    }
}

#[test]
fn test_intensity_monotonic() {
    for variant in CardVariant::ALL {
        let tilt = TiltVector::new(0.35, -0.2);
        let mut previous = 0.0;
        for step in 0..=4 {
            let intensity = step as f32 / 4.0;
            let params = variant
                .defaults()
                .params()
                .with_tilt(tilt)
                .with_time(0.75)
                .with_intensity(intensity);
            let (base, out) = render_on_base(variant, &params);
            let metric = delta_variance(&base, &out);
            if step == 0 {
                assert_eq!(metric, 0.0);
            } else {
                assert!(
                    metric > previous,
                    "{variant}: variance {metric} at {intensity} not above {previous}"
                );
            }
            previous = metric;
        }
    }
}

#[test]
fn test_degenerate_size_is_identity_for_every_variant() {
    let base = FrameBuffer::solid(20, 30, &Color::rgb(0.4, 0.4, 0.4));
    for variant in CardVariant::ALL {
        let (pipeline, _) = resolve(variant);
        for size in [Size2D::new(0.0, 30.0), Size2D::new(20.0, -1.0)] {
            let params = EffectParams::new(size).with_tilt(TiltVector::new(1.0, 1.0));
            assert_eq!(pipeline.apply(&base, &params), base);
        }
    }
}

#[test]
fn test_out_of_range_inputs_are_clamped() {
    let variant = CardVariant::RainbowRare;
    let wild = EffectParams {
        tilt: TiltVector { x: 7.0, y: -3.0 },
        intensity: 12.0,
        ..variant.defaults().params()
    };
    let tame = variant
        .defaults()
        .params()
        .with_tilt(TiltVector::new(1.0, -1.0))
        .with_intensity(1.0);
    assert_eq!(variant.render(&wild), variant.render(&tame));
}

#[test]
fn test_oversized_surface_renders_empty_for_every_variant() {
    for variant in CardVariant::ALL {
        for size in [Size2D::new(f32::MAX, f32::MAX), Size2D::new(1.0e6, 380.0)] {
            let params = EffectParams {
                size,
                ..variant.defaults().params()
            };
            assert!(variant.render(&params).is_empty(), "{variant} at {size:?}");
        }
    }
}

#[test]
fn test_basic_glare_is_symmetric_about_center() {
    let (pipeline, _) = resolve(CardVariant::BasicGlare);
    let base = FrameBuffer::solid(260, 380, &Color::rgb(0.3, 0.3, 0.35));
    let params = EffectParams::new(Size2D::new(260.0, 380.0)).with_intensity(0.8);
    let out = pipeline.apply(&base, &params);

    let close = |a: [u8; 4], b: [u8; 4]| a.iter().zip(b.iter()).all(|(p, q)| p.abs_diff(*q) <= 1);
    for y in (0..380).step_by(7) {
        for x in (0..260).step_by(5) {
            let px = out.get_pixel(x, y).unwrap();
            let mirrored_x = out.get_pixel(259 - x, y).unwrap();
            let mirrored_y = out.get_pixel(x, 379 - y).unwrap();
            let opposite = out.get_pixel(259 - x, 379 - y).unwrap();
            assert!(close(px, mirrored_x), "({x}, {y}) vs x-mirror");
            assert!(close(px, mirrored_y), "({x}, {y}) vs y-mirror");
            assert!(close(px, opposite), "({x}, {y}) vs point mirror");
        }
    }

    // Brightest at the center, fading to the base at the corners.
    let center = luminance(out.get_pixel(130, 190).unwrap());
    let corner = out.get_pixel(0, 0).unwrap();
    assert!(center > luminance(base.get_pixel(130, 190).unwrap()) + 0.3);
    assert_eq!(corner, base.get_pixel(0, 0).unwrap());
}
