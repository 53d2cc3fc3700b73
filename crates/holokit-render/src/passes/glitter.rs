//! Sparkle-based passes.
//!
//! All of them share one lattice test: the surface is cut into square cells,
//! `density` across, each cell hashes to a value `r` in [0, 1), and only cells
//! with `r >= threshold` hold a point. Where the point sits inside its cell
//! and its twinkle phase come from further hashes of the same cell, so the
//! pattern never moves. Time and tilt only modulate brightness.

use std::f32::consts::TAU;

use holokit_core::{Color, Point2D};

use super::{contribution, hue, PassInput};
use crate::noise::{cell_random, density_seed, derive_seed, fract, smoothstep, value_noise};

const GOLD_LIGHT: Color = Color::rgb(1.0, 0.86, 0.45);
const ICE: Color = Color::rgb(0.78, 0.9, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Dot,
    Cross,
}

/// A lit lattice point: brightness before twinkle and its phase.
struct Point {
    strength: f32,
    phase: f32,
}

fn lattice_point(
    seed: u64,
    uv: Point2D,
    aspect: f32,
    density: f32,
    threshold: f32,
    shape: Shape,
) -> Option<Point> {
    let x = uv.x * density;
    let y = uv.y * density / aspect.max(1e-3);
    let (cx, cy) = (x.floor() as i32, y.floor() as i32);
    let r = cell_random(seed, cx, cy);
    if r < threshold {
        return None;
    }
    let level = if threshold < 1.0 {
        (r - threshold) / (1.0 - threshold)
    } else {
        0.0
    };
    let jx = 0.25 + 0.5 * cell_random(derive_seed(seed, 2), cx, cy);
    let jy = 0.25 + 0.5 * cell_random(derive_seed(seed, 3), cx, cy);
    let dx = fract(x) - jx;
    let dy = fract(y) - jy;
    let dist = (dx * dx + dy * dy).sqrt();
    let body = match shape {
        Shape::Dot => 1.0 - smoothstep(0.0, 0.35, dist),
        Shape::Cross => {
            let core = 1.0 - smoothstep(0.0, 0.15, dist);
            let horizontal = (1.0 - smoothstep(0.0, 0.06, dy.abs())) * (1.0 - smoothstep(0.0, 0.45, dx.abs()));
            let vertical = (1.0 - smoothstep(0.0, 0.06, dx.abs())) * (1.0 - smoothstep(0.0, 0.45, dy.abs()));
            core.max(horizontal).max(vertical)
        }
    };
    if body <= 0.0 {
        return None;
    }
    Some(Point {
        strength: (0.35 + 0.65 * level) * body,
        phase: cell_random(derive_seed(seed, 1), cx, cy),
    })
}

/// `0.5 + 0.5·sin(2π(phase + 0.8·time) + 4·tilt.x + 3·tilt.y)`
fn twinkle(i: &PassInput, phase: f32) -> f32 {
    0.5 + 0.5 * (TAU * (phase + 0.8 * i.time) + 4.0 * i.tilt.x + 3.0 * i.tilt.y).sin()
}

fn sparkle_at(i: &PassInput, seed: u64, density: f32, threshold: f32, shape: Shape) -> f32 {
    lattice_point(seed, i.uv, i.aspect, density, threshold, shape)
        .map(|p| p.strength * twinkle(i, p.phase))
        .unwrap_or(0.0)
}

/// Round glitter tinted faintly along the diagonal rainbow.
pub fn glitter(i: &PassInput, density: f32, threshold: f32) -> Color {
    let s = sparkle_at(i, density_seed(density), density, threshold, Shape::Dot);
    let h = fract(i.uv.x + i.uv.y + 0.5 * i.tilt.x);
    contribution(hue(h, 0.2), i.intensity * s)
}

/// Four-pointed sparkles laid out in window space.
pub fn sparkle(i: &PassInput, density: f32) -> Color {
    let s = lattice_point(
        density_seed(density),
        i.local,
        i.local_aspect,
        density,
        0.9,
        Shape::Cross,
    )
    .map(|p| p.strength * twinkle(i, p.phase))
    .unwrap_or(0.0);
    contribution(Color::WHITE, i.intensity * s)
}

pub fn rainbow_rare(i: &PassInput, density: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let s = sparkle_at(i, density_seed(density), density, 0.8, Shape::Dot);
    let h = fract(0.9 * u + 0.6 * v + 0.7 * i.tilt.x + 0.4 * i.tilt.y);
    let lum = i.dst.luminance();
    let color = hue(h, 0.75).lerp(&Color::WHITE, s);
    contribution(color, i.intensity * (0.25 + 0.35 * lum + 0.4 * s))
}

/// Gold shimmer waves under dense white-gold glitter.
pub fn secret_gold(i: &PassInput, density: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let shimmer = 0.5 + 0.5 * (TAU * (3.0 * u - 2.0 * v) + 4.0 * i.tilt.x + 3.0 * i.tilt.y + 1.3 * i.time).sin();
    let s = sparkle_at(i, density_seed(density), density, 0.75, Shape::Dot);
    let color = GOLD_LIGHT.lerp(&Color::WHITE, s);
    contribution(color, i.intensity * (0.25 + 0.3 * shimmer + 0.45 * s))
}

/// Desaturated multi-tone metal: hue from grain noise shifted by tilt,
/// brightness from a tilt-driven sheen.
pub fn amazing_rare(i: &PassInput, density: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let seed = density_seed(density);
    let grain = value_noise(derive_seed(seed, 7), 30.0 * u, 30.0 * v / i.aspect.max(1e-3));
    let sheen = 0.5 + 0.5 * (TAU * (2.0 * v - u) + 3.0 * i.tilt.y - 2.0 * i.tilt.x).cos();
    let s = sparkle_at(i, seed, density, 0.7, Shape::Dot);
    let color = Color::from_hsv(grain + 0.5 * i.tilt.x + 0.5 * i.tilt.y, 0.35, 0.8 + 0.2 * sheen)
        .lerp(&Color::WHITE, s);
    contribution(color, i.intensity * (0.2 + 0.25 * sheen + 0.5 * s))
}

/// Nebula noise tinted by a vertical rainbow, with a sparse star field.
pub fn cosmos_holo(i: &PassInput, star_density: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let aspect = i.aspect.max(1e-3);
    let nebula = value_noise(
        derive_seed(0x636f_736d_6f73, 0),
        5.0 * u + 0.3 * i.tilt.x,
        5.0 * v / aspect + 0.3 * i.tilt.y,
    );
    let star = sparkle_at(i, density_seed(star_density), 60.0, 1.0 - star_density, Shape::Dot);
    let h = fract(0.7 * v + 0.3 * nebula + 0.5 * i.tilt.x + 0.2 * i.tilt.y);
    let color = hue(h, 0.8).lerp(&Color::WHITE, star);
    contribution(color, i.intensity * (0.25 + 0.35 * nebula + 0.4 * star))
}

/// Frost haze with cross-shaped stars; `star_density` of cells hold one.
pub fn frozen(i: &PassInput, star_density: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let frost = value_noise(derive_seed(0x6672_6f7a_656e, 0), 12.0 * u, 12.0 * v / i.aspect.max(1e-3));
    let star = sparkle_at(i, density_seed(star_density), 40.0, 1.0 - star_density, Shape::Cross);
    let color = ICE.lerp(&Color::WHITE, star);
    contribution(color, i.intensity * (0.2 + 0.25 * frost + 0.55 * star))
}

/// Vertical sky gradient `primary → secondary` with two layers of flakes
/// falling at different speeds.
pub fn snowfall(i: &PassInput, primary: Color, secondary: Color) -> Color {
    let sky = primary.lerp(&secondary, i.uv.y);
    let mut flake: f32 = 0.0;
    for layer in 0..2u64 {
        let k = layer as f32;
        let cells = 14.0 + 10.0 * k;
        let speed = 0.08 + 0.05 * k;
        let sway = 0.03 * (0.7 * i.time + k).sin();
        let uv = Point2D::new(i.uv.x + sway, i.uv.y - speed * i.time);
        if let Some(p) = lattice_point(derive_seed(0x736e_6f77, layer), uv, i.aspect, cells, 0.6, Shape::Dot) {
            flake = flake.max(p.strength);
        }
    }
    let color = sky.lerp(&Color::WHITE, flake);
    contribution(color, i.intensity * (0.85 * sky.a).max(flake))
}

#[cfg(test)]
mod tests {
    use super::super::tests::input_at;
    use super::*;
    use holokit_core::TiltVector;

    fn lit_cells(seed: u64, density: f32, threshold: f32) -> usize {
        let n = density as i32;
        (0..n)
            .flat_map(|x| (0..n).map(move |y| (x, y)))
            .filter(|&(x, y)| cell_random(seed, x, y) >= threshold)
            .count()
    }

    #[test]
    fn test_threshold_controls_fill_fraction() {
        let seed = density_seed(80.0);
        let total = 80 * 80;
        let sparse = lit_cells(seed, 80.0, 0.9) as f32 / total as f32;
        let dense = lit_cells(seed, 80.0, 0.5) as f32 / total as f32;
        assert!((sparse - 0.1).abs() < 0.03, "{sparse}");
        assert!((dense - 0.5).abs() < 0.05, "{dense}");
    }

    #[test]
    fn test_glitter_positions_stable_over_time_and_tilt() {
        // A pixel is either inside a lit point or not, regardless of time
        // and tilt; only brightness changes.
        for step in 0..200 {
            let u = (step % 20) as f32 / 20.0 + 0.013;
            let v = (step / 20) as f32 / 10.0 + 0.021;
            let mut a = input_at(u, v);
            let mut b = a;
            a.time = 0.1;
            b.time = 3.7;
            b.tilt = TiltVector::new(0.6, -0.4);
            let seed = density_seed(50.0);
            let pa = lattice_point(seed, a.uv, a.aspect, 50.0, 0.8, Shape::Dot).is_some();
            let pb = lattice_point(seed, b.uv, b.aspect, 50.0, 0.8, Shape::Dot).is_some();
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_twinkle_changes_with_time() {
        let i = input_at(0.5, 0.5);
        let mut later = i;
        later.time = 0.3;
        assert_ne!(twinkle(&i, 0.25), twinkle(&later, 0.25));
    }

    #[test]
    fn test_zero_star_density_has_no_stars() {
        for step in 0..100 {
            let i = input_at(step as f32 / 100.0, 0.37);
            let c = frozen(&i, 0.0);
            // Haze only: at most 0.2 + 0.25.
            assert!(c.a <= 0.45 + 1e-6);
        }
    }

    #[test]
    fn test_snowfall_uses_color_pair() {
        let top = snowfall(&input_at(0.5, 0.0), Color::RED, Color::BLUE);
        let bottom = snowfall(&input_at(0.5, 1.0), Color::RED, Color::BLUE);
        assert!(top.a >= 0.85 - 1e-6);
        assert!(top.r >= bottom.r);
        assert!(bottom.b >= top.b);
    }
}
