//! Hue-driven foil families.

use std::f32::consts::TAU;

use holokit_core::Color;

use super::{contribution, hue, PassInput};
use crate::noise::{fract, smoothstep};

/// Distance from `t` to the nearest integer, in [0, 0.5].
pub(super) fn to_nearest_integer(t: f32) -> f32 {
    let f = fract(t);
    f.min(1.0 - f)
}

/// `hue = fract(bands·(0.6u + 0.4v) + 0.5·tilt.x + 0.35·tilt.y)`
/// `weight = intensity · 0.55 · (0.7 + 0.3·cos(2π(u − v) + 2·tilt.x))`
pub fn foil(i: &PassInput, bands: f32, saturation: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let h = fract(bands * (0.6 * u + 0.4 * v) + 0.5 * i.tilt.x + 0.35 * i.tilt.y);
    let ripple = 0.7 + 0.3 * (TAU * (u - v) + 2.0 * i.tilt.x).cos();
    contribution(hue(h, saturation), i.intensity * 0.55 * ripple)
}

/// Foil keyed on the luminance underneath, so bright artwork shifts the
/// rainbow further and carries more of it.
pub fn blended_holo(i: &PassInput, saturation: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let lum = i.dst.luminance();
    let h = fract(0.5 * lum + 0.8 * u + 0.2 * v + 0.6 * i.tilt.x - 0.3 * i.tilt.y);
    contribution(hue(h, saturation), i.intensity * (0.3 + 0.35 * lum))
}

/// Hue runs against the usual foil direction. A white streak along the
/// anti-diagonal follows tilt.
pub fn reverse_holo(i: &PassInput, foil: f32) -> Color {
    let (u, v) = (i.local.x, i.local.y);
    let h = fract(1.0 - 0.8 * (u + v) - 0.5 * i.tilt.x + 0.5 * i.tilt.y);
    let offset = (u - v) - 0.8 * i.tilt.x + 0.4 * i.tilt.y;
    let streak = 1.0 - smoothstep(0.0, 0.22, offset.abs());
    let color = hue(h, 0.6).lerp(&Color::WHITE, 0.7 * streak);
    contribution(color, i.intensity * foil.max(0.0) * (0.3 + 0.45 * streak))
}

/// `beam = 0.5 + 0.5·cos(2π(beams·u + 1.5·tilt.x))`, weight `0.6·beam²`.
pub fn regular_holo(i: &PassInput, beams: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let beam = 0.5 + 0.5 * (TAU * (beams * u + 1.5 * i.tilt.x)).cos();
    let h = fract(1.5 * u + 0.1 * v + 0.8 * i.tilt.x + 0.2 * i.tilt.y);
    contribution(hue(h, 0.8), i.intensity * 0.6 * beam * beam)
}

pub fn pokemon_v(i: &PassInput, stripes: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let s = fract(stripes * (u + v) + 1.2 * i.tilt.x - 0.8 * i.tilt.y);
    let line = 1.0 - smoothstep(0.15, 0.55, (2.0 * s - 1.0).abs());
    let h = fract(0.5 * (u + v) + 0.4 * i.tilt.x + 0.25 * i.tilt.y);
    contribution(hue(h, 0.7), i.intensity * 0.55 * line)
}

/// A V whose apex sits near the top third and slides sideways with roll,
/// faded by a radial mask around the artwork center.
pub fn vstar(i: &PassInput) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let apex = 0.5 + 0.2 * i.tilt.x;
    let arm = 0.25 + 1.1 * (u - apex).abs();
    let band = 1.0 - smoothstep(0.0, 0.1, (v - arm).abs());
    let dx = (u - 0.5) * i.aspect;
    let dy = v - 0.45;
    let mask = 1.0 - smoothstep(0.15, 0.7, (dx * dx + dy * dy).sqrt());
    let h = fract(0.8 * u + 0.4 * v + 0.6 * i.tilt.x + 0.3 * i.tilt.y);
    contribution(hue(h, 0.7), i.intensity * mask * (0.25 + 0.5 * band))
}

/// Two families of diagonal lines, each shifted by one tilt axis.
pub fn radiant_holo(i: &PassInput, cells: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let x = cells * u;
    let y = cells * v / i.aspect.max(1e-3);
    let a = 1.0 - smoothstep(0.0, 0.1, to_nearest_integer(x + y + 2.0 * i.tilt.x));
    let b = 1.0 - smoothstep(0.0, 0.1, to_nearest_integer(x - y + 2.0 * i.tilt.y));
    let h = fract(0.5 * (u + v) + 0.4 * i.tilt.x - 0.2 * i.tilt.y);
    contribution(hue(h, 0.6), i.intensity * 0.5 * a.max(b))
}

/// `ray = (0.5 + 0.5·cos(rays·θ + 3·tilt.x − 2·tilt.y))⁴` around a center
/// shifted a quarter of the card by tilt, fading out with radius.
pub fn starburst(i: &PassInput, rays: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let dx = (u - (0.5 + 0.25 * i.tilt.x)) * i.aspect;
    let dy = v - (0.45 + 0.25 * i.tilt.y);
    let theta = dy.atan2(dx);
    let r = (dx * dx + dy * dy).sqrt();
    let ray = (0.5 + 0.5 * (rays * theta + 3.0 * i.tilt.x - 2.0 * i.tilt.y).cos()).powi(4);
    let falloff = 1.0 - smoothstep(0.05, 0.9, r);
    let h = fract(theta / TAU + 0.5 * r + 0.3 * i.tilt.y);
    contribution(hue(h, 0.75), i.intensity * 0.6 * ray * falloff)
}

#[cfg(test)]
mod tests {
    use super::super::tests::input_at;
    use super::*;
    use holokit_core::TiltVector;

    #[test]
    fn test_to_nearest_integer() {
        assert!((to_nearest_integer(2.1) - 0.1).abs() < 1e-5);
        assert!((to_nearest_integer(-0.9) - 0.1).abs() < 1e-5);
        assert!((to_nearest_integer(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_regular_holo_beams_peak_on_lattice() {
        let peak = regular_holo(&input_at(0.0, 0.5), 6.0);
        let trough = regular_holo(&input_at(1.0 / 12.0, 0.5), 6.0);
        assert!((peak.a - 0.6).abs() < 1e-5);
        assert!(trough.a < 1e-5);
    }

    #[test]
    fn test_reverse_holo_streak_follows_roll() {
        let mut on = input_at(0.7, 0.3);
        on.tilt = TiltVector::new(0.5, 0.0);
        let mut off = on;
        off.tilt = TiltVector::new(-0.5, 0.0);
        assert!(reverse_holo(&on, 1.0).a > reverse_holo(&off, 1.0).a);
    }

    #[test]
    fn test_starburst_dims_toward_corners() {
        // r ≈ 0.65 at the bottom-left corner, so the radial falloff is < 0.25.
        let far = starburst(&input_at(0.0, 1.0), 12.0);
        assert!(far.a < 0.6 * 0.25);
    }

    #[test]
    fn test_blended_holo_tracks_luminance() {
        let mut dark = input_at(0.5, 0.5);
        dark.dst = Color::BLACK;
        let mut bright = dark;
        bright.dst = Color::WHITE;
        assert!(blended_holo(&bright, 0.75).a > blended_holo(&dark, 0.75).a);
    }
}
