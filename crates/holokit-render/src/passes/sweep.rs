//! Highlight passes: glare, sweep band, sun pillar.

use holokit_core::Color;

use super::{contribution, PassInput};
use crate::noise::smoothstep;

const SILVER: Color = Color::rgb(0.93, 0.93, 0.97);

/// Radial highlight centered at `(0.5 + 0.5·tilt.x, 0.5 + 0.5·tilt.y)`.
///
/// Distance is measured in units of card height (`dx` scaled by aspect) and
/// `weight = intensity · 0.75 · (1 − smoothstep(0, 0.6, d))²`.
pub fn glare(i: &PassInput) -> Color {
    let cx = 0.5 + 0.5 * i.tilt.x;
    let cy = 0.5 + 0.5 * i.tilt.y;
    let dx = (i.uv.x - cx) * i.aspect;
    let dy = i.uv.y - cy;
    let d = (dx * dx + dy * dy).sqrt();
    let f = 1.0 - smoothstep(0.0, 0.6, d);
    contribution(Color::WHITE, i.intensity * 0.75 * f * f)
}

/// A straight band across the card at `angle_deg`, centered at a signed
/// offset `0.6·tilt.x + 0.4·tilt.y + drift·0.25·sin(0.9·time)` from the
/// middle. Falls off to zero over `width`.
pub fn sweep(i: &PassInput, width: f32, angle_deg: f32, drift: f32, tint: Color) -> Color {
    let a = angle_deg.to_radians();
    let s = (i.uv.x - 0.5) * a.cos() + (i.uv.y - 0.5) * a.sin();
    let center = 0.6 * i.tilt.x + 0.4 * i.tilt.y + drift * 0.25 * (0.9 * i.time).sin();
    let f = 1.0 - smoothstep(0.0, width, (s - center).abs());
    contribution(tint, i.intensity * 0.65 * f * f)
}

/// A vertical light shaft following roll and a weaker horizontal one
/// following pitch.
pub fn sun_pillar(i: &PassInput) -> Color {
    let vertical = 1.0 - smoothstep(0.0, 0.16, (i.uv.x - 0.5 - 0.35 * i.tilt.x).abs());
    let horizontal = 1.0 - smoothstep(0.0, 0.1, (i.uv.y - 0.5 - 0.35 * i.tilt.y).abs());
    let sun = vertical.max(0.7 * horizontal);
    contribution(SILVER, i.intensity * 0.6 * sun)
}

#[cfg(test)]
mod tests {
    use super::super::tests::input_at;
    use super::*;
    use holokit_core::TiltVector;

    #[test]
    fn test_glare_peaks_at_center_when_level() {
        let c = glare(&input_at(0.5, 0.5));
        assert!((c.a - 0.75).abs() < 1e-6);
        assert_eq!(glare(&input_at(0.5, 1.2)).a, 0.0);
    }

    #[test]
    fn test_glare_follows_tilt() {
        let mut i = input_at(1.0, 1.0);
        i.tilt = TiltVector::new(1.0, 1.0);
        assert!((glare(&i).a - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_glare_is_mirror_symmetric() {
        for (u, v) in [(0.2, 0.3), (0.41, 0.77), (0.05, 0.5)] {
            let a = glare(&input_at(u, v)).a;
            let b = glare(&input_at(1.0 - u, 1.0 - v)).a;
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sweep_band_moves_with_roll() {
        let mut left = input_at(0.3, 0.5);
        left.tilt = TiltVector::new(-0.33, 0.0);
        let mut right = left;
        right.tilt = TiltVector::new(0.33, 0.0);
        let w = |i: &PassInput| sweep(i, 0.18, 0.0, 0.0, Color::WHITE).a;
        assert!(w(&left) > 0.6);
        assert_eq!(w(&right), 0.0);
    }

    #[test]
    fn test_sweep_drifts_over_time_only_with_drift() {
        let mut early = input_at(0.55, 0.5);
        early.time = 0.0;
        let mut late = early;
        late.time = 1.7;
        let still = |i: &PassInput| sweep(i, 0.18, 0.0, 0.0, Color::WHITE).a;
        let drifting = |i: &PassInput| sweep(i, 0.18, 0.0, 1.0, Color::WHITE).a;
        assert_eq!(still(&early), still(&late));
        assert_ne!(drifting(&early), drifting(&late));
    }
}
