//! Material textures.

use holokit_core::Color;

use super::foil::to_nearest_integer;
use super::{contribution, hue, PassInput};
use crate::noise::{derive_seed, fract, smoothstep, value_noise};

/// Diagonal hatching at a fixed spatial frequency. Ignores tilt and time.
pub fn crosshatch(i: &PassInput, frequency: f32) -> Color {
    let x = frequency * i.local.x;
    let y = frequency * i.local.y / i.local_aspect.max(1e-3);
    let a = 1.0 - smoothstep(0.0, 0.08, to_nearest_integer(x + y));
    let b = 1.0 - smoothstep(0.0, 0.08, to_nearest_integer(x - y));
    contribution(Color::WHITE, i.intensity * 0.2 * a.max(b))
}

/// Broad, low-contrast hue drift over fine grain.
pub fn vmax(i: &PassInput, grain: f32) -> Color {
    let (u, v) = (i.uv.x, i.uv.y);
    let tex = value_noise(derive_seed(0x766d_6178, 0), grain * u, grain * v / i.aspect.max(1e-3));
    let h = fract(0.3 * (u - v) + 0.25 * i.tilt.x + 0.25 * i.tilt.y);
    contribution(hue(h, 0.5), i.intensity * (0.2 + 0.2 * tex))
}
