use serde::{Deserialize, Serialize};

/// How a pass contribution merges onto the accumulated raster.
///
/// Every mode works per RGB channel on straight-alpha colors; `a` is the
/// contribution weight and the destination alpha is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendMode {
    /// Porter-Duff "over": `d * (1 - a) + s * a`.
    Normal,
    /// `d + s * a`, saturating at 1.
    Additive,
    /// `1 - (1 - d) * (1 - s * a)`.
    Screen,
}

impl Default for BlendMode {
    fn default() -> Self {
        BlendMode::Normal
    }
}

impl BlendMode {
    /// Blend one channel. Inputs are expected in [0, 1]; the result is clamped.
    pub fn blend_channel(&self, dst: f32, src: f32, weight: f32) -> f32 {
        let out = match self {
            BlendMode::Normal => dst * (1.0 - weight) + src * weight,
            BlendMode::Additive => dst + src * weight,
            BlendMode::Screen => 1.0 - (1.0 - dst) * (1.0 - src * weight),
        };
        out.clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlendMode::Normal => write!(f, "normal"),
            BlendMode::Additive => write!(f, "additive"),
            BlendMode::Screen => write!(f, "screen"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_weight_is_identity() {
        for mode in [BlendMode::Normal, BlendMode::Additive, BlendMode::Screen] {
            assert_eq!(mode.blend_channel(0.37, 0.9, 0.0), 0.37, "{mode}");
        }
    }

    #[test]
    fn test_normal_full_weight_replaces() {
        assert_eq!(BlendMode::Normal.blend_channel(0.2, 0.8, 1.0), 0.8);
    }

    #[test]
    fn test_additive_saturates() {
        assert_eq!(BlendMode::Additive.blend_channel(0.8, 0.8, 1.0), 1.0);
        assert!((BlendMode::Additive.blend_channel(0.2, 0.4, 0.5) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_screen_never_darkens() {
        for d in [0.0, 0.25, 0.5, 0.75, 1.0] {
            for s in [0.0, 0.5, 1.0] {
                assert!(BlendMode::Screen.blend_channel(d, s, 0.7) >= d - 1e-6);
            }
        }
        assert_eq!(BlendMode::Screen.blend_channel(0.5, 1.0, 1.0), 1.0);
    }

    #[test]
    fn test_blend_mode_display() {
        assert_eq!(format!("{}", BlendMode::Screen), "screen");
        assert_eq!(BlendMode::default(), BlendMode::Normal);
    }
}
