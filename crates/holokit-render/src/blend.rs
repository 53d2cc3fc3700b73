use holokit_core::{BlendMode, Color};

/// Merge a pass contribution into one RGBA8 pixel.
///
/// The contribution's alpha is the blend weight. It is scaled by the
/// destination alpha, so transparent card corners are never touched and
/// the destination alpha itself is preserved.
pub fn blend_into(px: &mut [u8], src: Color, mode: BlendMode) {
    let dst_alpha = px[3] as f32 / 255.0;
    let weight = (src.a * dst_alpha).clamp(0.0, 1.0);
    if weight <= 0.0 {
        return;
    }
    for (c, s) in [src.r, src.g, src.b].into_iter().enumerate() {
        let d = px[c] as f32 / 255.0;
        let out = mode.blend_channel(d, s.clamp(0.0, 1.0), weight);
        px[c] = (out * 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_weight_leaves_pixel() {
        let mut px = [10, 20, 30, 255];
        blend_into(&mut px, Color::WHITE.with_alpha(0.0), BlendMode::Screen);
        assert_eq!(px, [10, 20, 30, 255]);
    }

    #[test]
    fn test_transparent_destination_untouched() {
        let mut px = [0, 0, 0, 0];
        blend_into(&mut px, Color::WHITE, BlendMode::Additive);
        assert_eq!(px, [0, 0, 0, 0]);
    }

    #[test]
    fn test_alpha_preserved() {
        let mut px = [100, 100, 100, 128];
        blend_into(&mut px, Color::WHITE, BlendMode::Normal);
        assert_eq!(px[3], 128);
        assert!(px[0] > 100);
    }

    #[test]
    fn test_normal_over_opaque() {
        let mut px = [0, 0, 255, 255];
        blend_into(&mut px, Color::RED, BlendMode::Normal);
        assert_eq!(px, [255, 0, 0, 255]);
    }

    #[test]
    fn test_screen_half_weight() {
        let mut px = [0, 0, 0, 255];
        blend_into(&mut px, Color::WHITE.with_alpha(0.5), BlendMode::Screen);
        assert_eq!(px, [128, 128, 128, 255]);
    }
}
