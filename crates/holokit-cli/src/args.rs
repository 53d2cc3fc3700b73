//! Value parsers for comma-separated CLI arguments.

use holokit_core::{Color, TiltVector, WindowRect};

fn floats(s: &str, expected: usize) -> Result<Vec<f32>, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return Err(format!("expected {} comma-separated numbers, got '{}'", expected, s));
    }
    parts
        .iter()
        .map(|p| {
            p.parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("'{}' is not a finite number", p))
        })
        .collect()
}

/// `x,y`, each clamped to [-1, 1].
pub fn tilt(s: &str) -> Result<TiltVector, String> {
    let v = floats(s, 2)?;
    Ok(TiltVector::new(v[0], v[1]))
}

/// `x,y,w,h` in normalized card coordinates.
pub fn window(s: &str) -> Result<WindowRect, String> {
    let v = floats(s, 4)?;
    if v[2] <= 0.0 || v[3] <= 0.0 {
        return Err(format!("window '{}' has no area", s));
    }
    Ok(WindowRect::new(v[0], v[1], v[2], v[3]).sanitized())
}

/// Two hex colors, `#rrggbb[aa],#rrggbb[aa]`.
pub fn color_pair(s: &str) -> Result<(Color, Color), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated colors, got '{}'", s))?;
    let parse = |c: &str| Color::from_hex(c.trim()).map_err(|e| e.to_string());
    Ok((parse(a)?, parse(b)?))
}
