//! Deterministic hash noise for the procedural passes.
//!
//! Everything here is a pure function of integer cell coordinates and a
//! seed. Nothing reads the clock or a global RNG, so two evaluations with
//! identical inputs produce identical pixels.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Mix a seed with a purpose tag to get an independent stream.
pub const fn derive_seed(seed: u64, purpose: u64) -> u64 {
    let mut hash = seed ^ purpose;
    hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
    hash ^= hash >> 32;
    hash
}

/// Seed for a density-parameterized pattern. The density is quantized so
/// tiny float differences in the uniform map to the same pattern.
pub fn density_seed(density: f32) -> u64 {
    let q = (density.max(0.0) * 1000.0).round() as u64;
    derive_seed(0x486f_6c6f_4b69_74, q)
}

/// FNV-1a over a seed and a signed cell coordinate.
pub fn hash_cell(seed: u64, x: i32, y: i32) -> u32 {
    let mut h = FNV_OFFSET ^ seed;
    for byte in (x as u32)
        .to_le_bytes()
        .into_iter()
        .chain((y as u32).to_le_bytes())
    {
        h ^= byte as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    // FNV alone leaves neighbouring cells correlated; finish with the
    // murmur3 64-bit mixer.
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    (h & 0xFFFF_FFFF) as u32
}

/// Uniform value in [0, 1) for a cell.
pub fn cell_random(seed: u64, x: i32, y: i32) -> f32 {
    (hash_cell(seed, x, y) >> 8) as f32 / (1u32 << 24) as f32
}

/// Bilinear value noise over an integer lattice, in [0, 1).
pub fn value_noise(seed: u64, x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let tx = smooth(x - x0);
    let ty = smooth(y - y0);
    let (ix, iy) = (x0 as i32, y0 as i32);
    let a = cell_random(seed, ix, iy);
    let b = cell_random(seed, ix + 1, iy);
    let c = cell_random(seed, ix, iy + 1);
    let d = cell_random(seed, ix + 1, iy + 1);
    let top = a + (b - a) * tx;
    let bottom = c + (d - c) * tx;
    top + (bottom - top) * ty
}

fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Hermite step between two edges. Zero below `a`, one above `b`.
pub fn smoothstep(a: f32, b: f32, x: f32) -> f32 {
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    smooth((x - a) / (b - a))
}

/// Fractional part, always in [0, 1).
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(hash_cell(7, 3, -4), hash_cell(7, 3, -4));
        assert_ne!(hash_cell(7, 3, -4), hash_cell(7, -4, 3));
        assert_ne!(hash_cell(7, 3, -4), hash_cell(8, 3, -4));
    }

    #[test]
    fn test_cell_random_range_and_spread() {
        let seed = density_seed(50.0);
        let mut sum = 0.0;
        let n = 64;
        for y in 0..n {
            for x in 0..n {
                let r = cell_random(seed, x, y);
                assert!((0.0..1.0).contains(&r));
                sum += r;
            }
        }
        let mean = sum / (n * n) as f32;
        assert!((mean - 0.5).abs() < 0.05, "mean {mean}");
    }

    #[test]
    fn test_density_seed_quantizes() {
        assert_eq!(density_seed(80.0), density_seed(80.0000001));
        assert_ne!(density_seed(50.0), density_seed(80.0));
    }

    #[test]
    fn test_value_noise_continuous_at_lattice() {
        let seed = derive_seed(1, 2);
        let at = value_noise(seed, 3.0, 5.0);
        let near = value_noise(seed, 3.0001, 5.0001);
        assert!((at - near).abs() < 1e-3);
        assert!((at - cell_random(seed, 3, 5)).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep_and_fract() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!((fract(3.5) - 0.5).abs() < 1e-6);
    }
}
