//! Content hashing for deterministic rendering verification.
//!
//! A composed card raster is a pure function of its inputs, so two renders
//! with the same tilt, time, intensity and uniforms must hash identically.

use sha2::{Digest, Sha256};

use crate::frame::FrameBuffer;

/// A content hash digest (SHA-256, 32 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    bytes: [u8; 32],
}

impl ContentHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// First 12 hex digits, enough to tell frames apart in logs.
    pub fn short(&self) -> String {
        self.to_hex()[..12].to_string()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn feed(hasher: &mut Sha256, frame: &FrameBuffer) {
    // Dimensions are part of the digest: a 2x8 and a 4x4 raster with the
    // same bytes are different images.
    hasher.update(frame.width.to_le_bytes());
    hasher.update(frame.height.to_le_bytes());
    hasher.update(&frame.data);
}

fn finish(hasher: Sha256) -> ContentHash {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hasher.finalize());
    ContentHash::from_bytes(bytes)
}

/// Compute the content hash of a single raster.
pub fn hash_frame(frame: &FrameBuffer) -> ContentHash {
    let mut hasher = Sha256::new();
    feed(&mut hasher, frame);
    finish(hasher)
}

/// Compute the content hash of an animated sequence.
pub fn hash_frames(frames: &[FrameBuffer]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update((frames.len() as u64).to_le_bytes());
    for frame in frames {
        feed(&mut hasher, frame);
    }
    finish(hasher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_hash_deterministic() {
        let a = FrameBuffer::solid(10, 10, &Color::PURPLE);
        let b = FrameBuffer::solid(10, 10, &Color::PURPLE);
        assert_eq!(hash_frame(&a), hash_frame(&b));
    }

    #[test]
    fn test_hash_single_pixel_change() {
        let a = FrameBuffer::solid(10, 10, &Color::GOLD);
        let mut b = a.clone();
        b.set_pixel(9, 9, [0, 0, 0, 255]);
        assert_ne!(hash_frame(&a), hash_frame(&b));
    }

    #[test]
    fn test_hash_includes_dimensions() {
        let a = FrameBuffer::solid(2, 8, &Color::RED);
        let b = FrameBuffer::solid(4, 4, &Color::RED);
        assert_eq!(a.data, b.data);
        assert_ne!(hash_frame(&a), hash_frame(&b));
    }

    #[test]
    fn test_hash_sequence_order_matters() {
        let red = FrameBuffer::solid(4, 4, &Color::RED);
        let blue = FrameBuffer::solid(4, 4, &Color::BLUE);
        let forward = hash_frames(&[red.clone(), blue.clone()]);
        let backward = hash_frames(&[blue, red]);
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_hash_hex_format() {
        let hash = hash_frame(&FrameBuffer::solid(2, 2, &Color::BLACK));
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(format!("{}", hash), hex);
        assert_eq!(hash.short(), hex[..12]);
    }
}
