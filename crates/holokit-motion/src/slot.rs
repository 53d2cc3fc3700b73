use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use holokit_core::TiltVector;

/// Single-value tilt publication shared between the sampler worker and
/// render threads.
///
/// Both components are packed into one `AtomicU64` (x in the high word, y in
/// the low word), so a reader can never observe x from one sample and y from
/// another. There is no queue: every store overwrites the previous value.
#[derive(Debug, Default)]
pub struct TiltSlot {
    bits: AtomicU64,
}

fn pack(tilt: TiltVector) -> u64 {
    ((tilt.x.to_bits() as u64) << 32) | tilt.y.to_bits() as u64
}

fn unpack(bits: u64) -> TiltVector {
    TiltVector {
        x: f32::from_bits((bits >> 32) as u32),
        y: f32::from_bits(bits as u32),
    }
}

impl TiltSlot {
    /// A slot holding (0, 0).
    pub fn new() -> Self {
        Self::with_value(TiltVector::ZERO)
    }

    pub fn with_value(tilt: TiltVector) -> Self {
        Self {
            bits: AtomicU64::new(pack(tilt.sanitized())),
        }
    }

    /// Publish a new value. Components are re-clamped on the way in.
    pub fn store(&self, tilt: TiltVector) {
        self.bits.store(pack(tilt.sanitized()), Ordering::Release);
    }

    /// The most recently published value.
    pub fn load(&self) -> TiltVector {
        unpack(self.bits.load(Ordering::Acquire))
    }
}

/// Read-only handle to a [`TiltSlot`]. Cheap to clone, one per visible card.
#[derive(Debug, Clone)]
pub struct TiltReader {
    slot: Arc<TiltSlot>,
}

impl TiltReader {
    pub(crate) fn new(slot: Arc<TiltSlot>) -> Self {
        Self { slot }
    }

    /// A reader pinned to one value, for offline renders with no sampler.
    pub fn fixed(tilt: TiltVector) -> Self {
        Self {
            slot: Arc::new(TiltSlot::with_value(tilt)),
        }
    }

    /// Take the per-frame snapshot.
    pub fn snapshot(&self) -> TiltVector {
        self.slot.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_reads_zero() {
        assert_eq!(TiltSlot::new().load(), TiltVector::ZERO);
    }

    #[test]
    fn test_store_load_preserves_sign_and_value() {
        let slot = TiltSlot::new();
        slot.store(TiltVector::new(-0.75, 0.125));
        assert_eq!(slot.load(), TiltVector::new(-0.75, 0.125));
        slot.store(TiltVector::new(1.0, -1.0));
        assert_eq!(slot.load(), TiltVector::new(1.0, -1.0));
    }

    #[test]
    fn test_store_clamps_raw_values() {
        let slot = TiltSlot::new();
        slot.store(TiltVector { x: 4.0, y: f32::NAN });
        assert_eq!(slot.load(), TiltVector::new(1.0, 0.0));
    }

    #[test]
    fn test_fixed_reader() {
        let reader = TiltReader::fixed(TiltVector::new(0.3, -0.2));
        assert_eq!(reader.snapshot(), TiltVector::new(0.3, -0.2));
        assert_eq!(reader.clone().snapshot(), reader.snapshot());
    }

    #[test]
    fn test_readers_see_latest_store() {
        let slot = Arc::new(TiltSlot::new());
        let reader = TiltReader::new(slot.clone());
        let writer = std::thread::spawn(move || {
            for i in 0..=100 {
                slot.store(TiltVector::new(i as f32 / 100.0, -(i as f32) / 100.0));
            }
        });
        writer.join().unwrap();
        // Every intermediate pair was written as one word; the final one wins.
        assert_eq!(reader.snapshot(), TiltVector::new(1.0, -1.0));
    }
}
