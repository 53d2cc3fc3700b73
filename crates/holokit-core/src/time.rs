use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Seconds elapsed since a card attached to its surface. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ElapsedTime {
    seconds: f64,
}

impl ElapsedTime {
    /// Create from seconds. Negative and non-finite values collapse to zero.
    pub fn from_seconds(s: f64) -> Self {
        let seconds = if s.is_finite() { s.max(0.0) } else { 0.0 };
        Self { seconds }
    }

    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Seconds as the f32 the procedural passes consume.
    pub fn as_f32(&self) -> f32 {
        self.seconds as f32
    }
}

impl Default for ElapsedTime {
    fn default() -> Self {
        ElapsedTime::zero()
    }
}

impl Add for ElapsedTime {
    type Output = ElapsedTime;
    fn add(self, rhs: ElapsedTime) -> ElapsedTime {
        ElapsedTime::from_seconds(self.seconds + rhs.seconds)
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds < 1.0 {
            write!(f, "{:.0}ms", self.seconds * 1000.0)
        } else {
            write!(f, "{:.2}s", self.seconds)
        }
    }
}

/// Monotonic per-attachment clock. Starts at zero and only moves forward.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    elapsed: ElapsedTime,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Negative or non-finite steps count as zero.
    pub fn advance(&mut self, dt: f64) -> ElapsedTime {
        self.elapsed = self.elapsed + ElapsedTime::from_seconds(dt);
        self.frames += 1;
        self.elapsed
    }

    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    /// Number of ticks since the clock was created.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
