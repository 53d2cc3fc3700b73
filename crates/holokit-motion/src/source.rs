use std::f64::consts::PI;

/// Raw device attitude in radians, roughly [-π, π] per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attitude {
    pub pitch: f64,
    pub roll: f64,
}

impl Attitude {
    pub const fn new(pitch: f64, roll: f64) -> Self {
        Self { pitch, roll }
    }
}

/// The sensor seam. A platform backend implements this over its motion API.
///
/// Sources are moved onto the sampler's worker thread while it runs, and
/// handed back when it stops.
pub trait OrientationSource: Send + 'static {
    /// True iff orientation hardware exists.
    fn is_available(&self) -> bool;

    /// Called on the worker before the first read.
    fn begin_updates(&mut self) {}

    /// The current attitude, or `None` if no sample is ready yet.
    fn read_attitude(&mut self) -> Option<Attitude>;

    /// Called on the worker after the last read. Release sensor resources here.
    fn end_updates(&mut self) {}
}

/// A device without orientation hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensor;

impl OrientationSource for NoSensor {
    fn is_available(&self) -> bool {
        false
    }

    fn read_attitude(&mut self) -> Option<Attitude> {
        None
    }
}

/// A device held perfectly still at one attitude.
#[derive(Debug, Clone, Copy)]
pub struct FixedAttitude(pub Attitude);

impl OrientationSource for FixedAttitude {
    fn is_available(&self) -> bool {
        true
    }

    fn read_attitude(&mut self) -> Option<Attitude> {
        Some(self.0)
    }
}

/// A synthetic source tracing a circle: roll follows `cos`, pitch follows
/// `sin`. Advances by one step per read, so the sequence is reproducible.
#[derive(Debug, Clone)]
pub struct SimulatedSweep {
    amplitude: f64,
    step: f64,
    reads: u64,
}

impl SimulatedSweep {
    /// `amplitude` in radians; one revolution every `steps_per_turn` reads.
    pub fn new(amplitude: f64, steps_per_turn: u32) -> Self {
        Self {
            amplitude,
            step: 2.0 * PI / steps_per_turn.max(1) as f64,
            reads: 0,
        }
    }

    /// The attitude at a given read index.
    pub fn attitude_at(&self, index: u64) -> Attitude {
        let phase = index as f64 * self.step;
        Attitude::new(self.amplitude * phase.sin(), self.amplitude * phase.cos())
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl OrientationSource for SimulatedSweep {
    fn is_available(&self) -> bool {
        true
    }

    fn begin_updates(&mut self) {
        self.reads = 0;
    }

    fn read_attitude(&mut self) -> Option<Attitude> {
        let attitude = self.attitude_at(self.reads);
        self.reads += 1;
        Some(attitude)
    }
}
