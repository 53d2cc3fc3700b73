use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use holokit_core::{MotionConfig, TiltVector};

use crate::slot::{TiltReader, TiltSlot};
use crate::source::OrientationSource;

struct Worker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Box<dyn OrientationSource>>,
}

/// Samples an [`OrientationSource`] at a fixed cadence and publishes the
/// normalized tilt.
///
/// Created once per hosting surface; `start`/`stop` follow that surface's
/// visibility. The published tilt is `(0, 0)` until the first sample and
/// stays at the last sampled value after `stop`.
pub struct MotionSampler {
    source: Option<Box<dyn OrientationSource>>,
    available: bool,
    interval: Duration,
    slot: Arc<TiltSlot>,
    worker: Option<Worker>,
}

impl MotionSampler {
    pub fn new(source: impl OrientationSource, config: &MotionConfig) -> Self {
        let available = source.is_available();
        Self {
            source: Some(Box::new(source)),
            available,
            interval: config.interval(),
            slot: Arc::new(TiltSlot::new()),
            worker: None,
        }
    }

    /// True iff orientation hardware exists.
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Begin sampling. Does nothing when hardware is absent or sampling is
    /// already running.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }
        if !self.available {
            tracing::warn!("orientation hardware unavailable, tilt stays at (0, 0)");
            return;
        }
        let Some(mut source) = self.source.take() else {
            tracing::warn!("orientation source lost after a worker failure, not sampling");
            return;
        };

        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = stop.clone();
        let slot = self.slot.clone();
        let interval = self.interval;

        let spawned = thread::Builder::new()
            .name("holokit-motion".to_string())
            .spawn(move || {
                source.begin_updates();
                while !worker_stop.load(Ordering::Acquire) {
                    if let Some(attitude) = source.read_attitude() {
                        slot.store(TiltVector::from_attitude(attitude.pitch, attitude.roll));
                    }
                    thread::park_timeout(interval);
                }
                source.end_updates();
                source
            });

        match spawned {
            Ok(handle) => {
                tracing::info!("motion sampling started at {:.0} Hz", 1.0 / interval.as_secs_f64());
                self.worker = Some(Worker { stop, handle });
            }
            Err(e) => {
                self.available = false;
                tracing::error!("failed to spawn motion worker: {}", e);
            }
        }
    }

    /// Halt sampling and release the sensor. Safe to call repeatedly.
    ///
    /// Wakes the worker instead of waiting out its interval, so this returns
    /// as soon as any in-flight read finishes.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        worker.stop.store(true, Ordering::Release);
        worker.handle.thread().unpark();
        match worker.handle.join() {
            Ok(source) => self.source = Some(source),
            Err(_) => {
                self.available = false;
                tracing::error!("motion worker panicked, sampler disabled");
            }
        }
        tracing::info!("motion sampling stopped");
    }

    /// The current normalized tilt.
    pub fn tilt(&self) -> TiltVector {
        self.slot.load()
    }

    /// A handle for render threads.
    pub fn reader(&self) -> TiltReader {
        TiltReader::new(self.slot.clone())
    }
}

impl Drop for MotionSampler {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for MotionSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionSampler")
            .field("available", &self.available)
            .field("running", &self.is_running())
            .field("interval", &self.interval)
            .field("tilt", &self.tilt())
            .finish()
    }
}
