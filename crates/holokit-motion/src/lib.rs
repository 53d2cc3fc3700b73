//! # holokit-motion
//!
//! Turns raw device orientation into the normalized tilt signal every card
//! effect reads. A [`MotionSampler`] owns one [`OrientationSource`], polls it
//! on a worker thread, and publishes the latest [`TiltVector`] through a
//! single atomic slot. Render code holds a [`TiltReader`] and takes one
//! snapshot per frame.
//!
//! [`TiltVector`]: holokit_core::TiltVector

pub mod sampler;
pub mod slot;
pub mod source;

pub use sampler::MotionSampler;
pub use slot::{TiltReader, TiltSlot};
pub use source::{Attitude, FixedAttitude, NoSensor, OrientationSource, SimulatedSweep};
