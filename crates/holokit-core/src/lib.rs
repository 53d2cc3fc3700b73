//! # holokit-core
//!
//! Core types and primitives for the HoloKit card effect engine.
//! This crate contains foundational types shared across all HoloKit crates:
//! rasters, colors, blend modes, tilt and geometry, elapsed time, content
//! hashing, configuration, and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod hash;
pub mod math;
pub mod time;
pub mod types;

pub use config::*;

pub use color::Color;
pub use error::{HoloError, HoloResult};
pub use frame::FrameBuffer;
pub use hash::{hash_frame, hash_frames, ContentHash};
pub use math::{Point2D, Size2D, TiltVector, WindowRect};
pub use time::{ElapsedTime, FrameClock};
pub use types::BlendMode;
