//! Realtime DSP node graphs streamed to an audio device.
//!
//! Build a graph from [`graph`] nodes, hand the root to a [`Player`], and
//! the [`audio`] pipeline keeps the device fed through a lock-free ring.

pub mod audio; // Ring buffer, device callback, engine and player
pub mod config;
pub mod dsp;
pub mod error;
pub mod graph; // Composable signal nodes

pub use audio::{AudioEngine, Delivery, Player};
pub use config::EngineConfig;
pub use error::{Error, Result};

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Rate every node starts at until a graph or player sets its own.
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
