//! Engine configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    DEFAULT_SAMPLE_RATE, MAX_BLOCK_SIZE,
};

/// Settings for the delivery pipeline.
///
/// The defaults mirror a low-latency mono stream: 256-frame hardware
/// callbacks, a 32768-sample ring (about 750 ms at 44.1 kHz), 512-sample
/// fill blocks and a 20 ms fade-out.
///
/// ```
/// use radspberry::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_sample_rate(48_000.0)
///     .with_ring_capacity(8192);
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: f32,
    /// Frames requested from the device per callback.
    pub frames_per_callback: u32,
    /// Ring buffer slots. One slot always stays empty.
    pub ring_capacity: usize,
    /// Samples rendered by the fill thread per block.
    pub block_size: usize,
    /// Fade-out duration in milliseconds.
    pub fade_ms: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            frames_per_callback: 256,
            ring_capacity: 32_768,
            block_size: 512,
            fade_ms: 20.0,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_frames_per_callback(mut self, frames: u32) -> Self {
        self.frames_per_callback = frames;
        self
    }

    pub fn with_ring_capacity(mut self, capacity: usize) -> Self {
        self.ring_capacity = capacity;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_fade_ms(mut self, fade_ms: f32) -> Self {
        self.fade_ms = fade_ms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(invalid("sample_rate", "must be a positive number of Hz"));
        }
        if self.frames_per_callback == 0 {
            return Err(invalid("frames_per_callback", "must be at least 1"));
        }
        if self.ring_capacity < 2 {
            return Err(invalid("ring_capacity", "must be at least 2"));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(invalid("block_size", "must be within 1..=MAX_BLOCK_SIZE"));
        }
        if self.block_size > self.ring_capacity - 1 {
            // The fill thread waits for a whole block of free space
            return Err(invalid("block_size", "must fit in the ring (at most ring_capacity - 1)"));
        }
        if !self.fade_ms.is_finite() || self.fade_ms < 0.0 {
            return Err(invalid("fade_ms", "must be a non-negative duration"));
        }
        Ok(())
    }

    /// Fade-out length in samples at the configured rate (at least one).
    pub fn fade_samples(&self) -> u32 {
        (self.fade_ms / 1000.0 * self.sample_rate).round().max(1.0) as u32
    }
}

fn invalid(field: &'static str, reason: &'static str) -> Error {
    Error::InvalidConfig { field, reason }
}
