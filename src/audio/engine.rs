use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{
    audio::{
        callback::{FrameSource, NodeSource, OutputCallback, RingSource},
        cpal_device::CpalDevice,
        device::{AudioDevice, OutputStream},
        shared::{SharedOutput, StreamStats},
    },
    config::EngineConfig,
    error::{Error, Result},
    graph::{node::Generator, param::Param},
};

/*
Audio Engine
============

Owns one output stream and the ring that feeds it. Two states:

    Stopped ──start──→ Active
       ↑                 │
       └──────stop───────┘

  start   Stopped only (AlreadyActive otherwise). Resets the ring, both
          cursors and all mute/fade state, then opens the device. If the
          device fails the engine stays Stopped with nothing left running.

  stop    Idempotent. Closes the device stream; a later start behaves as
          if the engine were new.

  push / available / buffered
          Active only (NotActive otherwise). Push never blocks and never
          grows the ring: it writes what fits and reports the count.

  mute / unmute / toggle / fade_out / clear
          Flags and cursors the callback reads; valid in either state.

Several engines can coexist (each owns its own ring and device handle),
which is what lets tests run in parallel.

The fill side does not need the engine itself: `writer()` hands out a
cloneable, Send handle onto the same ring.
*/

pub struct AudioEngine {
    config: EngineConfig,
    device: Box<dyn AudioDevice>,
    shared: Arc<SharedOutput>,
    stream: Option<Box<dyn OutputStream>>,
}

impl AudioEngine {
    pub fn new(config: EngineConfig, device: impl AudioDevice + 'static) -> Result<Self> {
        config.validate()?;
        let shared = Arc::new(SharedOutput::new(config.ring_capacity));

        Ok(Self {
            config,
            device: Box::new(device),
            shared,
            stream: None,
        })
    }

    /// An engine on the default hardware output.
    pub fn with_default_device(config: EngineConfig) -> Result<Self> {
        Self::new(config, CpalDevice::new())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start buffered delivery: the callback plays whatever is pushed.
    pub fn start(&mut self, sample_rate: f32) -> Result<()> {
        let shared = Arc::clone(&self.shared);
        self.open(sample_rate, RingSource::new(shared))
    }

    /// Start direct delivery: the callback ticks `node` itself, scaled by
    /// `volume`. The ring is unused.
    pub fn start_direct(
        &mut self,
        sample_rate: f32,
        node: Box<dyn Generator>,
        volume: Param,
    ) -> Result<()> {
        self.open(sample_rate, NodeSource::new(node, volume))
    }

    fn open<S: FrameSource + 'static>(&mut self, sample_rate: f32, source: S) -> Result<()> {
        if self.is_active() {
            return Err(Error::AlreadyActive);
        }

        let config = self.config.clone().with_sample_rate(sample_rate);
        config.validate()?;

        self.shared.reset(config.fade_samples());

        let mut callback = OutputCallback::new(Arc::clone(&self.shared), source);
        let stream = self
            .device
            .open(&config, Box::new(move |out: &mut [f32]| callback.render(out)))
            .inspect_err(|err| error!("failed to open {}: {}", self.device.name(), err))?;

        info!(
            "stream started on {} at {} Hz ({} frames/callback, ring {})",
            self.device.name(),
            config.sample_rate,
            config.frames_per_callback,
            config.ring_capacity
        );

        self.config = config;
        self.stream = Some(stream);
        self.shared.set_active(true);
        Ok(())
    }

    /// Stop the stream. Does nothing when already stopped.
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.shared.set_active(false);
            stream.close();

            let stats = self.shared.stats();
            info!(
                "stream stopped ({} underrun frames, {} dropped samples)",
                stats.underruns, stats.dropped
            );
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Queue samples for playback; returns how many fit.
    pub fn push(&self, samples: &[f32]) -> Result<usize> {
        push(&self.shared, samples)
    }

    /// Free slots in the ring.
    pub fn available(&self) -> Result<usize> {
        self.ensure_active()?;
        Ok(self.shared.ring.available())
    }

    /// Samples waiting to be played.
    pub fn buffered(&self) -> Result<usize> {
        self.ensure_active()?;
        Ok(self.shared.ring.buffered())
    }

    fn ensure_active(&self) -> Result<()> {
        if self.shared.is_active() {
            Ok(())
        } else {
            Err(Error::NotActive)
        }
    }

    pub fn capacity(&self) -> usize {
        self.shared.ring.capacity()
    }

    pub fn mute(&self) {
        self.shared.set_muted(true);
    }

    pub fn unmute(&self) {
        self.shared.set_muted(false);
    }

    /// Flip mute; returns true when now muted.
    pub fn toggle(&self) -> bool {
        self.shared.toggle_muted()
    }

    pub fn is_muted(&self) -> bool {
        self.shared.is_muted()
    }

    /// Ramp the output to silence over the configured fade time, then mute.
    pub fn fade_out(&self) {
        self.shared.request_fade();
    }

    pub fn is_faded(&self) -> bool {
        self.shared.is_faded()
    }

    /// Gain most recently applied by a fade (1.0 before any fade).
    pub fn fade_gain(&self) -> f32 {
        self.shared.fade_gain()
    }

    /// Discard everything buffered.
    ///
    /// Safe while the callback and a fill thread are running. Only the read
    /// cursor moves, so a block pushed concurrently either lands after the
    /// clear and plays, or is discarded whole with the rest.
    pub fn clear(&self) {
        let discarded = self.shared.ring.clear();
        debug!("cleared {discarded} buffered samples");
    }

    pub fn stats(&self) -> StreamStats {
        self.shared.stats()
    }

    /// A handle the fill thread can push through.
    pub fn writer(&self) -> StreamWriter {
        StreamWriter {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn push(shared: &SharedOutput, samples: &[f32]) -> Result<usize> {
    if !shared.is_active() {
        return Err(Error::NotActive);
    }
    let written = shared.ring.push(samples);
    shared.count_dropped((samples.len() - written) as u64);
    Ok(written)
}

/// Producer-side handle onto an engine's ring.
///
/// Reports `NotActive` once the engine stops, which is how a fill thread
/// learns to exit.
#[derive(Clone)]
pub struct StreamWriter {
    shared: Arc<SharedOutput>,
}

impl StreamWriter {
    pub fn push(&self, samples: &[f32]) -> Result<usize> {
        push(&self.shared, samples)
    }

    pub fn available(&self) -> Result<usize> {
        if !self.shared.is_active() {
            return Err(Error::NotActive);
        }
        Ok(self.shared.ring.available())
    }

    pub fn buffered(&self) -> Result<usize> {
        if !self.shared.is_active() {
            return Err(Error::NotActive);
        }
        Ok(self.shared.ring.buffered())
    }
}
