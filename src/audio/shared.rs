use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use crate::audio::ring::SampleRing;

/// Everything the control side and the device callback both touch.
///
/// Every field is a single-word atomic; nothing here ever takes a lock.
pub(crate) struct SharedOutput {
    pub(crate) ring: SampleRing,
    active: AtomicBool,
    muted: AtomicBool,
    fade_active: AtomicBool,
    faded: AtomicBool,
    fade_gain: AtomicU32,
    fade_samples: AtomicU32,
    underruns: AtomicU64,
    dropped: AtomicU64,
}

/// Counters for conditions the realtime path absorbs instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Frames of silence the callback substituted for an empty ring.
    pub underruns: u64,
    /// Samples a push could not fit.
    pub dropped: u64,
}

impl SharedOutput {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            ring: SampleRing::new(capacity),
            active: AtomicBool::new(false),
            muted: AtomicBool::new(false),
            fade_active: AtomicBool::new(false),
            faded: AtomicBool::new(false),
            fade_gain: AtomicU32::new(1.0f32.to_bits()),
            fade_samples: AtomicU32::new(1),
            underruns: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Back to a freshly started state. Only called while no callback runs.
    pub(crate) fn reset(&self, fade_samples: u32) {
        self.ring.reset();
        self.muted.store(false, Ordering::Release);
        self.fade_active.store(false, Ordering::Release);
        self.faded.store(false, Ordering::Release);
        self.fade_gain.store(1.0f32.to_bits(), Ordering::Relaxed);
        self.fade_samples.store(fade_samples.max(1), Ordering::Relaxed);
        self.underruns.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    pub(crate) fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Acquire)
    }

    pub(crate) fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Release);
    }

    /// Flip the mute flag; returns the new state.
    pub(crate) fn toggle_muted(&self) -> bool {
        !self.muted.fetch_xor(true, Ordering::AcqRel)
    }

    pub(crate) fn request_fade(&self) {
        self.faded.store(false, Ordering::Release);
        self.fade_active.store(true, Ordering::Release);
    }

    pub(crate) fn fade_requested(&self) -> bool {
        self.fade_active.load(Ordering::Acquire)
    }

    /// Called by the callback when the fade gain reaches zero.
    pub(crate) fn finish_fade(&self) {
        self.muted.store(true, Ordering::Release);
        self.fade_active.store(false, Ordering::Release);
        self.faded.store(true, Ordering::Release);
    }

    pub(crate) fn is_faded(&self) -> bool {
        self.faded.load(Ordering::Acquire)
    }

    pub(crate) fn fade_gain(&self) -> f32 {
        f32::from_bits(self.fade_gain.load(Ordering::Relaxed))
    }

    pub(crate) fn store_fade_gain(&self, gain: f32) {
        self.fade_gain.store(gain.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn fade_samples(&self) -> u32 {
        self.fade_samples.load(Ordering::Relaxed)
    }

    pub(crate) fn count_underruns(&self, frames: u64) {
        if frames > 0 {
            self.underruns.fetch_add(frames, Ordering::Relaxed);
        }
    }

    pub(crate) fn count_dropped(&self, samples: u64) {
        if samples > 0 {
            self.dropped.fetch_add(samples, Ordering::Relaxed);
        }
    }

    pub(crate) fn stats(&self) -> StreamStats {
        StreamStats {
            underruns: self.underruns.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}
