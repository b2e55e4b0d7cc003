use std::sync::Arc;

use crate::{
    audio::shared::SharedOutput,
    graph::{node::Generator, param::Param},
};

/*
Device Callback
===============

The device asks for N frames every period (e.g. 256 at 44.1 kHz, about
5.8 ms). The callback must answer in bounded time: no locks, no allocation,
no I/O. Per frame:

    muted?  ──yes──→ emit 0.0, drop one buffered sample if there is one
      │
      no
      ↓
    data?   ──yes──→ emit the next buffered sample
      │
      no  (underrun)
      ↓
    emit 0.0, count it

Draining while muted matters: audio pushed before the mute would otherwise
still be sitting in the ring on unmute and play late.

Fade-Out
--------

`fade_out` only raises a flag. The callback notices it at the start of its
next period and runs the fade itself, holding the elapsed count locally:

    gain = 1 − elapsed / fade_len       elapsed = 1, 2, ..., fade_len

With a 4-sample fade over a constant 1.0 the output is 0.75, 0.5, 0.25, 0.0.
On the last frame the callback mutes the stream, clears the fade flag and
marks it faded, all before the next frame is produced.

The mute flag is loaded on every frame, so a mute from the control side
silences the next frame the callback produces. Once a fade finishes, the
rest of that period stays silent even if an unmute lands mid-period.
*/

/// Where the callback gets its frames from.
pub(crate) trait FrameSource: Send {
    /// The next frame, or `None` on underrun.
    fn next_frame(&mut self) -> Option<f32>;

    /// Consume one frame without emitting it (muted playback).
    fn skip_frame(&mut self);
}

/// Frames from the shared ring (buffered delivery).
pub(crate) struct RingSource {
    shared: Arc<SharedOutput>,
}

impl RingSource {
    pub(crate) fn new(shared: Arc<SharedOutput>) -> Self {
        Self { shared }
    }
}

impl FrameSource for RingSource {
    #[inline]
    fn next_frame(&mut self) -> Option<f32> {
        self.shared.ring.pop()
    }

    #[inline]
    fn skip_frame(&mut self) {
        self.shared.ring.skip();
    }
}

/// Frames ticked straight from a node inside the callback (direct
/// delivery). Never underruns; the graph must be cheap enough to run in
/// the device period.
pub(crate) struct NodeSource {
    node: Box<dyn Generator>,
    volume: Param,
}

impl NodeSource {
    pub(crate) fn new(node: Box<dyn Generator>, volume: Param) -> Self {
        Self { node, volume }
    }
}

impl FrameSource for NodeSource {
    #[inline]
    fn next_frame(&mut self) -> Option<f32> {
        Some(self.node.tick() * self.volume.get())
    }

    #[inline]
    fn skip_frame(&mut self) {
        // Keep the graph's time running while muted
        self.node.tick();
    }
}

pub(crate) struct OutputCallback<S> {
    shared: Arc<SharedOutput>,
    source: S,
    fading: bool,
    fade_elapsed: u32,
}

impl<S: FrameSource> OutputCallback<S> {
    pub(crate) fn new(shared: Arc<SharedOutput>, source: S) -> Self {
        Self {
            shared,
            source,
            fading: false,
            fade_elapsed: 0,
        }
    }

    /// Fill `out` with mono frames.
    pub(crate) fn render(&mut self, out: &mut [f32]) {
        let mut fade_finished = false;

        if self.shared.fade_requested() {
            if !self.fading {
                self.fading = true;
                self.fade_elapsed = 0;
            }
        } else {
            self.fading = false;
        }
        let fade_len = self.shared.fade_samples();

        let mut underruns = 0u64;

        for frame in out.iter_mut() {
            let muted = fade_finished || self.shared.is_muted();
            let mut sample = if muted {
                self.source.skip_frame();
                0.0
            } else {
                match self.source.next_frame() {
                    Some(sample) => sample,
                    None => {
                        underruns += 1;
                        0.0
                    }
                }
            };

            if self.fading {
                self.fade_elapsed += 1;
                let gain = (1.0 - self.fade_elapsed as f32 / fade_len as f32).max(0.0);
                sample *= gain;
                self.shared.store_fade_gain(gain);

                if self.fade_elapsed >= fade_len {
                    self.fading = false;
                    fade_finished = true;
                    self.shared.finish_fade();
                }
            }

            *frame = sample;
        }

        self.shared.count_underruns(underruns);
    }
}
