//! Parameter modulation primitives.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Parameter Modulation
====================

Modulation is using one signal to continuously vary a parameter of another.
Here the modulator's output is mapped onto an explicit [min, max] range and
written to the target parameter before every target tick.

Vocabulary
----------

  modulator     The signal doing the controlling (an LFO, an envelope,
                another audio-rate oscillator).

  target        The parameter being driven (filter cutoff, pitch, gain).

  range         The [min, max] the parameter sweeps across.

  bipolar       The modulator swings in [-1, +1]. Audio-rate oscillators
                and LFOs are bipolar.

  unipolar      The modulator stays in [0, 1]. Envelopes are unipolar.


The Math
--------

A bipolar source is first folded into [0, 1]:

    s' = s·0.5 + 0.5

then both kinds are mapped linearly:

    value = min·(1 − s') + max·s'

which is the same line as `min + s'·(max − min)`, but written so both ends
are exact in floating point: s' = 0 yields exactly `min`, s' = 1 yields
exactly `max`, and s' = 0.5 yields exactly the midpoint.

Example: cutoff range [200, 2000] Hz driven by a sine LFO

    LFO = -1.0  →  s' = 0.0  →  cutoff =  200 Hz
    LFO =  0.0  →  s' = 0.5  →  cutoff = 1100 Hz
    LFO = +1.0  →  s' = 1.0  →  cutoff = 2000 Hz


Sample-Rate Modulation
----------------------

The parameter is written every sample, not once per block. With atomic
parameter cells a write is a single store, so the per-sample cost is small,
and fast audio-rate sources (FM-style cutoff sweeps) do not step.

Sources that overshoot their nominal range produce values outside
[min, max]. The mapping does not clamp; a target that needs a hard limit
declares bounds on its parameter cell and the write is clamped there.
*/

/// The natural output range of a modulation source.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Output in [-1, 1].
    #[default]
    Bipolar,
    /// Output in [0, 1].
    Unipolar,
}

impl Polarity {
    /// Fold a source sample into [0, 1].
    #[inline]
    pub fn normalize(self, sample: f32) -> f32 {
        match self {
            Polarity::Bipolar => sample * 0.5 + 0.5,
            Polarity::Unipolar => sample,
        }
    }
}

/// Map a normalized position onto `[min, max]`.
#[inline]
pub fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min * (1.0 - t) + max * t
}

/// Map a raw source sample onto `[min, max]` according to its polarity.
#[inline]
pub fn map_to_range(sample: f32, polarity: Polarity, min: f32, max: f32) -> f32 {
    lerp(min, max, polarity.normalize(sample))
}
