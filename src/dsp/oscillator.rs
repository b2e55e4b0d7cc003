use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase-Accumulator Oscillators
=============================

Every waveform here is a function of one number: the phase, a position in
[0, 1) within the current cycle. Each sample the phase advances by

    increment = frequency / sample_rate

and wraps back into [0, 1). The waveform shapes that phase:

  sine     sin(2π·phase)                  smooth, no harmonics
  saw      2·phase − 1                    all harmonics, 1/n falloff
  square   +1 for phase < ½, −1 after     odd harmonics, 1/n falloff

The saw and square here are NAIVE: they jump instantly at the cycle
boundary. A jump has infinite bandwidth, so at high pitches the harmonics
above Nyquist fold back as audible aliasing. That is exactly what the
oversampling wrapper exists to suppress; these shapes are kept naive on
purpose so the effect is measurable.

The phase is held in f64. In f32 a slowly-advancing phase loses precision
after a few minutes of playback and the pitch drifts.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
}

#[derive(Debug, Clone, Copy)]
pub struct Phasor {
    phase: f64,
}

impl Phasor {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Current phase, then advance by one sample.
    #[inline]
    pub fn advance(&mut self, frequency: f32, sample_rate: f32) -> f64 {
        let current = self.phase;
        self.phase += frequency as f64 / sample_rate as f64;
        self.phase -= self.phase.floor();
        current
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

impl Default for Phasor {
    fn default() -> Self {
        Self::new()
    }
}

impl Waveform {
    /// Evaluate the waveform at `phase` in [0, 1).
    #[inline]
    pub fn at(self, phase: f64) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin() as f32,
            Waveform::Saw => (2.0 * phase - 1.0) as f32,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}
