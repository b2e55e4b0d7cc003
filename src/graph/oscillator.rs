use crate::{
    dsp::oscillator::{Phasor, Waveform},
    graph::{
        node::{Generator, Node},
        param::Param,
    },
    DEFAULT_SAMPLE_RATE,
};

/*
Audio Oscillator
================

The basic sound source: a repeating waveform at a given frequency.

Sine: a single frequency with no harmonics.
  - Sound: smooth, hollow
  - Use: sub-bass, test tones, modulation source (LFO at a few Hz)

Sawtooth: all harmonics, falling off as 1/n.
  - Sound: bright, buzzy
  - Use: leads, basses, anything that will be filtered afterwards

Square: odd harmonics only, falling off as 1/n.
  - Sound: hollow, woody
  - Use: chiptune, hollow leads

The saw and square are naive (they jump at the cycle boundary) and alias
at high pitches. Wrap them with `.oversample(4)` when that matters.

The frequency is a live parameter named "freq". It is read once per tick,
so a modulation wrapper around the oscillator can sweep it at audio rate:

  let vibrato = Osc::sine(5.0);
  let voice = Osc::saw(220.0).modulate("freq", vibrato, 215.0..=225.0)?;
*/

pub struct Osc {
    waveform: Waveform,
    phasor: Phasor,
    freq: Param,
    sample_rate: f32,
}

impl Osc {
    pub fn new(waveform: Waveform, freq: f32) -> Self {
        Self {
            waveform,
            phasor: Phasor::new(),
            freq: Param::new(freq),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    pub fn sine(freq: f32) -> Self {
        Self::new(Waveform::Sine, freq)
    }

    pub fn saw(freq: f32) -> Self {
        Self::new(Waveform::Saw, freq)
    }

    pub fn square(freq: f32) -> Self {
        Self::new(Waveform::Square, freq)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Live handle to the frequency in Hz.
    pub fn frequency(&self) -> Param {
        self.freq.clone()
    }
}

impl Node for Osc {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    fn param(&self, name: &str) -> Option<Param> {
        match name {
            "freq" => Some(self.freq.clone()),
            _ => None,
        }
    }
}

impl Generator for Osc {
    #[inline]
    fn tick(&mut self) -> f32 {
        let phase = self.phasor.advance(self.freq.get(), self.sample_rate);
        self.waveform.at(phase)
    }
}
