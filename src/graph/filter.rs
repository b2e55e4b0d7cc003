use crate::{
    dsp::filter::{FilterType, SVFilter},
    graph::{
        node::{Node, Processor},
        param::Param,
    },
    DEFAULT_SAMPLE_RATE,
};

/*
State-Variable Filter (SVF)
===========================

A filter removes or attenuates part of the spectrum. Feed it a bright
waveform (a naive saw) and sweep the cutoff for the classic subtractive
sound.

Filter Types:
-------------

Lowpass: passes frequencies BELOW the cutoff.
  - Higher cutoff = brighter, lower cutoff = darker

Highpass: passes frequencies ABOVE the cutoff.
  - Removes rumble, thins a sound out

Bandpass: passes a band AROUND the cutoff.
  - Sweeping it is the classic wah

Notch: rejects a band AT the cutoff, passes everything else.

Parameters:
-----------

"cutoff" (Hz): where the filter takes effect.
  - 200 Hz:    muffled, like through a wall
  - 1000 Hz:   warm, round
  - 5000 Hz:   present, clear

"resonance" in [0, 0.99]: emphasis at the cutoff.
  - 0.0:  gentle rolloff
  - 0.9:  strong peak, "squelchy"

Both are read every tick, so a modulation wrapper can sweep them at audio
rate without zipper noise:

  let wah = Osc::saw(110.0)
      .serial(FilterNode::lowpass(800.0).with_resonance(0.7))
      .modulate("cutoff", Osc::sine(2.0), 300.0..=3000.0)?;
*/

pub struct FilterNode {
    filter: SVFilter,
    cutoff: Param,
    resonance: Param,
    sample_rate: f32,
}

impl FilterNode {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::new(filter_type),
            cutoff: Param::bounded(cutoff_hz, 1.0, f32::INFINITY),
            resonance: Param::bounded(0.0, 0.0, 0.99),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz)
    }

    pub fn notch(cutoff_hz: f32) -> Self {
        Self::new(FilterType::Notch, cutoff_hz)
    }

    pub fn with_resonance(self, resonance: f32) -> Self {
        self.resonance.set(resonance);
        self
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter.filter_type()
    }

    pub fn cutoff(&self) -> Param {
        self.cutoff.clone()
    }

    pub fn resonance(&self) -> Param {
        self.resonance.clone()
    }
}

impl Node for FilterNode {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    fn param(&self, name: &str) -> Option<Param> {
        match name {
            "cutoff" => Some(self.cutoff.clone()),
            "resonance" => Some(self.resonance.clone()),
            _ => None,
        }
    }
}

impl Processor for FilterNode {
    #[inline]
    fn tick(&mut self, input: f32) -> f32 {
        let g = SVFilter::compute_g(self.cutoff.get(), self.sample_rate);
        let k = SVFilter::compute_k(self.resonance.get());
        self.filter.tick(input, k, g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resonance_is_bounded_below_self_oscillation() {
        let filter = FilterNode::lowpass(1_000.0).with_resonance(4.0);
        assert_eq!(filter.get_param("resonance"), Ok(0.99));
    }

    #[test]
    fn lowpass_settles_to_dc() {
        let mut filter = FilterNode::lowpass(500.0);
        filter.set_sample_rate(48_000.0);

        let out: Vec<f32> = filter.ticks(std::iter::repeat(1.0).take(512)).collect();
        assert!(out[511] > 0.99, "lowpass should pass DC, got {}", out[511]);
    }

    #[test]
    fn cutoff_write_takes_effect_next_tick() {
        let mut open = FilterNode::lowpass(20_000.0);
        let mut closed = FilterNode::lowpass(20_000.0);
        closed.cutoff().set(50.0);

        let a = open.tick(1.0);
        let b = closed.tick(1.0);
        assert!(b < a, "closing the cutoff should slow the step response ({b} vs {a})");
    }
}
