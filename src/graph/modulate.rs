use std::ops::RangeInclusive;

use crate::{
    dsp::modulate::{map_to_range, Polarity},
    error::{Error, Result},
    graph::{
        node::{Generator, Node, Processor},
        param::Param,
    },
};

/*
Modulated Node
==============

Connects any generator to a named parameter of another node. This is how
vibrato, filter sweeps and envelope-controlled filters are built.

  // Auto-wah: sine LFO sweeps the filter cutoff between 300 Hz and 3 kHz
  let wah = FilterNode::lowpass(1000.0)
      .modulate("cutoff", Osc::sine(2.0), 300.0..=3000.0)?;

  // Vibrato: pitch wobbles ±5 Hz around 220 Hz
  let vib = Osc::saw(220.0).modulate("freq", Osc::sine(6.0), 215.0..=225.0)?;

Each tick, in this order:

  1. tick the source
  2. map its output onto [min, max] (see `dsp/modulate.rs`)
  3. store the value into the target's parameter cell
  4. tick the target and return its output

The parameter is resolved once, when the wrapper is built. An unknown name
fails there with `Error::UnknownParam`; nothing is looked up per tick.

Stacking
--------

Wrappers nest. Each owns one parameter and writes it before delegating to
the node it wraps, so

  osc.modulate("freq", lfo, ..)?.modulate("gain", env, ..)?

writes "gain" (outer) then "freq" (inner) then ticks the oscillator, in the
same order on every tick. Two wrappers on the SAME parameter are allowed;
the inner write lands last and wins.

The wrapper is transparent to composition: it is a Generator when the
target is, a Processor when the target is, reports the target's polarity,
and answers parameter lookups from the target first, then the source.
*/

pub struct Modulated<T, S> {
    target: T,
    source: S,
    param: Param,
    min: f32,
    max: f32,
}

impl<T: Node, S: Generator> Modulated<T, S> {
    /// Bind `source` to `target`'s parameter `name`, mapped onto `range`.
    ///
    /// The source is moved to the target's sample rate. `min > max` is an
    /// inverted sweep.
    pub fn new(target: T, name: &str, mut source: S, range: RangeInclusive<f32>) -> Result<Self> {
        let (min, max) = range.into_inner();
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidRange { min, max });
        }

        let param = target.param(name).ok_or_else(|| Error::UnknownParam {
            name: name.to_string(),
        })?;

        source.set_sample_rate(target.sample_rate());

        Ok(Self {
            target,
            source,
            param,
            min,
            max,
        })
    }

    pub fn range(&self) -> RangeInclusive<f32> {
        self.min..=self.max
    }

    /// The parameter cell this wrapper writes.
    pub fn param_handle(&self) -> Param {
        self.param.clone()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    #[inline]
    fn drive(&mut self) {
        let s = self.source.tick();
        let value = map_to_range(s, self.source.polarity(), self.min, self.max);
        self.param.set(value);
    }
}

impl<T: Node, S: Generator> Node for Modulated<T, S> {
    fn sample_rate(&self) -> f32 {
        self.target.sample_rate()
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.target.set_sample_rate(sample_rate);
        self.source.set_sample_rate(sample_rate);
    }

    fn param(&self, name: &str) -> Option<Param> {
        self.target.param(name).or_else(|| self.source.param(name))
    }
}

impl<T: Generator, S: Generator> Generator for Modulated<T, S> {
    #[inline]
    fn tick(&mut self) -> f32 {
        self.drive();
        self.target.tick()
    }

    fn polarity(&self) -> Polarity {
        self.target.polarity()
    }
}

impl<T: Processor, S: Generator> Processor for Modulated<T, S> {
    #[inline]
    fn tick(&mut self, input: f32) -> f32 {
        self.drive();
        self.target.tick(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        amplify::Amp, constant::Constant, envelope::EnvNode, extensions::NodeExt,
        filter::FilterNode, oscillator::Osc,
    };

    #[test]
    fn writes_parameter_before_ticking_target() {
        let source = Constant::new(1.0);
        let mut node = Constant::new(0.0).modulate("value", source, -4.0..=8.0).expect("bind");

        // The very first tick already sees the mapped value
        assert_eq!(node.tick(), 8.0);
    }

    #[test]
    fn unipolar_sources_are_not_rescaled() {
        let mut node = Constant::new(0.0)
            .modulate("value", Constant::unipolar(0.25), 0.0..=100.0)
            .expect("bind");
        assert_eq!(node.tick(), 25.0);
    }

    #[test]
    fn unknown_parameter_fails_at_bind() {
        let result = Osc::sine(440.0).modulate("cutoff", Osc::sine(1.0), 0.0..=1.0);
        assert!(matches!(result, Err(Error::UnknownParam { name }) if name == "cutoff"));
    }

    #[test]
    fn non_finite_range_is_rejected() {
        let result = Osc::sine(440.0).modulate("freq", Osc::sine(1.0), 0.0..=f32::INFINITY);
        assert!(matches!(result, Err(Error::InvalidRange { .. })));

        let result = Osc::sine(440.0).modulate("freq", Osc::sine(1.0), f32::NAN..=1.0);
        assert!(result.is_err(), "NaN bounds must not bind");
    }

    #[test]
    fn processor_targets_stay_processors() {
        let mut node = Amp::new(1.0)
            .modulate("gain", Constant::new(-1.0), 0.5..=2.0)
            .expect("bind");
        assert_eq!(node.tick(4.0), 2.0);
    }

    #[test]
    fn stacked_wrappers_each_own_their_parameter() {
        let filter = FilterNode::lowpass(1_000.0);
        let cutoff = filter.cutoff();
        let resonance = filter.resonance();

        let mut node = filter
            .modulate("cutoff", Constant::new(0.0), 200.0..=600.0)
            .and_then(|n| n.modulate("resonance", Constant::unipolar(0.5), 0.0..=0.8))
            .expect("bind both");

        node.tick(0.0);
        assert_eq!(cutoff.get(), 400.0);
        assert_eq!(resonance.get(), 0.4);
    }

    #[test]
    fn envelope_sweeps_upward_from_range_min() {
        let env = EnvNode::adsr(0.002, 0.01, 1.0, 0.01);
        env.note_on();

        let filter = FilterNode::lowpass(100.0);
        let cutoff = filter.cutoff();
        let mut node = filter.modulate("cutoff", env, 100.0..=1_100.0).expect("bind");
        node.set_sample_rate(1_000.0);

        node.tick(0.0);
        assert_eq!(cutoff.get(), 600.0, "half way through a two-sample attack");
        node.tick(0.0);
        assert_eq!(cutoff.get(), 1_100.0);
    }

    #[test]
    fn lookups_reach_target_then_source() {
        let node = Osc::sine(440.0)
            .modulate("freq", Constant::new(0.0), 430.0..=450.0)
            .expect("bind");
        assert_eq!(node.get_param("freq"), Ok(440.0), "target wins the shared name");
        assert_eq!(node.get_param("value"), Ok(0.0), "source params stay reachable");
    }
}
