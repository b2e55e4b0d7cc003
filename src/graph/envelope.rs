use crate::{
    dsp::{
        envelope::{Envelope, EnvelopeStage},
        modulate::Polarity,
    },
    graph::{
        node::{Generator, Node},
        param::Param,
    },
    DEFAULT_SAMPLE_RATE,
};

/// ADSR envelope as a unipolar generator.
///
/// The node is gated through its "gate" parameter: a value above 0.5 is
/// high. The edge is detected on the fill thread at the start of a tick, so
/// the control side only ever stores a number.
///
///   let env = EnvNode::adsr(0.01, 0.2, 0.6, 0.5);
///   let gate = env.gate();
///   let voice = Osc::saw(110.0).serial(FilterNode::lowpass(400.0))
///       .modulate("cutoff", env, 400.0..=4000.0)?;
///   gate.set(1.0); // note on, from any thread
pub struct EnvNode {
    env: Envelope,
    gate: Param,
    gate_high: bool,
    sample_rate: f32,
}

impl EnvNode {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            env: Envelope::adsr(attack, decay, sustain, release),
            gate: Param::bounded(0.0, 0.0, 1.0),
            gate_high: false,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    pub fn gate(&self) -> Param {
        self.gate.clone()
    }

    pub fn note_on(&self) {
        self.gate.set(1.0);
    }

    pub fn note_off(&self) {
        self.gate.set(0.0);
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.env.stage()
    }

    pub fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

impl Node for EnvNode {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    fn param(&self, name: &str) -> Option<Param> {
        match name {
            "gate" => Some(self.gate.clone()),
            _ => None,
        }
    }
}

impl Generator for EnvNode {
    fn tick(&mut self) -> f32 {
        let high = self.gate.get() > 0.5;
        if high != self.gate_high {
            self.gate_high = high;
            if high {
                self.env.gate_on();
            } else {
                self.env.gate_off(self.sample_rate);
            }
        }

        self.env.next_sample(self.sample_rate)
    }

    fn polarity(&self) -> Polarity {
        Polarity::Unipolar
    }
}
