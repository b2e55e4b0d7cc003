use crate::{
    dsp::modulate::Polarity,
    graph::{
        node::{Generator, Node},
        param::Param,
    },
    DEFAULT_SAMPLE_RATE,
};

/// Outputs its "value" parameter on every tick.
///
/// Handy as a DC source, as a fixed modulation source in tests, or as a
/// control knob inside a graph: clone `value()` and turn it from anywhere.
pub struct Constant {
    value: Param,
    polarity: Polarity,
    sample_rate: f32,
}

impl Constant {
    /// A bipolar constant (modulation treats it as living in [-1, 1]).
    pub fn new(value: f32) -> Self {
        Self {
            value: Param::new(value),
            polarity: Polarity::Bipolar,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// A unipolar constant (modulation treats it as living in [0, 1]).
    pub fn unipolar(value: f32) -> Self {
        Self {
            polarity: Polarity::Unipolar,
            ..Self::new(value)
        }
    }

    pub fn value(&self) -> Param {
        self.value.clone()
    }
}

impl Node for Constant {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    fn param(&self, name: &str) -> Option<Param> {
        match name {
            "value" => Some(self.value.clone()),
            _ => None,
        }
    }
}

impl Generator for Constant {
    #[inline]
    fn tick(&mut self) -> f32 {
        self.value.get()
    }

    fn polarity(&self) -> Polarity {
        self.polarity
    }
}
