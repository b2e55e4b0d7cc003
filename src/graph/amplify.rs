use crate::{
    graph::{
        node::{Node, Processor},
        param::Param,
    },
    DEFAULT_SAMPLE_RATE,
};

/// Scales its input by the live "gain" parameter.
pub struct Amp {
    gain: Param,
    sample_rate: f32,
}

impl Amp {
    pub fn new(gain: f32) -> Self {
        Self {
            gain: Param::new(gain),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    pub fn gain(&self) -> Param {
        self.gain.clone()
    }
}

impl Node for Amp {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    fn param(&self, name: &str) -> Option<Param> {
        match name {
            "gain" => Some(self.gain.clone()),
            _ => None,
        }
    }
}

impl Processor for Amp {
    #[inline]
    fn tick(&mut self, input: f32) -> f32 {
        input * self.gain.get()
    }

    fn process(&mut self, buffer: &mut [f32]) {
        // One load per block; a gain change lands on the next block
        let gain = self.gain.get();
        for sample in buffer.iter_mut() {
            *sample *= gain;
        }
    }
}
