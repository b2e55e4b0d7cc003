use crate::{
    graph::{
        node::{Generator, Node},
        param::Param,
    },
    DEFAULT_SAMPLE_RATE, MAX_BLOCK_SIZE,
};

/*
Parallel Summing
================

A Mixer runs any number of generators side by side and adds their outputs:

    out = a.tick() + b.tick() + c.tick() + ...

There is NO normalization. Two full-scale sines summed in phase reach 2.0;
keeping the result inside [-1, 1] is the caller's job (follow the mixer
with an `Amp`, or set a chain gain).

Mixers stay flat. `.parallel(c)` on a mixer adds `c` as another input
instead of nesting the mixer inside a new one:

    a.parallel(b).parallel(c)   →   Mixer { a, b, c }

Block rendering renders each input into a scratch block and accumulates.
The scratch block is allocated once at construction, so rendering does not
allocate.

Use Cases:
----------
- Layering oscillators (detuned saws)
- Summing a sub-oscillator under a lead
- Building chords from single voices
*/

pub struct Mixer {
    inputs: Vec<Box<dyn Generator>>,
    sample_rate: f32,
    temp_buffer: Vec<f32>,
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Add another input. The first input sets the mixer's rate; later
    /// inputs are moved to it.
    pub fn parallel<G: Generator + 'static>(mut self, mut input: G) -> Self {
        if self.inputs.is_empty() {
            self.sample_rate = input.sample_rate();
        } else {
            input.set_sample_rate(self.sample_rate);
        }
        self.inputs.push(Box::new(input));
        self
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Mixer {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        for input in self.inputs.iter_mut() {
            input.set_sample_rate(sample_rate);
        }
    }

    fn param(&self, name: &str) -> Option<Param> {
        self.inputs.iter().find_map(|input| input.param(name))
    }
}

impl Generator for Mixer {
    #[inline]
    fn tick(&mut self) -> f32 {
        let mut sum = 0.0;
        for input in self.inputs.iter_mut() {
            sum += input.tick();
        }
        sum
    }

    fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            block.fill(0.0);
            let frames = &mut self.temp_buffer[..block.len()];

            for input in self.inputs.iter_mut() {
                input.render(frames);
                for (o, x) in block.iter_mut().zip(frames.iter()) {
                    *o += *x;
                }
            }
        }
    }
}
