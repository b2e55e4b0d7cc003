use crate::{
    dsp::modulate::Polarity,
    graph::{
        node::{Generator, Node, Processor},
        param::Param,
    },
    MAX_BLOCK_SIZE,
};

/*
Serial Chains
=============

A chain is a head node followed by a flat list of processors, with one
output gain at the end:

    head ──→ stage[0] ──→ stage[1] ──→ ... ──→ × gain ──→ out

The head decides what the chain is:

  head is a Generator  →  the chain is a Generator (no input needed)
  head is a Processor  →  the chain is a Processor (input enters the head)

Chains stay flat. Calling `.serial(p)` on a chain appends `p` to its stage
list instead of wrapping the chain inside another chain, so

    osc.serial(filter).serial(amp)

is one Chain with two stages and one gain, not a chain of chains.

Each stage is boxed. The head stays a concrete type so the chain keeps the
head's capability (Generator or Processor) in its own type.

Parameter lookup tries the chain's own "gain" first, then the head, then
each stage in order, so a name reaches the first node that declares it:

    let voice = Osc::saw(110.0).serial(FilterNode::lowpass(800.0));
    voice.set_param("cutoff", 1200.0)?;   // the filter inside the chain
*/

pub struct Chain<H> {
    head: H,
    stages: Vec<Box<dyn Processor>>,
    gain: Param,
}

impl<H: Node> Chain<H> {
    pub fn new(head: H) -> Self {
        Self {
            head,
            stages: Vec::new(),
            gain: Param::new(1.0),
        }
    }

    /// Append a processor to the end of the chain.
    ///
    /// The stage is moved to the chain's sample rate before it is stored.
    pub fn serial<P: Processor + 'static>(mut self, mut stage: P) -> Self {
        stage.set_sample_rate(self.head.sample_rate());
        self.stages.push(Box::new(stage));
        self
    }

    pub fn with_gain(self, gain: f32) -> Self {
        self.gain.set(gain);
        self
    }

    /// Live handle to the output gain.
    pub fn gain(&self) -> Param {
        self.gain.clone()
    }

    /// Number of processors after the head.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[inline]
    fn run_stages(&mut self, mut signal: f32) -> f32 {
        for stage in self.stages.iter_mut() {
            signal = stage.tick(signal);
        }
        signal * self.gain.get()
    }
}

impl<H: Node> Node for Chain<H> {
    fn sample_rate(&self) -> f32 {
        self.head.sample_rate()
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.head.set_sample_rate(sample_rate);
        for stage in self.stages.iter_mut() {
            stage.set_sample_rate(sample_rate);
        }
    }

    fn param(&self, name: &str) -> Option<Param> {
        if name == "gain" {
            return Some(self.gain.clone());
        }
        self.head
            .param(name)
            .or_else(|| self.stages.iter().find_map(|stage| stage.param(name)))
    }
}

impl<H: Generator> Generator for Chain<H> {
    #[inline]
    fn tick(&mut self) -> f32 {
        let signal = self.head.tick();
        self.run_stages(signal)
    }

    fn polarity(&self) -> Polarity {
        self.head.polarity()
    }

    fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.head.render(block);
            for stage in self.stages.iter_mut() {
                stage.process(block);
            }
            let gain = self.gain.get();
            for sample in block.iter_mut() {
                *sample *= gain;
            }
        }
    }
}

impl<H: Processor> Processor for Chain<H> {
    #[inline]
    fn tick(&mut self, input: f32) -> f32 {
        let signal = self.head.tick(input);
        self.run_stages(signal)
    }
}
