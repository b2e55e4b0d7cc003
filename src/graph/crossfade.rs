use crate::{
    graph::{
        node::{Generator, Node},
        param::Param,
    },
    MAX_BLOCK_SIZE,
};

/*
Crossfading
===========

A CrossFader blends two generators with a live "fade" parameter:

    out = A × (1 − fade) + B × fade

  fade = 0.0 → 100% A
  fade = 0.5 → 50% A, 50% B (both at half amplitude)
  fade = 1.0 → 100% B

The fade is LINEAR. A 50/50 blend of uncorrelated sources sounds a little
quieter than either end; apply an equal-power curve on the control side
before writing the fade if that matters.

The fade lives in a bounded parameter cell: writes outside [0, 1] are
clamped as they are stored, so a tick never has to clamp on read.

Both sources are ticked on every sample, whatever the fade. A source that
sits at zero weight keeps its phase running and comes back in without a
jump.

Example usage:
  let morph = Osc::sine(220.0).crossfade(Osc::saw(220.0), 0.0);
  let fade = morph.fade();
  // later, from the UI thread
  fade.set(0.3);   // 70% sine, 30% saw
*/

pub struct CrossFader<A, B> {
    a: A,
    b: B,
    fade: Param,
    temp_buffer: Vec<f32>,
}

impl<A: Generator, B: Generator> CrossFader<A, B> {
    /// `b` is moved to `a`'s sample rate.
    pub fn new(a: A, mut b: B, fade: f32) -> Self {
        b.set_sample_rate(a.sample_rate());
        Self {
            a,
            b,
            fade: Param::bounded(fade, 0.0, 1.0),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Live handle to the fade position.
    pub fn fade(&self) -> Param {
        self.fade.clone()
    }
}

impl<A: Generator, B: Generator> Node for CrossFader<A, B> {
    fn sample_rate(&self) -> f32 {
        self.a.sample_rate()
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.a.set_sample_rate(sample_rate);
        self.b.set_sample_rate(sample_rate);
    }

    fn param(&self, name: &str) -> Option<Param> {
        if name == "fade" {
            return Some(self.fade.clone());
        }
        self.a.param(name).or_else(|| self.b.param(name))
    }
}

impl<A: Generator, B: Generator> Generator for CrossFader<A, B> {
    #[inline]
    fn tick(&mut self) -> f32 {
        let fade = self.fade.get();
        let a = self.a.tick();
        let b = self.b.tick();
        a * (1.0 - fade) + b * fade
    }

    fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.a.render(block);

            let frames = &mut self.temp_buffer[..block.len()];
            self.b.render(frames);

            let fade = self.fade.get();
            for (o, b) in block.iter_mut().zip(frames.iter()) {
                *o = *o * (1.0 - fade) + *b * fade;
            }
        }
    }
}
