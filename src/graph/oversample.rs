use crate::{
    dsp::{biquad::Cascade, modulate::Polarity, oversampling::Factor},
    graph::{
        node::{Generator, Node, Processor},
        param::Param,
    },
    MAX_BLOCK_SIZE,
};

/*
Oversampled Node
================

Runs the wrapped node at F times the outer sample rate and filters the
result back down (see `dsp/oversampling.rs` for the filter designs).

Generator, per output sample:

    inner.tick() ×F ─→ decimation LPF ×F ─→ keep the last of the F

Processor, per output sample:

    x·F, 0, 0, 0 ─→ interpolation LPF ─→ inner.tick() ─→ decimation LPF
    (zero-stuffed)                       ×F             keep the last

Keeping the last filtered sample of every group is "keep every F-th": the
decimation filter still sees all F inner samples, so its state is correct.

Both filters run continuously for the wrapper's lifetime. Nothing resets
them between ticks or blocks, so block boundaries are seamless and the
group delay is constant.

The inner node always runs at `outer_rate × F`. Setting the wrapper's
rate sets the inner rate; reading it reports the outer rate. Parameters
pass straight through to the inner node.

  // An aliasing-prone naive saw, cleaned up
  let clean_saw = Osc::saw(3_520.0).oversample(4)?;
*/

pub struct Oversampled<T> {
    inner: T,
    factor: Factor,
    outer_rate: f32,
    upsampler: Cascade,
    decimator: Cascade,
    temp_buffer: Vec<f32>,
}

impl<T: Node> Oversampled<T> {
    /// The inner node is moved to `outer_rate × factor`, where the outer
    /// rate is whatever `inner` was running at.
    pub fn new(mut inner: T, factor: Factor) -> Self {
        let outer_rate = inner.sample_rate();
        inner.set_sample_rate(outer_rate * factor.ratio() as f32);

        Self {
            inner,
            factor,
            outer_rate,
            upsampler: factor.anti_alias_filter(),
            decimator: factor.anti_alias_filter(),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn factor(&self) -> Factor {
        self.factor
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Node> Node for Oversampled<T> {
    fn sample_rate(&self) -> f32 {
        self.outer_rate
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.outer_rate = sample_rate;
        self.inner.set_sample_rate(sample_rate * self.factor.ratio() as f32);
    }

    fn param(&self, name: &str) -> Option<Param> {
        self.inner.param(name)
    }
}

impl<T: Generator> Generator for Oversampled<T> {
    #[inline]
    fn tick(&mut self) -> f32 {
        let mut out = 0.0;
        for _ in 0..self.factor.ratio() {
            out = self.decimator.process(self.inner.tick() as f64);
        }
        out as f32
    }

    fn polarity(&self) -> Polarity {
        self.inner.polarity()
    }

    fn render(&mut self, out: &mut [f32]) {
        let ratio = self.factor.ratio();

        for block in out.chunks_mut(MAX_BLOCK_SIZE / ratio) {
            let frames = &mut self.temp_buffer[..block.len() * ratio];
            self.inner.render(frames);

            for (sample, group) in block.iter_mut().zip(frames.chunks_exact(ratio)) {
                let mut y = 0.0;
                for &x in group {
                    y = self.decimator.process(x as f64);
                }
                *sample = y as f32;
            }
        }
    }
}

impl<T: Processor> Processor for Oversampled<T> {
    #[inline]
    fn tick(&mut self, input: f32) -> f32 {
        let ratio = self.factor.ratio();
        let stuffed = input as f64 * ratio as f64;

        let mut out = 0.0;
        for i in 0..ratio {
            let x = if i == 0 { stuffed } else { 0.0 };
            let upsampled = self.upsampler.process(x) as f32;
            let processed = self.inner.tick(upsampled);
            out = self.decimator.process(processed as f64);
        }
        out as f32
    }
}
