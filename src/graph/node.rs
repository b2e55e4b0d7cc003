use std::iter::FusedIterator;

use crate::{
    dsp::modulate::Polarity,
    error::{Error, Result},
    graph::param::Param,
};

/// Common surface of every signal node.
///
/// A node owns its sample rate and a set of named live parameters. Ticking
/// lives on the two capability traits, [`Generator`] and [`Processor`].
///
/// Ticking must be a pure function of the node's state and sample rate: no
/// I/O, no unbounded allocation, no blocking.
pub trait Node: Send {
    fn sample_rate(&self) -> f32;

    /// Set the rate and propagate it to every owned sub-node.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Shared handle to a named parameter, if the node has one.
    fn param(&self, _name: &str) -> Option<Param> {
        None
    }

    fn set_param(&self, name: &str, value: f32) -> Result<()> {
        let param = self.param(name).ok_or_else(|| unknown(name))?;
        param.set(value);
        Ok(())
    }

    fn get_param(&self, name: &str) -> Result<f32> {
        self.param(name).map(|param| param.get()).ok_or_else(|| unknown(name))
    }
}

/// A node that produces one sample per tick with no input.
pub trait Generator: Node {
    fn tick(&mut self) -> f32;

    /// Natural output range, used by modulation to map onto a parameter.
    fn polarity(&self) -> Polarity {
        Polarity::Bipolar
    }

    /// Fill `out` with consecutive ticks.
    fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.tick();
        }
    }

    /// Lazily pull `n` ticks.
    fn ticks(&mut self, n: usize) -> Ticks<'_, Self>
    where
        Self: Sized,
    {
        Ticks {
            node: self,
            remaining: n,
        }
    }
}

/// A node that transforms one input sample into one output sample.
pub trait Processor: Node {
    fn tick(&mut self, input: f32) -> f32;

    /// Transform `buffer` in place.
    fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.tick(*sample);
        }
    }

    /// Lazily tick once per input sample.
    fn ticks<I>(&mut self, input: I) -> ProcessTicks<'_, Self, I::IntoIter>
    where
        I: IntoIterator<Item = f32>,
        Self: Sized,
    {
        ProcessTicks {
            node: self,
            input: input.into_iter(),
        }
    }
}

fn unknown(name: &str) -> Error {
    Error::UnknownParam {
        name: name.to_string(),
    }
}

/// Iterator returned by [`Generator::ticks`].
pub struct Ticks<'a, G> {
    node: &'a mut G,
    remaining: usize,
}

impl<G: Generator> Iterator for Ticks<'_, G> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.node.tick())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<G: Generator> ExactSizeIterator for Ticks<'_, G> {}
impl<G: Generator> FusedIterator for Ticks<'_, G> {}

/// Iterator returned by [`Processor::ticks`].
pub struct ProcessTicks<'a, P, I> {
    node: &'a mut P,
    input: I,
}

impl<P: Processor, I: Iterator<Item = f32>> Iterator for ProcessTicks<'_, P, I> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.input.next()?;
        Some(self.node.tick(sample))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.input.size_hint()
    }
}

/// Boxed nodes are nodes (for dynamic dispatch)
impl<N: Node + ?Sized> Node for Box<N> {
    fn sample_rate(&self) -> f32 {
        (**self).sample_rate()
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        (**self).set_sample_rate(sample_rate)
    }

    fn param(&self, name: &str) -> Option<Param> {
        (**self).param(name)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn tick(&mut self) -> f32 {
        (**self).tick()
    }

    fn polarity(&self) -> Polarity {
        (**self).polarity()
    }

    fn render(&mut self, out: &mut [f32]) {
        (**self).render(out)
    }
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn tick(&mut self, input: f32) -> f32 {
        (**self).tick(input)
    }

    fn process(&mut self, buffer: &mut [f32]) {
        (**self).process(buffer)
    }
}
