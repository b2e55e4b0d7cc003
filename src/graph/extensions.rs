use std::ops::RangeInclusive;

use crate::{
    dsp::oversampling::Factor,
    error::Result,
    graph::{
        chain::Chain,
        crossfade::CrossFader,
        mix::Mixer,
        modulate::Modulated,
        node::{Generator, Node, Processor},
        oversample::Oversampled,
    },
};

/// Fluent composition for every node.
///
/// `Chain` and `Mixer` have inherent `serial` / `parallel` methods that
/// shadow these, so calling them on an existing chain or mixer appends
/// instead of nesting.
pub trait NodeExt: Node + Sized {
    /// Pipe this node's output into `next`.
    fn serial<P: Processor + 'static>(self, next: P) -> Chain<Self> {
        Chain::new(self).serial(next)
    }

    /// Sum this generator with `other`.
    fn parallel<G: Generator + 'static>(self, other: G) -> Mixer
    where
        Self: Generator + 'static,
    {
        Mixer::new().parallel(self).parallel(other)
    }

    /// Blend this generator with `other`; `fade` 0 is all `self`.
    fn crossfade<B: Generator>(self, other: B, fade: f32) -> CrossFader<Self, B>
    where
        Self: Generator,
    {
        CrossFader::new(self, other, fade)
    }

    /// Drive parameter `name` from `source`, mapped onto `range`.
    fn modulate<S: Generator>(
        self,
        name: &str,
        source: S,
        range: RangeInclusive<f32>,
    ) -> Result<Modulated<Self, S>> {
        Modulated::new(self, name, source, range)
    }

    /// Run this node at 2× or 4× the sample rate with anti-alias filtering.
    fn oversample(self, factor: usize) -> Result<Oversampled<Self>> {
        let factor = Factor::try_from(factor)?;
        Ok(Oversampled::new(self, factor))
    }
}

impl<T: Node> NodeExt for T {}
