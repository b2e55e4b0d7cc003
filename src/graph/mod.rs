//! Composable signal nodes.
//!
//! Every node implements [`Node`] plus one of the two capability traits:
//! [`Generator`] (no input) or [`Processor`] (one sample in, one out).
//! Combinators in this module wrap nodes into bigger nodes, and the
//! `extensions` module adds the fluent builders so graphs read left to right:
//!
//! ```no_run
//! use radspberry::graph::{FilterNode, NodeExt, Osc};
//!
//! # fn main() -> radspberry::Result<()> {
//! let voice = Osc::saw(110.0)
//!     .oversample(4)?
//!     .serial(FilterNode::lowpass(800.0))
//!     .modulate("cutoff", Osc::sine(0.5), 300.0..=3_000.0)?;
//! # let _ = voice;
//! # Ok(())
//! # }
//! ```

/// Scale a signal by a live gain.
pub mod amplify;
/// Serial chains with a single output gain.
pub mod chain;
/// Fixed-value source.
pub mod constant;
/// Linear two-source blend.
pub mod crossfade;
/// Gate-driven ADSR generator.
pub mod envelope;
/// Fluent combinators (`.serial()`, `.parallel()`, `.modulate()`, ...).
pub mod extensions;
/// State-variable filter processor.
pub mod filter;
/// Unnormalized parallel summing.
pub mod mix;
/// Drive one node's parameter from another node's output.
pub mod modulate;
/// Core traits shared by all nodes.
pub mod node;
/// Audio-rate oscillators.
pub mod oscillator;
/// 2× / 4× oversampling wrapper.
pub mod oversample;
/// Atomic parameter cells.
pub mod param;

pub use amplify::Amp;
pub use chain::Chain;
pub use constant::Constant;
pub use crossfade::CrossFader;
pub use envelope::EnvNode;
pub use extensions::NodeExt;
pub use filter::FilterNode;
pub use mix::Mixer;
pub use modulate::Modulated;
pub use node::{Generator, Node, Processor};
pub use oscillator::Osc;
pub use oversample::Oversampled;
pub use param::Param;

pub use crate::dsp::modulate::Polarity;
