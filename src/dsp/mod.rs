//! Low-level DSP primitives used by the graph nodes.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so nodes can embed them directly and advance them one sample per tick.
//! They stay focused on the signal math; parameter plumbing, composition and
//! sample-rate propagation live in `graph`.

/// Direct-form biquad sections and cascades.
pub mod biquad;
/// Linear ADSR envelope state machine.
pub mod envelope;
/// State-variable filter core with multiple responses.
pub mod filter;
/// Mapping modulation sources onto parameter ranges.
pub mod modulate;
/// Phase-accumulator oscillator waveforms.
pub mod oscillator;
/// Oversampling factors and their anti-aliasing filter designs.
pub mod oversampling;

pub use envelope::EnvelopeStage;
