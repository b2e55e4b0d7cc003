//! Composed-graph benchmarks.
//!
//! These render complete graphs the way a player would, so the numbers
//! include dispatch through boxed chain stages and mixer inputs.

mod compose;
mod modulate;
mod pipeline;

pub use compose::bench_compose;
pub use modulate::bench_modulate;
pub use pipeline::bench_pipeline;
