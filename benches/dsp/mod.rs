//! Benchmarks for single nodes and low-level primitives.

mod filter;
mod oscillator;
mod oversample;
mod ring;

pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
pub use oversample::bench_oversample;
pub use ring::bench_ring;
