//! Benchmarks for serial, parallel and crossfade composition.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use radspberry::graph::{Amp, FilterNode, Generator, Node, NodeExt, Osc};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/compose");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // saw → lowpass → gain
        let mut voice = Osc::saw(110.0)
            .serial(FilterNode::lowpass(1_500.0))
            .serial(Amp::new(0.5));
        voice.set_sample_rate(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("chain", size), &size, |b, _| {
            b.iter(|| voice.render(black_box(&mut buffer)))
        });

        // Eight detuned saws summed
        let mut stack = Osc::saw(110.0).parallel(Osc::saw(110.3));
        for i in 2..8 {
            stack = stack.parallel(Osc::saw(110.0 + i as f32 * 0.3));
        }
        stack.set_sample_rate(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("mixer_8", size), &size, |b, _| {
            b.iter(|| stack.render(black_box(&mut buffer)))
        });

        let mut blend = Osc::saw(220.0).crossfade(Osc::square(110.0), 0.5);
        blend.set_sample_rate(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("crossfade", size), &size, |b, _| {
            b.iter(|| blend.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
