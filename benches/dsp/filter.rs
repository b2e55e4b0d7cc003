//! Benchmarks for the state-variable filter node.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use radspberry::graph::{FilterNode, Node, Processor};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Pre-allocate a saw-like ramp as input
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = input.clone();

        let mut lowpass = FilterNode::lowpass(1_200.0).with_resonance(0.7);
        lowpass.set_sample_rate(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                lowpass.process(black_box(&mut buffer));
            })
        });

        // Cutoff moving every block, as it does under modulation
        let mut swept = FilterNode::bandpass(500.0);
        swept.set_sample_rate(SAMPLE_RATE);
        let cutoff = swept.cutoff();
        let mut step = 0u32;
        group.bench_with_input(BenchmarkId::new("bandpass_swept", size), &size, |b, _| {
            b.iter(|| {
                step = (step + 1) % 64;
                cutoff.set(200.0 + step as f32 * 50.0);
                buffer.copy_from_slice(&input);
                swept.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
