//! Benchmarks for parameter modulation.
//!
//! A modulated node writes its parameter every sample, so this measures
//! the atomic store plus the per-sample coefficient update it forces.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use radspberry::graph::{FilterNode, Generator, Node, NodeExt, Osc};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_modulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/modulate");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Static cutoff baseline
        let mut fixed = Osc::saw(110.0).serial(FilterNode::lowpass(800.0));
        fixed.set_sample_rate(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("filter_fixed", size), &size, |b, _| {
            b.iter(|| fixed.render(black_box(&mut buffer)))
        });

        let Ok(mut swept) = Osc::saw(110.0)
            .serial(FilterNode::lowpass(800.0))
            .modulate("cutoff", Osc::sine(0.5), 300.0..=3_000.0)
        else {
            continue;
        };
        swept.set_sample_rate(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("filter_lfo", size), &size, |b, _| {
            b.iter(|| swept.render(black_box(&mut buffer)))
        });

        // Vibrato: frequency of an oversampled saw driven by a sine
        let Ok(mut vibrato) = Osc::saw(220.0)
            .oversample(2)
            .and_then(|saw| saw.modulate("freq", Osc::sine(5.0), 215.0..=225.0))
        else {
            continue;
        };
        vibrato.set_sample_rate(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("vibrato_x2", size), &size, |b, _| {
            b.iter(|| vibrato.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
