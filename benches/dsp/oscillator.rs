//! Benchmarks for oscillator generators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use radspberry::graph::{Generator, Node, Osc};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, mut osc) in [
            ("sine", Osc::sine(440.0)),
            ("saw", Osc::saw(440.0)),
            ("square", Osc::square(440.0)),
        ] {
            osc.set_sample_rate(SAMPLE_RATE);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| osc.render(black_box(&mut buffer)))
            });
        }

        // Per-sample ticking, for comparison with the block path
        let mut osc = Osc::saw(440.0);
        osc.set_sample_rate(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("saw_tick", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = osc.tick();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
