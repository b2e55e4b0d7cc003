//! Benchmarks for the output sample ring.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use radspberry::audio::SampleRing;

use crate::BLOCK_SIZES;

pub fn bench_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ring");

    for &size in BLOCK_SIZES {
        let block: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();
        let ring = SampleRing::new(size * 4);

        // One producer block in, one callback period out
        group.bench_with_input(BenchmarkId::new("push_pop", size), &size, |b, _| {
            b.iter(|| {
                ring.push(black_box(&block));
                let mut acc = 0.0f32;
                while let Some(sample) = ring.pop() {
                    acc += sample;
                }
                acc
            })
        });

        group.bench_with_input(BenchmarkId::new("push_full", size), &size, |b, _| {
            b.iter(|| {
                // Two blocks fit; the rest is truncated
                for _ in 0..4 {
                    black_box(ring.push(black_box(&block)));
                }
                ring.clear();
            })
        });
    }

    group.finish();
}
