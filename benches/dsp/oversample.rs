//! Benchmarks for the anti-alias filters and oversampled generators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use radspberry::{
    dsp::oversampling::Factor,
    graph::{Generator, Node, NodeExt, Osc},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oversample(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oversample");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Raw decimation cascades, one call per inner sample
        for factor in [Factor::X2, Factor::X4] {
            let mut cascade = factor.anti_alias_filter();
            let inner = size * factor.ratio();
            group.bench_with_input(
                BenchmarkId::new(format!("cascade_x{}", factor.ratio()), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        let mut acc = 0.0f64;
                        for i in 0..inner {
                            acc += cascade.process(black_box((i & 1) as f64));
                        }
                        acc
                    })
                },
            );
        }

        let mut plain = Osc::saw(440.0);
        plain.set_sample_rate(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("saw_x1", size), &size, |b, _| {
            b.iter(|| plain.render(black_box(&mut buffer)))
        });

        for factor in [2, 4] {
            let Ok(mut saw) = Osc::saw(440.0).oversample(factor) else {
                continue;
            };
            saw.set_sample_rate(SAMPLE_RATE);
            group.bench_with_input(
                BenchmarkId::new(format!("saw_x{factor}"), size),
                &size,
                |b, _| b.iter(|| saw.render(black_box(&mut buffer))),
            );
        }
    }

    group.finish();
}
