//! Benchmarks for buffered delivery: push a rendered block, run one
//! device period through the callback.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use radspberry::{
    audio::ManualDevice,
    graph::{FilterNode, Generator, Node, NodeExt, Osc},
    AudioEngine, EngineConfig,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pipeline");

    for &size in BLOCK_SIZES {
        let device = ManualDevice::new();
        let config = EngineConfig::default()
            .with_frames_per_callback(size as u32)
            .with_block_size(size);
        let Ok(mut engine) = AudioEngine::new(config, device.clone()) else {
            continue;
        };
        if engine.start(SAMPLE_RATE).is_err() {
            continue;
        }

        let mut root = Osc::saw(110.0).serial(FilterNode::lowpass(2_000.0));
        root.set_sample_rate(SAMPLE_RATE);
        let mut block = vec![0.0f32; size];
        let mut period = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("render_push_pull", size), &size, |b, _| {
            b.iter(|| {
                root.render(&mut block);
                let _ = engine.push(black_box(&block));
                device.pull(black_box(&mut period));
            })
        });

        // Muted periods drain the ring without copying out
        engine.mute();
        group.bench_with_input(BenchmarkId::new("muted_pull", size), &size, |b, _| {
            b.iter(|| {
                let _ = engine.push(black_box(&block));
                device.pull(black_box(&mut period));
            })
        });

        engine.stop();
    }

    group.finish();
}
