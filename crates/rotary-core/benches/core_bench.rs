//! Criterion benchmarks for rotary-core
//!
//! Run with: cargo bench -p rotary-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rotary_core::{
    Crossover, EngineConfig, ModOscillator, ParameterSet, RotaryEngine, RotationDelay, SpeedMode,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[12, 64, 256, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("RotaryEngine");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut left = vec![0.0; block_size];
        let mut right = vec![0.0; block_size];

        group.bench_with_input(
            BenchmarkId::new("render", block_size),
            &block_size,
            |b, _| {
                let mut engine = RotaryEngine::new(EngineConfig::new(SAMPLE_RATE)).unwrap();
                engine.set_bypass(false);
                engine.set_speed_mode(SpeedMode::Fast);
                engine.set_params(ParameterSet::default());
                b.iter(|| {
                    engine.render(black_box(&input), &mut left, &mut right);
                    black_box(left[0]);
                });
            },
        );
    }

    group.bench_function("render_bypass_512", |b| {
        let input = generate_test_signal(512);
        let mut left = vec![0.0; 512];
        let mut right = vec![0.0; 512];
        let mut engine = RotaryEngine::new(EngineConfig::new(SAMPLE_RATE)).unwrap();
        b.iter(|| {
            engine.render(black_box(&input), &mut left, &mut right);
            black_box(left[0]);
        });
    });

    group.finish();
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("Primitives");
    let input = generate_test_signal(1024);

    group.bench_function("crossover_1024", |b| {
        let mut xover = Crossover::new(SAMPLE_RATE);
        b.iter(|| {
            for &sample in &input {
                xover.process(black_box(sample));
                black_box(xover.low() + xover.high());
            }
        });
    });

    group.bench_function("hermite_read_1024", |b| {
        let mut delay = RotationDelay::new(2400);
        let mut osc = ModOscillator::new(SAMPLE_RATE);
        osc.set_frequency(6.0);
        b.iter(|| {
            for &sample in &input {
                delay.write(sample);
                let d = 24.0 * (1.0 + osc.process()) + 1.0;
                black_box(delay.read_hermite(black_box(d)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_engine, bench_primitives);
criterion_main!(benches);
