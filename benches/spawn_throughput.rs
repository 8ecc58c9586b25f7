//! Benchmarks for particle resolution and lifecycle processing.
//!
//! Run with: `cargo bench`

use circlewave::prelude::*;
use circlewave::{LifecycleScheduler, SpawnContext};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    group.bench_function("fixed", |b| {
        let mut ctx = SpawnContext::with_seed(1);
        let range = ValueRange::new(50.0_f32, 150.0);
        b.iter(|| black_box(ctx.resolve(100.0_f32, range, false)))
    });

    group.bench_function("random_f32", |b| {
        let mut ctx = SpawnContext::with_seed(1);
        let range = ValueRange::new(50.0_f32, 150.0);
        b.iter(|| black_box(ctx.resolve(100.0_f32, range, true)))
    });

    group.bench_function("random_vec2", |b| {
        let mut ctx = SpawnContext::with_seed(1);
        let range = ValueRange::new(Vec2::ZERO, Vec2::new(800.0, 600.0));
        b.iter(|| black_box(ctx.resolve(Vec2::ZERO, range, true)))
    });

    group.finish();
}

fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler");

    for count in [100u64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("schedule_and_drain", count), &count, |b, &count| {
            b.iter(|| {
                let mut scheduler = LifecycleScheduler::new();
                for n in 0..count {
                    scheduler.schedule_at(ParticleId::new(n), ((n * 7919) % count) as f64);
                }
                let mut drained = 0;
                while scheduler.pop_due(count as f64).is_some() {
                    drained += 1;
                }
                black_box(drained)
            })
        });
    }

    group.finish();
}

fn bench_wave(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave");

    // Steady state of ~lifetime / interval live particles.
    for interval in [1.0_f32, 0.1, 0.01] {
        group.bench_with_input(
            BenchmarkId::new("advance_60s", interval),
            &interval,
            |b, &interval| {
                let config = WaveConfig::default().spawn_interval(interval);
                b.iter(|| {
                    let mut wave = CircleWave::with_seed(config.clone(), 7).unwrap();
                    wave.start(0.0).unwrap();
                    let mut clock = ManualClock::new();
                    while clock.now() < 60.0 {
                        let now = clock.advance(1.0 / 60.0);
                        black_box(wave.advance(now));
                    }
                    black_box(wave.len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_scheduler, bench_wave);
criterion_main!(benches);
