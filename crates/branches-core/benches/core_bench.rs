//! Criterion benchmarks for branches-core primitives
//!
//! Run with: cargo bench -p branches-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use branches_core::{
    AllpassStage, EdgeDetector, RandomStream, Slew, TriggerBuffer, ZeroCrossingDetector,
    balance_gains,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_slew(c: &mut Criterion) {
    let mut group = c.benchmark_group("Slew");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut output = vec![0.0; block_size];

        group.bench_with_input(
            BenchmarkId::new("process_block", block_size),
            &block_size,
            |b, _| {
                let mut slew = Slew::new();
                b.iter(|| {
                    slew.set_times(0.005, 0.05, SAMPLE_RATE);
                    slew.process_block(black_box(&input), &mut output);
                    black_box(&output);
                });
            },
        );
    }

    group.finish();
}

fn bench_detectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("Detectors");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut triggers = TriggerBuffer::new(block_size);

        group.bench_with_input(BenchmarkId::new("edge", block_size), &block_size, |b, _| {
            let mut detector = EdgeDetector::new();
            b.iter(|| {
                triggers.advance_block();
                detector.process_block(black_box(&input), 0.001, SAMPLE_RATE, |frame, _| {
                    triggers.fire(frame);
                });
                black_box(triggers.len());
            });
        });

        group.bench_with_input(
            BenchmarkId::new("zero_crossing", block_size),
            &block_size,
            |b, _| {
                let mut detector = ZeroCrossingDetector::new();
                b.iter(|| {
                    let mut count = 0usize;
                    detector.process_block(black_box(&input), 0.001, SAMPLE_RATE, |_, _| {
                        count += 1;
                    });
                    black_box(count);
                });
            },
        );
    }

    group.finish();
}

fn bench_allpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("AllpassStage");

    for &block_size in BLOCK_SIZES {
        let mut buffer = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process_block_inplace", block_size),
            &block_size,
            |b, _| {
                let mut stage = AllpassStage::new(2, 0.5);
                b.iter(|| {
                    stage.process_block_inplace(black_box(&mut buffer));
                });
            },
        );
    }

    group.finish();
}

fn bench_misc(c: &mut Criterion) {
    let mut group = c.benchmark_group("Misc");

    group.bench_function("random_fraction", |b| {
        let mut stream = RandomStream::with_seed(1);
        b.iter(|| black_box(stream.next_fraction()));
    });

    group.bench_function("balance_gains", |b| {
        b.iter(|| black_box(balance_gains(black_box(0.3))));
    });

    group.bench_function("trigger_fire_reverse", |b| {
        let mut triggers = TriggerBuffer::new(256);
        b.iter(|| {
            triggers.advance_block();
            for frame in (0..256).rev().step_by(8) {
                triggers.fire(frame);
            }
            black_box(triggers.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_slew, bench_detectors, bench_allpass, bench_misc);
criterion_main!(benches);
