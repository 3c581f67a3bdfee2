//! Criterion benchmarks for branches-nodes
//!
//! Run with: cargo bench -p branches-nodes
#![allow(missing_docs)]

use branches_core::{BlockConfig, BlockInputs, BlockProcessor, InputRef, TriggerBuffer};
use branches_nodes::{
    Balance, ClockDivider, Dust, Edge, PhaseDisperser, Sah, ShiftRegister, Slew, Tuning, Width,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

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

type Factory = fn(&BlockConfig) -> Box<dyn BlockProcessor>;

fn bench_nodes(c: &mut Criterion) {
    let nodes: &[(&str, Factory)] = &[
        ("Edge", |c| Box::new(Edge::new(c))),
        ("Slew", |c| Box::new(Slew::new(c))),
        ("Sah", |c| Box::new(Sah::new(c))),
        ("ShiftRegister", |c| Box::new(ShiftRegister::new(c))),
        ("Dust", |c| Box::new(Dust::with_seed(c, 7))),
        ("Balance", |c| Box::new(Balance::new(c))),
        ("Width", |c| Box::new(Width::new(c))),
    ];

    for &(name, factory) in nodes {
        let mut group = c.benchmark_group(name);
        for &block_size in BLOCK_SIZES {
            let config = BlockConfig::new(SAMPLE_RATE, block_size);
            let left = generate_test_signal(block_size);
            let right: Vec<f32> = left.iter().map(|x| -x).collect();
            let silence = vec![0.0; block_size];
            let ports = [Some(InputRef::Audio(&left)), Some(InputRef::Audio(&right))];

            group.bench_with_input(
                BenchmarkId::new("execute", block_size),
                &block_size,
                |b, _| {
                    let mut node = factory(&config);
                    b.iter(|| {
                        node.execute(black_box(&BlockInputs::new(&ports, &silence)));
                        black_box(node.output(0));
                    });
                },
            );
        }
        group.finish();
    }
}

fn bench_phase_disperser(c: &mut Criterion) {
    let mut group = c.benchmark_group("PhaseDisperser");
    let block_size = 256;
    let config = BlockConfig::new(SAMPLE_RATE, block_size);
    let input = generate_test_signal(block_size);

    for stages in [1, 8, 32, 128] {
        group.bench_with_input(BenchmarkId::new("stages", stages), &stages, |b, &stages| {
            let mut node = PhaseDisperser::new(&config);
            b.iter(|| {
                node.process(black_box(&input), stages);
                black_box(node.out());
            });
        });
    }

    group.finish();
}

fn bench_scalar_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scalar");
    let config = BlockConfig::new(SAMPLE_RATE, 256);

    group.bench_function("clock_divider_dense", |b| {
        let clock = TriggerBuffer::from_frames(256, 0..256);
        let reset = TriggerBuffer::from_frames(256, [128]);
        let mut node = ClockDivider::new(&config);
        b.iter(|| {
            node.process(black_box(&clock), black_box(&reset));
            black_box(node.division(8));
        });
    });

    group.bench_function("tuning", |b| {
        let mut node = Tuning::new(&config);
        let cents = [3.0, -14.0, 4.0, 16.0, -14.0, -2.0, -10.0, 2.0, 14.0, -16.0, 18.0, -12.0];
        let mut note = 0;
        b.iter(|| {
            note = (note + 1) % 128;
            black_box(node.process(black_box(note), 0.0, &cents))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_nodes, bench_phase_disperser, bench_scalar_nodes);
criterion_main!(benches);
