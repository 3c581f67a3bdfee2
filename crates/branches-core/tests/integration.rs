//! Integration tests for branches-core primitives.
//!
//! Exercises the primitives the way nodes use them: block-by-block with
//! state carried across block boundaries, measured at the signal level.

use branches_core::{
    AllpassStage, BlockConfig, BlockInputs, Direction, EdgeDetector, InputRef, RandomStream,
    Slew, TriggerBuffer, ZeroCrossingDetector, balance_gains, crossfade_gains,
};

const SAMPLE_RATE: f32 = 48000.0;

/// Triangle wave in [-1, 1] with `period` samples per cycle, starting at -1.
fn triangle(period: usize, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| {
            let phase = (n % period) as f32 / period as f32;
            if phase < 0.5 {
                -1.0 + 4.0 * phase
            } else {
                3.0 - 4.0 * phase
            }
        })
        .collect()
}

// ============================================================================
// 1. Block-boundary continuity
// ============================================================================

#[test]
fn slew_is_continuous_across_blocks() {
    let config = BlockConfig::default().with_block_size(64);
    let input = vec![1.0_f32; 1024];

    let mut whole = Slew::new();
    whole.set_times(0.002, 0.002, SAMPLE_RATE);
    let mut expected = vec![0.0; input.len()];
    whole.process_block(&input, &mut expected);

    let mut chunked = Slew::new();
    let mut actual = vec![0.0; input.len()];
    for (inp, out) in input
        .chunks(config.block_size)
        .zip(actual.chunks_mut(config.block_size))
    {
        chunked.set_times(0.002, 0.002, SAMPLE_RATE);
        chunked.process_block(inp, out);
    }
    assert_eq!(expected, actual);
}

#[test]
fn edge_detector_counts_triangle_edges_across_blocks() {
    let period = 480;
    let signal = triangle(period, period * 10);
    let mut detector = EdgeDetector::new();
    let (mut rises, mut falls) = (0, 0);

    for block in signal.chunks(256) {
        detector.process_block(block, 0.0, SAMPLE_RATE, |_, direction| match direction {
            Direction::Rising => rises += 1,
            Direction::Falling => falls += 1,
        });
    }
    // starts rising from -1, so one rise and one fall per period
    assert_eq!(rises, 10);
    assert_eq!(falls, 10);
}

#[test]
fn zero_crossings_two_per_period() {
    let period = 480;
    let signal = triangle(period, period * 8);
    let mut detector = ZeroCrossingDetector::new();
    let mut count = 0;
    for block in signal.chunks(100) {
        detector.process_block(block, 0.0, SAMPLE_RATE, |_, _| count += 1);
    }
    assert_eq!(count, 16);
}

#[test]
fn long_debounce_allows_one_event() {
    let period = 480;
    let signal = triangle(period, period);
    let mut detector = EdgeDetector::new();
    let mut count = 0;
    // 1 second debounce, 10 ms period
    detector.process_block(&signal, 1.0, SAMPLE_RATE, |_, _| count += 1);
    assert!(count <= 1, "{count} events fired");
}

// ============================================================================
// 2. Allpass chains
// ============================================================================

#[test]
fn allpass_chain_preserves_energy() {
    let mut chain: Vec<AllpassStage> = (0..32).map(|_| AllpassStage::new(2, 0.5)).collect();
    let mut buffer = vec![0.0_f32; 8192];
    buffer[0] = 1.0;
    for stage in &mut chain {
        stage.process_block_inplace(&mut buffer);
    }
    let energy: f64 = buffer.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    assert!((energy - 1.0).abs() < 1e-3, "energy {energy}");
}

// ============================================================================
// 3. Input binding
// ============================================================================

#[test]
fn trigger_inputs_iterate_in_frame_order() {
    let config = BlockConfig::default().with_block_size(32);
    let silence = vec![0.0; config.block_size];
    let triggers = TriggerBuffer::from_frames(config.block_size, [30, 2, 17]);
    let ports = [None, Some(InputRef::Trigger(&triggers))];
    let inputs = BlockInputs::new(&ports, &silence);

    let frames: Vec<usize> = inputs.trigger(1).iter().collect();
    assert_eq!(frames, vec![2, 17, 30]);
    assert!(inputs.trigger(0).is_empty());
}

// ============================================================================
// 4. Gain laws
// ============================================================================

#[test]
fn constant_power_laws_sum_to_unity_power() {
    for i in 0..=20 {
        let x = i as f32 / 10.0 - 1.0;
        let (l, r) = balance_gains(x);
        assert!((l * l + r * r - 1.0).abs() < 1e-5);

        let (a, b) = crossfade_gains((x + 1.0) / 2.0);
        assert!((a * a + b * b - 1.0).abs() < 1e-5);
    }
}

#[test]
fn seeded_streams_replay() {
    let first: Vec<f32> = {
        let mut stream = RandomStream::with_seed(1234);
        (0..256).map(|_| stream.next_fraction()).collect()
    };
    let mut stream = RandomStream::with_seed(1234);
    let second: Vec<f32> = (0..256).map(|_| stream.next_fraction()).collect();
    assert_eq!(first, second);
}
