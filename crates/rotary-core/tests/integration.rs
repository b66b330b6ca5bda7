//! Integration tests for rotary-core.
//!
//! Drives the full engine through the documented operating scenarios and
//! checks it sample-for-sample against a pipeline assembled by hand from the
//! public primitives.

use rotary_core::{
    BlockControls, ConfigError, Crossover, EngineConfig, ModOscillator, ParameterSet,
    RotaryEngine, RotationDelay, SpeedMode, modulated_delay_samples, tone_mix,
};

const SAMPLE_RATE: f32 = 48000.0;
const TAU: f32 = core::f32::consts::TAU;
const BLOCK: usize = 48;

fn generate_sine(freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| 0.5 * libm::sinf(TAU * freq_hz * n as f32 / sample_rate))
        .collect()
}

fn render_blocks(engine: &mut RotaryEngine, input: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let mut left = vec![0.0; input.len()];
    let mut right = vec![0.0; input.len()];
    for ((inp, l), r) in input
        .chunks(BLOCK)
        .zip(left.chunks_mut(BLOCK))
        .zip(right.chunks_mut(BLOCK))
    {
        engine.render(inp, l, r);
    }
    (left, right)
}

// ============================================================================
// Vibrato-only scenario
// ============================================================================

/// Drift 1 at a settled 1 Hz: both rotors share frequency and phase, and with
/// intensity 0 the output is an equal-weight vibrato mix of the two bands.
#[test]
fn settled_speed_with_full_drift_is_pure_vibrato() {
    let params = ParameterSet {
        slow_speed: 1.0,
        drift: 1.0,
        vibe: 0.5,
        intensity: 0.0,
        tone: 0.5,
        ..ParameterSet::default()
    };

    let mut engine = RotaryEngine::new(EngineConfig::new(SAMPLE_RATE)).unwrap();
    engine.set_bypass(false);
    engine.set_params(params);
    engine.set_speed_immediate(1.0);

    let input = generate_sine(1200.0, SAMPLE_RATE, 9600);
    let (left, right) = render_blocks(&mut engine, &input);

    assert_eq!(engine.horn().frequency(), engine.drum().frequency());
    assert_eq!(engine.horn().phase(), engine.drum().phase());
    assert!((engine.horn().frequency() - 1.0).abs() < 1e-4);
    assert_eq!(left, right);

    // Reference: one shared oscillator, no tremolo, 50/50 mix.
    let capacity = engine.delay_capacity();
    let mut xover = Crossover::new(SAMPLE_RATE);
    let mut osc = ModOscillator::new(SAMPLE_RATE);
    let mut low_line = RotationDelay::new(capacity);
    let mut high_line = RotationDelay::new(capacity);
    osc.set_frequency(1.0);

    for (i, (&x, &y)) in input.iter().zip(&left).enumerate() {
        let lfo = osc.process();
        xover.process(x);
        let d = modulated_delay_samples(0.5, lfo, SAMPLE_RATE);
        low_line.write(xover.low());
        high_line.write(xover.high());
        let expected = tone_mix(low_line.read_hermite(d), high_line.read_hermite(d), 0.5);
        assert!(
            (y - expected).abs() < 1e-4,
            "sample {i}: engine {y} vs reference {expected}"
        );
    }
}

/// The delay actually moves: a modulated render differs from a static one.
#[test]
fn vibrato_modulates_delay() {
    let input = generate_sine(1000.0, SAMPLE_RATE, 4800);

    let render = |vibe: f32| {
        let mut engine = RotaryEngine::new(EngineConfig::new(SAMPLE_RATE)).unwrap();
        engine.set_bypass(false);
        engine.set_speed_immediate(6.0);
        engine.set_speed_mode(SpeedMode::Fast);
        engine.set_params(ParameterSet {
            fast_speed: 6.0,
            intensity: 0.0,
            vibe,
            ..ParameterSet::default()
        });
        render_blocks(&mut engine, &input).0
    };

    let static_out = render(0.0);
    let moving_out = render(0.7);
    let max_diff = static_out
        .iter()
        .zip(&moving_out)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    assert!(max_diff > 0.01, "vibe had no effect (max diff {max_diff})");
}

// ============================================================================
// Zero depth
// ============================================================================

/// Depth 0 collapses both delays to one sample regardless of rotor phase.
#[test]
fn zero_depth_is_static_one_sample_delay() {
    let params = ParameterSet {
        fast_speed: 9.0,
        vibe: 0.0,
        intensity: 0.0,
        tone: 0.3,
        ..ParameterSet::default()
    };
    let mut engine = RotaryEngine::new(EngineConfig::new(SAMPLE_RATE)).unwrap();
    engine.set_bypass(false);
    engine.set_speed_mode(SpeedMode::Fast);
    engine.set_speed_immediate(9.0);
    engine.set_params(params);

    let input = generate_sine(440.0, SAMPLE_RATE, 2400);
    let (left, _) = render_blocks(&mut engine, &input);

    let mut xover = Crossover::new(SAMPLE_RATE);
    let mut previous = 0.0;
    for (i, (&x, &y)) in input.iter().zip(&left).enumerate() {
        assert!((y - previous).abs() < 1e-5, "sample {i}: {y} vs {previous}");
        xover.process(x);
        previous = tone_mix(xover.low(), xover.high(), 0.3);
    }
}

// ============================================================================
// Tone balance
// ============================================================================

fn band_energy(tone: f32, freq_hz: f32) -> f32 {
    let mut engine = RotaryEngine::new(EngineConfig::new(SAMPLE_RATE)).unwrap();
    engine.set_bypass(false);
    engine.set_params(ParameterSet {
        tone,
        vibe: 0.0,
        intensity: 0.0,
        ..ParameterSet::default()
    });
    let input = generate_sine(freq_hz, SAMPLE_RATE, 9600);
    let (left, _) = render_blocks(&mut engine, &input);
    let tail = &left[4800..];
    tail.iter().map(|s| s * s).sum::<f32>() / tail.len() as f32
}

/// Tone 0 keeps the drum band only; tone 1 keeps the horn band only.
#[test]
fn tone_extremes_select_band() {
    // 100 Hz lives in the drum band, 8 kHz in the horn band
    assert!(band_energy(0.0, 100.0) > 10.0 * band_energy(1.0, 100.0));
    assert!(band_energy(1.0, 8000.0) > 10.0 * band_energy(0.0, 8000.0));
}

// ============================================================================
// Footswitch flow and faults
// ============================================================================

#[test]
fn block_controls_drive_modes() {
    let mut engine = RotaryEngine::new(EngineConfig::new(SAMPLE_RATE)).unwrap();
    let params = ParameterSet::default();
    let mut left = [0.0; BLOCK];
    let mut right = [0.0; BLOCK];
    let input = [0.1; BLOCK];

    let engage = BlockControls {
        toggle_bypass: true,
        ..BlockControls::new(params)
    };
    engine.process_block(&engage, &input, &mut left, &mut right);
    assert!(!engine.is_bypassed());
    assert_eq!(engine.engaged_indicator(), 1.0);

    let speed_up = BlockControls {
        toggle_speed: true,
        ..BlockControls::new(params)
    };
    engine.process_block(&speed_up, &input, &mut left, &mut right);
    assert_eq!(engine.speed_mode(), SpeedMode::Fast);

    // Inertia: one block moves only a small step toward the fast target.
    assert!(engine.speed().speed() < params.fast_speed * 0.01);

    for _ in 0..50_000 {
        engine.process_block(&BlockControls::new(params), &input, &mut left, &mut right);
    }
    assert!((engine.speed().speed() - params.fast_speed).abs() < 0.01);
}

#[test]
fn undersized_delay_is_fatal() {
    let err = RotaryEngine::new(EngineConfig::new(192_000.0).with_delay_capacity(64)).unwrap_err();
    assert!(matches!(err, ConfigError::DelayCapacityTooSmall { capacity: 64, .. }));
}

#[test]
fn huge_depth_is_fatal_not_a_panic() {
    let err = RotaryEngine::new(EngineConfig::new(SAMPLE_RATE).with_max_depth(1e30)).unwrap_err();
    assert!(matches!(err, ConfigError::DelayTooLong { .. }));

    let err = RotaryEngine::new(
        EngineConfig::new(SAMPLE_RATE)
            .with_max_depth(1e30)
            .with_delay_capacity(2400),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::DelayTooLong { .. }));
}
