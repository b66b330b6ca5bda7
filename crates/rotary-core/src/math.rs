//! Mixing and modulation laws shared by the render pipeline.
//!
//! These are the closed-form parts of the rotor model: how far the delay
//! excursion reaches for a given oscillator value, how loud a band is at a
//! given point of the rotation, and how the two bands are blended.

/// Delay excursion per unit of depth, in seconds (1 ms).
pub const UNIT_DELAY_SECONDS: f32 = 0.001;

/// Fixed floor added to every modulated delay, in samples.
pub const MIN_DELAY_SAMPLES: f32 = 1.0;

/// Flush denormal values to zero.
///
/// Values below 1e-20 are replaced with zero before they reach the IEEE 754
/// subnormal range, where many CPUs slow down by orders of magnitude. Used
/// on filter integrator states that can decay indefinitely toward zero.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Fractional delay in samples for one rotor at one instant.
///
/// `depth * (1 + lfo) * 1 ms * sample_rate + 1`. With `lfo` in \[-1, 1\] the
/// result spans `[1, depth * 2 ms * sample_rate + 1]`.
///
/// # Example
///
/// ```rust
/// use rotary_core::modulated_delay_samples;
///
/// // Zero depth collapses to the one-sample floor regardless of phase.
/// assert_eq!(modulated_delay_samples(0.0, 0.7, 48000.0), 1.0);
/// // Full swing at depth 0.5: 0.5 * 2 * 48 + 1 = 49 samples.
/// assert!((modulated_delay_samples(0.5, 1.0, 48000.0) - 49.0).abs() < 1e-3);
/// ```
#[inline]
pub fn modulated_delay_samples(depth: f32, lfo: f32, sample_rate: f32) -> f32 {
    depth * (1.0 + lfo) * UNIT_DELAY_SECONDS * sample_rate + MIN_DELAY_SAMPLES
}

/// Worst-case delay in samples for a given maximum depth (`lfo = 1`).
#[inline]
pub fn max_delay_samples(max_depth: f32, sample_rate: f32) -> f32 {
    modulated_delay_samples(max_depth, 1.0, sample_rate)
}

/// Normalized tremolo gain.
///
/// `(1 + intensity * lfo) / (1 + intensity)`. The peak (`lfo = 1`) is
/// always exactly unity; intensity only deepens the trough down to
/// `(1 - intensity) / (1 + intensity)`.
///
/// # Example
///
/// ```rust
/// use rotary_core::tremolo_gain;
///
/// assert_eq!(tremolo_gain(0.8, 1.0), 1.0);
/// assert!((tremolo_gain(1.0, -1.0)).abs() < 1e-7);
/// assert_eq!(tremolo_gain(0.0, -0.3), 1.0);
/// ```
#[inline]
pub fn tremolo_gain(intensity: f32, lfo: f32) -> f32 {
    (1.0 + intensity * lfo) / (1.0 + intensity)
}

/// Blend the drum (low) and horn (high) bands.
///
/// `low * (1 - balance) + high * balance`. Balance 0 is drum only, 1 is horn
/// only.
#[inline]
pub fn tone_mix(low: f32, high: f32, balance: f32) -> f32 {
    low * (1.0 - balance) + high * balance
}
