//! Two-way crossover splitting the signal between horn and drum.
//!
//! A rotating-speaker cabinet feeds its treble horn and bass drum through a
//! passive crossover at roughly 800 Hz with a gentle resonance. This module
//! models that network as a 2-pole state variable filter whose lowpass output
//! drives the drum and whose highpass output drives the horn.
//!
//! # Topology
//!
//! Topology-Preserving Transform (TPT) SVF after Zavalishin, "The Art of VA
//! Filter Design" (2012). Trapezoidal integration keeps the filter stable for
//! every cutoff below Nyquist, so gain stays bounded for any audio-rate input.
//!
//! The low and high outputs satisfy `low + high + k * band = input`, where
//! `k = 1 / Q`.
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 3.

use core::f32::consts::PI;
use libm::tanf;

use crate::flush_denormal;

/// Crossover frequency between drum and horn, in Hz.
pub const CROSSOVER_HZ: f32 = 800.0;

/// Crossover resonance (quality factor).
pub const CROSSOVER_Q: f32 = 0.7;

/// Fixed two-band crossover (800 Hz, Q = 0.7).
///
/// Call [`process`](Self::process) once per sample, then read
/// [`low`](Self::low) and [`high`](Self::high). Cutoff and resonance are
/// design constants; only the sample rate is configurable.
///
/// # Example
///
/// ```rust
/// use rotary_core::Crossover;
///
/// let mut xover = Crossover::new(48000.0);
/// xover.process(0.5);
/// let (drum, horn) = (xover.low(), xover.high());
/// assert!(drum.is_finite() && horn.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Crossover {
    // Integrator states
    ic1eq: f32,
    ic2eq: f32,

    // Coefficients
    g: f32,
    k: f32,

    // Most recent band outputs
    low: f32,
    high: f32,

    cutoff: f32,
}

impl Crossover {
    /// Create a crossover for the given sample rate.
    ///
    /// The cutoff is clamped to `0.49 * sample_rate` so very low sample rates
    /// still yield a stable filter.
    pub fn new(sample_rate: f32) -> Self {
        let cutoff = CROSSOVER_HZ.min(sample_rate * 0.49);
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: tanf(PI * cutoff / sample_rate),
            k: 1.0 / CROSSOVER_Q,
            low: 0.0,
            high: 0.0,
            cutoff,
        }
    }

    /// Effective cutoff in Hz (800 unless clamped by the sample rate).
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Resonance (Q).
    pub fn resonance(&self) -> f32 {
        CROSSOVER_Q
    }

    /// Advance the filter by one sample.
    #[inline]
    pub fn process(&mut self, input: f32) {
        let v3 = input - self.ic2eq;
        let v1 = (self.g * v3 + self.ic1eq) / (1.0 + self.g * (self.g + self.k));
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        self.low = v2;
        self.high = input - self.k * v1 - v2;
    }

    /// Lowpass (drum) output of the most recent sample.
    #[inline]
    pub fn low(&self) -> f32 {
        self.low
    }

    /// Highpass (horn) output of the most recent sample.
    #[inline]
    pub fn high(&self) -> f32 {
        self.high
    }

    /// Clear integrator state and outputs.
    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
        self.low = 0.0;
        self.high = 0.0;
    }
}
