//! Rotor motor inertia.
//!
//! Real cabinets take seconds to spin the horn and drum up from chorale to
//! tremolo speed. [`SpeedController`] low-passes the requested speed so the
//! oscillator frequencies glide instead of jumping, which would otherwise be
//! heard as a frequency-modulation click.
//!
//! The smoothing is a one-pole step applied once per block:
//!
//! ```text
//! speed[n] = speed[n-1] + a * (target - speed[n-1])
//! ```
//!
//! with `a` = [`ACCELERATION`]. The gap to the target shrinks by the factor
//! `1 - a` each block, so the speed approaches monotonically and never
//! overshoots. Because the step is taken per block rather than per sample,
//! the real-time ramp length scales with the block size.

/// Fraction of the remaining gap closed per block update.
pub const ACCELERATION: f32 = 0.0003;

/// Smoothed rotor speed and the horn/drum frequencies derived from it.
///
/// # Example
///
/// ```rust
/// use rotary_core::SpeedController;
///
/// let mut speed = SpeedController::new();
/// speed.set_drift_ratio(0.8);
/// for _ in 0..100 {
///     speed.update(6.0);
/// }
/// assert!(speed.horn_frequency() > 0.0 && speed.horn_frequency() < 6.0);
/// assert!((speed.drum_frequency() - speed.horn_frequency() * 0.8).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct SpeedController {
    current: f32,
    acceleration: f32,
    drift: f32,
}

impl Default for SpeedController {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeedController {
    /// Create a stopped controller (speed 0 Hz, drift 1.0).
    pub fn new() -> Self {
        Self {
            current: 0.0,
            acceleration: ACCELERATION,
            drift: 1.0,
        }
    }

    /// Move the smoothed speed one step toward `target` (Hz).
    ///
    /// Call once per block.
    #[inline]
    pub fn update(&mut self, target: f32) {
        self.current += self.acceleration * (target - self.current);
    }

    /// Snap the smoothed speed to `speed` without a ramp.
    pub fn set_immediate(&mut self, speed: f32) {
        self.current = speed;
    }

    /// Set the drum-to-horn rate ratio. Clamped to \[0, 1\].
    pub fn set_drift_ratio(&mut self, drift: f32) {
        self.drift = drift.clamp(0.0, 1.0);
    }

    /// Current drum-to-horn rate ratio.
    pub fn drift_ratio(&self) -> f32 {
        self.drift
    }

    /// Per-update smoothing fraction.
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Current smoothed speed in Hz.
    pub fn speed(&self) -> f32 {
        self.current
    }

    /// Horn rotation frequency (the smoothed speed).
    #[inline]
    pub fn horn_frequency(&self) -> f32 {
        self.current
    }

    /// Drum rotation frequency (smoothed speed × drift). A drift below 1 makes
    /// the drum lag the horn, as the belt-driven drum does in the cabinet.
    #[inline]
    pub fn drum_frequency(&self) -> f32 {
        self.current * self.drift
    }
}
