//! Rotor modulation oscillator.
//!
//! Each rotating element (horn, drum) has exactly one phase accumulator. The
//! same sine value drives both its Doppler delay and its tremolo gain, because
//! a physical rotor produces pitch and loudness variation from one rotation.

use core::f32::consts::TAU;
use libm::{floorf, sinf};

/// Power-on rotor frequency in Hz.
pub const DEFAULT_FREQUENCY: f32 = 0.4;

/// Sine phase accumulator for one rotor.
///
/// Phase is kept in turns, `[0.0, 1.0)`. Output depends only on the sequence
/// of [`set_frequency`](Self::set_frequency) calls and the number of
/// [`process`](Self::process) calls, so runs are exactly reproducible.
///
/// # Example
///
/// ```rust
/// use rotary_core::ModOscillator;
///
/// let mut horn = ModOscillator::new(48000.0);
/// horn.set_frequency(6.5);
/// let value = horn.process();
/// assert!((-1.0..=1.0).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct ModOscillator {
    /// Current phase in turns [0.0, 1.0)
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    sample_rate: f32,
}

impl ModOscillator {
    /// Create an oscillator at [`DEFAULT_FREQUENCY`] with phase 0.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: DEFAULT_FREQUENCY / sample_rate,
            sample_rate,
        }
    }

    /// Set frequency in Hz. Takes effect from the next sample.
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_inc = freq_hz / self.sample_rate;
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Current phase in turns.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Return the sine of the current phase, then advance by one sample.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let output = sinf(self.phase * TAU);

        self.phase += self.phase_inc;
        // floor handles increments above one turn and negative frequencies
        if !(0.0..1.0).contains(&self.phase) {
            self.phase -= floorf(self.phase);
            // a tiny negative phase can round up to exactly 1.0
            if self.phase >= 1.0 {
                self.phase = 0.0;
            }
        }

        output
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
