//! Rotation delay line: the Doppler stage of each rotor.
//!
//! A sound source moving toward and away from the listener is heard through a
//! continuously changing propagation delay. [`RotationDelay`] keeps a short
//! history of one band and reads it back at a fractional, modulated delay.
//!
//! # Interpolation
//!
//! Reads use a 4-point, third-order Hermite (Catmull-Rom) kernel. It returns
//! stored samples exactly at integer delays.
//!
//! # Capacity
//!
//! The kernel reads two samples older than the integer delay. A read at
//! `delay` therefore needs `floor(delay) + 2 < capacity`; see
//! [`max_delay`](RotationDelay::max_delay). Capacity is fixed at construction
//! and validated by [`EngineConfig`](crate::EngineConfig) against the
//! worst-case modulation depth before any audio is processed.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Samples the Hermite kernel reads beyond the integer delay.
pub const HERMITE_LOOKAHEAD: usize = 2;

/// Fractional-delay ring buffer with Hermite interpolation (heap-allocated).
///
/// Delay is measured from the most recently written sample: a delay of `0.0`
/// returns the newest sample, `1.0` the one written before it.
///
/// # Memory
///
/// The buffer is allocated during construction and never reallocates.
/// [`write`](Self::write) and [`read_hermite`](Self::read_hermite) are
/// allocation-free and constant time.
///
/// # Example
///
/// ```rust
/// use rotary_core::RotationDelay;
///
/// let mut delay = RotationDelay::new(64);
/// for i in 0..8 {
///     delay.write(i as f32);
/// }
/// assert_eq!(delay.read_hermite(2.0), 5.0);
/// let between = delay.read_hermite(2.5);
/// assert!(between > 4.0 && between < 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct RotationDelay {
    /// Circular buffer storage
    buffer: Vec<f32>,
    /// Index the next write goes to
    write_pos: usize,
}

impl RotationDelay {
    /// Creates a delay line holding `capacity` samples of history.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is smaller than `HERMITE_LOOKAHEAD + 2`.
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity >= HERMITE_LOOKAHEAD + 2,
            "Delay capacity must be at least {}",
            HERMITE_LOOKAHEAD + 2
        );

        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Number of samples of history.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Largest delay (in samples) the kernel can read without wrapping onto
    /// newer samples.
    pub fn max_delay(&self) -> f32 {
        (self.buffer.len() - HERMITE_LOOKAHEAD - 1) as f32
    }

    /// Appends a sample, evicting the oldest one.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos += 1;
        if self.write_pos == self.buffer.len() {
            self.write_pos = 0;
        }
    }

    /// Reads the history at a fractional delay.
    ///
    /// Requires `0.0 <= delay_samples <= max_delay()`. Out-of-range requests
    /// are a configuration error: debug builds assert, release builds clamp.
    /// Between delay 0 and 1 the tap newer than the newest sample is
    /// extrapolated from the two newest samples.
    #[inline]
    pub fn read_hermite(&self, delay_samples: f32) -> f32 {
        debug_assert!(
            (0.0..=self.max_delay()).contains(&delay_samples),
            "delay {delay_samples} outside [0, {}]",
            self.max_delay()
        );

        let len = self.buffer.len();
        let delay = delay_samples.clamp(0.0, self.max_delay());
        let delay_int = delay as usize;
        let frac = delay - delay_int as f32;

        // x0 sits `delay_int` samples before the newest; xm1 is one sample
        // newer, x1 and x2 are older.
        let i0 = (self.write_pos + len - 1 - delay_int) % len;
        let i1 = (i0 + len - 1) % len;
        let i2 = (i0 + len - 2) % len;

        let x0 = self.buffer[i0];
        let x1 = self.buffer[i1];
        let x2 = self.buffer[i2];
        // The newest sample has no newer neighbour; extrapolate it linearly.
        let xm1 = if delay_int == 0 {
            2.0 * x0 - x1
        } else {
            self.buffer[(i0 + 1) % len]
        };

        let c0 = x0;
        let c1 = 0.5 * (x1 - xm1);
        let c2 = xm1 - 2.5 * x0 + 2.0 * x1 - 0.5 * x2;
        let c3 = 0.5 * (x2 - xm1) + 1.5 * (x0 - x1);

        ((c3 * frac + c2) * frac + c1) * frac + c0
    }

    /// Clears the history (sets all samples to 0).
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
