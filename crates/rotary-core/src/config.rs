//! Engine configuration and start-up validation.
//!
//! The only fault the core can detect is a configuration fault: a delay
//! buffer too short for the deepest modulation the engine can be asked for.
//! [`EngineConfig::validate`] computes that worst case once, so an
//! out-of-range delay read can never happen at audio rate.

use core::fmt;

use crate::delay::HERMITE_LOOKAHEAD;
use crate::math::max_delay_samples;

/// Default upper bound on the vibe depth the engine accepts.
///
/// The panel range tops out at 0.7; the engine allows a little headroom for
/// hosts that drive it directly.
pub const DEFAULT_MAX_DEPTH: f32 = 1.0;

/// Largest delay buffer, in samples, the engine will allocate per band
/// (about 350 s at 48 kHz).
pub const MAX_DELAY_CAPACITY: usize = 1 << 24;

/// Construction-time settings for [`RotaryEngine`](crate::RotaryEngine).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest vibe depth the engine will apply; larger requests are clamped.
    pub max_depth: f32,
    /// Explicit delay capacity in samples. `None` derives it from
    /// `sample_rate` and `max_depth`.
    pub delay_capacity: Option<usize>,
}

impl EngineConfig {
    /// Config for `sample_rate` with the default depth bound and a derived
    /// delay capacity.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            max_depth: DEFAULT_MAX_DEPTH,
            delay_capacity: None,
        }
    }

    /// Sets the depth bound.
    pub fn with_max_depth(mut self, max_depth: f32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets an explicit delay capacity in samples.
    pub fn with_delay_capacity(mut self, capacity: usize) -> Self {
        self.delay_capacity = Some(capacity);
        self
    }

    /// Worst-case modulated delay in samples (`max_depth` at the LFO peak).
    pub fn worst_case_delay(&self) -> f32 {
        max_delay_samples(self.max_depth, self.sample_rate)
    }

    /// Smallest capacity that can serve [`worst_case_delay`](Self::worst_case_delay).
    ///
    /// `None` when that capacity would exceed [`MAX_DELAY_CAPACITY`] or the
    /// worst case is not finite.
    pub fn required_capacity(&self) -> Option<usize> {
        let worst = libm::ceilf(self.worst_case_delay());
        let limit = (MAX_DELAY_CAPACITY - HERMITE_LOOKAHEAD - 1) as f32;
        if !worst.is_finite() || worst > limit {
            return None;
        }
        Some(worst as usize + HERMITE_LOOKAHEAD + 1)
    }

    /// Checks the configuration and returns the delay capacity to allocate.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if !self.max_depth.is_finite() || self.max_depth < 0.0 {
            return Err(ConfigError::InvalidMaxDepth(self.max_depth));
        }

        let required = self
            .required_capacity()
            .ok_or(ConfigError::DelayTooLong {
                worst_case_delay: self.worst_case_delay(),
                limit: MAX_DELAY_CAPACITY,
            })?;
        match self.delay_capacity {
            None => Ok(required),
            Some(capacity) if capacity >= required => Ok(capacity),
            Some(capacity) => Err(ConfigError::DelayCapacityTooSmall {
                worst_case_delay: self.worst_case_delay(),
                required,
                capacity,
            }),
        }
    }
}

/// Fatal start-up errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Sample rate is non-finite or not positive.
    InvalidSampleRate(f32),
    /// Maximum depth is non-finite or negative.
    InvalidMaxDepth(f32),
    /// The delay buffer cannot hold the deepest modulation.
    DelayCapacityTooSmall {
        /// Worst-case requested delay in samples.
        worst_case_delay: f32,
        /// Capacity needed to serve it, including interpolation taps.
        required: usize,
        /// Capacity that was configured.
        capacity: usize,
    },
    /// The deepest modulation needs a larger buffer than the engine allocates.
    DelayTooLong {
        /// Worst-case requested delay in samples.
        worst_case_delay: f32,
        /// Largest capacity the engine allocates.
        limit: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate {sr} Hz"),
            Self::InvalidMaxDepth(d) => write!(f, "invalid maximum depth {d}"),
            Self::DelayCapacityTooSmall {
                worst_case_delay,
                required,
                capacity,
            } => write!(
                f,
                "delay capacity {capacity} samples cannot serve a {worst_case_delay:.2}-sample delay (need {required})"
            ),
            Self::DelayTooLong {
                worst_case_delay,
                limit,
            } => write!(
                f,
                "worst-case delay of {worst_case_delay:e} samples exceeds the {limit}-sample buffer limit"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
