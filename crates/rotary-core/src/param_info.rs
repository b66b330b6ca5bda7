//! Parameter descriptors for the rotary controls.
//!
//! Each control of the cabinet (speeds, drift, vibe, intensity, tone) is
//! described by a [`ParamDescriptor`] carrying its display names, unit and
//! engineering range. Platform code uses [`ParamDescriptor::denormalize`] to
//! scale a 0.0–1.0 knob position into the range the engine expects, and
//! preset loaders use [`ParamDescriptor::clamp`] to keep file values legal.
//!
//! # Example
//!
//! ```rust
//! use rotary_core::{ParamDescriptor, ParamIndex};
//!
//! let vibe = ParamIndex::Vibe.descriptor();
//! assert_eq!(vibe.denormalize(0.0), 0.3);
//! assert!((vibe.denormalize(1.0) - 0.7).abs() < 1e-6);
//! assert_eq!(vibe.clamp(2.0), 0.7);
//! ```
//!
//! # no_std Support
//!
//! This module is fully `no_std` compatible with no heap allocations required.

/// Describes one continuous control and its linear engineering range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Slow Speed").
    pub name: &'static str,

    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value used when nothing else is supplied.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable string ID for presets and command-line flags (e.g., `"slow_speed"`).
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Rotor rate in Hz.
    pub const fn rate_hz(
        name: &'static str,
        short_name: &'static str,
        string_id: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 0.05,
            string_id,
        }
    }

    /// Dimensionless ratio or amount.
    pub const fn amount(
        name: &'static str,
        short_name: &'static str,
        string_id: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            string_id,
        }
    }

    /// Clamps a value to this parameter's valid range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }

    /// Converts a normalized value (0.0 to 1.0) to the parameter range.
    ///
    /// The input is clamped to \[0, 1\] first, so a noisy knob reading never
    /// escapes the range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let t = normalized.clamp(0.0, 1.0);
        self.min + t * (self.max - self.min)
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz (Hz) - rotor rates.
    Hertz,

    /// No unit - ratios, depths, balances.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use rotary_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}
