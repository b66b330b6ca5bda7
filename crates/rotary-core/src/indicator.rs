//! Write-only indicator outputs.
//!
//! The engine reports two continuous values after every block: whether the
//! effect is engaged and where the horn is in its rotation. It never reads
//! them back; the platform decides how to display them (LED PWM, GUI lamp).

/// The indicators the engine publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// 1.0 when the effect is engaged, 0.0 when bypassed.
    Engaged,
    /// Horn rotation, `(horn_lfo + 1) / 2` of the last rendered sample.
    Rotor,
}

/// Destination for indicator values.
///
/// # Example
///
/// ```rust
/// use rotary_core::{Indicator, IndicatorSink};
///
/// #[derive(Default)]
/// struct Lamps {
///     engaged: f32,
///     rotor: f32,
/// }
///
/// impl IndicatorSink for Lamps {
///     fn set_indicator(&mut self, indicator: Indicator, value: f32) {
///         match indicator {
///             Indicator::Engaged => self.engaged = value,
///             Indicator::Rotor => self.rotor = value,
///         }
///     }
/// }
/// ```
pub trait IndicatorSink {
    /// Receives a value in \[0, 1\].
    fn set_indicator(&mut self, indicator: Indicator, value: f32);
}
