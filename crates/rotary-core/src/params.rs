//! Per-block control values and mode flags.
//!
//! [`ParameterSet`] holds the six continuous controls in engineering units.
//! [`ModeFlags`] holds the two footswitch toggles. [`BlockControls`] bundles
//! what the scheduler hands the engine at the start of one block: the
//! current parameters plus the rising-edge events observed since the last
//! block.

use crate::param_info::ParamDescriptor;

/// Index of each continuous control, in panel order (knob 1 to knob 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamIndex {
    /// Rotor speed in slow (chorale) mode, Hz.
    SlowSpeed,
    /// Rotor speed in fast (tremolo) mode, Hz.
    FastSpeed,
    /// Drum-to-horn rate ratio.
    Drift,
    /// Low/high tone balance (0 = drum only, 1 = horn only).
    Tone,
    /// Tremolo intensity.
    Intensity,
    /// Doppler modulation depth.
    Vibe,
}

const SLOW_SPEED: ParamDescriptor =
    ParamDescriptor::rate_hz("Slow Speed", "Slow", "slow_speed", 0.0, 4.0, 0.8);
const FAST_SPEED: ParamDescriptor =
    ParamDescriptor::rate_hz("Fast Speed", "Fast", "fast_speed", 4.0, 10.0, 6.7);
const DRIFT: ParamDescriptor = ParamDescriptor::amount("Drift", "Drift", "drift", 0.0, 1.0, 0.85);
const TONE: ParamDescriptor = ParamDescriptor::amount("Tone", "Tone", "tone", 0.3, 0.7, 0.5);
const INTENSITY: ParamDescriptor =
    ParamDescriptor::amount("Intensity", "Intens", "intensity", 0.0, 1.0, 0.5);
const VIBE: ParamDescriptor = ParamDescriptor::amount("Vibe", "Vibe", "vibe", 0.3, 0.7, 0.5);

impl ParamIndex {
    /// All controls in panel order.
    pub const ALL: [ParamIndex; 6] = [
        ParamIndex::SlowSpeed,
        ParamIndex::FastSpeed,
        ParamIndex::Drift,
        ParamIndex::Tone,
        ParamIndex::Intensity,
        ParamIndex::Vibe,
    ];

    /// Descriptor with the control's panel range.
    pub const fn descriptor(self) -> ParamDescriptor {
        match self {
            ParamIndex::SlowSpeed => SLOW_SPEED,
            ParamIndex::FastSpeed => FAST_SPEED,
            ParamIndex::Drift => DRIFT,
            ParamIndex::Tone => TONE,
            ParamIndex::Intensity => INTENSITY,
            ParamIndex::Vibe => VIBE,
        }
    }

    /// Looks a control up by its string ID.
    pub fn from_string_id(id: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.descriptor().string_id == id)
    }
}

/// The six continuous controls, already scaled into engineering units.
///
/// The engine does not re-scale these; it only clamps depth to the bound its
/// delay capacity was validated for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    /// Target rotor speed in slow mode, Hz.
    pub slow_speed: f32,
    /// Target rotor speed in fast mode, Hz.
    pub fast_speed: f32,
    /// Drum-to-horn rate ratio, \[0, 1\].
    pub drift: f32,
    /// Low/high tone balance, \[0, 1\].
    pub tone: f32,
    /// Tremolo intensity, \[0, 1\].
    pub intensity: f32,
    /// Doppler modulation depth ("vibe").
    pub vibe: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            slow_speed: SLOW_SPEED.default,
            fast_speed: FAST_SPEED.default,
            drift: DRIFT.default,
            tone: TONE.default,
            intensity: INTENSITY.default,
            vibe: VIBE.default,
        }
    }
}

impl ParameterSet {
    /// Target speed for the given mode.
    #[inline]
    pub fn target_speed(&self, mode: SpeedMode) -> f32 {
        match mode {
            SpeedMode::Slow => self.slow_speed,
            SpeedMode::Fast => self.fast_speed,
        }
    }

    /// Reads one control.
    pub fn get(&self, index: ParamIndex) -> f32 {
        match index {
            ParamIndex::SlowSpeed => self.slow_speed,
            ParamIndex::FastSpeed => self.fast_speed,
            ParamIndex::Drift => self.drift,
            ParamIndex::Tone => self.tone,
            ParamIndex::Intensity => self.intensity,
            ParamIndex::Vibe => self.vibe,
        }
    }

    /// Writes one control verbatim (no clamping).
    pub fn set(&mut self, index: ParamIndex, value: f32) {
        match index {
            ParamIndex::SlowSpeed => self.slow_speed = value,
            ParamIndex::FastSpeed => self.fast_speed = value,
            ParamIndex::Drift => self.drift = value,
            ParamIndex::Tone => self.tone = value,
            ParamIndex::Intensity => self.intensity = value,
            ParamIndex::Vibe => self.vibe = value,
        }
    }

    /// Copy with every control clamped to its panel range.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for index in ParamIndex::ALL {
            out.set(index, index.descriptor().clamp(self.get(index)));
        }
        out
    }
}

/// Rotor speed mode selected by the speed footswitch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpeedMode {
    /// Chorale.
    #[default]
    Slow,
    /// Tremolo.
    Fast,
}

impl SpeedMode {
    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            SpeedMode::Slow => SpeedMode::Fast,
            SpeedMode::Fast => SpeedMode::Slow,
        }
    }
}

/// Footswitch-driven toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFlags {
    /// Output equals input verbatim when true.
    pub bypass: bool,
    /// Which target speed is in effect.
    pub speed: SpeedMode,
}

impl Default for ModeFlags {
    /// Power-on state: bypassed, slow.
    fn default() -> Self {
        Self {
            bypass: true,
            speed: SpeedMode::Slow,
        }
    }
}

/// Everything the engine reads at the start of one block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockControls {
    /// Current control values.
    pub params: ParameterSet,
    /// A rising edge on the bypass footswitch occurred.
    pub toggle_bypass: bool,
    /// A rising edge on the speed footswitch occurred.
    pub toggle_speed: bool,
}

impl BlockControls {
    /// Controls with no toggle events.
    pub fn new(params: ParameterSet) -> Self {
        Self {
            params,
            toggle_bypass: false,
            toggle_speed: false,
        }
    }
}
