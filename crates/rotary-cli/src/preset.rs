//! Preset file format.
//!
//! Presets are TOML files with a `[controls]` table holding engineering
//! values for the six knobs plus the two footswitch states, and an optional
//! `[engine]` table for render settings:
//!
//! ```toml
//! name = "chorale"
//! description = "Slow swirl"
//!
//! [controls]
//! slow_speed = 0.8
//! fast_speed = 6.7
//! drift = 0.85
//! tone = 0.5
//! intensity = 0.4
//! vibe = 0.5
//! fast = false
//! bypass = false
//!
//! [engine]
//! max_depth = 1.0
//! block_size = 12
//! ```
//!
//! Out-of-range values are clamped to the knob ranges; unknown keys are
//! rejected.

use std::path::{Path, PathBuf};

use rotary_core::config::DEFAULT_MAX_DEPTH;
use rotary_core::{ParameterSet, SpeedMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading presets.
#[derive(Debug, Error)]
pub enum PresetError {
    /// Failed to read a file
    #[error("failed to read preset '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse preset: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize preset: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Neither a readable file nor a built-in name
    #[error("preset not found: {0} (built-ins: chorale, tremolo, bypass-ready)")]
    NotFound(String),
}

/// A named set of control values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Name of the preset
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Knob and footswitch state
    #[serde(default)]
    pub controls: Controls,
    /// Render settings
    #[serde(default)]
    pub engine: EngineSection,
}

/// Knob values in engineering units and footswitch states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Controls {
    /// Slow rotor speed, Hz.
    pub slow_speed: f64,
    /// Fast rotor speed, Hz.
    pub fast_speed: f64,
    /// Drum-to-horn rate ratio.
    pub drift: f64,
    /// Low/high balance.
    pub tone: f64,
    /// Tremolo intensity.
    pub intensity: f64,
    /// Doppler depth.
    pub vibe: f64,
    /// Start in fast mode.
    pub fast: bool,
    /// Start bypassed.
    pub bypass: bool,
}

/// Widens to f64 rounded to six decimals (`0.8f32` becomes `0.8`).
fn widen(x: f32) -> f64 {
    (f64::from(x) * 1e6).round() / 1e6
}

impl Default for Controls {
    fn default() -> Self {
        Self::from_params(ParameterSet::default())
    }
}

impl Controls {
    fn from_params(p: ParameterSet) -> Self {
        Self {
            slow_speed: widen(p.slow_speed),
            fast_speed: widen(p.fast_speed),
            drift: widen(p.drift),
            tone: widen(p.tone),
            intensity: widen(p.intensity),
            vibe: widen(p.vibe),
            fast: false,
            bypass: false,
        }
    }

    /// Parameters clamped to the knob ranges.
    pub fn params(&self) -> ParameterSet {
        ParameterSet {
            slow_speed: self.slow_speed as f32,
            fast_speed: self.fast_speed as f32,
            drift: self.drift as f32,
            tone: self.tone as f32,
            intensity: self.intensity as f32,
            vibe: self.vibe as f32,
        }
        .clamped()
    }

    /// Speed mode the render starts in.
    pub fn speed_mode(&self) -> SpeedMode {
        if self.fast {
            SpeedMode::Fast
        } else {
            SpeedMode::Slow
        }
    }
}

/// Engine settings stored with a preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EngineSection {
    /// Upper bound on vibe depth.
    pub max_depth: f64,
    /// Explicit delay capacity in samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_capacity: Option<usize>,
    /// Samples per control block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_size: Option<usize>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            max_depth: f64::from(DEFAULT_MAX_DEPTH),
            delay_capacity: None,
            block_size: None,
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            name: "default".into(),
            description: None,
            controls: Controls::default(),
            engine: EngineSection::default(),
        }
    }
}

impl Preset {
    /// Parses a preset from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, PresetError> {
        Ok(toml::from_str(text)?)
    }

    /// Serializes the preset to TOML text.
    pub fn to_toml(&self) -> Result<String, PresetError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads a preset file.
    pub fn load(path: &Path) -> Result<Self, PresetError> {
        let text = std::fs::read_to_string(path).map_err(|source| PresetError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Resolves `name_or_path` as a file if one exists, otherwise as a
    /// built-in name.
    pub fn resolve(name_or_path: &str) -> Result<Self, PresetError> {
        let path = Path::new(name_or_path);
        if path.is_file() {
            return Self::load(path);
        }
        builtin(name_or_path).ok_or_else(|| PresetError::NotFound(name_or_path.to_string()))
    }
}

/// The factory presets.
pub fn builtins() -> Vec<Preset> {
    vec![
        Preset {
            name: "chorale".into(),
            description: Some("Slow rotor, gentle swirl".into()),
            controls: Controls {
                slow_speed: 0.8,
                intensity: 0.4,
                vibe: 0.5,
                ..Controls::default()
            },
            engine: EngineSection::default(),
        },
        Preset {
            name: "tremolo".into(),
            description: Some("Fast rotor, deep amplitude throb".into()),
            controls: Controls {
                fast_speed: 6.8,
                drift: 0.9,
                tone: 0.55,
                intensity: 0.75,
                vibe: 0.6,
                fast: true,
                ..Controls::default()
            },
            engine: EngineSection::default(),
        },
        Preset {
            name: "bypass-ready".into(),
            description: Some("Pedal power-on state: bypassed, slow, knobs at noon".into()),
            controls: Controls {
                slow_speed: 2.0,
                fast_speed: 7.0,
                drift: 0.5,
                tone: 0.5,
                intensity: 0.5,
                vibe: 0.5,
                fast: false,
                bypass: true,
            },
            engine: EngineSection {
                block_size: Some(12),
                ..EngineSection::default()
            },
        },
    ]
}

/// Looks up a factory preset by name.
pub fn builtin(name: &str) -> Option<Preset> {
    builtins().into_iter().find(|p| p.name == name)
}
