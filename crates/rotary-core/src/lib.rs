//! Rotary Core - DSP engine for a rotating-speaker cabinet
//!
//! Simulates a two-rotor (horn + drum) Leslie-style cabinet: a crossover splits
//! the input into treble and bass, each band is Doppler-shifted by a
//! modulated fractional delay and amplitude-modulated by the same rotor phase,
//! and the two bands are mixed back together with a tone balance.
//!
//! # Components
//!
//! - [`Crossover`] - Fixed 800 Hz / Q 0.7 state variable crossover
//! - [`ModOscillator`] - Sine phase accumulator driving one rotor
//! - [`RotationDelay`] - Ring buffer with Hermite fractional-delay read
//! - [`SpeedController`] - Motor inertia model for rotor speed
//! - [`RotaryEngine`] - Block/sample render pipeline owning all of the above
//!
//! # Control Rate vs. Audio Rate
//!
//! [`RotaryEngine::render`] updates the speed controller and oscillator
//! frequencies once at the start of each block. Oscillator phase, filter
//! integrators and delay lines advance once per sample. Parameters must be
//! supplied between blocks, never inside one.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc` for the delay buffers).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rotary-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use rotary_core::{BlockControls, EngineConfig, ParameterSet, RotaryEngine};
//!
//! let mut engine = RotaryEngine::new(EngineConfig::new(48000.0)).unwrap();
//! engine.set_bypass(false);
//!
//! let controls = BlockControls::new(ParameterSet::default());
//! let input = [0.0f32; 64];
//! let mut left = [0.0f32; 64];
//! let mut right = [0.0f32; 64];
//! engine.process_block(&controls, &input, &mut left, &mut right);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: Delay buffers are allocated once at construction
//! - **Fail fast**: Delay capacity is validated against the worst-case
//!   modulation depth before the first block is rendered
//! - **No dependencies on std**: Pure `no_std` with `libm` for math

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod crossover;
pub mod delay;
pub mod engine;
pub mod indicator;
pub mod math;
pub mod oscillator;
pub mod param_info;
pub mod params;
pub mod speed;

// Re-export main types at crate root
pub use config::{ConfigError, EngineConfig};
pub use crossover::Crossover;
pub use delay::RotationDelay;
pub use engine::RotaryEngine;
pub use indicator::{Indicator, IndicatorSink};
pub use math::{flush_denormal, modulated_delay_samples, tone_mix, tremolo_gain};
pub use oscillator::ModOscillator;
pub use param_info::{ParamDescriptor, ParamUnit};
pub use params::{BlockControls, ModeFlags, ParamIndex, ParameterSet, SpeedMode};
pub use speed::SpeedController;
