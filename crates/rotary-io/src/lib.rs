//! Offline audio I/O for the rotary engine.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`], [`read_wav_info`], [`write_wav`] and
//!   [`write_wav_stereo`]
//! - **Block scheduling**: [`OfflineScheduler`] drives any
//!   [`BlockProcessor`] (the bare [`RotaryEngine`](rotary_core::RotaryEngine)
//!   or a full [`RotaryPedal`](rotary_platform::RotaryPedal)) over a buffer
//!   in fixed-size blocks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rotary_io::{OfflineScheduler, build_engine, read_wav, write_wav_stereo};
//!
//! let (samples, spec) = read_wav("input.wav")?;
//! let mut engine = build_engine(&spec, 1.0, None)?;
//! engine.set_bypass(false);
//!
//! let output = OfflineScheduler::new(512)?.run(&mut engine, &samples)?;
//! write_wav_stereo("output.wav", &output, spec)?;
//! ```

mod scheduler;
mod wav;

pub use scheduler::{BlockProcessor, OfflineScheduler, build_engine};
pub use wav::{
    SUPPORTED_BIT_DEPTHS, StereoSamples, WavFormat, WavInfo, WavSpec, peak, read_wav,
    read_wav_info, rms, write_wav, write_wav_stereo,
};

use rotary_core::ConfigError;

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The input buffer holds no samples.
    #[error("Input contains no samples")]
    EmptyInput,

    /// Block size must be at least one sample.
    #[error("Invalid block size: {0}")]
    InvalidBlockSize(usize),

    /// Bit depth the writer cannot encode.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// The engine rejected its configuration.
    #[error("Engine configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
