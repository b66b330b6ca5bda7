//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Bit depths the writers can encode: 16 and 24-bit integer, 32-bit float.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len());
    let num_frames = total_samples / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample: 16 or 24 (integer) or 32 (float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl WavSpec {
    fn to_hound(self) -> Result<hound::WavSpec> {
        let sample_format = match self.bits_per_sample {
            16 | 24 => SampleFormat::Int,
            32 => SampleFormat::Float,
            other => return Err(Error::UnsupportedBitDepth(other)),
        };
        Ok(hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format,
        })
    }
}

/// Two channels of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel.
    pub left: Vec<f32>,
    /// Right channel.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Creates stereo samples from separate channels.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len(), "channel length mismatch");
        Self { left, right }
    }

    /// Silent buffer of `len` frames.
    pub fn silence(len: usize) -> Self {
        Self {
            left: vec![0.0; len],
            right: vec![0.0; len],
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// True when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Largest absolute sample across both channels.
    pub fn peak(&self) -> f32 {
        peak_of(self.left.iter().chain(&self.right))
    }

    /// RMS across both channels.
    pub fn rms(&self) -> f32 {
        rms_of(self.left.iter().chain(&self.right))
    }
}

/// Largest absolute sample, 0.0 for an empty buffer.
pub fn peak(samples: &[f32]) -> f32 {
    peak_of(samples)
}

/// Root mean square, 0.0 for an empty buffer.
pub fn rms(samples: &[f32]) -> f32 {
    rms_of(samples)
}

fn peak_of<'a>(samples: impl IntoIterator<Item = &'a f32>) -> f32 {
    samples.into_iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}

fn rms_of<'a>(samples: impl IntoIterator<Item = &'a f32>) -> f32 {
    let (sum_sq, count) = samples
        .into_iter()
        .fold((0.0f32, 0usize), |(sum, n), s| (sum + s * s, n + 1));
    if count == 0 {
        return 0.0;
    }
    (sum_sq / count as f32).sqrt()
}

fn read_all_samples<R: std::io::Read>(reader: WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Read a WAV file and return samples as f32 along with the spec.
///
/// Multi-channel files are mixed down to mono by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;
    let samples = read_all_samples(reader)?;

    let mono_samples = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    tracing::debug!(
        frames = mono_samples.len(),
        channels,
        sample_rate = spec.sample_rate,
        "read wav"
    );
    Ok((mono_samples, spec))
}

fn quantize(sample: f32, bits: u16) -> i32 {
    let max_val = (1i32 << (bits - 1)) as f32;
    (sample * max_val).clamp(-max_val, max_val - 1.0) as i32
}

/// Write mono samples to a WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let mut mono_spec = spec;
    mono_spec.channels = 1;
    let mut writer = WavWriter::create(path, mono_spec.to_hound()?)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        for &sample in samples {
            writer.write_sample(quantize(sample, spec.bits_per_sample))?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Write stereo samples to a WAV file.
///
/// The channel count in `spec` is ignored; the file is always stereo.
/// Integer formats clamp to full scale.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    let mut stereo_spec = spec;
    stereo_spec.channels = 2;
    let mut writer = WavWriter::create(path, stereo_spec.to_hound()?)?;

    if spec.bits_per_sample == 32 {
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            writer.write_sample(*l)?;
            writer.write_sample(*r)?;
        }
    } else {
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            writer.write_sample(quantize(*l, spec.bits_per_sample))?;
            writer.write_sample(quantize(*r, spec.bits_per_sample))?;
        }
    }

    writer.finalize()?;
    tracing::debug!(frames = samples.len(), bits = spec.bits_per_sample, "wrote wav");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_f32() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 48000);
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_roundtrip_i24() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin() * 0.9).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 24,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        for (a, b) in samples.iter().zip(loaded.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_stereo_mixed_down_on_read() {
        let samples = StereoSamples::new(vec![1.0, 0.5], vec![0.0, -0.5]);
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, WavSpec::default()).unwrap();

        let (mono, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec.channels, 2);
        assert_eq!(mono, vec![0.5, 0.0]);
    }

    #[test]
    fn test_integer_output_clamps() {
        assert_eq!(quantize(2.0, 16), i32::from(i16::MAX));
        assert_eq!(quantize(-2.0, 16), i32::from(i16::MIN));
    }

    #[test]
    fn test_unsupported_bit_depth() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            bits_per_sample: 8,
            ..WavSpec::default()
        };
        let err = write_wav(file.path(), &[0.0], spec).unwrap_err();
        assert!(matches!(err, Error::UnsupportedBitDepth(8)));
    }

    #[test]
    fn test_peak_and_rms() {
        let samples = StereoSamples::new(vec![0.5, -1.0], vec![0.5, 1.0]);
        assert_eq!(samples.peak(), 1.0);
        let expected = ((0.25 + 1.0 + 0.25 + 1.0) / 4.0f32).sqrt();
        assert!((samples.rms() - expected).abs() < 1e-6);
        assert_eq!(StereoSamples::default().rms(), 0.0);
    }

    #[test]
    fn test_mono_helpers_match_stereo() {
        let mono = [0.5, -1.0, 0.5, 1.0];
        let stereo = StereoSamples::new(vec![0.5, -1.0], vec![0.5, 1.0]);
        assert_eq!(rms(&mono), stereo.rms());
        assert_eq!(peak(&mono), stereo.peak());
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(peak(&[]), 0.0);
        assert!((rms(&[0.6, -0.6, 0.6]) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_supported_depths_encode() {
        for bits in SUPPORTED_BIT_DEPTHS {
            let spec = WavSpec {
                bits_per_sample: bits,
                ..WavSpec::default()
            };
            assert!(spec.to_hound().is_ok(), "{bits}-bit rejected");
        }
    }
}
