//! Integration tests for rotary-cli.
//!
//! Invokes the built `rotary` binary on generated WAV files.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `rotary` binary built by cargo.
fn rotary_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rotary"))
}

fn write_sine(path: &Path, sample_rate: u32, seconds: f32) -> Vec<f32> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let n = (sample_rate as f32 * seconds) as usize;
    let samples: Vec<f32> = (0..n)
        .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin())
        .collect();
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &s in &samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
    samples
}

fn read_stereo(path: &Path) -> (hound::WavSpec, Vec<f32>, Vec<f32>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let interleaved: Vec<f32> = reader.samples::<f32>().map(Result::unwrap).collect();
    let left = interleaved.iter().step_by(2).copied().collect();
    let right = interleaved.iter().skip(1).step_by(2).copied().collect();
    (spec, left, right)
}

// ---------------------------------------------------------------------------
// rotary process
// ---------------------------------------------------------------------------

#[test]
fn cli_process_writes_stereo_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let samples = write_sine(&input, 48000, 0.5);

    let result = rotary_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .args(["--preset", "tremolo", "--vibe", "0.6"])
        .output()
        .expect("failed to run rotary process");
    assert!(
        result.status.success(),
        "rotary process failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Loading preset: tremolo"));
    assert!(stdout.contains("Input:  RMS"));
    assert!(stdout.contains("Output: RMS"));

    let (spec, left, right) = read_stereo(&output);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(left.len(), samples.len());
    assert_eq!(left, right);
    assert_ne!(left, samples);
}

#[test]
fn cli_process_bypass_is_identity() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let samples = write_sine(&input, 44100, 0.25);

    let status = rotary_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .arg("--bypass")
        .status()
        .unwrap();
    assert!(status.success());

    let (_, left, right) = read_stereo(&output);
    assert_eq!(left, samples);
    assert_eq!(right, samples);
}

#[test]
fn cli_process_speed_toggle_spins_up() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_sine(&input, 48000, 1.0);

    let result = rotary_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .args(["--slow-speed", "1.0", "--fast-speed", "8.0"])
        .args(["--toggle-speed-at", "0.1"])
        .output()
        .unwrap();
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    let rotor_line = stdout
        .lines()
        .find(|l| l.contains("Rotor:"))
        .expect("rotor line");
    let hz: f32 = rotor_line
        .split_whitespace()
        .nth(1)
        .and_then(|v| v.parse().ok())
        .expect("rotor speed");
    // 0.9 s at block size 12 is 3600 inertia steps: most of the way to 8 Hz.
    assert!(hz > 5.0 && hz < 8.0, "rotor {hz} Hz");
}

#[test]
fn cli_process_preset_file_and_bit_depth() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let preset = dir.path().join("mine.toml");
    write_sine(&input, 48000, 0.1);
    std::fs::write(
        &preset,
        "name = \"mine\"\n[controls]\nintensity = 0.9\nfast = true\n[engine]\nblock_size = 64\n",
    )
    .unwrap();

    let result = rotary_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .arg("--preset")
        .arg(&preset)
        .args(["--bit-depth", "16"])
        .output()
        .unwrap();
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("fast mode"));
    assert!(stdout.contains("block size 64"));

    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert_eq!(reader.spec().sample_format, hound::SampleFormat::Int);
}

#[test]
fn cli_process_rejects_bad_preset() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let preset = dir.path().join("bad.toml");
    write_sine(&input, 48000, 0.05);
    std::fs::write(&preset, "name = \"bad\"\n[controls]\nvolume = 11.0\n").unwrap();

    let result = rotary_bin()
        .arg("process")
        .arg(&input)
        .arg(dir.path().join("out.wav"))
        .arg("--preset")
        .arg(&preset)
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("volume"));
}

#[test]
fn cli_process_rejects_unsupported_bit_depth_before_rendering() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_sine(&input, 48000, 0.05);

    let result = rotary_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .args(["--bit-depth", "8"])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Unsupported bit depth"));
    assert!(!String::from_utf8_lossy(&result.stdout).contains("Rendering"));
    assert!(!output.exists());
}

#[test]
fn cli_process_rejects_unbounded_preset_depth() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let preset = dir.path().join("deep.toml");
    write_sine(&input, 48000, 0.05);
    std::fs::write(&preset, "name = \"deep\"\n[engine]\nmax_depth = 1e30\n").unwrap();

    let result = rotary_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .arg("--preset")
        .arg(&preset)
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("buffer limit"));
    assert!(!output.exists());
}

#[test]
fn cli_process_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let status = rotary_bin()
        .arg("process")
        .arg(dir.path().join("nope.wav"))
        .arg(dir.path().join("out.wav"))
        .status()
        .unwrap();
    assert!(!status.success());
}

// ---------------------------------------------------------------------------
// rotary info / presets
// ---------------------------------------------------------------------------

#[test]
fn cli_info_lists_parameters_and_capacity() {
    let output = rotary_bin()
        .args(["info", "--sample-rate", "96000"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in ["slow_speed", "fast_speed", "drift", "tone", "intensity", "vibe"] {
        assert!(stdout.contains(id), "info should list '{id}'");
    }
    assert!(stdout.contains("Delay Capacity"));
    assert!(stdout.contains("800 Hz"));
}

#[test]
fn cli_info_reports_undersized_capacity() {
    let output = rotary_bin()
        .args(["info", "--delay-capacity", "8"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("delay capacity 8 samples"));
}

#[test]
fn cli_info_reports_unbounded_depth() {
    let output = rotary_bin()
        .args(["info", "--max-depth", "1e30"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("buffer limit"));
}

#[test]
fn cli_presets_prints_toml() {
    let output = rotary_bin().arg("presets").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["chorale", "tremolo", "bypass-ready"] {
        assert!(stdout.contains(&format!("name = \"{name}\"")));
    }
    assert!(stdout.contains("[controls]"));

    let single = rotary_bin().args(["presets", "chorale"]).output().unwrap();
    let table: toml::Table = String::from_utf8_lossy(&single.stdout).parse().unwrap();
    assert_eq!(table["name"].as_str(), Some("chorale"));
    assert!(table["controls"].get("vibe").is_some());
}

#[test]
fn cli_presets_unknown_name_fails() {
    let output = rotary_bin().args(["presets", "leslie-147"]).output().unwrap();
    assert!(!output.status.success());
}
