//! File-based rendering command.

use crate::preset::Preset;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rotary_core::{BlockControls, ParamIndex, ParameterSet, RotaryEngine, SpeedMode};
use rotary_io::{
    BlockProcessor, OfflineScheduler, SUPPORTED_BIT_DEPTHS, WavSpec, build_engine, peak, read_wav,
    rms, write_wav_stereo,
};
use std::path::PathBuf;

/// Pedal block size. Rotor inertia advances once per block.
const DEFAULT_BLOCK_SIZE: usize = 12;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (always stereo)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset file (TOML) or built-in preset name
    #[arg(short, long)]
    preset: Option<String>,

    /// Slow rotor speed in Hz (0-4)
    #[arg(long)]
    slow_speed: Option<f32>,

    /// Fast rotor speed in Hz (4-10)
    #[arg(long)]
    fast_speed: Option<f32>,

    /// Drum-to-horn rate ratio (0-1)
    #[arg(long)]
    drift: Option<f32>,

    /// Doppler depth (0.3-0.7)
    #[arg(long)]
    vibe: Option<f32>,

    /// Tremolo intensity (0-1)
    #[arg(long)]
    intensity: Option<f32>,

    /// Low/high balance (0.3-0.7)
    #[arg(long)]
    tone: Option<f32>,

    /// Start in fast mode
    #[arg(long)]
    fast: bool,

    /// Render bypassed (output equals input)
    #[arg(long)]
    bypass: bool,

    /// Start with the rotors stopped instead of already at speed
    #[arg(long)]
    from_rest: bool,

    /// Press the speed footswitch at this time in seconds (repeatable)
    #[arg(long, value_name = "SECONDS")]
    toggle_speed_at: Vec<f64>,

    /// Processing block size
    #[arg(long)]
    block_size: Option<usize>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

/// Parse an output bit depth for clap's `value_parser`.
fn parse_bit_depth(s: &str) -> Result<u16, String> {
    let bits: u16 = s
        .parse()
        .map_err(|_| format!("Invalid bit depth: '{s}' (expected 16, 24 or 32)"))?;
    if SUPPORTED_BIT_DEPTHS.contains(&bits) {
        Ok(bits)
    } else {
        Err(format!("Unsupported bit depth: {bits} (expected 16, 24 or 32)"))
    }
}

/// Engine wrapper that delivers speed-footswitch edges at fixed blocks.
struct ScriptedEngine {
    engine: RotaryEngine,
    params: ParameterSet,
    toggle_blocks: Vec<usize>,
    block: usize,
}

impl BlockProcessor for ScriptedEngine {
    fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        let controls = BlockControls {
            toggle_speed: self.toggle_blocks.contains(&self.block),
            ..BlockControls::new(self.params)
        };
        if controls.toggle_speed {
            tracing::debug!(block = self.block, "speed toggle");
        }
        self.engine.process_block(&controls, input, left, right);
        self.block += 1;
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    let preset = match &args.preset {
        Some(name) => {
            let preset = Preset::resolve(name)?;
            println!("Loading preset: {}", preset.name);
            preset
        }
        None => Preset::default(),
    };

    let mut params = preset.controls.params();
    let overrides = [
        (ParamIndex::SlowSpeed, args.slow_speed),
        (ParamIndex::FastSpeed, args.fast_speed),
        (ParamIndex::Drift, args.drift),
        (ParamIndex::Vibe, args.vibe),
        (ParamIndex::Intensity, args.intensity),
        (ParamIndex::Tone, args.tone),
    ];
    for (index, value) in overrides {
        if let Some(value) = value {
            params.set(index, value);
        }
    }
    let params = params.clamped();

    let block_size = args
        .block_size
        .or(preset.engine.block_size)
        .unwrap_or(DEFAULT_BLOCK_SIZE);
    let scheduler = OfflineScheduler::new(block_size)?;

    let mut engine = build_engine(
        &spec,
        preset.engine.max_depth as f32,
        preset.engine.delay_capacity,
    )?;
    engine.set_params(params);
    engine.set_bypass(args.bypass || preset.controls.bypass);
    let mode = if args.fast {
        SpeedMode::Fast
    } else {
        preset.controls.speed_mode()
    };
    engine.set_speed_mode(mode);
    if !args.from_rest {
        engine.set_speed_immediate(params.target_speed(mode));
    }

    let toggle_blocks: Vec<usize> = args
        .toggle_speed_at
        .iter()
        .map(|&t| (t.max(0.0) * f64::from(spec.sample_rate)) as usize / block_size)
        .collect();

    for index in ParamIndex::ALL {
        let desc = index.descriptor();
        tracing::info!("{:<10} {:.2}{}", desc.name, params.get(index), desc.unit.suffix());
    }
    println!(
        "Rendering ({} mode{}, block size {})...",
        match mode {
            SpeedMode::Slow => "slow",
            SpeedMode::Fast => "fast",
        },
        if engine.is_bypassed() { ", bypassed" } else { "" },
        block_size
    );

    let pb = ProgressBar::new(scheduler.block_count(samples.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut processor = ScriptedEngine {
        engine,
        params,
        toggle_blocks,
        block: 0,
    };
    let output = scheduler.run_with_progress(&mut processor, &samples, |done, _| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    let input_rms = rms(&samples);
    let input_peak = peak(&samples);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(output.rms()),
        linear_to_db(output.peak())
    );
    println!(
        "  Rotor:  {:.2} Hz at end",
        processor.engine.speed().horn_frequency()
    );

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
