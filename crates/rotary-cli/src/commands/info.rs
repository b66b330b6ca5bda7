//! Display parameters and engine limits.

use clap::Args;
use rotary_core::config::DEFAULT_MAX_DEPTH;
use rotary_core::crossover::{CROSSOVER_HZ, CROSSOVER_Q};
use rotary_core::speed::ACCELERATION;
use rotary_core::{EngineConfig, ParamIndex};

/// Show parameter ranges and the delay buffer an engine would allocate.
#[derive(Args)]
pub struct InfoArgs {
    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: f32,

    /// Upper bound on vibe depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: f32,

    /// Check an explicit delay capacity in samples
    #[arg(long)]
    delay_capacity: Option<usize>,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let mut config = EngineConfig::new(args.sample_rate).with_max_depth(args.max_depth);
    if let Some(capacity) = args.delay_capacity {
        config = config.with_delay_capacity(capacity);
    }

    println!("Parameters:");
    println!("  {:<12} {:<12} {:>8} {:>8} {:>8}", "ID", "Name", "Min", "Max", "Default");
    for index in ParamIndex::ALL {
        let d = index.descriptor();
        let unit = d.unit.suffix();
        println!(
            "  {:<12} {:<12} {:>8} {:>8} {:>8}",
            d.string_id,
            d.name,
            format!("{:.2}{unit}", d.min),
            format!("{:.2}{unit}", d.max),
            format!("{:.2}{unit}", d.default),
        );
    }

    println!("\nEngine:");
    println!("  Sample Rate:      {} Hz", args.sample_rate);
    println!("  Crossover:        {CROSSOVER_HZ} Hz, Q {CROSSOVER_Q}");
    println!("  Inertia:          {ACCELERATION} of the gap per block");
    println!("  Max Depth:        {}", args.max_depth);

    let capacity = config.validate()?;
    println!("  Worst-Case Delay: {:.2} samples", config.worst_case_delay());
    println!(
        "  Delay Capacity:   {capacity} samples ({:.2} ms)",
        capacity as f32 * 1000.0 / args.sample_rate
    );

    Ok(())
}
