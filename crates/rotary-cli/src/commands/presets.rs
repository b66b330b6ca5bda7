//! Print the factory presets.

use crate::preset::{builtin, builtins};
use clap::Args;

/// Print built-in presets as TOML.
#[derive(Args)]
pub struct PresetsArgs {
    /// Print only this preset
    name: Option<String>,
}

/// Run the presets command.
pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let presets = match &args.name {
        Some(name) => match builtin(name) {
            Some(preset) => vec![preset],
            None => anyhow::bail!("Unknown preset: {name}"),
        },
        None => builtins(),
    };

    for (i, preset) in presets.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("# {}.toml", preset.name);
        print!("{}", preset.to_toml()?);
    }
    Ok(())
}
