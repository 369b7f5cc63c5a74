use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use loupe_core::config::ZoomOptions;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a default set of zoom options as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let options = ZoomOptions {
        width: Some(400.0),
        height: Some(250.0),
        zoom_width: Some(500.0),
        ..ZoomOptions::default()
    };
    let toml_str = toml::to_string_pretty(&options)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
