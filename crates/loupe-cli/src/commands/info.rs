use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use loupe_core::io::natural_size;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let size = natural_size(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", size.width, size.height);
    println!("Aspect:      {:.4}", size.width / size.height);

    Ok(())
}
