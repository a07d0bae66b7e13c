//! Overlay command implementation: render the block geometry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use lumark_core::Watermarker;
use tracing::info;

use crate::utils::build_overlay_path;

/// Execute the overlay command.
pub fn execute(file: PathBuf, output: Option<PathBuf>, quiet: bool) -> Result<()> {
    let content =
        std::fs::read(&file).with_context(|| format!("Failed to read file: {}", file.display()))?;

    let overlay = Watermarker::default().debug_overlay(&content)?;

    let out_path = output.unwrap_or_else(|| build_overlay_path(&file));
    std::fs::write(&out_path, &overlay)
        .with_context(|| format!("Failed to write overlay image: {}", out_path.display()))?;
    info!(path = %out_path.display(), "Overlay saved");

    if !quiet {
        println!(
            "{} {}",
            "Overlay written to".green(),
            out_path.display()
        );
    }

    Ok(())
}
