//! Verify command implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use lumark_core::Watermarker;
use tracing::info;

/// Execute the verify command.
pub fn execute(file: PathBuf, quiet: bool) -> Result<()> {
    let content =
        std::fs::read(&file).with_context(|| format!("Failed to read file: {}", file.display()))?;

    let recovered = Watermarker::default().verify_image(&content)?;
    info!(
        payload = %recovered.hex,
        bits_read = recovered.bits_read,
        complete = recovered.complete,
        "Extraction finished"
    );

    if recovered.is_sentinel() {
        bail!("image contains no recoverable mark");
    }

    if quiet {
        println!("{}", recovered.hex);
    } else {
        println!();
        println!("{}", "Mark recovered.".green().bold());
        println!();
        println!("   {} {}", "Payload:".dimmed(), recovered.hex);
        if !recovered.complete {
            println!(
                "   {} only {} of 256 bits came from real block positions",
                "Note:".yellow(),
                recovered.bits_read
            );
        }
    }

    Ok(())
}
