//! Mark command implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use lumark_core::{GateOutcome, Watermarker};
use tracing::{debug, info};

use crate::utils::{build_marked_path, generate_payload};

/// Execute the mark command.
pub fn execute(
    file: PathBuf,
    purpose: Option<String>,
    payload: Option<String>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let content =
        std::fs::read(&file).with_context(|| format!("Failed to read file: {}", file.display()))?;
    info!(path = %file.display(), bytes = content.len(), "Read file");

    let payload = match (payload, purpose) {
        (Some(hex), _) => hex.to_ascii_lowercase(),
        (None, Some(purpose)) => generate_payload(&purpose),
        (None, None) => bail!("either --purpose or --payload is required"),
    };
    debug!(payload = %payload, "Payload selected");

    let wm = Watermarker::default();
    let marked = match wm.gate(&content, &payload)? {
        GateOutcome::Accepted(marked) => marked,
        GateOutcome::Rejected { reason } => bail!("watermark rejected: {reason}"),
    };

    let out_path = output.unwrap_or_else(|| build_marked_path(&file));
    std::fs::write(&out_path, &marked.png)
        .with_context(|| format!("Failed to write marked image: {}", out_path.display()))?;
    info!(path = %out_path.display(), bits = marked.bits_embedded, "Marked image saved");

    if !quiet {
        println!();
        println!("{}", "Image marked.".green().bold());
        println!();
        println!("   {} {}", "Marked image:".dimmed(), out_path.display());
        println!("   {} {}", "Payload:".dimmed(), payload);
        println!(
            "   {} {}",
            "Bits embedded:".dimmed(),
            marked.bits_embedded
        );
        println!();
        println!(
            "{}",
            "Store the payload with its purpose; verification only returns the payload."
                .dimmed()
        );
    }

    Ok(())
}
