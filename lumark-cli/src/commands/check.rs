//! Check command implementation: integrity-gate an image without output.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use lumark_core::{GateOutcome, Watermarker};

use crate::utils::generate_payload;

/// Execute the check command.
pub fn execute(file: PathBuf, quiet: bool) -> Result<()> {
    let content =
        std::fs::read(&file).with_context(|| format!("Failed to read file: {}", file.display()))?;

    let trial = generate_payload("capacity-check");
    match Watermarker::default().gate(&content, &trial)? {
        GateOutcome::Accepted(marked) => {
            if !quiet {
                println!(
                    "{} {} bits round-tripped",
                    "Image can carry a full payload.".green().bold(),
                    marked.bits_embedded
                );
            }
            Ok(())
        }
        GateOutcome::Rejected { reason } => bail!("watermark rejected: {reason}"),
    }
}
