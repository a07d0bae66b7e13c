//! Lumark CLI - invisible provenance marks for raster images.

use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_codes;
mod utils;

#[derive(Parser)]
#[command(name = "lumark")]
#[command(author, version, about = "Invisible provenance marks for raster images", long_about = None)]
struct Cli {
    /// Suppress decorative output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a payload into an image and write the marked PNG
    Mark {
        /// Path to the image to mark
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Purpose to derive a fresh payload for
        #[arg(short, long)]
        purpose: Option<String>,

        /// Explicit 64-hex payload (instead of deriving one from --purpose)
        #[arg(long, conflicts_with = "purpose")]
        payload: Option<String>,

        /// Output path (defaults to <FILE>.marked.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recover the payload carried by an image
    Verify {
        /// Path to the image to verify
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Test whether an image can reliably carry a full payload
    Check {
        /// Path to the candidate image
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Render the block geometry as visible rectangles
    Overlay {
        /// Path to the image to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (defaults to <FILE>.overlay.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Mark {
            file,
            purpose,
            payload,
            output,
        } => commands::mark::execute(file, purpose, payload, output, quiet),
        Commands::Verify { file } => commands::verify::execute(file, quiet),
        Commands::Check { file } => commands::check::execute(file, quiet),
        Commands::Overlay { file, output } => commands::overlay::execute(file, output, quiet),
    };

    if let Err(err) = result {
        let code = exit_codes::ExitCode::from_anyhow(&err);
        eprintln!("{} {err:#}", "error:".red().bold());
        exit(code.code);
    }
}
