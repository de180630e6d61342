//! `gemfile` - load, normalize and inspect Gemfiles.
//!
//! # Usage
//!
//! ```bash
//! # Print the canonical form of a Gemfile
//! gemfile fmt ./Gemfile
//!
//! # Rewrite into another file
//! gemfile fmt ./Gemfile --output ./gemfiles/rails_7.gemfile
//!
//! # Exit with status 1 when the file is not in canonical form
//! gemfile fmt ./Gemfile --check
//!
//! # Dump the statement tree as JSON
//! gemfile inspect ./Gemfile
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gemfile_dsl::{Gemfile, TracingSink, load_file};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gemfile")]
#[command(author, version)]
#[command(about = "Normalize and inspect Bundler Gemfiles")]
struct Args {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a Gemfile in canonical form
    Fmt {
        /// Path to the Gemfile
        gemfile: PathBuf,

        /// Write the result here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only report whether the file is already canonical
        #[arg(long, conflicts_with = "output")]
        check: bool,
    },
    /// Print the statement tree of a Gemfile as JSON
    Inspect {
        /// Path to the Gemfile
        gemfile: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Fmt {
            gemfile,
            output,
            check,
        } => fmt(&gemfile, output.as_deref(), check),
        Command::Inspect { gemfile } => {
            let loaded = load(&gemfile)?;
            println!("{}", loaded.to_json()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Gemfile> {
    load_file(path, Arc::new(TracingSink))
        .with_context(|| format!("Failed to load {}", path.display()))
}

fn fmt(path: &Path, output: Option<&Path>, check: bool) -> Result<ExitCode> {
    let rendered = load(path)?.render();

    if check {
        let current = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if current == rendered {
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!("{} is not in canonical form", path.display());
        return Ok(ExitCode::FAILURE);
    }

    match output {
        Some(target) => {
            std::fs::write(target, &rendered)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            tracing::info!("Wrote {}", target.display());
        }
        // Exact text, so piping into a file keeps it canonical
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to standard output")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
