//! The `cc-json` validator binary.
//!
//! Reads a JSON document from a file (or standard input), decodes it
//! with the `cc_json` library and reports whether it is valid.
//!
//! You can run it with: `cargo run --features cli -- path/to/file.json`

use anyhow::{Context, Result};
use cc_json::{decode_with, DecodeOptions, DEFAULT_MAX_DEPTH, MAX_JSON_SIZE_BYTES};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Check whether a file (or standard input) contains valid JSON.
#[derive(Debug, Parser)]
#[command(name = "cc-json", version, about)]
struct Cli {
    /// The JSON file to check. Reads standard input when omitted.
    file: Option<PathBuf>,

    /// Maximum nesting depth of objects and arrays.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum accepted input size in bytes.
    #[arg(long, default_value_t = MAX_JSON_SIZE_BYTES)]
    max_bytes: usize,

    /// Log decoding progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// `RUST_LOG` wins over `--verbose` when set.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read standard input")?;
            Ok(input)
        }
    }
}

/// Returns whether the input decoded successfully.
fn run(cli: &Cli) -> Result<bool> {
    let input = read_input(cli.file.as_deref())?;
    let options = DecodeOptions::default()
        .with_max_depth(cli.max_depth)
        .with_max_input_bytes(cli.max_bytes);

    match decode_with(&input, &options) {
        Ok(value) => {
            info!(root = value.type_name(), "decoded document");
            println!("valid ✅");
            Ok(true)
        }
        Err(err) => {
            match err.locate(&input) {
                Some(location) => println!("invalid ❌ {} ({})", err, location),
                None => println!("invalid ❌ {}", err),
            }
            Ok(false)
        }
    }
}
