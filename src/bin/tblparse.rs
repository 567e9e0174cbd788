//! Command-line front end: parses table files and prints them as JSON.
//!
//! Run with: cargo run -- path/to/file.tbl [more files...]

use clap::Parser as ClapParser;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tblparse::{from_str, to_values, Block};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE_PROMPT: &str = "Please specify the path(s) to the file(s) you want to parse.";

/// Parse hierarchical table files and print their contents.
#[derive(Debug, ClapParser)]
#[command(name = "tblparse", version, about)]
struct Args {
    /// Table files to parse; their tables are concatenated in argument order.
    paths: Vec<PathBuf>,

    /// Print single-line JSON instead of pretty-printed JSON.
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "tblparse=debug",
        _ => "tblparse=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Vec<Block>, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let tables = from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))?;
    debug!(path = %path.display(), tables = tables.len(), "loaded");
    Ok(tables)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut tables = Vec::new();
    for path in &args.paths {
        tables.extend(load(path)?);
    }

    let values = to_values(&tables);
    let json = if args.compact {
        serde_json::to_string(&values)?
    } else {
        serde_json::to_string_pretty(&values)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.paths.is_empty() {
        println!("{}", USAGE_PROMPT);
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
