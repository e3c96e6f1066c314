//! # permgrid
//!
//! Console for the permgrid access-control matrix.
//!
//! Loads delimited permission records, applies update batches, and
//! evaluates access requests, either through the interactive menu or in
//! one shot with `--requests`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use permgrid_core::AccessRequest;
use permgrid_matrix::{AccessVerdict, MatrixStore};

mod reader;
mod render;
mod session;

/// Access-control matrix console.
#[derive(Parser)]
#[command(name = "permgrid")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Load these entries before anything else
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Evaluate this request batch and exit instead of starting the menu
    #[arg(long, value_name = "FILE")]
    requests: Option<PathBuf>,

    /// Emit evaluation verdicts as JSON lines
    #[arg(long, requires = "requests")]
    json: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut store = MatrixStore::new();
    if let Some(path) = &cli.load {
        let records = reader::read_access_records(path)?;
        tracing::info!(records = records.len(), "preloading entries");
        store.load(records);
    }

    if let Some(path) = &cli.requests {
        let requests = reader::read_requests(path)?;
        for request in &requests {
            let verdict = store.evaluate(request);
            if cli.json {
                println!("{}", verdict_json(request, verdict));
            } else {
                println!("{}", render::render_verdict(request, verdict));
            }
        }
        return Ok(());
    }

    session::run(&mut store)
}

fn verdict_json(request: &AccessRequest, verdict: AccessVerdict) -> String {
    let verdict = match verdict {
        AccessVerdict::Permit => "permit",
        AccessVerdict::Deny => "deny",
        AccessVerdict::UnknownUser => "unknown-user",
        AccessVerdict::UnknownFile => "unknown-file",
    };
    serde_json::json!({
        "user": request.user.as_str(),
        "file": request.file.as_str(),
        "permissions": request.permissions.encode(),
        "verdict": verdict,
    })
    .to_string()
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
