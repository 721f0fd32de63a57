//! Command-line interface layer.

use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod context;
pub mod exit_status;
pub mod report;
pub mod run;

pub use args::Arguments;
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_targets_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let summary = run::run(&args, &mut writer)?;

    Ok(summary.exit_status())
}

/// Diagnostics go to stderr so the report on stdout stays clean.
///
/// `RUST_LOG` wins over `--verbose` when set.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "langgap=debug"
    } else {
        "langgap=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
