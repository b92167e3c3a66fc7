//! eep: read, verify and patch 24C16 odometer EEPROM dumps from the
//! command line.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use eep_cli::app;
use eep_cli::cli::Cli;
use eep_cli::config::{CliConfig, LogFormat, LoggingConfig};
use eep_cli::registry::ToolRegistry;
use eep_tools::FileDumpSource;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // ── Load config ─────────────────────────────────────────────
    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging);
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        require_bin = config.require_bin_extension,
        "eep starting"
    );

    // ── Dispatch ────────────────────────────────────────────────
    let registry = ToolRegistry::with_defaults();
    let mut stdout = std::io::stdout();
    let code = app::run(&cli, &config, &registry, &FileDumpSource, &mut stdout).await?;

    Ok(ExitCode::from(code))
}

/// Logs go to stderr so stdout stays parseable with `--json`.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
