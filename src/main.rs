//! # markline Main Entry Point

use anyhow::{Context, Result};
use markline::cmd_args::CommandLineArgs;
use markline::{config, AppController};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Send logs to a file so they never draw over the interface
fn init_tracing(verbose: bool) -> Result<()> {
    let path = config::get_log_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory '{}'", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(config::LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing(cmd_args.verbose())?;

    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        anyhow::bail!("markline needs an interactive terminal");
    }

    let mut app = AppController::new(cmd_args)?;
    app.run().await?;

    tracing::info!("Exited cleanly");
    Ok(())
}
