mod config;
mod display;
mod run;

use std::process::ExitCode;

use clap::Parser;
use drawcast_publish::{Publisher, RandomPlaceholderMetrics};
use drawcast_sync::DrawClient;

use crate::config::Config;
use crate::run::{RunContext, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("initialising logging: {e}"))?;
    tracing::info!("drawcast v{}", env!("CARGO_PKG_VERSION"));

    let mut ctx = RunContext::new(
        config.build_context(chrono::Utc::now()),
        Publisher::new(&config.output_dir),
        Box::new(RandomPlaceholderMetrics::new(config.stats_seed)),
    );

    let outcome = match DrawClient::new(config.fetch_config()) {
        Ok(client) => ctx.run(&client).await,
        Err(e) => ctx.fail(e.into()),
    };

    tracing::debug!(stage = ?ctx.stage(), "run finished");

    match outcome {
        RunOutcome::Published(summary) => {
            display::print_run_summary(&mut std::io::stdout().lock(), &summary)?;
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Failed { error, report } => {
            display::print_failure(&mut std::io::stderr().lock(), &error, &report)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
