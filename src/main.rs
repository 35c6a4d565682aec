// src/main.rs

use std::process::ExitCode;

use anchor_scrub::batch;
use anchor_scrub::cli::Args;
use anchor_scrub::config::Config;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration from environment (and .env, if present)
    let config = Config::from_env();

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _guard = init_tracing(&config.rust_log, &config);

    if let Some(raw) = Config::rejected_strategy() {
        tracing::warn!(
            "Unknown ANCHOR_SCRUB_STRATEGY {:?}, using {}",
            raw,
            config.strategy
        );
    }

    let Some(target) = args.target() else {
        tracing::error!("No path given");
        return ExitCode::FAILURE;
    };

    let options = args.batch_options(&config);
    if options.dry_run {
        tracing::info!("Running in dry-run mode - no changes will be made");
    }
    tracing::debug!(
        strategy = %options.strategy,
        sanitize_scripts = options.sanitize_scripts,
        "Cleaning {}",
        target.display()
    );

    let summary = match batch::run(target, &options) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match summary.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("\n{summary}");
    }

    ExitCode::SUCCESS
}

/// Stderr logging plus, when a log directory is configured, a daily rolling
/// file.
fn init_tracing(filter: &str, config: &Config) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::new(filter);
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "anchor-scrub.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
