//! Replay binary entry point
//!
//! Run with:
//! ```bash
//! cargo run -p chat-cli -- demos/standup.jsonl
//! ```
//!
//! Reads the script from stdin when no path is given. Configuration is
//! loaded from environment variables (and `.env`).

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;
use chat_cli::events::log_events;
use chat_cli::Replayer;
use chat_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use chat_service::ServiceContext;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Replay failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_app(&config)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        max_content_length = config.store.max_content_length,
        "Configuration loaded"
    );

    let ctx = ServiceContext::builder().config(config).build()?;

    let event_logger = tokio::spawn(log_events(ctx.subscribe()));

    let mut replayer = Replayer::new(ctx);
    let stdout = io::stdout();
    let summary = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("cannot open {path}"))?;
            replayer.run(BufReader::new(file), stdout.lock())?
        }
        None => replayer.run(io::stdin().lock(), stdout.lock())?,
    };

    // Dropping the replayer drops the last sender and ends the logger
    drop(replayer);
    let outbound = event_logger.await.unwrap_or_default();

    info!(
        applied = summary.applied,
        failed = summary.failed,
        outbound,
        "Done"
    );
    Ok(())
}
