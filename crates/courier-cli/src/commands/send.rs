//! Send command - one full exchange

use crate::api::HttpEndpoint;
use anyhow::{Context, Result};
use colored::Colorize;
use courier_core::{ExchangeError, Orchestrator};
use std::time::Duration;
use tracing::{debug, warn};

pub async fn execute(server: &str, timeout_secs: u64, message: &str) -> Result<()> {
    let timeout = Duration::from_secs(timeout_secs);
    let endpoint = HttpEndpoint::new(server, timeout).context("Failed to create HTTP client")?;
    let orchestrator = Orchestrator::new(endpoint).with_timeout(timeout);

    println!("{} {}", "Sending to".dimmed(), server);

    match orchestrator.exchange(message).await {
        Ok(echo) => {
            debug!("Exchange finished in state {:?}", orchestrator.state());
            println!("{}", "✅ Message delivered".green().bold());
            println!("{} {}", "Server decrypted:".bold(), echo);
            Ok(())
        }
        Err(ExchangeError::Rejected { status, error }) => {
            anyhow::bail!("Server rejected the message ({}): {}", status, error)
        }
        Err(e) if e.is_transient() => {
            warn!("Transient failure: {}", e);
            println!("{}", "⚠️  The server could not be reached; try again".yellow());
            Err(e).context("Exchange failed")
        }
        Err(e) => Err(e).context("Exchange failed"),
    }
}
