//! Courier CLI
//!
//! Sends one message through the hybrid-encryption exchange and prints the
//! server's decrypted echo.

mod api;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{error, info};

const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "courier")]
#[command(author, version, about = "Courier - one-shot encrypted message exchange", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt, sign and send a message
    Send {
        /// Message to send
        message: String,

        /// Server base URL
        #[arg(short, long, env = "COURIER_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Per-step timeout in seconds
        #[arg(short, long, env = "COURIER_TIMEOUT_SECS", default_value_t = 10)]
        timeout: u64,
    },

    /// Print the server's public key
    #[command(name = "public-key")]
    PublicKey {
        /// Server base URL
        #[arg(short, long, env = "COURIER_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "courier=debug,courier_core=debug"
        } else {
            "courier=info,courier_core=warn"
        })
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!("Starting Courier CLI");

    let result = match cli.command {
        Commands::Send {
            message,
            server,
            timeout,
        } => commands::send::execute(&server, timeout, &message).await,
        Commands::PublicKey { server } => commands::public_key::execute(&server).await,
    };

    if let Err(ref e) = result {
        error!("Command failed: {:#}", e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}
