//! Faultbox CLI - synthetic-failure demo service and traffic driver.
//!
//! Commands:
//! - `faultbox serve` - Run the demo HTTP service
//! - `faultbox traffic` - Generate traffic against a running instance

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "faultbox")]
#[command(about = "Synthetic-failure demo service for AIOps agent testing")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

/// How log events are rendered.
#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event, for the cloud logging pipeline.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo HTTP service
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// Service name reported by the health endpoints
        #[arg(long, default_value = "aiops-demo-service")]
        service_name: String,

        /// Random seed for reproducible outcome draws
        #[arg(long)]
        seed: Option<u64>,

        /// Lower bound of the slow endpoint's delay, in milliseconds
        #[arg(long, default_value_t = 2000)]
        slow_min_ms: u64,

        /// Upper bound of the slow endpoint's delay, in milliseconds
        #[arg(long, default_value_t = 5000)]
        slow_max_ms: u64,

        /// Make /api/crash abort the process instead of returning 500
        #[arg(long)]
        crash_abort: bool,
    },

    /// Generate traffic against a running instance
    Traffic {
        /// Base URL of the target service
        url: String,

        /// How long to generate traffic, in minutes
        #[arg(short, long, default_value_t = 5)]
        duration_mins: u64,

        /// Maximum number of requests in flight at once
        #[arg(short, long, default_value_t = 3)]
        workers: usize,

        /// Bearer token to attach to every request
        #[arg(long, conflicts_with = "token_command")]
        token: Option<String>,

        /// Command whose stdout becomes the bearer token
        /// (e.g. "gcloud auth print-identity-token")
        #[arg(long)]
        token_command: Option<String>,

        /// Random seed for reproducible endpoint draws
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    match cli.command {
        Commands::Serve {
            host,
            port,
            service_name,
            seed,
            slow_min_ms,
            slow_max_ms,
            crash_abort,
        } => {
            commands::serve::run(
                &host,
                port,
                &service_name,
                seed,
                slow_min_ms,
                slow_max_ms,
                crash_abort,
            )
            .await
        }
        Commands::Traffic {
            url,
            duration_mins,
            workers,
            token,
            token_command,
            seed,
        } => commands::traffic::run(&url, duration_mins, workers, token, token_command, seed).await,
    }
}
