// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nudge - an adaptive notification engine for habit tracking.
//!
//! This is the binary entry point for the Nudge daemon and its
//! operational subcommands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod pass;
mod serve;
mod status;

/// Nudge - an adaptive notification engine for habit tracking.
#[derive(Parser, Debug)]
#[command(name = "nudge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the trigger server (and the internal ticker, if enabled).
    Serve,
    /// Run a single delivery pass and print the counters.
    Pass {
        /// Skip eligibility checks and send to every subscription.
        #[arg(long)]
        force: bool,
    },
    /// Show subscription count and database location.
    Status,
}

/// Initializes the tracing subscriber from the configured log level.
///
/// `RUST_LOG` takes precedence when set, so operators can override the
/// config file without editing it.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nudge={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match nudge_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            nudge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.engine.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Pass { force }) => pass::run_pass(config, force).await,
        Some(Commands::Status) => status::run_status(&config).await,
        None => {
            println!("nudge: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
