//! oauth1 CLI - OAuth 1.0a request signing and login.
//!
//! Provides commands for:
//! - `sign`: Print the `Authorization` header for a request
//! - `login`: Run the three-legged flow and print access credentials

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{LoginArgs, SignArgs};
use output::Output;

/// oauth1 - OAuth 1.0a signing tools.
#[derive(Parser)]
#[command(name = "oauth1", version, about)]
struct Cli {
    /// Enable verbose output (flow progress logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a request and print its Authorization header.
    Sign(SignArgs),
    /// Obtain access credentials through the three-legged flow.
    Login(LoginArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sign(args) => args.execute(),
        Commands::Login(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
