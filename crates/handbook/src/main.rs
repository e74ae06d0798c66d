//! Handbook CLI - site configuration resolver.
//!
//! Provides commands for:
//! - `check`: Validate the site configuration and report navigation warnings
//! - `resolve`: Print the resolved configuration as JSON for the site builder
//! - `sidebar`: Print the sidebar navigation tree

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ResolveArgs, SidebarArgs};
use output::Output;

/// Handbook - documentation site configuration.
#[derive(Parser)]
#[command(name = "handbook", version, about)]
struct Cli {
    /// Enable verbose output (configuration loading and resolution logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site configuration.
    Check(CheckArgs),
    /// Print the resolved site configuration as JSON.
    Resolve(ResolveArgs),
    /// Print the sidebar navigation tree.
    Sidebar(SidebarArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
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
        Commands::Check(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Sidebar(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
