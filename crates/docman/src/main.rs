//! docman CLI - documentation-site manifest toolkit.
//!
//! Provides commands for:
//! - `check`: Validate the manifest and cross-check it against the docs directory
//! - `nav`: Print the navigation tree
//! - `pages`: List nav pages in menu order
//! - `fmt`: Re-emit the manifest through the typed model

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, FmtArgs, NavArgs, PagesArgs};
use output::Output;

/// docman - documentation-site manifest toolkit.
#[derive(Parser)]
#[command(name = "docman", version, about)]
struct Cli {
    /// Enable verbose output (load and scan timing logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest structure and referenced pages.
    Check(CheckArgs),
    /// Print the navigation tree.
    Nav(NavArgs),
    /// List nav pages in menu order.
    Pages(PagesArgs),
    /// Re-emit the manifest through the typed model (comments are not kept).
    Fmt(FmtArgs),
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
        Commands::Check(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::Pages(args) => args.execute(),
        Commands::Fmt(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
