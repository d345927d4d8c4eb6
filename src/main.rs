//! continuity CLI - Entry point
//!
//! Usage: continuity <command> [options]

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use continuity::cli::{Cli, Commands};
use continuity::config::Config;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (RUST_LOG wins over --verbose)
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    // Run command
    match command {
        Commands::Score(args) => continuity::cli::score::run(args),
        Commands::Validate(args) => continuity::cli::validate::run(args),
        Commands::Init(args) => with_config(cli.config, |c| continuity::cli::init::run(args, c)),
        Commands::Add(args) => with_config(cli.config, |c| continuity::cli::add::run(args, c)),
        Commands::Handover(args) => {
            with_config(cli.config, |c| continuity::cli::handover::run(args, c))
        }
        Commands::Stats(args) => {
            with_config(cli.config, |c| continuity::cli::stats::execute(args, c))
        }
    }
}

fn with_config<F>(path: Option<std::path::PathBuf>, f: F) -> Result<()>
where
    F: FnOnce(&Config) -> Result<()>,
{
    let config = Config::load(path.as_deref())?;
    f(&config)
}
