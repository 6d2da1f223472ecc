//! Promptdeck CLI
//!
//! Main entry point for the promptdeck command-line tool.
//! Fetches labeled prompt templates from the hosted store and compiles
//! them with caller-supplied variables.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ResolveCommand, ShowCommand};
use promptdeck_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Promptdeck CLI - fetch and compile hosted prompt templates
#[derive(Parser, Debug)]
#[command(name = "promptdeck")]
#[command(about = "Fetch and compile hosted prompt templates", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "PROMPTDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Prompt store base URL
    #[arg(short, long, global = true, env = "PROMPTDECK_ENDPOINT")]
    endpoint: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a prompt and substitute variables into it
    Resolve(ResolveCommand),

    /// Fetch a prompt and print its raw template
    Show(ShowCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load_from(cli.config.clone())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.endpoint,
        None,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    config.validate()?;

    tracing::info!("promptdeck starting");
    tracing::debug!("Endpoint: {}", config.endpoint);
    tracing::debug!("Default label: {}", config.default_label);

    let command_name = match &cli.command {
        Commands::Resolve(_) => "resolve",
        Commands::Show(_) => "show",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Resolve(cmd) => cmd.execute(&config).await,
        Commands::Show(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
