//! parking-ticket - Parking lot ticket service
//!
//! This is the main entry point for the parking-ticket CLI application.
//! It parses arguments, loads configuration, sets up logging and dispatches
//! to the appropriate command handler.

use clap::Parser;
use parking_ticket::cli::{Cli, Commands, ConfigCommands, OutputFormatter, handlers};
use parking_ticket::config::Config;
use parking_ticket::error::{ParkingError, Result};
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, &formatter).await {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the CLI application with the parsed arguments
///
/// # Errors
///
/// Returns any error that occurs during configuration loading or command
/// execution
async fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config.logging.level);

    dispatch_command(cli.command, config, formatter).await
}

/// Install the tracing subscriber
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` wins over the
/// configured level. Logs go to stderr so `--json` output stays parseable.
fn init_tracing(verbose: bool, configured_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch_command(
    command: Commands,
    config: Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        #[cfg(feature = "api")]
        Commands::Serve { host, port } => {
            handlers::handle_serve_command(config, host, port, formatter).await
        },
        Commands::Entry { plate, lot } => {
            handlers::handle_entry_command(&plate, &lot, config, formatter).await
        },
        Commands::Exit { ticket } => handlers::handle_exit_command(&ticket, config, formatter).await,
        Commands::Quote { ticket } => {
            handlers::handle_quote_command(&ticket, config, formatter).await
        },
        Commands::Fee { minutes } => handlers::handle_fee_command(minutes, &config, formatter),
        Commands::Config { command } => match command {
            ConfigCommands::Show => handlers::handle_config_show(&config, formatter),
        },
    }
}

/// Handle errors and display them to the user
///
/// Prints the message and any recovery hints; in JSON mode the error is also
/// emitted as a JSON document on stdout.
fn handle_error(error: &ParkingError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        eprintln!("\nSuggestions:");
        for suggestion in &suggestions {
            eprintln!("  • {suggestion}");
        }
    }

    if formatter.is_json() {
        if let Err(e) = formatter.print_json(&error_document(error)) {
            tracing::warn!("Failed to print JSON error: {}", e);
        }
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}

/// JSON form of an error for `--json` mode
fn error_document(error: &ParkingError) -> serde_json::Value {
    serde_json::json!({
        "status": "error",
        "error": error.user_message(),
        "client_error": error.is_client_error(),
        "recoverable": error.is_recoverable(),
        "suggestions": error.suggestions(),
    })
}
