use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Issue and redeem parking tickets
#[derive(Parser, Debug)]
#[command(name = "parking-ticket", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./parking-ticket.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    #[cfg(feature = "api")]
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Issue a ticket for a vehicle entering a lot
    Entry {
        /// Vehicle plate
        #[arg(short, long)]
        plate: String,

        /// Parking lot identifier
        #[arg(short, long)]
        lot: String,
    },

    /// Redeem a ticket and print the fee
    Exit {
        /// Ticket id printed at entry
        #[arg(short, long)]
        ticket: String,
    },

    /// Show the current fee of a ticket without redeeming it
    Quote {
        /// Ticket id printed at entry
        #[arg(short, long)]
        ticket: String,
    },

    /// Compute the fee for a stay of a given length
    Fee {
        /// Whole minutes parked
        #[arg(short, long)]
        minutes: u32,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
}
