//! Orchard CLI - fixture and credential management tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the deterministic fixture collections as JSON
//! orchard-cli seed --out fixtures
//!
//! # Hash a password for bootstrapping an admin account
//! orchard-cli admin hash-password -p 'correct horse battery staple'
//! ```
//!
//! # Commands
//!
//! - `seed` - Write fixture collections to JSON files
//! - `admin hash-password` - Produce an Argon2id hash in PHC format

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "orchard-cli")]
#[command(author, version, about = "Orchard Commerce CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the deterministic fixture collections as JSON files
    Seed {
        /// Output directory for the fixture files
        #[arg(short, long, default_value = "fixtures")]
        out: PathBuf,
    },
    /// Manage admin credentials
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Hash a password with Argon2id for an admin account
    HashPassword {
        /// The password to hash
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

// The hash goes to stdout so it can be piped; it is output, not a log line.
#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Seed { out } => commands::seed::write_fixtures(&out).await?,
        Commands::Admin { action } => match action {
            AdminAction::HashPassword { password } => {
                let hash = commands::admin::hash_password(&password)?;
                println!("{hash}");
            }
        },
    }
    Ok(())
}
