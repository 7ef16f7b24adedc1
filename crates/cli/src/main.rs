//! fruitvendor CLI - Database management tools.
//!
//! # Usage
//!
//! ```bash
//! # Insert 10 random products and 10 random users
//! fv-cli seed --db ./fruitvendor.redb
//!
//! # Insert 500 of each
//! fv-cli seed --db ./fruitvendor.redb --count 500
//! ```
//!
//! # Commands
//!
//! - `seed` - Fill a database with random test data

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fv-cli")]
#[command(version, about = "fruitvendor CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a database with random products and users
    Seed {
        /// Path of the redb database file (created if missing)
        #[arg(short, long)]
        db: PathBuf,

        /// Number of product/user pairs to generate
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { db, count } => {
            commands::seed::run(&db, count)?;
        }
    }

    Ok(())
}
