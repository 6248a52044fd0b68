// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `brewbox` - command-line client for the BrewBox coffee ordering service.
//!
//! # Usage
//!
//! ```bash
//! brewbox login --email bea@example.com --password secret1
//! brewbox create --pickup-time 2026-10-15T09:30 --drink Latte:Medium:4.50 --tip-percent 15
//! brewbox orders
//! brewbox claim 42
//! brewbox watch
//! ```

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod config;
mod output;

use brewbox_api::{DrinkInput, MfaProvider, OrderScope};
use brewbox_domain::{OrderStatus, Role};
use clap::{Parser, Subcommand};
use config::GlobalArgs;
use tracing::error;

/// BrewBox - order coffee and work the barista queue from the terminal
#[derive(Parser, Debug)]
#[command(name = "brewbox", author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BREWBOX_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// `Customer` or `Barista`
        #[arg(long, default_value = "Customer")]
        role: String,
        #[arg(long)]
        display_name: Option<String>,
    },
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BREWBOX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Complete a login with a second factor
    Mfa {
        /// `google` or `apple`
        provider: MfaProvider,
        #[arg(long)]
        token: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored and its roles
    Whoami,
    /// List orders
    Orders {
        /// `all`, `active`, `customer`, `barista` or `current`.
        /// Defaults to `current` for baristas and `active` otherwise.
        #[arg(long)]
        scope: Option<OrderScope>,
    },
    /// Show one order
    Show { id: String },
    /// Place an order
    Create {
        /// Pickup time, e.g. `2026-10-15T09:30Z` or `2026-10-15T11:30+02:00`.
        /// A time without an offset is read as UTC, not local time.
        #[arg(long)]
        pickup_time: String,
        /// A drink as `TYPE:SIZE:PRICE`; repeat for more drinks
        #[arg(long = "drink", value_parser = parse_drink, required = true)]
        drinks: Vec<DrinkInput>,
        /// Tip amount
        #[arg(long, conflicts_with = "tip_percent")]
        tip: Option<String>,
        /// Tip as a percentage of the drink total
        #[arg(long)]
        tip_percent: Option<String>,
    },
    /// Claim a placed order (barista)
    Claim { id: String },
    /// Start preparing a claimed order (barista)
    Start { id: String },
    /// Mark an order ready for pickup (barista)
    Ready { id: String },
    /// Cancel an order (barista)
    Cancel { id: String },
    /// Collect a ready order (customer)
    Collect { id: String },
    /// Set an order's status directly
    Status {
        id: String,
        status: OrderStatus,
        /// The role to act as
        #[arg(long = "as")]
        role: Role,
    },
    /// Mark an order paid (barista)
    Pay { id: String },
    /// Poll for order changes until interrupted
    Watch {
        /// Seconds between polls; overrides `--poll-interval-secs`
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: Option<u64>,
    },
}

/// Parses `TYPE:SIZE:PRICE`.
fn parse_drink(raw: &str) -> Result<DrinkInput, String> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    match parts.as_slice() {
        [drink_type, size, price] => Ok(DrinkInput::new(drink_type, size, price)),
        _ => Err(format!("expected TYPE:SIZE:PRICE, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli: Cli = Cli::parse();

    let filter = match config::log_filter(cli.global.log_level.as_deref()) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = commands::run(&cli.global, cli.command).await {
        error!(error = %e, "Command failed");
        if e.is_unauthorized() {
            eprintln!("{e}\nRun `brewbox login` to start a new session.");
        } else {
            eprintln!("{e}");
        }
        std::process::exit(1);
    }
}
