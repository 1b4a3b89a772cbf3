//! market-cli - terminal client for the EV marketplace
//!
//! Browse vehicle and battery listings, manage the wallet and check out
//! against the marketplace REST API.

mod api;
mod app;
mod auth;
mod config;
mod models;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::Config;
use crate::models::{ListingFilter, ListingKind, ProfileUpdate, Registration};

#[derive(Parser)]
#[command(name = "market-cli")]
#[command(about = "Terminal client for the EV marketplace", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the API base URL from config.toml
    #[arg(long, global = true, env = "MARKET_API_URL")]
    api_url: Option<String>,
}

#[derive(Args)]
struct FilterArgs {
    /// Page number, starting at 1
    #[arg(short, long, default_value = "1")]
    page: u32,

    /// Listings per page
    #[arg(short, long, default_value = "20")]
    limit: u32,

    /// Only show this brand
    #[arg(long)]
    brand: Option<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,
}

impl From<FilterArgs> for ListingFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            page: args.page,
            limit: args.limit,
            brand: args.brand,
            min_price: args.min_price,
            max_price: args.max_price,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "MARKET_PASSWORD", hide_env_values = true)]
        password: String,

        /// Log in again even if a valid session exists
        #[arg(short, long)]
        force: bool,

        /// Login location printed by a command that needed a session
        #[arg(long, value_name = "LOCATION")]
        redirect: Option<String>,
    },

    /// Create a new account
    Register {
        #[arg(long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "MARKET_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show current session status
    Status,

    /// Show the logged-in user's profile
    Whoami,

    /// Update profile fields
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Browse vehicle listings
    Vehicles(FilterArgs),

    /// Show one vehicle listing
    Vehicle {
        id: String,
    },

    /// Browse battery listings
    Batteries(FilterArgs),

    /// Show one battery listing
    Battery {
        id: String,
    },

    /// Show wallet balance
    Wallet,

    /// Add funds to the wallet
    Deposit {
        amount: f64,
    },

    /// Buy a listing with the wallet balance
    Checkout {
        /// Listing ID (from `vehicles` or `batteries` output)
        listing_id: String,

        #[arg(short, long, value_enum, default_value = "vehicle")]
        kind: ListingKind,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    let app = App::new(config)?;

    match cli.command {
        Commands::Login {
            email,
            password,
            force,
            redirect,
        } => {
            auth::login(&app, &email, &password, force, redirect.as_deref()).await?;
        }
        Commands::Register {
            name,
            email,
            password,
            phone,
        } => {
            let registration = Registration {
                full_name: name,
                email,
                password,
                phone,
            };
            auth::register(&app, &registration).await?;
        }
        Commands::Logout => {
            tracing::info!("Logging out...");
            auth::logout(&app).await?;
        }
        Commands::Status => {
            auth::status(&app).await?;
        }
        Commands::Whoami => {
            api::user::whoami(&app).await?;
        }
        Commands::Profile {
            name,
            phone,
            address,
        } => {
            let update = ProfileUpdate {
                full_name: name,
                phone,
                address,
            };
            api::user::edit_profile(&app, &update).await?;
        }
        Commands::Vehicles(args) => {
            tracing::info!("Fetching vehicles...");
            api::vehicle::list_vehicles(&app, &args.into()).await?;
        }
        Commands::Vehicle { id } => {
            api::vehicle::show_vehicle(&app, &id).await?;
        }
        Commands::Batteries(args) => {
            tracing::info!("Fetching batteries...");
            api::battery::list_batteries(&app, &args.into()).await?;
        }
        Commands::Battery { id } => {
            api::battery::show_battery(&app, &id).await?;
        }
        Commands::Wallet => {
            api::wallet::show_balance(&app).await?;
        }
        Commands::Deposit { amount } => {
            api::wallet::make_deposit(&app, amount).await?;
        }
        Commands::Checkout { listing_id, kind } => {
            tracing::info!("Checking out {}...", listing_id);
            api::checkout::buy(&app, &listing_id, kind).await?;
        }
    }

    Ok(())
}
