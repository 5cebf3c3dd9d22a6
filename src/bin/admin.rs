//! CLI administration tool for short.
//!
//! Works directly against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- url add http://www.amazon.com
//!
//! # Inspect an identifier without counting a visit
//! cargo run --bin admin -- url show 1
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection and apply migrations
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `PUBLIC_HOST`, `PUBLIC_PORT`, `LISTEN` (optional): used to print short
//!   URLs, with the same defaults as the server

use short::application::services::{RegistryService, Resolution};
use short::config::{Config, mask_connection_string};
use short::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage registered URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// URL subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Register a URL, or show the existing registration
    Add {
        /// URL to register (prompted for when omitted)
        url: Option<String>,
    },

    /// Look up an identifier without recording a visit
    Show {
        /// Base-36 identifier, e.g. `1` or `a3`
        identifier: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and apply pending migrations
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Url { action } => handle_url_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn registry(pool: &PgPool) -> Result<RegistryService<PgUrlRepository>> {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    Ok(RegistryService::new(repository, Config::load_serving_address()?))
}

/// Dispatches URL commands.
async fn handle_url_action(action: UrlAction, pool: &PgPool) -> Result<()> {
    let registry = registry(pool)?;

    match action {
        UrlAction::Add { url } => add_url(&registry, url).await,
        UrlAction::Show { identifier } => show_url(&registry, &identifier).await,
    }
}

/// Registers a URL and prints its short form.
async fn add_url(registry: &RegistryService<PgUrlRepository>, url: Option<String>) -> Result<()> {
    println!("{}", "Register URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let record = registry
        .register(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register URL: {}", e))?;

    println!("{}", "Registered".green().bold());
    println!();
    println!("  Original:   {}", record.original.cyan());
    println!("  Identifier: {}", record.identifier().bright_yellow().bold());
    println!("  Short URL:  {}", registry.shortened_url(&record).bright_white());
    println!("  Views:      {}", record.view_count.to_string().bright_white());
    println!();

    Ok(())
}

/// Prints the record behind an identifier.
async fn show_url(registry: &RegistryService<PgUrlRepository>, identifier: &str) -> Result<()> {
    let resolution = registry
        .lookup(identifier)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Resolution::Found(record) = resolution else {
        println!("{} {}", "No URL for identifier".red(), identifier.bright_white());
        return Ok(());
    };

    println!("{}", "URL".bright_blue().bold());
    println!();
    println!("  Key:        {}", record.key.to_string().bright_black());
    println!("  Original:   {}", record.original.cyan());
    println!("  Short URL:  {}", registry.shortened_url(&record).bright_white());
    println!("  Views:      {}", record.view_count.to_string().bright_white().bold());
    println!(
        "  Created:    {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    println!(
        "  Last visit: {}",
        record.updated_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Displays record and visit totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    let registry = registry(pool)?;

    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let urls = registry
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
    let views = registry
        .total_views()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("  URLs:   {}", urls.to_string().bright_white().bold());
    println!("  Views:  {}", views.to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await
                .context("Database query failed")?;

            println!("{}", "Database connection OK".green().bold());
            println!("  {}", version.bright_black());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "Migrations up to date".green());
        }
    }

    Ok(())
}
