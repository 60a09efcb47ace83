//! CLI administration tool for linknest.
//!
//! Works directly on the JSON data file; the server does not need to run.
//!
//! # Usage
//!
//! ```bash
//! # List every short link
//! cargo run --bin admin -- links list
//!
//! # Inspect one link (does not count a click)
//! cargo run --bin admin -- links show aB3xZ
//!
//! # List accounts
//! cargo run --bin admin -- users list
//!
//! # Create an account
//! cargo run --bin admin -- users create --username alice
//!
//! # Check the data file
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! - `DATA_FILE` (default: `db.json`): path of the JSON data file

use linknest::application::services::{AccountService, LinkService};
use linknest::domain::access_gate::CycleGate;
use linknest::domain::entities::Snapshot;
use linknest::domain::repositories::SnapshotStore;
use linknest::error::AppError;
use linknest::infrastructure::persistence::JsonFileStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing linknest.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the JSON data file
    #[arg(long, env = "DATA_FILE", default_value = "db.json", global = true)]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Data file operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List all links
    List,

    /// Show one link in detail
    Show {
        /// Short slug (case-sensitive)
        slug: String,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List all accounts
    List,

    /// Create an account
    Create {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Load the data file and report counts and duplicate URLs
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let store: Arc<dyn SnapshotStore> = Arc::new(
        JsonFileStore::open(&cli.data_file, false)
            .await
            .with_context(|| format!("Failed to open {}", cli.data_file.display()))?,
    );

    match cli.command {
        Commands::Links { action } => handle_links_action(action, store).await?,
        Commands::Users { action } => handle_users_action(action, store).await?,
        Commands::Store { action } => match action {
            StoreAction::Check => check_store(store, &cli.data_file).await?,
        },
    }

    Ok(())
}

async fn handle_links_action(action: LinksAction, store: Arc<dyn SnapshotStore>) -> Result<()> {
    match action {
        LinksAction::List => list_links(store).await,
        LinksAction::Show { slug } => {
            let service = LinkService::new(store, CycleGate::default());
            show_link(&service, &slug).await
        }
    }
}

async fn handle_users_action(action: UsersAction, store: Arc<dyn SnapshotStore>) -> Result<()> {
    match action {
        UsersAction::List => list_users(store).await,
        UsersAction::Create { username } => {
            let service = AccountService::new(store, CycleGate::default());
            create_user(&service, username).await
        }
    }
}

/// Lists every link, newest first.
///
/// # Output Format
///
/// ```text
/// 🔗 Short Links
///
///   Slug    Clicks   Created            Target
///   ───────────────────────────────────────────────────────────────
///   aB3xZ   12       2024-01-15 10:30   http://example.com
/// ```
async fn list_links(store: Arc<dyn SnapshotStore>) -> Result<()> {
    println!("{}", "🔗 Short Links".bright_blue().bold());
    println!();

    let mut links = store.load().await?.links_table;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    links.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    println!(
        "  {:<14} {:<8} {:<18} {}",
        "Slug".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<14} {:<8} {:<18} {}",
            link.short_slug.cyan(),
            link.click_count,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_link(service: &LinkService<dyn SnapshotStore>, slug: &str) -> Result<()> {
    let link = match service.get_link(slug).await {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) => anyhow::bail!("No link with slug '{slug}'"),
        Err(e) => return Err(e.into()),
    };

    println!("{}", "🔗 Short Link".bright_blue().bold());
    println!();
    println!("  Slug:       {}", link.short_slug.cyan());
    println!("  Target:     {}", link.original_url);
    println!("  Clicks:     {}", link.click_count.to_string().bright_white().bold());
    println!("  Created:    {}", link.created_at.to_rfc3339());
    println!(
        "  Created by: {}",
        link.created_by.as_deref().unwrap_or("(anonymous)")
    );
    println!("  Id:         {}", link.id.bright_black());
    println!();

    Ok(())
}

/// Lists usernames and creation dates. Password hashes are never printed.
async fn list_users(store: Arc<dyn SnapshotStore>) -> Result<()> {
    println!("{}", "👤 Users".bright_blue().bold());
    println!();

    let users = store.load().await?.users_table;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin users create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<24} {:<24} {}",
        "Id".bright_white().bold(),
        "Username".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for user in &users {
        println!(
            "  {:<24} {:<24} {}",
            user.id.bright_black(),
            user.username.cyan(),
            user.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates an account, prompting for the password twice.
async fn create_user(
    service: &AccountService<dyn SnapshotStore>,
    username: Option<String>,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    if username.trim().is_empty() {
        anyhow::bail!("Username must not be empty");
    }

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let account = match service.register_account(&username, &password).await {
        Ok(account) => account,
        Err(AppError::UsernameTaken { username }) => {
            anyhow::bail!("Username '{username}' is already taken")
        }
        Err(e) => return Err(e.into()),
    };

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  Username: {}", account.username.cyan());
    println!("  Id:       {}", account.id.bright_black());
    println!();

    Ok(())
}

/// Loads the data file and reports what unsynchronized writers may have left
/// behind: several records for one URL, or one slug used twice.
async fn check_store(store: Arc<dyn SnapshotStore>, path: &std::path::Path) -> Result<()> {
    println!("{}", "🔍 Checking data file...".bright_blue().bold());

    let snapshot = store.load().await.context("Data file could not be loaded")?;

    println!("{}", "✅ Data file is readable".green());
    println!();
    println!("  Path:  {}", path.display().to_string().cyan());
    println!(
        "  Users: {}",
        snapshot.users_table.len().to_string().bright_white().bold()
    );
    println!(
        "  Links: {}",
        snapshot.links_table.len().to_string().bright_white().bold()
    );
    println!(
        "  Clicks: {}",
        snapshot
            .links_table
            .iter()
            .map(|l| l.click_count)
            .sum::<u64>()
            .to_string()
            .bright_white()
            .bold()
    );
    println!();

    let report = duplicates(&snapshot);

    if report.urls.is_empty() && report.slugs.is_empty() {
        println!("{}", "✅ No duplicate URLs or slugs".green());
        return Ok(());
    }

    for (url, slugs) in &report.urls {
        println!(
            "{} {} -> {}",
            "⚠️  Duplicate URL:".yellow(),
            url,
            slugs.join(", ").cyan()
        );
    }

    for slug in &report.slugs {
        println!("{} {}", "❌ Duplicate slug:".red(), slug.cyan());
    }

    println!();

    Ok(())
}

struct DuplicateReport {
    /// URL with the slugs of every record that carries it.
    urls: Vec<(String, Vec<String>)>,
    slugs: Vec<String>,
}

fn duplicates(snapshot: &Snapshot) -> DuplicateReport {
    let mut by_url: HashMap<&str, Vec<String>> = HashMap::new();
    let mut slug_counts: HashMap<&str, usize> = HashMap::new();

    for link in &snapshot.links_table {
        by_url
            .entry(link.original_url.as_str())
            .or_default()
            .push(link.short_slug.clone());
        *slug_counts.entry(link.short_slug.as_str()).or_default() += 1;
    }

    let mut urls: Vec<(String, Vec<String>)> = by_url
        .into_iter()
        .filter(|(_, slugs)| slugs.len() > 1)
        .map(|(url, slugs)| (url.to_string(), slugs))
        .collect();
    urls.sort();

    let mut slugs: Vec<String> = slug_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slug, _)| slug.to_string())
        .collect();
    slugs.sort();

    DuplicateReport { urls, slugs }
}
