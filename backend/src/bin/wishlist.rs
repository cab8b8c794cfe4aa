//! Operator CLI for the wishlist handler.
//!
//! `migrate` and `check-db` manage the PostgreSQL store; `send` delivers one
//! message through the command interpreter and prints the reply, acting as a
//! local transport.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};

use wishlist_backend::config::WishlistSettings;
use wishlist_backend::domain::ports::{WishlistCommand, WishlistRepository};
use wishlist_backend::domain::{InboundMessage, RequesterId, WishlistCommandService};
use wishlist_backend::outbound::jelly_journal::JellyJournalResolver;
use wishlist_backend::outbound::memory::InMemoryWishlistRepository;
use wishlist_backend::outbound::persistence::{
    DbPool, DieselWishlistRepository, PoolConfig, run_migrations,
};
use wishlist_backend::telemetry::init_tracing;

/// `wishlist` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "wishlist", about = "Operate the wishlist queue handler", version)]
struct CliArgs {
    /// Database connection URL. Falls back to `WISHLIST_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Check database connectivity and report the stored entry count.
    CheckDb,
    /// Deliver one chat message and print the reply.
    Send {
        /// Sender identity as assigned by the chat platform.
        #[arg(long = "user-id", value_name = "id")]
        user_id: String,
        /// Sender display name; defaults to a prefix of the identity.
        #[arg(long = "display-name", value_name = "name")]
        display_name: Option<String>,
        /// Message text, for example `@add BARL2BR, C3CW`.
        text: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let args = CliArgs::parse();
    let settings = WishlistSettings::load_from_iter([OsString::from("wishlist")])
        .map_err(|error| eyre!("failed to load settings: {error}"))?;
    let database_url = resolve_database_url(args.database_url, &settings)?;

    match args.command {
        Command::Migrate => migrate(database_url),
        Command::CheckDb => block_on(check_db(database_url, settings)),
        Command::Send {
            user_id,
            display_name,
            text,
        } => {
            let sender = RequesterId::new(user_id).wrap_err("invalid --user-id")?;
            let message = InboundMessage::new(sender, display_name, text);
            block_on(send(database_url, settings, message))
        }
    }
}

fn block_on<F>(future: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(future)
}

fn resolve_database_url(
    explicit: Option<String>,
    settings: &WishlistSettings,
) -> Result<Option<String>> {
    match explicit {
        Some(value) if value.trim().is_empty() => {
            Err(eyre!("--database-url must not be empty when provided"))
        }
        Some(value) => Ok(Some(value)),
        None => Ok(settings.database_url().map(str::to_owned)),
    }
}

fn require_database_url(database_url: Option<String>) -> Result<String> {
    database_url.ok_or_else(|| eyre!("database URL missing: set --database-url or WISHLIST_DATABASE_URL"))
}

fn migrate(database_url: Option<String>) -> Result<()> {
    let database_url = require_database_url(database_url)?;
    let applied = run_migrations(&database_url)?;
    if applied.is_empty() {
        println!("schema up to date");
    }
    for version in applied {
        println!("applied {version}");
    }
    Ok(())
}

async fn connect(database_url: &str, settings: &WishlistSettings) -> Result<DbPool> {
    let config = PoolConfig::from_settings(database_url, settings);
    DbPool::new(config)
        .await
        .wrap_err("create database pool")
}

async fn check_db(database_url: Option<String>, settings: WishlistSettings) -> Result<()> {
    let database_url = require_database_url(database_url)?;
    let pool = connect(&database_url, &settings).await?;
    let stats = DieselWishlistRepository::new(pool)
        .stats()
        .await
        .wrap_err("query wishlist store")?;
    println!("server_time={}", stats.server_time.to_rfc3339());
    println!("entry_count={}", stats.entry_count);
    Ok(())
}

async fn send(
    database_url: Option<String>,
    settings: WishlistSettings,
    message: InboundMessage,
) -> Result<()> {
    if let Some(database_url) = database_url {
        let pool = connect(&database_url, &settings).await?;
        let repository = Arc::new(DieselWishlistRepository::new(pool));
        return deliver(repository, &settings, &message).await;
    }

    warn!("no database configured; using an in-memory store that is discarded on exit");
    deliver(Arc::new(InMemoryWishlistRepository::new()), &settings, &message).await
}

async fn deliver<R>(
    repository: Arc<R>,
    settings: &WishlistSettings,
    message: &InboundMessage,
) -> Result<()>
where
    R: WishlistRepository,
{
    let base = settings
        .resolver_base_url()
        .wrap_err("invalid resolver base URL")?;
    let resolver = JellyJournalResolver::new(base, settings.resolver_timeout())
        .wrap_err("create item resolver")?;
    let service = WishlistCommandService::new(repository, Arc::new(resolver), settings.admin());

    match service.handle(message).await? {
        Some(reply) => println!("{reply}"),
        None => info!("message was not a command; no reply sent"),
    }
    Ok(())
}
