//! CLI administration tool for slug-redirector.
//!
//! Runs the resolution pipeline against the configured store without going
//! through HTTP, checks store connectivity, and prints the active
//! configuration.
//!
//! # Usage
//!
//! ```bash
//! # Dry-run a request path as a browser would send it
//! cargo run --bin admin -- resolve /Promo
//!
//! # ... as a crawler, from a given country, with a query string
//! cargo run --bin admin -- resolve /promo --user-agent "facebookexternalhit/1.1" --locale US --query "utm=x"
//!
//! # Check store connection
//! cargo run --bin admin -- check
//!
//! # Show configuration summary
//! cargo run --bin admin -- config
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `slug_redirector::config`.

use slug_redirector::application::services::{Outcome, RedirectService, ResolutionRequest};
use slug_redirector::config::{self, Config};
use slug_redirector::domain::repositories::LinkStore;
use slug_redirector::infrastructure::store::{CachedLinkStore, MemoryLinkStore, RedisLinkStore};
use slug_redirector::domain::entities::Link;
use slug_redirector::web::ResponseComposer;
use slug_redirector::web::templates::PreviewTemplate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

/// CLI tool for inspecting slug-redirector.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show how a request path would be answered
    Resolve {
        /// Request path, e.g. "/promo"
        path: String,

        /// Client User-Agent (defaults to a desktop browser)
        #[arg(short, long)]
        user_agent: Option<String>,

        /// Country code sent in the locale header
        #[arg(short, long)]
        locale: Option<String>,

        /// Query string without the leading '?'
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Check store connection
    Check,

    /// Show configuration summary
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Resolve {
            path,
            user_agent,
            locale,
            query,
        } => {
            let store = open_store(&config).await?;
            resolve(&config, store, &path, user_agent, locale, query).await?
        }
        Commands::Check => {
            let store = open_store(&config).await?;
            check(store).await?
        }
        Commands::Config => show_config(&config),
    }

    Ok(())
}

/// Opens the same store the server would use.
async fn open_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    if let Some(redis_url) = &config.redis_url {
        let store = RedisLinkStore::connect(redis_url)
            .await
            .context("Failed to connect to Redis")?;
        return Ok(Arc::new(CachedLinkStore::new(Arc::new(store))));
    }

    let store = match &config.links_file {
        Some(path) => MemoryLinkStore::from_json_file(path)?,
        None => MemoryLinkStore::new(),
    };
    Ok(Arc::new(store))
}

/// Runs the decision pipeline and prints the outcome.
async fn resolve(
    config: &Config,
    store: Arc<dyn LinkStore>,
    path: &str,
    user_agent: Option<String>,
    locale: Option<String>,
    query: Option<String>,
) -> Result<()> {
    println!("{}", "🔎 Resolve".bright_blue().bold());
    println!();

    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    let user_agent = user_agent.unwrap_or_else(|| BROWSER_USER_AGENT.to_string());

    let service = RedirectService::from_config(config, store);
    let composer = ResponseComposer::from_config(config);

    let request = ResolutionRequest {
        path: &path,
        user_agent: Some(&user_agent),
        locale: locale.as_deref(),
    };

    let outcome = service
        .decide(&request)
        .await
        .context("Store lookup failed")?;

    println!("  Path:    {}", path.cyan());
    println!("  Client:  {}", user_agent.bright_black());
    println!("  Locale:  {}", locale.as_deref().unwrap_or("-").bright_black());
    println!("  Outcome: {}", outcome.label().bright_white().bold());
    println!();

    match outcome {
        Outcome::Home(url) => {
            println!("  {} 302 → {}", "↪".green(), url.bright_yellow());
        }
        Outcome::PassThrough => {
            println!(
                "  {}",
                "No link resolved, request falls through to the router (404)".yellow()
            );
        }
        Outcome::Preview(link) => {
            let preview = preview_for(config, &link);
            println!("  {}", "Crawler preview".green());
            println!("    Slug:        {}", link.slug.cyan());
            println!("    Title:       {}", preview.title);
            println!("    Description: {}", preview.description);
            println!("    Image:       {}", preview.image);
            println!("    URL:         {}", preview.url);
        }
        Outcome::Redirect { link, destination } => {
            let target = composer.target(&destination.url, query.as_deref());
            println!(
                "  {} {:?} {} → {}",
                "↪".green(),
                config.redirect_mode,
                config.redirect_status_code,
                target.bright_yellow()
            );
            println!("    Slug:     {}", link.slug.cyan());
            println!("    Stored:   {}", link.url);
            if destination.diverted {
                println!("    {}", "Diverted by traffic split".yellow());
            }
        }
    }

    println!();
    Ok(())
}

/// Builds the same preview the server renders for `link`.
///
/// There is no request host here, so the canonical URL is the stored destination.
fn preview_for(config: &Config, link: &Link) -> PreviewTemplate {
    PreviewTemplate::for_link(link, link.url.clone(), &config.preview)
}

/// Pings the store backend.
async fn check(store: Arc<dyn LinkStore>) -> Result<()> {
    println!("{}", "🔌 Store Check".bright_blue().bold());
    println!();

    if store.health_check().await {
        println!("{}", "✅ Store reachable".green().bold());
        Ok(())
    } else {
        println!("{}", "❌ Store unreachable".red().bold());
        anyhow::bail!("store health check failed")
    }
}

/// Prints the configuration summary to stdout.
fn show_config(config: &Config) {
    println!("{}", "⚙️  Configuration".bright_blue().bold());
    println!();

    println!("  Listen:              {}", config.listen_addr.cyan());
    println!(
        "  Store:               {}",
        if config.redis_url.is_some() {
            "redis".to_string()
        } else {
            match &config.links_file {
                Some(path) => format!("memory ({})", path.display()),
                None => "memory (empty)".to_string(),
            }
        }
    );
    println!("  Slug pattern:        {}", config.slug_pattern.as_str());
    println!("  Reserved slugs:      {}", config.reserved_slugs.join(", "));
    println!(
        "  Home URL:            {}",
        config.home_url.as_deref().unwrap_or("-")
    );
    println!("  Link cache TTL:      {}s", config.link_cache_ttl_seconds);
    println!("  Case sensitive:      {}", config.case_sensitive);
    println!("  Redirect with query: {}", config.redirect_with_query);
    println!(
        "  Redirect:            {:?} ({})",
        config.redirect_mode, config.redirect_status_code
    );
    println!("  Bot pattern:         {}", config.bot_pattern.as_str().bright_black());
    println!("  Locale header:       {}", config.locale_header);

    match &config.traffic_split {
        Some(split) => println!(
            "  Traffic split:       {} (exempt {}, alternate {})",
            "enabled".yellow().bold(),
            split.exempt_locale(),
            split.alternate_url()
        ),
        None => println!("  Traffic split:       {}", "disabled".green()),
    }

    println!(
        "  Access log:          {:?} (queue {})",
        config.access_log_target, config.access_log_queue_capacity
    );
    println!();
}
