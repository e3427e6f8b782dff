//! CLI client for fetching product cards through the proxy.
//!
//! Accepts a bare slug or a catalog URL, resolves it to a slug and fetches the
//! product with query-shape fallback and retries.
//!
//! # Usage
//!
//! ```bash
//! # Fetch by slug, bypassing the proxy cache
//! cargo run --bin fetch -- voltops-llm-observability-platform
//!
//! # Fetch by URL, allowing a cached response
//! cargo run --bin fetch -- --use-cache https://www.producthunt.com/posts/some-product
//!
//! # Prompt for the product interactively
//! cargo run --bin fetch
//! ```
//!
//! # Environment Variables
//!
//! - `PROXY_URL`: proxy endpoint (default: `http://localhost:3000`)
//! - `RUST_LOG`: log level for attempt and retry diagnostics (default: `warn`)

use product_card_proxy::client::{HttpProxyTransport, ProductFetcher};
use product_card_proxy::domain::entities::ProductRecord;
use product_card_proxy::utils::slug::{DEFAULT_IDENTIFIER, normalize_identifier};

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dialoguer::Input;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Fetch a product card through the caching proxy.
#[derive(Parser)]
#[command(name = "fetch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product slug or catalog URL; prompted for when omitted
    identifier: Option<String>,

    /// Proxy endpoint
    #[arg(long, env = "PROXY_URL", default_value = "http://localhost:3000")]
    proxy_url: String,

    /// Allow the proxy to answer from its cache
    #[arg(long)]
    use_cache: bool,

    /// Print the record as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let input = match cli.identifier {
        Some(identifier) => identifier,
        None => Input::new()
            .with_prompt("Product slug or URL")
            .default(DEFAULT_IDENTIFIER.to_string())
            .allow_empty(true)
            .interact_text()?,
    };

    let slug = normalize_identifier(&input);
    let transport =
        HttpProxyTransport::new(cli.proxy_url.clone()).context("Failed to build HTTP client")?;
    let fetcher = ProductFetcher::new(Arc::new(transport));

    if !cli.json {
        println!(
            "{} {} via {}",
            "🔎 Fetching".bright_blue().bold(),
            slug.cyan(),
            cli.proxy_url
        );
    }

    let record = fetcher
        .fetch_product_data(&slug, !cli.use_cache)
        .await
        .with_context(|| format!("Could not fetch product '{slug}'"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }

    Ok(())
}

fn print_record(record: &ProductRecord) {
    println!();
    println!("{}", record.name.bright_white().bold());
    if !record.tagline.is_empty() {
        println!("  {}", record.tagline.italic());
    }
    println!();
    println!("  ID:       {}", record.id);
    println!("  Votes:    {}", record.votes_count.to_string().green());
    println!("  Comments: {}", record.comments_count.to_string().green());
    if !record.url.is_empty() {
        println!("  URL:      {}", record.url.bright_cyan());
    }
    if !record.logo_url.is_empty() {
        println!("  Logo:     {}", record.logo_url);
    }

    if !record.media.is_empty() {
        println!();
        println!("{}", "Media:".bright_white());
        for url in &record.media {
            println!("  - {}", url);
        }
    }

    if !record.description.is_empty() {
        println!();
        println!("{}", record.description);
    }
}
