//! # Madua Scraper
//!
//! A scraping pipeline that pulls news articles from Ynetnews, downloads
//! their images, archives everything as JSON, and forwards the archive to
//! the Madua site's import API or straight into its database.
//!
//! ## Features
//!
//! - Discovers article links from a category listing page and extracts
//!   title, subtitle, body text, and images from each article
//! - Strips known boilerplate lines (app plugs, social-network mentions)
//!   from article bodies
//! - Saves images under caption-derived filenames with collision handling
//! - Persists results as a pretty-printed UTF-8 JSON archive
//! - Delivers archives over REST or through a generated SQL script
//! - Submits published URLs to the Google Indexing API
//!
//! ## Usage
//!
//! ```sh
//! madua_scraper scrape --limit 10
//! madua_scraper send -f ynetnews_articles.json
//! ```
//!
//! ## Architecture
//!
//! Each subcommand is one stage of the pipeline:
//! 1. **scrape**: Index the listing page, fetch each article sequentially
//!    (rate-limited), write the JSON archive
//! 2. **send** / **import**: Deliver an archive downstream
//! 3. **index**: Notify the Google Indexing API about published URLs

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod delivery;
mod fetch;
mod filter;
mod images;
mod indexing;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::{Cli, Command};
use config::SiteProfile;
use fetch::HttpFetcher;
use images::ImageStore;
use scrapers::ynet::YnetScraper;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("madua_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Scrape {
            limit,
            output,
            image_dir,
            config,
        } => run_scrape(limit, &output, &image_dir, config.as_deref()).await?,
        Command::Send { file, api_url } => run_send(&file, &api_url).await?,
        Command::Import {
            file,
            database_url,
            psql,
        } => run_import(&file, &psql, &database_url).await?,
        Command::Index { urls_file, token } => run_index(&urls_file, &token).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Scrape up to `limit` articles and write the JSON archive.
async fn run_scrape(
    limit: usize,
    output: &str,
    image_dir: &str,
    config_path: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let profile = match config_path {
        Some(path) => SiteProfile::load(path)?,
        None => SiteProfile::default(),
    };

    // Early check: a bad image directory should fail before any fetch.
    if let Err(e) = ensure_writable_dir(image_dir).await {
        error!(
            path = %image_dir,
            error = %e,
            "Image directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = HttpFetcher::new(&profile.user_agent)?;
    let images = ImageStore::new(image_dir, "/article-images", fetcher.client());
    let scraper = YnetScraper::new(fetcher, images, profile)?;

    let articles = scraper.scrape_articles(limit).await;
    if articles.is_empty() {
        warn!("No articles extracted; writing an empty archive");
    }

    outputs::json::write_articles(&articles, output).await?;

    info!(count = articles.len(), path = %output, "Scrape finished");
    for (i, article) in articles.iter().enumerate() {
        info!(n = i + 1, title = %article.title, "Archived article");
    }
    Ok(())
}

/// Forward a JSON archive to the import API.
async fn run_send(file: &str, api_url: &str) -> Result<(), Box<dyn Error>> {
    let articles = outputs::json::read_articles(file).await?;
    if articles.is_empty() {
        warn!(path = %file, "Archive holds no articles; nothing to send");
        return Ok(());
    }

    let client = reqwest::Client::new();
    delivery::api::send_articles(&client, &articles, api_url).await?;
    info!(count = articles.len(), "Delivery complete");
    Ok(())
}

/// Insert a JSON archive into the database through the psql CLI.
async fn run_import(file: &str, psql_cmd: &str, database_url: &str) -> Result<(), Box<dyn Error>> {
    let articles = outputs::json::read_articles(file).await?;
    if articles.is_empty() {
        warn!(path = %file, "Archive holds no articles; nothing to import");
        return Ok(());
    }

    delivery::db::import_articles(&articles, psql_cmd, database_url).await
}

/// Submit a URL list to the Google Indexing API.
async fn run_index(urls_file: &str, token: &str) -> Result<(), Box<dyn Error>> {
    let contents = tokio::fs::read_to_string(urls_file).await?;
    let urls = indexing::read_url_list(&contents);
    if urls.is_empty() {
        warn!(path = %urls_file, "URL list is empty; nothing to submit");
        return Ok(());
    }

    let client = reqwest::Client::new();
    let stats = indexing::submit_urls(&client, indexing::INDEXING_ENDPOINT, token, &urls).await;

    info!(
        total = stats.total,
        indexed = stats.indexed,
        failed = stats.failed,
        elapsed_secs = stats.elapsed().map(|d| d.num_seconds()).unwrap_or(0),
        "Indexing run finished"
    );
    Ok(())
}
