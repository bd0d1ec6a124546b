//! Database delivery through the `psql` CLI.
//!
//! Rather than linking a database driver, this path renders a SQL script
//! with one INSERT per record and hands it to the database client CLI.
//! `psql` executes statements one by one and keeps going after a failed
//! INSERT (we deliberately do not set `ON_ERROR_STOP`), so one bad record
//! never sinks the batch. The run fails only when the CLI itself cannot be
//! executed or exits non-zero.

use crate::models::ArticleRecord;
use rand::{rng, Rng};
use std::error::Error;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{info, instrument, warn};

/// Render the import script: one INSERT into `scraped_articles` per record.
///
/// New rows land as `PENDING` so the site's processing queue picks them up,
/// tagged with the fixed `YNET_NEWS` source.
pub fn render_sql_script(articles: &[ArticleRecord]) -> String {
    let mut script = String::from("-- Generated by madua_scraper; one INSERT per scraped article.\n");
    for article in articles {
        script.push_str(&format!(
            "INSERT INTO scraped_articles (source_url, title, description, content, status, source)\n\
             VALUES ({}, {}, {}, {}, 'PENDING', 'YNET_NEWS');\n",
            sql_literal(&article.url),
            sql_literal(&article.title),
            sql_literal(&article.description),
            sql_literal(&article.content),
        ));
    }
    script
}

/// Write the script to a temp file and run it through the database CLI.
// database_url stays out of the span; connection strings can carry credentials.
#[instrument(level = "info", skip(articles, database_url), fields(count = articles.len(), %psql_cmd))]
pub async fn import_articles(
    articles: &[ArticleRecord],
    psql_cmd: &str,
    database_url: &str,
) -> Result<(), Box<dyn Error>> {
    let script = render_sql_script(articles);
    let script_path = temp_script_path();
    tokio::fs::write(&script_path, &script).await?;
    info!(path = %script_path.display(), "Wrote import script");

    let output = Command::new(psql_cmd)
        .arg(database_url)
        .arg("-f")
        .arg(&script_path)
        .output()
        .await;
    let _ = tokio::fs::remove_file(&script_path).await;
    let output = output?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let failed_records = stderr.lines().filter(|line| line.contains("ERROR")).count();
    for line in stderr.lines().filter(|line| line.contains("ERROR")) {
        warn!(detail = %line, "Record insert failed");
    }

    if output.status.success() {
        info!(
            total = articles.len(),
            inserted = articles.len() - failed_records.min(articles.len()),
            failed = failed_records,
            "Database import finished"
        );
        Ok(())
    } else {
        Err(format!(
            "database import failed ({}): {}",
            output.status,
            stderr.trim()
        )
        .into())
    }
}

/// Single-quoted SQL string literal with embedded quotes doubled.
fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn temp_script_path() -> PathBuf {
    std::env::temp_dir().join(format!("madua-import-{:08x}.sql", rng().random::<u32>()))
}
