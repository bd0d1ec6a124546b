//! URL submission to the Google Indexing API.
//!
//! Side utility, unrelated to scraping: notifies Google that site URLs were
//! updated so they get recrawled promptly. Authentication is out of scope
//! here; the caller supplies a pre-issued OAuth bearer token (the
//! `GOOGLE_INDEXING_TOKEN` environment variable via the CLI). One blocking
//! request per URL, a fixed pause between requests, no retry.

use crate::utils::truncate_for_log;
use chrono::{DateTime, Local};
use serde_json::json;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument};

/// Publish endpoint of the Indexing API.
pub const INDEXING_ENDPOINT: &str = "https://indexing.googleapis.com/v3/urlNotifications:publish";

/// Pause between consecutive notifications, to stay under the API's rate
/// limits.
const REQUEST_PAUSE: Duration = Duration::from_secs(1);

/// Statistics for one indexing run.
#[derive(Debug)]
pub struct IndexingStats {
    pub total: usize,
    pub indexed: usize,
    pub failed: usize,
    pub started: DateTime<Local>,
    pub finished: Option<DateTime<Local>>,
}

impl IndexingStats {
    fn new(total: usize) -> Self {
        Self {
            total,
            indexed: 0,
            failed: 0,
            started: Local::now(),
            finished: None,
        }
    }

    /// Wall-clock duration of the run, if it finished.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished.map(|finished| finished - self.started)
    }
}

/// The notification body the Indexing API expects.
pub fn notification(url: &str) -> serde_json::Value {
    json!({
        "url": url,
        "type": "URL_UPDATED",
    })
}

/// Parse a URL list file: one URL per line, blank lines and `#` comments
/// skipped.
pub fn read_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Submit every URL in order, pausing between requests. Failures are
/// counted and logged, never retried.
#[instrument(level = "info", skip(client, token, urls), fields(endpoint = %endpoint, total = urls.len()))]
pub async fn submit_urls(
    client: &reqwest::Client,
    endpoint: &str,
    token: &str,
    urls: &[String],
) -> IndexingStats {
    let mut stats = IndexingStats::new(urls.len());

    for (i, url) in urls.iter().enumerate() {
        if i > 0 {
            sleep(REQUEST_PAUSE).await;
        }
        info!(current = i + 1, total = stats.total, %url, "Submitting URL");
        match submit_url(client, endpoint, token, url).await {
            Ok(()) => {
                info!(%url, "URL accepted for indexing");
                stats.indexed += 1;
            }
            Err(e) => {
                error!(%url, error = %e, "Indexing request failed");
                stats.failed += 1;
            }
        }
    }

    stats.finished = Some(Local::now());
    stats
}

async fn submit_url(
    client: &reqwest::Client,
    endpoint: &str,
    token: &str,
    url: &str,
) -> Result<(), Box<dyn Error>> {
    let response = client
        .post(endpoint)
        .bearer_auth(token)
        .json(&notification(url))
        .send()
        .await?;
    let status = response.status();

    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(format!(
            "indexing API returned {status}: {}",
            truncate_for_log(&body, 200)
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_body_shape() {
        let body = notification("https://madua.com.br/noticias/example");
        assert_eq!(
            body,
            json!({
                "url": "https://madua.com.br/noticias/example",
                "type": "URL_UPDATED",
            })
        );
    }

    #[test]
    fn test_read_url_list_skips_blanks_and_comments() {
        let contents = "\n# sitemap dump\nhttps://madua.com.br/a\n\n  https://madua.com.br/b  \n#x\n";
        assert_eq!(
            read_url_list(contents),
            vec![
                "https://madua.com.br/a".to_string(),
                "https://madua.com.br/b".to_string(),
            ]
        );
    }

    #[test]
    fn test_stats_elapsed_requires_finish() {
        let mut stats = IndexingStats::new(3);
        assert!(stats.elapsed().is_none());

        stats.finished = Some(Local::now());
        assert!(stats.elapsed().unwrap() >= chrono::Duration::zero());
    }
}
