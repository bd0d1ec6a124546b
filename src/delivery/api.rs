//! REST delivery to the import API.
//!
//! Posts the whole article array in one request and logs the JSON
//! acknowledgement the endpoint returns. No retry: a failed send leaves
//! the archive untouched for the operator to resend.

use crate::models::ArticleRecord;
use crate::utils::truncate_for_log;
use std::error::Error;
use tracing::{error, info, instrument};

/// POST `articles` to `api_url` and return the acknowledgement body.
///
/// Success is a 2xx status with a JSON body. Anything else is an error
/// carrying the status and a preview of the response text.
#[instrument(level = "info", skip(client, articles), fields(%api_url, count = articles.len()))]
pub async fn send_articles(
    client: &reqwest::Client,
    articles: &[ArticleRecord],
    api_url: &str,
) -> Result<serde_json::Value, Box<dyn Error>> {
    info!("Sending article archive to import API");
    let response = client.post(api_url).json(articles).send().await?;
    let status = response.status();

    if status.is_success() {
        let ack: serde_json::Value = response.json().await?;
        info!(ack = %truncate_for_log(&ack.to_string(), 300), "Import API acknowledged");
        Ok(ack)
    } else {
        let body = response.text().await.unwrap_or_default();
        error!(%status, body = %truncate_for_log(&body, 300), "Import API rejected the archive");
        Err(format!("import API returned {status}").into())
    }
}
