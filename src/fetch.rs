//! Page fetching abstraction.
//!
//! [`PageFetcher`] is the seam between the extraction pipeline and the
//! network: production code uses the `reqwest`-backed [`HttpFetcher`],
//! tests substitute a stub serving canned HTML. A non-success HTTP status
//! is surfaced as an error so callers can treat it the same as a transport
//! failure: log, skip the page, keep going.

use std::error::Error;
use tracing::{debug, instrument};

/// Fetches a page body over some transport.
pub trait PageFetcher {
    /// Fetch `url` and return the response body as text. Non-success
    /// statuses are errors.
    async fn get_text(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// Real HTTP fetcher. One `reqwest::Client` carrying the configured
/// user agent, shared across the run.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Clone of the underlying client, for components that issue their own
    /// requests (image downloads) with the same user agent.
    pub fn client(&self) -> reqwest::Client {
        self.client.clone()
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn get_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_builds_with_custom_user_agent() {
        let fetcher = HttpFetcher::new("Mozilla/5.0 (test)").unwrap();
        // The client is shared with the image store.
        let _ = fetcher.client();
    }
}
