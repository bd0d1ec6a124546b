//! Article scrapers.
//!
//! One submodule per news source. Each scraper follows the same two-phase
//! pattern:
//!
//! 1. **Indexing**: discover article URLs from the source's listing page
//! 2. **Extraction**: fetch each article page and build an
//!    [`ArticleRecord`](crate::models::ArticleRecord)
//!
//! Scrapers take their markup knowledge (selectors, URL prefixes,
//! boilerplate denylist) from a [`SiteProfile`](crate::config::SiteProfile)
//! and reach the network only through the
//! [`PageFetcher`](crate::fetch::PageFetcher) trait, so parsing is testable
//! against canned HTML. Failed fetches are logged and skipped without
//! failing the batch.

pub mod ynet;
