//! Ynetnews article scraper.
//!
//! Scrapes articles from [Ynetnews](https://www.ynetnews.com), the English
//! edition of Ynet. Article links are discovered from a category listing
//! page, then each article page is fetched sequentially with a fixed pause
//! between requests.
//!
//! # URL Pattern
//!
//! The listing page links articles with absolute URLs like
//! `https://www.ynetnews.com/article/<id>`; only hrefs carrying the
//! configured prefix are treated as articles.
//!
//! Parsing is split off from fetching: [`discover_links`] and
//! [`parse_article`] are pure functions over an HTML string, and the
//! [`YnetScraper`] methods wire them to a [`PageFetcher`] and an
//! [`ImageStore`].

use crate::config::{Selectors, SiteProfile};
use crate::fetch::PageFetcher;
use crate::filter::ContentFilter;
use crate::images::ImageStore;
use crate::models::{ArticleRecord, ImageRef};
use itertools::Itertools;
use scraper::Html;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Title used when the page carries no headline element.
pub const TITLE_PLACEHOLDER: &str = "Title not found";

/// Description used when the page carries no subtitle element.
pub const SUBTITLE_PLACEHOLDER: &str = "Subtitle not found";

/// The parsed, pre-download view of an article page.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArticle {
    pub title: String,
    pub description: String,
    pub content: String,
    pub main_image_url: Option<String>,
    pub content_image_urls: Vec<String>,
}

/// Scrapes Ynetnews through a [`PageFetcher`].
///
/// Holds only immutable collaborators; every batch is threaded through
/// return values, so calls are independent and repeatable.
pub struct YnetScraper<F> {
    fetcher: F,
    images: ImageStore,
    filter: ContentFilter,
    selectors: Selectors,
    profile: SiteProfile,
}

impl<F: PageFetcher> YnetScraper<F> {
    /// Compile the profile's selectors and build the scraper. Fails only on
    /// an invalid selector in the profile.
    pub fn new(fetcher: F, images: ImageStore, profile: SiteProfile) -> Result<Self, Box<dyn Error>> {
        let selectors = profile.selectors.compile()?;
        let filter = ContentFilter::new(profile.denylist.clone());
        Ok(Self {
            fetcher,
            images,
            filter,
            selectors,
            profile,
        })
    }

    /// Index the category listing page and extract article URLs.
    ///
    /// A fetch failure or unexpected page structure yields an empty list,
    /// never an error; the caller logs and moves on.
    #[instrument(level = "info", skip_all)]
    pub async fn index_articles(&self) -> Vec<String> {
        let listing_url = &self.profile.listing_url;
        match self.fetcher.get_text(listing_url).await {
            Ok(html) => {
                let links = discover_links(&html, &self.selectors, &self.profile.article_prefix);
                info!(count = links.len(), listing = %listing_url, "Indexed article links");
                debug!(urls = ?links, "Article links");
                links
            }
            Err(e) => {
                warn!(listing = %listing_url, error = %e, "Failed to fetch listing page");
                Vec::new()
            }
        }
    }

    /// Fetch one article page and build its record, downloading the main
    /// and inline images along the way.
    ///
    /// Only a failed page fetch is an error here. Missing elements degrade
    /// to placeholders or empty values, and failed image downloads leave
    /// `local_path` unset.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch_article(&self, url: &str) -> Result<ArticleRecord, Box<dyn Error>> {
        let html = self.fetcher.get_text(url).await?;
        let parsed = parse_article(&html, &self.selectors, &self.filter);
        debug!(
            title = %parsed.title,
            bytes = parsed.content.len(),
            inline_images = parsed.content_image_urls.len(),
            "Parsed article"
        );

        let main_image = match parsed.main_image_url {
            Some(src) => {
                let local_path = self.images.download(&src, Some(&parsed.title)).await;
                Some(ImageRef {
                    original_url: src,
                    local_path,
                })
            }
            None => None,
        };

        let mut content_images = Vec::new();
        let inline_caption = format!("{}-content-img", parsed.title);
        for src in parsed.content_image_urls {
            let local_path = self.images.download(&src, Some(&inline_caption)).await;
            content_images.push(ImageRef {
                original_url: src,
                local_path,
            });
        }

        Ok(ArticleRecord {
            url: url.to_string(),
            title: parsed.title,
            description: parsed.description,
            content: parsed.content,
            main_image,
            content_images,
        })
    }

    /// Scrape up to `limit` articles from the listing page, in discovery
    /// order, pausing between consecutive fetches. Failed extractions are
    /// skipped; successes keep their discovery order.
    #[instrument(level = "info", skip(self))]
    pub async fn scrape_articles(&self, limit: usize) -> Vec<ArticleRecord> {
        let links = self.index_articles().await;
        let delay = Duration::from_millis(self.profile.request_delay_ms);

        let mut articles = Vec::new();
        for (i, url) in links.iter().take(limit).enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match self.fetch_article(url).await {
                Ok(article) => {
                    info!(%url, title = %article.title, "Extracted article");
                    articles.push(article);
                }
                Err(e) => {
                    error!(%url, error = %e, "Article fetch failed; skipping");
                }
            }
        }

        info!(
            discovered = links.len(),
            requested = limit,
            extracted = articles.len(),
            "Finished scraping batch"
        );
        articles
    }
}

/// Extract article URLs from listing-page HTML.
///
/// Scans the configured link containers for anchors, keeps hrefs starting
/// with the article prefix, and deduplicates while preserving first-seen
/// order.
pub fn discover_links(html: &str, selectors: &Selectors, article_prefix: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&selectors.link_container)
        .flat_map(|container| container.select(&selectors.anchor))
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.starts_with(article_prefix))
        .map(str::to_string)
        .unique()
        .collect()
}

/// Parse an article page into its pre-download parts.
///
/// Title and subtitle fall back to fixed placeholders. The main image is
/// located by trying each configured strategy in order; the first element
/// with a `src` wins. Body text is assembled from the text-bearing spans of
/// each paragraph container in document order, blank-line separated, then
/// run through the boilerplate filter. Inline images are everything under
/// the content container except the main image.
pub fn parse_article(html: &str, selectors: &Selectors, filter: &ContentFilter) -> ParsedArticle {
    let document = Html::parse_document(html);

    let title = document
        .select(&selectors.title)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let description = document
        .select(&selectors.subtitle)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| SUBTITLE_PLACEHOLDER.to_string());

    let main_image_url = selectors
        .main_image
        .iter()
        .find_map(|strategy| {
            document
                .select(strategy)
                .find_map(|img| img.value().attr("src"))
        })
        .map(str::to_string);

    let mut content = String::new();
    for paragraph in document.select(&selectors.paragraph) {
        for span in paragraph.select(&selectors.paragraph_text) {
            let text = span.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                content.push_str(text);
                content.push_str("\n\n");
            }
        }
    }
    let content = filter.clean(&content);

    let content_image_urls = document
        .select(&selectors.content_container)
        .flat_map(|container| container.select(&selectors.content_image))
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| Some(*src) != main_image_url.as_deref())
        .map(str::to_string)
        .collect();

    ParsedArticle {
        title,
        description,
        content,
        main_image_url,
        content_image_urls,
    }
}
