//! Data models for scraped articles.
//!
//! This module defines the structures produced by the scraping pipeline:
//! - [`ArticleRecord`]: One fully extracted article page
//! - [`ImageRef`]: A downloaded (or attempted) image reference
//!
//! Records are created once per scraped page and never mutated afterwards.
//! The JSON field names match what the Madua import API and the database
//! import script expect, so renaming a field here is a breaking change for
//! both downstream consumers.

use serde::{Deserialize, Serialize};

/// A reference to an image found in an article.
///
/// `local_path` is the site-relative path the image was saved under
/// (e.g. `/article-images/breaking-news-update.jpg`), or `None` when the
/// download failed or was never attempted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageRef {
    /// The image URL as it appeared in the article markup.
    pub original_url: String,
    /// Site-relative path of the saved file, if the download succeeded.
    pub local_path: Option<String>,
}

/// One extracted article page.
///
/// `content` holds the filtered, whitespace-normalized body text: paragraph
/// texts in document order, blank-line separated, with boilerplate lines
/// removed and runs of three or more line breaks collapsed to two.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// The URL the article was scraped from.
    pub url: String,
    /// Headline text, or a fixed placeholder when the page had none.
    pub title: String,
    /// Subtitle text, or a fixed placeholder when the page had none.
    pub description: String,
    /// Cleaned body text.
    pub content: String,
    /// The representative image for the article, when one was found.
    pub main_image: Option<ImageRef>,
    /// Inline images from the article body, in document order. The main
    /// image is never repeated here.
    pub content_images: Vec<ImageRef>,
}
