//! Site profile configuration.
//!
//! Everything that ties the pipeline to a particular site's markup lives
//! here: the listing and article URLs, the user agent, the CSS selector set,
//! the boilerplate denylist, and the inter-request delay. The built-in
//! defaults target Ynetnews; a YAML profile file can override any subset of
//! fields, so pointing the same pipeline at another source is a
//! configuration change, not a code change.
//!
//! # Example profile
//!
//! ```yaml
//! listing_url: "https://www.ynetnews.com/category/3082"
//! request_delay_ms: 2000
//! selectors:
//!   title: "h1.mainTitle"
//! ```

use once_cell::sync::Lazy;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Boilerplate fragments Ynetnews injects into article bodies.
///
/// Membership is a case-sensitive substring test against each line of body
/// text. Best-effort cleanup only.
static DEFAULT_DENYLIST: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Ynetnews",
        "Google Play",
        "Apple App Store",
        "Facebook",
        "Twitter",
        "Instagram",
        "Telegram",
        "https://bit.ly/",
        "Follow Ynetnews",
        "Get the Ynetnews app",
        "smartphone",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

/// Scraping profile for one news site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Site root, used to resolve relative links.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// The category/listing page that enumerates article links.
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Only hrefs starting with this prefix count as article links.
    #[serde(default = "default_article_prefix")]
    pub article_prefix: String,

    /// User-Agent header sent on every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause between consecutive article fetches, in milliseconds.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// CSS selector set for the site's markup.
    #[serde(default)]
    pub selectors: SelectorProfile,

    /// Lines of body text containing any of these substrings are dropped.
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,
}

/// Raw CSS selector strings locating the parts of a page we care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorProfile {
    /// Containers on the listing page whose anchors are article candidates.
    #[serde(default = "default_link_container")]
    pub link_container: String,

    /// Anchor elements inside a link container.
    #[serde(default = "default_anchor")]
    pub anchor: String,

    /// The article headline element.
    #[serde(default = "default_title")]
    pub title: String,

    /// The article subtitle element.
    #[serde(default = "default_subtitle")]
    pub subtitle: String,

    /// Paragraph containers holding body text.
    #[serde(default = "default_paragraph")]
    pub paragraph: String,

    /// Text-bearing spans inside a paragraph container.
    #[serde(default = "default_paragraph_text")]
    pub paragraph_text: String,

    /// Ordered main-image strategies; the first selector that matches an
    /// element with a `src` wins.
    #[serde(default = "default_main_image")]
    pub main_image: Vec<String>,

    /// The container holding the article body and its inline images.
    #[serde(default = "default_content_container")]
    pub content_container: String,

    /// Image elements inside the content container.
    #[serde(default = "default_content_image")]
    pub content_image: String,
}

/// The selector set compiled once per run.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub link_container: Selector,
    pub anchor: Selector,
    pub title: Selector,
    pub subtitle: Selector,
    pub paragraph: Selector,
    pub paragraph_text: Selector,
    pub main_image: Vec<Selector>,
    pub content_container: Selector,
    pub content_image: Selector,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            listing_url: default_listing_url(),
            article_prefix: default_article_prefix(),
            user_agent: default_user_agent(),
            request_delay_ms: default_request_delay_ms(),
            selectors: SelectorProfile::default(),
            denylist: default_denylist(),
        }
    }
}

impl Default for SelectorProfile {
    fn default() -> Self {
        Self {
            link_container: default_link_container(),
            anchor: default_anchor(),
            title: default_title(),
            subtitle: default_subtitle(),
            paragraph: default_paragraph(),
            paragraph_text: default_paragraph_text(),
            main_image: default_main_image(),
            content_container: default_content_container(),
            content_image: default_content_image(),
        }
    }
}

impl SiteProfile {
    /// Load a profile from a YAML file. Fields absent from the file keep
    /// their Ynetnews defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let profile: Self = serde_yaml::from_str(&contents)?;
        info!(listing_url = %profile.listing_url, "Loaded site profile");
        Ok(profile)
    }
}

impl SelectorProfile {
    /// Compile every selector string. Fails fast on the first invalid
    /// selector so a broken profile file is caught before any fetch.
    pub fn compile(&self) -> Result<Selectors, Box<dyn Error>> {
        Ok(Selectors {
            link_container: compile_selector(&self.link_container)?,
            anchor: compile_selector(&self.anchor)?,
            title: compile_selector(&self.title)?,
            subtitle: compile_selector(&self.subtitle)?,
            paragraph: compile_selector(&self.paragraph)?,
            paragraph_text: compile_selector(&self.paragraph_text)?,
            main_image: self
                .main_image
                .iter()
                .map(|raw| compile_selector(raw))
                .collect::<Result<Vec<_>, _>>()?,
            content_container: compile_selector(&self.content_container)?,
            content_image: compile_selector(&self.content_image)?,
        })
    }
}

fn compile_selector(raw: &str) -> Result<Selector, Box<dyn Error>> {
    Selector::parse(raw).map_err(|e| format!("invalid CSS selector {raw:?}: {e}").into())
}

fn default_base_url() -> String {
    "https://www.ynetnews.com".to_string()
}

fn default_listing_url() -> String {
    "https://www.ynetnews.com/category/3082".to_string()
}

fn default_article_prefix() -> String {
    "https://www.ynetnews.com/article/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_denylist() -> Vec<String> {
    DEFAULT_DENYLIST.clone()
}

fn default_link_container() -> String {
    "div.slotView".to_string()
}

fn default_anchor() -> String {
    "a[href]".to_string()
}

fn default_title() -> String {
    "h1.mainTitle".to_string()
}

fn default_subtitle() -> String {
    "span.subTitle".to_string()
}

fn default_paragraph() -> String {
    "div.text_editor_paragraph".to_string()
}

fn default_paragraph_text() -> String {
    r#"span[data-text="true"]"#.to_string()
}

fn default_main_image() -> Vec<String> {
    vec![
        r#"img[id^="ReduxEditableImage_ArticleImageData"]"#.to_string(),
        "div.mainMedia img".to_string(),
    ]
}

fn default_content_container() -> String {
    "div.mainContent".to_string()
}

fn default_content_image() -> String {
    "img[src]".to_string()
}
