//! JSON archive of scraped articles.
//!
//! The scrape subcommand persists its results as a single JSON array,
//! pretty-printed UTF-8 with non-ASCII characters left unescaped, so the
//! file is directly readable and diffable. The `send` and `import`
//! subcommands read the same file back.

use crate::models::ArticleRecord;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write the article array to `path`, creating parent directories as
/// needed.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn write_articles<P: AsRef<Path>>(
    articles: &[ArticleRecord],
    path: P,
) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(articles)?;
    fs::write(path, json).await?;
    info!(count = articles.len(), "Wrote article archive");
    Ok(())
}

/// Read an article array previously written by [`write_articles`].
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn read_articles<P: AsRef<Path>>(path: P) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
    let contents = fs::read_to_string(path.as_ref()).await?;
    let articles: Vec<ArticleRecord> = serde_json::from_str(&contents)?;
    info!(count = articles.len(), "Read article archive");
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ArticleRecord> {
        vec![ArticleRecord {
            url: "https://www.ynetnews.com/article/hq1".to_string(),
            title: "Negociações em Jerusalém".to_string(),
            description: "Descrição".to_string(),
            content: "Corpo do artigo.".to_string(),
            main_image: None,
            content_images: vec![],
        }]
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let path = std::env::temp_dir().join("madua-json-test/round_trip.json");
        let articles = sample();

        write_articles(&articles, &path).await.unwrap();
        let back = read_articles(&path).await.unwrap();

        assert_eq!(back.len(), 1);
        assert_eq!(back[0].title, "Negociações em Jerusalém");
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_output_is_pretty_and_unescaped() {
        let path = std::env::temp_dir().join("madua-json-test/pretty.json");
        write_articles(&sample(), &path).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        // Indented, one field per line.
        assert!(raw.contains("\n  "));
        // Non-ASCII stays readable instead of \u-escaped.
        assert!(raw.contains("Negociações em Jerusalém"));
        assert!(!raw.contains("\\u"));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_read_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("madua-json-test/definitely-not-there.json");
        assert!(read_articles(&path).await.is_err());
    }
}
