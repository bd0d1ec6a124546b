//! Image acquisition and on-disk naming.
//!
//! Images are saved under a single directory (served as
//! `/article-images/...` by the site) with filenames derived from the
//! article caption: lowercased, stripped of punctuation, whitespace
//! collapsed to hyphens, truncated. Captionless images get a random
//! hexadecimal token instead. Name collisions are resolved with an
//! increasing numeric suffix, so an existing file is never overwritten.
//!
//! Downloads are streamed to disk chunk by chunk. Any failure, HTTP or
//! I/O, degrades to "no local path"; the article record keeps the original
//! URL either way.

use futures::StreamExt;
use once_cell::sync::Lazy;
use rand::{rng, Rng};
use regex::Regex;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Maximum length of the caption-derived part of a filename.
const MAX_BASE_LEN: usize = 50;

/// Extension used when the image URL's path has none.
const DEFAULT_EXTENSION: &str = "jpg";

static NON_FILENAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Writes downloaded images into a single directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    public_prefix: String,
    client: reqwest::Client,
}

impl ImageStore {
    /// `dir` is the on-disk target directory; `public_prefix` is the
    /// site-relative path prefix returned for saved files
    /// (e.g. `/article-images`).
    pub fn new<P: Into<PathBuf>>(dir: P, public_prefix: &str, client: reqwest::Client) -> Self {
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Download an image and return its site-relative path, or `None` if
    /// anything went wrong. Failures are logged, never propagated; a
    /// missing image is not worth losing the article over.
    #[instrument(level = "debug", skip(self))]
    pub async fn download(&self, image_url: &str, caption: Option<&str>) -> Option<String> {
        match self.save(image_url, caption).await {
            Ok(public_path) => {
                info!(%image_url, path = %public_path, "Saved image");
                Some(public_path)
            }
            Err(e) => {
                warn!(%image_url, error = %e, "Image download failed");
                None
            }
        }
    }

    async fn save(&self, image_url: &str, caption: Option<&str>) -> Result<String, Box<dyn Error>> {
        let base = caption
            .map(sanitize_caption)
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| format!("ynet-{}", random_token()));
        let extension = extension_from_url(image_url);
        let save_path = unique_path(&self.dir, &base, &extension);

        let response = self.client.get(image_url).send().await?.error_for_status()?;

        let mut file = tokio::fs::File::create(&save_path).await?;
        let mut stream = response.bytes_stream();
        let written = async {
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            Ok::<(), Box<dyn Error>>(())
        }
        .await;
        if let Err(e) = written {
            // Don't leave a truncated file behind.
            let _ = tokio::fs::remove_file(&save_path).await;
            return Err(e);
        }

        let filename = save_path
            .file_name()
            .ok_or("image path has no filename")?
            .to_string_lossy();
        debug!(path = %save_path.display(), "Wrote image file");
        Ok(format!("{}/{}", self.public_prefix, filename))
    }
}

/// Derive a filename base from an article caption.
///
/// Lowercases, strips everything that is not alphanumeric, whitespace, or
/// a hyphen, collapses whitespace runs to single hyphens, and truncates.
pub fn sanitize_caption(caption: &str) -> String {
    let lowered = caption.to_lowercase();
    let stripped = NON_FILENAME.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(stripped.trim(), "-");
    hyphenated
        .chars()
        .take(MAX_BASE_LEN)
        .collect::<String>()
        .trim_end_matches('-')
        .to_string()
}

/// Extract the file extension from an image URL's path component,
/// preserving its case. Falls back to [`DEFAULT_EXTENSION`].
pub fn extension_from_url(image_url: &str) -> String {
    let extension = Url::parse(image_url).ok().and_then(|url| {
        let path = url.path().to_string();
        let segment = path.rsplit('/').next()?;
        let (_, ext) = segment.rsplit_once('.')?;
        if ext.is_empty() {
            None
        } else {
            Some(ext.to_string())
        }
    });
    extension.unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// First free path of the form `{base}.{ext}`, `{base}-1.{ext}`,
/// `{base}-2.{ext}`, ... inside `dir`.
pub fn unique_path(dir: &Path, base: &str, extension: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{base}.{extension}"));
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = dir.join(format!("{base}-{counter}.{extension}"));
        counter += 1;
    }
    candidate
}

/// Eight hex digits for captionless filenames.
fn random_token() -> String {
    format!("{:08x}", rng().random::<u32>())
}
