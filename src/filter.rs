//! Boilerplate removal for article body text.
//!
//! Ynetnews injects app-store plugs, social-network follow lines, and
//! shortened tracking URLs into article bodies. This filter drops any line
//! containing a denylisted substring, then normalizes the remaining
//! whitespace. The denylist check is a case-sensitive substring test on
//! whole lines; it is best-effort cleanup, not a precise classifier.

use tracing::debug;

/// Line-wise denylist filter over body text.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    denylist: Vec<String>,
}

impl ContentFilter {
    pub fn new(denylist: Vec<String>) -> Self {
        Self { denylist }
    }

    /// Clean a block of body text.
    ///
    /// Drops every line containing any denylisted substring, collapses runs
    /// of three or more line breaks down to exactly two, and trims leading
    /// and trailing whitespace.
    pub fn clean(&self, text: &str) -> String {
        let kept: Vec<&str> = text
            .split('\n')
            .filter(|line| !self.denylist.iter().any(|needle| line.contains(needle.as_str())))
            .collect();

        let dropped = text.split('\n').count() - kept.len();
        if dropped > 0 {
            debug!(dropped, "Removed boilerplate lines from article body");
        }

        let mut cleaned = kept.join("\n");
        while cleaned.contains("\n\n\n") {
            cleaned = cleaned.replace("\n\n\n", "\n\n");
        }

        cleaned.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteProfile;

    fn ynet_filter() -> ContentFilter {
        ContentFilter::new(SiteProfile::default().denylist)
    }

    #[test]
    fn test_denylisted_line_is_dropped_others_kept_verbatim() {
        let filter = ynet_filter();
        let text = "First paragraph.\nFollow Ynetnews on Facebook\nSecond paragraph.";

        assert_eq!(filter.clean(text), "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_line_order_is_preserved() {
        let filter = ynet_filter();
        let text = "Alpha\nBeta\nGet the Ynetnews app\nGamma\nDelta";

        assert_eq!(filter.clean(text), "Alpha\nBeta\nGamma\nDelta");
    }

    #[test]
    fn test_four_line_breaks_collapse_to_two() {
        let filter = ynet_filter();
        let text = "First paragraph.\n\n\n\nSecond paragraph.";

        assert_eq!(filter.clean(text), "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_dropped_line_does_not_create_triple_break() {
        let filter = ynet_filter();
        let text = "First.\n\nDownload us on Google Play\n\nSecond.";

        assert_eq!(filter.clean(text), "First.\n\nSecond.");
    }

    #[test]
    fn test_substring_match_is_case_sensitive() {
        let filter = ynet_filter();
        // "facebook" in lowercase is not on the denylist.
        let text = "She posted it on facebook yesterday.";

        assert_eq!(filter.clean(text), text);
    }

    #[test]
    fn test_shortened_url_prefix_matches_mid_line() {
        let filter = ynet_filter();
        let text = "Read more: https://bit.ly/3xYz\nActual reporting.";

        assert_eq!(filter.clean(text), "Actual reporting.");
    }

    #[test]
    fn test_result_is_trimmed() {
        let filter = ynet_filter();
        let text = "\n\nBody text.\n\n";

        assert_eq!(filter.clean(text), "Body text.");
    }

    #[test]
    fn test_empty_denylist_only_normalizes_whitespace() {
        let filter = ContentFilter::new(Vec::new());
        let text = "Facebook says hello.\n\n\n\n\nMore text.";

        assert_eq!(filter.clean(text), "Facebook says hello.\n\nMore text.");
    }
}
