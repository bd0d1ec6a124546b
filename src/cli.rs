//! Command-line interface definitions.
//!
//! One subcommand per pipeline stage. Secrets and endpoints can come from
//! the environment (`DATABASE_URL`, `GOOGLE_INDEXING_TOKEN`) so cron jobs
//! don't need them on the command line.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Madua scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape the 10 latest articles into the default archive
/// madua_scraper scrape --limit 10
///
/// # Forward an archive to the import API
/// madua_scraper send -f ynetnews_articles.json
///
/// # Insert an archive straight into the database
/// DATABASE_URL=postgres://localhost/madua madua_scraper import -f ynetnews_articles.json
///
/// # Ask Google to recrawl published URLs
/// GOOGLE_INDEXING_TOKEN=... madua_scraper index -u urls.txt
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape the latest articles and archive them as JSON
    Scrape {
        /// Maximum number of articles to scrape
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Path of the JSON archive to write
        #[arg(short, long, default_value = "ynetnews_articles.json")]
        output: String,

        /// Directory downloaded images are saved to
        #[arg(long, default_value = "public/article-images")]
        image_dir: String,

        /// Optional site profile YAML file (selectors, denylist, delays)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Send a JSON archive to the import API
    Send {
        /// Path to the JSON archive
        #[arg(short, long)]
        file: String,

        /// Import API endpoint
        #[arg(long, default_value = "http://localhost:3000/api/scraper")]
        api_url: String,
    },

    /// Import a JSON archive into the database via the psql CLI
    Import {
        /// Path to the JSON archive
        #[arg(short, long)]
        file: String,

        /// Database connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        /// Database client executable to invoke
        #[arg(long, default_value = "psql")]
        psql: String,
    },

    /// Submit site URLs to the Google Indexing API
    Index {
        /// File listing one URL per line (# comments allowed)
        #[arg(short, long)]
        urls_file: String,

        /// Pre-issued OAuth bearer token for the Indexing API
        #[arg(long, env = "GOOGLE_INDEXING_TOKEN", hide_env_values = true)]
        token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_defaults() {
        let cli = Cli::parse_from(&["madua_scraper", "scrape"]);

        match cli.command {
            Command::Scrape {
                limit,
                output,
                image_dir,
                config,
            } => {
                assert_eq!(limit, 10);
                assert_eq!(output, "ynetnews_articles.json");
                assert_eq!(image_dir, "public/article-images");
                assert!(config.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_scrape_short_flags() {
        let cli = Cli::parse_from(&["madua_scraper", "scrape", "-l", "3", "-o", "/tmp/out.json"]);

        match cli.command {
            Command::Scrape { limit, output, .. } => {
                assert_eq!(limit, 3);
                assert_eq!(output, "/tmp/out.json");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_send_default_endpoint() {
        let cli = Cli::parse_from(&["madua_scraper", "send", "-f", "articles.json"]);

        match cli.command {
            Command::Send { file, api_url } => {
                assert_eq!(file, "articles.json");
                assert_eq!(api_url, "http://localhost:3000/api/scraper");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_import_takes_database_url_flag() {
        let cli = Cli::parse_from(&[
            "madua_scraper",
            "import",
            "-f",
            "articles.json",
            "--database-url",
            "postgres://localhost/madua",
        ]);

        match cli.command {
            Command::Import {
                database_url, psql, ..
            } => {
                assert_eq!(database_url, "postgres://localhost/madua");
                assert_eq!(psql, "psql");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
