//! Command-line parsing for the rover image downloader.
//!
//! Flags only override values; anything left unset falls through to the
//! environment, the properties file, and finally the built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_PROPERTIES_FILE;
use crate::fetch::MAX_REDIRECTS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "rover-fetch",
    version,
    about = "Download Curiosity rover photos for a list of dates"
)]
pub struct Cli {
    /// Properties file with `key=value` settings.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_PROPERTIES_FILE)]
    pub config: PathBuf,

    /// Newline-delimited list of dates to fetch.
    #[arg(short = 'd', long, value_name = "FILE")]
    pub dates: Option<PathBuf>,

    /// Directory that receives one sub-folder per date.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Catalog API base URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Catalog API key (overrides NASA_API_KEY and the properties file).
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Year assumed for dates written without one (e.g. "June 15").
    #[arg(long, value_name = "YEAR")]
    pub default_year: Option<i32>,

    /// Maximum redirects followed per download.
    #[arg(long, default_value_t = MAX_REDIRECTS)]
    pub max_redirects: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_overrides_unset() {
        let cli = Cli::parse_from(["rover-fetch"]);
        assert_eq!(cli.config, PathBuf::from("application.properties"));
        assert!(cli.dates.is_none());
        assert!(cli.api_key.is_none());
        assert_eq!(cli.max_redirects, 5);
    }

    #[test]
    fn flags_are_parsed() {
        let cli = Cli::parse_from([
            "rover-fetch",
            "-d",
            "in.txt",
            "-o",
            "out",
            "--base-url",
            "http://localhost:8080",
            "--default-year",
            "2020",
            "--max-redirects",
            "2",
        ]);
        assert_eq!(cli.dates, Some(PathBuf::from("in.txt")));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.default_year, Some(2020));
        assert_eq!(cli.max_redirects, 2);
    }
}
