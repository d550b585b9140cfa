//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Both options can also be provided via environment variables.

use clap::Parser;

use crate::api::DEFAULT_BASE_URL;

/// Command-line arguments for the IBGE news tracker.
///
/// # Examples
///
/// ```sh
/// # Default state location (./dados/usuario.json)
/// ibge_news
///
/// # Keep state somewhere else
/// ibge_news --data-dir ~/.local/share/ibge_news
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the user state file
    #[arg(short, long, env = "IBGE_NEWS_DATA_DIR", default_value = "dados")]
    pub data_dir: String,

    /// Base URL of the IBGE news API
    #[arg(long, env = "IBGE_NEWS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        // Clear the env fallbacks so the defaults themselves are exercised.
        unsafe {
            std::env::remove_var("IBGE_NEWS_DATA_DIR");
            std::env::remove_var("IBGE_NEWS_BASE_URL");
        }
        let cli = Cli::parse_from(["ibge_news"]);
        assert_eq!(cli.data_dir, "dados");
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "ibge_news",
            "-d",
            "/tmp/state",
            "--base-url",
            "http://localhost:8080/api/",
        ]);
        assert_eq!(cli.data_dir, "/tmp/state");
        assert_eq!(cli.base_url, "http://localhost:8080/api/");
    }
}
