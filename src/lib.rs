#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod ui;
pub mod utils;

use std::sync::Arc;

pub use app::{App, Page};
pub use config::{API, ApiClientConfig};
pub use data::{Backend, HttpMarketApi, MarketApi, TaskSpawner};
pub use error::{FetchError, InputError, NavError};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Crypto market dashboard", long_about = None)]
pub struct Cli {
    /// Base URL of the dashboard REST API
    #[arg(long, default_value = API.base_url)]
    pub api_base: String,

    /// Page shown at startup: top-coins, overview or analyst
    #[arg(long, default_value = "top-coins")]
    pub page: String,

    /// Number of coins requested for the top coins page (0 leaves it to the backend)
    #[arg(long, default_value_t = API.top_coins_limit)]
    pub top_limit: u32,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = API.client.timeout_ms)]
    pub timeout_ms: u64,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            api_base: API.base_url.to_string(),
            page: Page::default().to_string(),
            top_limit: API.top_coins_limit,
            timeout_ms: API.client.timeout_ms,
        }
    }
}

impl Cli {
    /// Client settings from the defaults plus these flags, validated.
    pub fn client_config(&self) -> anyhow::Result<ApiClientConfig> {
        ApiClientConfig {
            timeout_ms: self.timeout_ms,
            top_coins_limit: (self.top_limit > 0).then_some(self.top_limit),
            ..ApiClientConfig::default()
        }
        .with_base_url(self.api_base.clone())
        .validated()
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<App> {
    let config = args.client_config()?;
    let api_base = config.base_url.clone();
    let api = HttpMarketApi::new(config)?;
    let backend = Backend::new(Arc::new(api), TaskSpawner::new()?);
    log::info!("dashboard starting against {}", api_base);
    Ok(App::new(cc, backend, api_base, &args.page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_compiled_config() {
        let cli = Cli::parse_from(["coin-deck"]);
        assert_eq!(cli.api_base, "http://localhost:8080/api");
        assert_eq!(cli.page, "top-coins");
        assert_eq!(cli.client_config().unwrap(), ApiClientConfig::default());
    }

    #[test]
    fn cli_overrides_flow_into_client_config() {
        let cli = Cli::parse_from([
            "coin-deck",
            "--api-base",
            "https://dash.example.com/api/",
            "--top-limit",
            "0",
            "--timeout-ms",
            "2500",
        ]);
        let config = cli.client_config().unwrap();
        assert_eq!(config.base_url, "https://dash.example.com/api");
        assert_eq!(config.top_coins_limit, None);
        assert_eq!(config.timeout_ms, 2500);
    }

    #[test]
    fn cli_rejects_non_http_base() {
        let cli = Cli::parse_from(["coin-deck", "--api-base", "ftp://example.com"]);
        assert!(cli.client_config().is_err());
    }

    #[test]
    fn default_cli_is_what_the_parser_produces() {
        let parsed = Cli::parse_from(["coin-deck"]);
        let default = Cli::default();
        assert_eq!(parsed.api_base, default.api_base);
        assert_eq!(parsed.page, default.page);
        assert_eq!(parsed.top_limit, default.top_limit);
        assert_eq!(parsed.timeout_ms, default.timeout_ms);
    }
}
