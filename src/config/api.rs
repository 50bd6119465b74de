use anyhow::{Context, Result, bail};
use reqwest::Url;

/// REST paths, relative to the base URL.
pub struct Endpoints {
    pub top_coins: &'static str,
    pub overview: &'static str,
    pub analyst: &'static str,
}

pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

pub struct ApiConfig {
    pub base_url: &'static str,
    pub endpoints: Endpoints,
    pub client: ClientDefaults,
    /// Row count asked of `/top-coins`. The backend defaults to 20 as well.
    pub top_coins_limit: u32,
}

pub const API: ApiConfig = ApiConfig {
    base_url: "http://localhost:8080/api",
    endpoints: Endpoints {
        top_coins: "top-coins",
        overview: "overview",
        analyst: "analyst",
    },
    client: ClientDefaults {
        timeout_ms: 10_000,
        retries: 1,
        backoff_ms: 500,
    },
    top_coins_limit: 20,
};

/// Runtime client settings: compile-time defaults plus CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
    pub top_coins_limit: Option<u32>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: API.base_url.to_string(),
            timeout_ms: API.client.timeout_ms,
            retries: API.client.retries,
            backoff_ms: API.client.backoff_ms,
            top_coins_limit: Some(API.top_coins_limit),
        }
    }
}

impl ApiClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Checks the base URL and strips any trailing slash so paths join cleanly.
    pub fn validated(mut self) -> Result<Self> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let url = Url::parse(&trimmed)
            .with_context(|| format!("API base URL '{}' is not a valid URL", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "API base URL must use http or https, got '{}'",
                url.scheme()
            );
        }
        if self.timeout_ms == 0 {
            bail!("Request timeout must be greater than zero");
        }
        self.base_url = trimmed;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = ApiClientConfig::default();
        assert_eq!(cfg.base_url, "http://localhost:8080/api");
        assert_eq!(cfg.top_coins_limit, Some(20));
        assert_eq!(cfg.retries, 1);
    }

    #[test]
    fn validation_trims_trailing_slashes() {
        let cfg = ApiClientConfig::default()
            .with_base_url("http://example.com/api//")
            .validated()
            .unwrap();
        assert_eq!(cfg.base_url, "http://example.com/api");
    }

    #[test]
    fn validation_rejects_bad_urls() {
        assert!(ApiClientConfig::default().with_base_url("not a url").validated().is_err());
        assert!(ApiClientConfig::default().with_base_url("ftp://host/api").validated().is_err());

        let zero_timeout = ApiClientConfig {
            timeout_ms: 0,
            ..ApiClientConfig::default()
        };
        assert!(zero_timeout.validated().is_err());
    }
}
