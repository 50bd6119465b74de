use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::{
    config::{API, ApiClientConfig, DF},
    data::envelope::{AnalystRecord, CoinRecord, OverviewRecord, decode_rows},
    domain::{CoinRow, MarketPoint, PricePoint, Symbol},
    error::{FetchError, FetchResult},
    utils::{AppInstant, format_duration},
};

/// Abstract interface for the three read-only dashboard endpoints.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketApi: Send + Sync {
    /// Ranked coins, highest market cap first.
    async fn top_coins(&self) -> FetchResult<Vec<CoinRow>>;

    /// Daily aggregate market series, in backend order.
    async fn overview(&self) -> FetchResult<Vec<MarketPoint>>;

    /// Price history of one symbol, in backend order. Unknown symbols yield an empty Vec.
    async fn analyst(&self, symbol: &Symbol) -> FetchResult<Vec<PricePoint>>;
}

#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    TopCoins { limit: Option<u32> },
    Overview,
    Analyst(&'a Symbol),
}

impl Endpoint<'_> {
    /// Full request URL. Query values are percent-encoded.
    pub fn url(&self, base_url: &str) -> FetchResult<Url> {
        let path = match self {
            Endpoint::TopCoins { .. } => API.endpoints.top_coins,
            Endpoint::Overview => API.endpoints.overview,
            Endpoint::Analyst(_) => API.endpoints.analyst,
        };
        let mut url = Url::parse(&format!("{}/{}", base_url.trim_end_matches('/'), path))
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        match self {
            Endpoint::TopCoins { limit: Some(n) } => {
                url.query_pairs_mut().append_pair("limit", &n.to_string());
            }
            Endpoint::Analyst(symbol) => {
                url.query_pairs_mut()
                    .append_pair("symbol", &symbol.query_value());
            }
            _ => {}
        }
        Ok(url)
    }
}

pub struct HttpMarketApi {
    client: reqwest::Client,
    config: ApiClientConfig,
}

impl HttpMarketApi {
    pub fn new(config: ApiClientConfig) -> FetchResult<Self> {
        let builder = reqwest::Client::builder();

        // Browser fetch has no client-level timeout knob.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_millis(config.timeout_ms));

        let client = builder
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    async fn get_rows<R, T>(&self, endpoint: Endpoint<'_>) -> FetchResult<Vec<T>>
    where
        R: for<'de> Deserialize<'de>,
        T: From<R>,
    {
        let url = endpoint.url(&self.config.base_url)?;
        let mut attempt = 0;
        loop {
            match self.get_once::<R, T>(&url).await {
                Err(e) if e.is_transient() && attempt < self.config.retries => {
                    attempt += 1;
                    log::warn!(
                        "GET {} failed ({}), retry {}/{}",
                        url,
                        e,
                        attempt,
                        self.config.retries
                    );
                    #[cfg(not(target_arch = "wasm32"))]
                    tokio::time::sleep(std::time::Duration::from_millis(self.config.backoff_ms))
                        .await;
                }
                other => return other,
            }
        }
    }

    async fn get_once<R, T>(&self, url: &Url) -> FetchResult<Vec<T>>
    where
        R: for<'de> Deserialize<'de>,
        T: From<R>,
    {
        let start = AppInstant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;
        let rows = decode_rows::<R, T>(&body)?;

        if DF.log_requests {
            log::info!(
                "GET {} -> {} rows in {}",
                url,
                rows.len(),
                format_duration(start.elapsed().as_millis())
            );
        }
        Ok(rows)
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.config.timeout_ms)
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketApi for HttpMarketApi {
    async fn top_coins(&self) -> FetchResult<Vec<CoinRow>> {
        let limit = self.config.top_coins_limit;
        self.get_rows::<CoinRecord, CoinRow>(Endpoint::TopCoins { limit })
            .await
    }

    async fn overview(&self) -> FetchResult<Vec<MarketPoint>> {
        self.get_rows::<OverviewRecord, MarketPoint>(Endpoint::Overview)
            .await
    }

    async fn analyst(&self, symbol: &Symbol) -> FetchResult<Vec<PricePoint>> {
        self.get_rows::<AnalystRecord, PricePoint>(Endpoint::Analyst(symbol))
            .await
    }
}
