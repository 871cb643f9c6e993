use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::{
    config::aggregator::{
        AGGREGATOR_API_URL, CLIENT_ID, CLIENT_ID_HEADER, REQUEST_TIMEOUT_SECS, ROUTE_ENCODE_PATH,
    },
    models::quote::{SwapQuote, SwapQuoteRequest},
};

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API error: {status}")]
    Api { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    Decode(String),

    #[error("Invalid aggregator URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Anything that can price a swap. The refresh loop only talks to this.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quote(
        &self,
        chain: &str,
        request: &SwapQuoteRequest,
    ) -> Result<SwapQuote, QuoteError>;
}

pub struct AggregatorClient {
    client: Client,
    base_url: String,
    client_id: String,
}

impl AggregatorClient {
    pub fn new() -> Result<Self, QuoteError> {
        Self::with_base_url(AGGREGATOR_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(QuoteError::Transport)?;

        Ok(AggregatorClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: CLIENT_ID.to_string(),
        })
    }

    pub fn with_client_id(mut self, client_id: &str) -> Self {
        self.client_id = client_id.to_string();
        self
    }

    pub fn quote_url(&self, chain: &str, request: &SwapQuoteRequest) -> Result<Url, QuoteError> {
        let mut url = Url::parse(&format!(
            "{}/{}/{}",
            self.base_url, chain, ROUTE_ENCODE_PATH
        ))?;

        url.query_pairs_mut().extend_pairs(request.query_pairs());

        Ok(url)
    }
}

#[async_trait]
impl QuoteSource for AggregatorClient {
    async fn fetch_quote(
        &self,
        chain: &str,
        request: &SwapQuoteRequest,
    ) -> Result<SwapQuote, QuoteError> {
        let url = self.quote_url(chain, request)?;

        debug!("quote request: {}", url);

        let res = self
            .client
            .get(url)
            .header(CLIENT_ID_HEADER, &self.client_id)
            .send()
            .await
            .map_err(QuoteError::Transport)?;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();

            warn!("aggregator responded {} for {}: {}", status, chain, body);

            return Err(QuoteError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = res.text().await.map_err(QuoteError::Transport)?;

        serde_json::from_str(&body).map_err(|e| QuoteError::Decode(format!("{}, content: {}", e, body)))
    }
}
