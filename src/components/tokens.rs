use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::{
    config::aggregator::{
        CLIENT_ID, CLIENT_ID_HEADER, REQUEST_TIMEOUT_SECS, STABLECOIN_SYMBOLS, TOKEN_LIST_PAGE_SIZE,
        TOKEN_LIST_URL,
    },
    models::token::{Chain, Token},
};

#[derive(Debug, Error)]
pub enum TokenListError {
    #[error("API request error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API error: {status}")]
    Api { status: u16 },

    #[error("Response parsing error: {0}")]
    Decode(String),

    #[error("Invalid token list URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiToken {
    address: String,
    symbol: String,
    name: String,
    decimals: u8,
    #[serde(rename = "logoURI", default)]
    logo_uri: String,
}

#[derive(Debug, Deserialize)]
struct ApiTokenPage {
    tokens: Vec<ApiToken>,
}

#[derive(Debug, Deserialize)]
struct ApiTokenResponse {
    data: ApiTokenPage,
}

impl From<ApiToken> for Token {
    fn from(token: ApiToken) -> Self {
        Token {
            symbol: token.symbol,
            name: token.name,
            icon: token.logo_uri,
            balance: "0".to_string(),
            value: "0".to_string(),
            address: Some(token.address),
            decimals: Some(token.decimals),
        }
    }
}

pub struct TokenListClient {
    client: Client,
    url: String,
}

impl TokenListClient {
    pub fn new() -> Result<Self, TokenListError> {
        Self::with_url(TOKEN_LIST_URL)
    }

    pub fn with_url(url: &str) -> Result<Self, TokenListError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(TokenListError::Transport)?;

        Ok(TokenListClient {
            client,
            url: url.to_string(),
        })
    }

    /// First page of whitelisted tokens for a chain.
    pub async fn fetch_tokens(&self, chain_id: u64) -> Result<Vec<Token>, TokenListError> {
        let page_size = TOKEN_LIST_PAGE_SIZE.to_string();
        let chain_ids = chain_id.to_string();
        let url = Url::parse_with_params(
            &self.url,
            &[
                ("page", "1"),
                ("pageSize", page_size.as_str()),
                ("isWhitelisted", "true"),
                ("chainIds", chain_ids.as_str()),
            ],
        )?;

        debug!("token list request: {}", url);

        let res = self
            .client
            .get(url)
            .header(CLIENT_ID_HEADER, CLIENT_ID)
            .send()
            .await
            .map_err(TokenListError::Transport)?;
        let status = res.status();

        if !status.is_success() {
            warn!("token list responded {} for chain {}", status, chain_id);

            return Err(TokenListError::Api {
                status: status.as_u16(),
            });
        }

        let body = res.text().await.map_err(TokenListError::Transport)?;
        let parsed: ApiTokenResponse = serde_json::from_str(&body)
            .map_err(|e| TokenListError::Decode(format!("{}, content: {}", e, body)))?;

        Ok(parsed
            .data
            .tokens
            .into_iter()
            .map(Token::from)
            .collect())
    }
}

/// Native coin in, first USDC/USDT out.
pub fn default_pair(chain: &Chain, tokens: &[Token]) -> Option<(Token, Token)> {
    let stablecoin = tokens
        .iter()
        .find(|token| STABLECOIN_SYMBOLS.contains(&token.symbol.as_str()))?;

    Some((chain.native_token(), stablecoin.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn token_list_body() -> String {
        json!({
            "code": 0,
            "message": "successfully",
            "data": {
                "tokens": [
                    {
                        "chainId": 1,
                        "address": "0x6B175474E89094C44Da98b954EedeAC495271d0F",
                        "symbol": "DAI",
                        "name": "Dai Stablecoin",
                        "decimals": 18,
                        "logoURI": "https://logo.test/dai.png",
                        "isWhitelisted": true,
                        "isStable": true
                    },
                    {
                        "chainId": 1,
                        "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                        "symbol": "USDC",
                        "name": "USD Coin",
                        "decimals": 6,
                        "logoURI": "https://logo.test/usdc.png",
                        "isWhitelisted": true,
                        "isStable": true
                    },
                    {
                        "chainId": 1,
                        "address": "0xdAC17F958D2ee523a2206206994597C13D831ec7",
                        "symbol": "USDT",
                        "name": "Tether USD",
                        "decimals": 6,
                        "isWhitelisted": true,
                        "isStable": true
                    }
                ],
                "pagination": { "totalItems": 3 }
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_fetch_tokens() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/tokens")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("pageSize".into(), "100".into()),
                Matcher::UrlEncoded("isWhitelisted".into(), "true".into()),
                Matcher::UrlEncoded("chainIds".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_list_body())
            .create_async()
            .await;

        let client = TokenListClient::with_url(&format!("{}/api/v1/tokens", server.url())).unwrap();
        let tokens = client.fetch_tokens(1).await.unwrap();

        mock.assert_async().await;
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].symbol, "USDC");
        assert_eq!(tokens[2].icon, "");
        assert_eq!(tokens[1].decimals, Some(6));
        assert_eq!(tokens[1].icon, "https://logo.test/usdc.png");
        assert_eq!(tokens[1].balance, "0");
    }

    #[tokio::test]
    async fn test_fetch_tokens_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/tokens")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = TokenListClient::with_url(&format!("{}/api/v1/tokens", server.url())).unwrap();
        let err = client.fetch_tokens(56).await.unwrap_err();

        assert!(matches!(err, TokenListError::Api { status: 503 }));
    }

    #[tokio::test]
    async fn test_fetch_tokens_invalid_format() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/tokens")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data": {}}"#)
            .create_async()
            .await;

        let client = TokenListClient::with_url(&format!("{}/api/v1/tokens", server.url())).unwrap();
        let err = client.fetch_tokens(1).await.unwrap_err();

        assert!(matches!(err, TokenListError::Decode(_)));
    }

    #[test]
    fn test_default_pair() {
        let chain = Chain::from_slug("ethereum").unwrap();
        let tokens: Vec<Token> = serde_json::from_str::<ApiTokenResponse>(&token_list_body())
            .unwrap()
            .data
            .tokens
            .into_iter()
            .map(Token::from)
            .collect();
        let (from, to) = default_pair(&chain, &tokens).unwrap();

        assert!(from.is_native());
        assert_eq!(from.symbol, "ETH");
        assert_eq!(to.symbol, "USDC");
    }

    #[test]
    fn test_default_pair_without_stablecoin() {
        let chain = Chain::from_slug("bsc").unwrap();

        assert!(default_pair(&chain, &[chain.native_token()]).is_none());
    }
}
