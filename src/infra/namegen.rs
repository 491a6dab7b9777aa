//! Best-effort generative naming fallback.
//!
//! Speaks the JSON contract of the naming flow the app grew up with: POST the
//! EAN code, read a generated product name back. Without a configured
//! endpoint the source simply never yields a name.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{EanCode, NameSource};

/// Environment variable holding the naming endpoint URL.
pub const ENDPOINT_ENV: &str = "VALIDA_FACIL_NAMEGEN_URL";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum NameGenError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct NameRequest<'a> {
    #[serde(rename = "eanCode")]
    ean_code: &'a str,
}

#[derive(Deserialize)]
struct NameResponse {
    #[serde(rename = "productName")]
    product_name: Option<String>,
}

#[derive(Clone, Default)]
pub struct NameGenClient {
    endpoint: Option<(Client, Url)>,
}

impl NameGenClient {
    /// Reads the endpoint from `VALIDA_FACIL_NAMEGEN_URL`; unset leaves the
    /// source disabled.
    pub fn from_env() -> Result<Self, NameGenError> {
        match std::env::var(ENDPOINT_ENV) {
            Ok(raw) => Self::with_endpoint(&raw),
            Err(_) => Ok(Self::disabled()),
        }
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self, NameGenError> {
        let url = Url::parse(endpoint)?;
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            endpoint: Some((http, url)),
        })
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    async fn generate(&self, ean: &EanCode) -> Result<Option<String>, NameGenError> {
        let Some((http, url)) = &self.endpoint else {
            return Ok(None);
        };
        let response = http
            .post(url.clone())
            .json(&NameRequest {
                ean_code: ean.as_str(),
            })
            .send()
            .await?
            .error_for_status()?
            .json::<NameResponse>()
            .await?;
        Ok(response.product_name)
    }
}

impl NameSource for NameGenClient {
    async fn lookup(&self, ean: &EanCode) -> Option<String> {
        match self.generate(ean).await {
            Ok(name) => name,
            Err(error) => {
                tracing::debug!(%ean, %error, "generative naming failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_client_never_yields_a_name() {
        let client = NameGenClient::disabled();
        let ean = EanCode::parse("4006381333931").expect("valid vector");
        assert_eq!(client.lookup(&ean).await, None);
    }

    #[test]
    fn request_payload_matches_the_flow_contract() {
        let payload = serde_json::to_string(&NameRequest {
            ean_code: "4006381333931",
        })
        .expect("serializable");
        assert_eq!(payload, r#"{"eanCode":"4006381333931"}"#);
    }

    #[test]
    fn response_payload_matches_the_flow_contract() {
        let parsed: NameResponse =
            serde_json::from_str(r#"{"productName":"Chocolate Bar"}"#).expect("well-formed");
        assert_eq!(parsed.product_name.as_deref(), Some("Chocolate Bar"));

        let parsed: NameResponse = serde_json::from_str("{}").expect("name is optional");
        assert!(parsed.product_name.is_none());
    }
}
