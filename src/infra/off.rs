//! Thin asynchronous client for the Open Food Facts product database.
//!
//! Only the product-name fields are requested. The [`NameSource`] facade
//! absorbs every transport and decoding fault into "no name"; naming is
//! best-effort and must never block a scan.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{EanCode, NameSource};

const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org/api/v2/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "valida-facil/0.1.0";

#[derive(Debug, Error)]
pub enum OffClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    /// 1 when the product is known to the database.
    #[serde(default)]
    status: i64,
    product: Option<ProductDto>,
}

#[derive(Debug, Deserialize)]
struct ProductDto {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    product_name_pt: Option<String>,
}

impl ProductDto {
    /// The localized name wins over the generic one when both are filled in.
    fn preferred_name(self) -> Option<String> {
        self.product_name_pt
            .filter(|name| !name.trim().is_empty())
            .or(self.product_name)
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Clone)]
pub struct OffClient {
    http: Client,
    base_url: Url,
}

impl OffClient {
    pub fn new() -> Result<Self, OffClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, OffClientError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, base_url })
    }

    async fn fetch_product_name(&self, ean: &EanCode) -> Result<Option<String>, OffClientError> {
        let mut url = self.base_url.join(&format!("product/{ean}.json"))?;
        url.query_pairs_mut()
            .append_pair("fields", "product_name,product_name_pt");

        let envelope = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<ProductEnvelope>()
            .await?;

        if envelope.status != 1 {
            return Ok(None);
        }
        Ok(envelope.product.and_then(ProductDto::preferred_name))
    }
}

impl NameSource for OffClient {
    async fn lookup(&self, ean: &EanCode) -> Option<String> {
        match self.fetch_product_name(ean).await {
            Ok(name) => name,
            Err(error) => {
                tracing::debug!(%ean, %error, "product database lookup failed");
                None
            }
        }
    }
}
