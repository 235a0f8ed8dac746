use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use common::config::WebConfig;
use common::models::{FoodTruckPage, FoodTruckQuery};
use common::{Error, Result};

use crate::utils::retry::retry_with_backoff;

const FOODTRUCKS_PATH: &str = "foodtrucks";

/// Anything that can answer a `/foodtrucks` query.
#[async_trait]
pub trait FoodTruckSource: Send + Sync {
    async fn fetch(&self, query: &FoodTruckQuery) -> Result<FoodTruckPage>;
}

/// HTTP client for the catalog's `/foodtrucks` endpoint.
pub struct FoodTruckClient {
    client: Client,
    endpoint: Url,
    retries: u32,
    retry_base_delay_ms: u64,
}

impl FoodTruckClient {
    pub fn new(config: &WebConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.fetch_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint(&config.backend_host)?,
            retries: config.fetch_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
        })
    }

    /// Absent query fields are left out; no `?` is added when all are absent.
    pub fn request_url(&self, query: &FoodTruckQuery) -> Url {
        let mut url = self.endpoint.clone();
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    async fn fetch_once(&self, url: &Url) -> Result<FoodTruckPage> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl FoodTruckSource for FoodTruckClient {
    async fn fetch(&self, query: &FoodTruckQuery) -> Result<FoodTruckPage> {
        let url = self.request_url(query);
        debug!(%url, "Fetching food trucks");

        let url = &url;
        let page = retry_with_backoff(self.retries, self.retry_base_delay_ms, move || {
            self.fetch_once(url)
        })
        .await?;

        debug!(total = page.total, returned = page.food_trucks.len(), "Fetched food trucks");
        Ok(page)
    }
}

fn endpoint(backend_host: &str) -> Result<Url> {
    let base = Url::parse(&format!("{}/", backend_host.trim_end_matches('/')))?;
    Ok(base.join(FOODTRUCKS_PATH)?)
}
