use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{
    ResolveError,
    model::{Geocoding, LocationHit},
    provider::{ServiceId, fetch_json, join_url},
};

use super::LocationProvider;

/// GraphHopper geocoding API.
#[derive(Debug, Clone)]
pub struct GraphHopperProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GraphHopperProvider {
    pub fn new(http: Client, base_url: &str, api_key: String) -> Self {
        Self { api_key, base_url: base_url.to_owned(), http }
    }
}

#[async_trait]
impl LocationProvider for GraphHopperProvider {
    #[instrument(skip(self), level = "debug")]
    async fn locations(&self, query: &str) -> Result<Vec<LocationHit>, ResolveError> {
        let url = join_url(&self.base_url, "api/1/geocode");

        let request = self
            .http
            .get(url)
            .query(&[("q", query), ("key", self.api_key.as_str())]);

        let parsed: Geocoding = fetch_json(ServiceId::GraphHopper, request).await?;
        debug!(hits = parsed.hits.len(), "geocoding resolved");

        Ok(parsed.hits)
    }
}
