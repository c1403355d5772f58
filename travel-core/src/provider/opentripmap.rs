use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{
    ResolveError,
    model::{PlaceDetail, PlaceSummary, PlacesPage, Point},
    provider::{ServiceId, fetch_json, join_url},
};

use super::PlacesProvider;

/// OpenTripMap places API: radius search and per-object details.
#[derive(Debug, Clone)]
pub struct OpenTripMapProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenTripMapProvider {
    pub fn new(http: Client, base_url: &str, api_key: String) -> Self {
        Self { api_key, base_url: base_url.to_owned(), http }
    }
}

#[async_trait]
impl PlacesProvider for OpenTripMapProvider {
    #[instrument(skip(self), level = "debug")]
    async fn places(
        &self,
        point: Point,
        radius: u32,
        lang: &str,
    ) -> Result<Vec<PlaceSummary>, ResolveError> {
        let url = join_url(&self.base_url, &format!("0.1/{lang}/places/radius"));

        let request = self.http.get(url).query(&[
            ("radius", radius.to_string()),
            ("lon", point.lng.to_string()),
            ("lat", point.lat.to_string()),
            ("apikey", self.api_key.clone()),
        ]);

        let page: PlacesPage = fetch_json(ServiceId::OpenTripMap, request).await?;
        let summaries = page.into_summaries();
        debug!(places = summaries.len(), "radius search resolved");

        Ok(summaries)
    }

    #[instrument(skip(self), level = "debug")]
    async fn place_detail(&self, xid: &str, lang: &str) -> Result<PlaceDetail, ResolveError> {
        let url = join_url(&self.base_url, &format!("0.1/{lang}/places/xid/{xid}"));

        let request = self.http.get(url).query(&[("apikey", self.api_key.as_str())]);

        fetch_json(ServiceId::OpenTripMap, request).await
    }
}
