use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{
    ResolveError,
    model::{Point, WeatherSnapshot},
    provider::{ServiceId, fetch_json, join_url},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(http: Client, base_url: &str, api_key: String) -> Self {
        Self { api_key, base_url: base_url.to_owned(), http }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), level = "debug")]
    async fn weather(&self, point: Point) -> Result<WeatherSnapshot, ResolveError> {
        let url = join_url(&self.base_url, "data/2.5/weather");

        let request = self.http.get(url).query(&[
            ("lat", point.lat.to_string()),
            ("lon", point.lng.to_string()),
            ("appid", self.api_key.clone()),
        ]);

        let snapshot: WeatherSnapshot = fetch_json(ServiceId::OpenWeather, request).await?;
        debug!(temp = snapshot.main.temp, "weather resolved");

        Ok(snapshot)
    }
}
