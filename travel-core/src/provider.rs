use crate::{
    Config, ResolveError,
    model::{LocationHit, PlaceDetail, PlaceSummary, Point, WeatherSnapshot},
    provider::{
        graphhopper::GraphHopperProvider, openweather::OpenWeatherProvider,
        opentripmap::OpenTripMapProvider,
    },
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::{convert::TryFrom, fmt::Debug};
use tracing::debug;

pub mod graphhopper;
pub mod opentripmap;
pub mod openweather;

/// The three remote services the assistant talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    GraphHopper,
    OpenWeather,
    OpenTripMap,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::GraphHopper => "graphhopper",
            ServiceId::OpenWeather => "openweather",
            ServiceId::OpenTripMap => "opentripmap",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::GraphHopper, ServiceId::OpenWeather, ServiceId::OpenTripMap]
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "graphhopper" => Ok(ServiceId::GraphHopper),
            "openweather" => Ok(ServiceId::OpenWeather),
            "opentripmap" => Ok(ServiceId::OpenTripMap),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: graphhopper, openweather, opentripmap."
            )),
        }
    }
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Geocode free text. Hits keep the order the service returned them in.
    async fn locations(&self, query: &str) -> Result<Vec<LocationHit>, ResolveError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn weather(&self, point: Point) -> Result<WeatherSnapshot, ResolveError>;
}

#[async_trait]
pub trait PlacesProvider: Send + Sync + Debug {
    /// Points of interest within `radius` meters of `point`.
    async fn places(
        &self,
        point: Point,
        radius: u32,
        lang: &str,
    ) -> Result<Vec<PlaceSummary>, ResolveError>;

    async fn place_detail(&self, xid: &str, lang: &str) -> Result<PlaceDetail, ResolveError>;
}

/// All providers, sharing one HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Providers {
    pub locations: GraphHopperProvider,
    pub weather: OpenWeatherProvider,
    pub places: OpenTripMapProvider,
}

impl Providers {
    /// Build every provider from config. Fails if any API key is missing.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = Client::new();

        Ok(Self {
            locations: GraphHopperProvider::new(
                http.clone(),
                &config.endpoints.graphhopper,
                config.require_key(ServiceId::GraphHopper)?.to_owned(),
            ),
            weather: OpenWeatherProvider::new(
                http.clone(),
                &config.endpoints.openweather,
                config.require_key(ServiceId::OpenWeather)?.to_owned(),
            ),
            places: OpenTripMapProvider::new(
                http,
                &config.endpoints.opentripmap,
                config.require_key(ServiceId::OpenTripMap)?.to_owned(),
            ),
        })
    }
}

/// Send a prepared GET and decode its JSON body.
///
/// Anything short of a 2xx response with a well-formed body becomes a
/// [`ResolveError`].
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    service: ServiceId,
    request: RequestBuilder,
) -> Result<T, ResolveError> {
    let res = request
        .send()
        .await
        .map_err(|e| transport_error(service, "failed to send request", e))?;

    let status = res.status();
    debug!(%service, %status, path = res.url().path(), "received response");

    let body = res
        .text()
        .await
        .map_err(|e| transport_error(service, "failed to read response body", e))?;

    if !status.is_success() {
        return Err(ResolveError::new(
            service,
            format!("status {}: {}", status, truncate_body(&body)),
        ));
    }

    serde_json::from_str(&body)
        .map_err(|e| ResolveError::new(service, format!("failed to parse JSON: {e}")))
}

// Request URLs carry the API key in the query, so they never reach the message.
fn transport_error(service: ServiceId, what: &str, err: reqwest::Error) -> ResolveError {
    ResolveError::new(service, format!("{what}: {}", err.without_url()))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
