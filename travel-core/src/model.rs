use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

const KELVIN_OFFSET: f64 = 273.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

/// One geocoding candidate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationHit {
    pub name: String,
    #[serde(default)]
    pub osm_type: String,
    #[serde(default)]
    pub osm_key: String,
    #[serde(default)]
    pub osm_value: String,
    pub point: Point,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Geocoding {
    #[serde(default)]
    pub hits: Vec<LocationHit>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Readings {
    /// Kelvin.
    pub temp: f64,
    /// Kelvin.
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: Option<u8>,
}

/// Current weather at a coordinate pair, as reported by OpenWeatherMap.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(rename = "weather", default)]
    pub conditions: Vec<Condition>,
    pub main: Readings,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dt: Option<i64>,
}

impl WeatherSnapshot {
    /// Primary condition; `Unknown` if the service sent none.
    pub fn condition(&self) -> (&str, &str) {
        self.conditions
            .first()
            .map(|c| (c.main.as_str(), c.description.as_str()))
            .unwrap_or(("Unknown", "unknown"))
    }

    pub fn temperature_c(&self) -> i64 {
        kelvin_to_celsius(self.main.temp)
    }

    pub fn feels_like_c(&self) -> i64 {
        kelvin_to_celsius(self.main.feels_like)
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Whole degrees, truncated toward zero.
pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - KELVIN_OFFSET).trunc() as i64
}

/// Lightweight reference to a point of interest found by a radius search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceSummary {
    pub xid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dist: Option<f64>,
    #[serde(default)]
    pub kinds: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlacesPage {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Feature {
    pub properties: PlaceSummary,
}

impl PlacesPage {
    pub fn into_summaries(self) -> Vec<PlaceSummary> {
        self.features.into_iter().map(|f| f.properties).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Address {
    pub country: Option<String>,
    pub state: Option<String>,
    pub suburb: Option<String>,
    pub road: Option<String>,
    pub house_number: Option<String>,
}

impl Address {
    /// Present components, country first.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        [&self.country, &self.state, &self.suburb, &self.road, &self.house_number]
            .into_iter()
            .filter_map(|c| c.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawPlaceDetail")]
pub struct PlaceDetail {
    pub xid: String,
    pub name: String,
    pub address: Option<Address>,
    pub rate: String,
    pub kinds: String,
    pub description: Option<String>,
}

impl PlaceDetail {
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.kinds.split(',').map(str::trim).filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct RawPlaceDetail {
    xid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: Option<Address>,
    #[serde(default, deserialize_with = "rate_as_string")]
    rate: String,
    #[serde(default)]
    kinds: String,
    #[serde(default)]
    info: Option<Info>,
    #[serde(default)]
    wikipedia_extracts: Option<Extract>,
}

#[derive(Debug, Deserialize)]
struct Info {
    #[serde(default)]
    descr: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Extract {
    #[serde(default)]
    text: Option<String>,
}

impl From<RawPlaceDetail> for PlaceDetail {
    fn from(raw: RawPlaceDetail) -> Self {
        let description = raw
            .info
            .and_then(|i| i.descr)
            .or_else(|| raw.wikipedia_extracts.and_then(|w| w.text))
            .filter(|d| !d.trim().is_empty());

        Self {
            xid: raw.xid,
            name: raw.name,
            address: raw.address,
            rate: raw.rate,
            kinds: raw.kinds,
            description,
        }
    }
}

// OpenTripMap sends the rate as "3h" in details but as a number in search results.
fn rate_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rate {
        Text(String),
        Number(i64),
    }

    Ok(match Rate::deserialize(deserializer)? {
        Rate::Text(s) => s,
        Rate::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weather_converts_kelvin_by_truncation() {
        let snapshot: WeatherSnapshot = serde_json::from_value(json!({
            "weather": [{"main": "Clear", "description": "clear sky"}],
            "main": {"temp": 293.0, "feels_like": 292.0}
        }))
        .unwrap();

        assert_eq!(snapshot.temperature_c(), 20);
        assert_eq!(snapshot.feels_like_c(), 19);
        assert_eq!(snapshot.condition(), ("Clear", "clear sky"));
        assert_eq!(snapshot.observed_at(), None);
    }

    #[test]
    fn negative_temperatures_truncate_toward_zero() {
        assert_eq!(kelvin_to_celsius(270.5), -2);
        assert_eq!(kelvin_to_celsius(273.9), 0);
    }

    #[test]
    fn weather_without_conditions_is_unknown() {
        let snapshot: WeatherSnapshot = serde_json::from_value(json!({
            "weather": [],
            "main": {"temp": 280.0, "feels_like": 278.0},
            "dt": 1_700_000_000
        }))
        .unwrap();

        assert_eq!(snapshot.condition(), ("Unknown", "unknown"));
        assert_eq!(snapshot.observed_at().map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn location_hit_tolerates_missing_osm_fields() {
        let hit: LocationHit = serde_json::from_value(json!({
            "name": "Berlin",
            "point": {"lat": 52.52, "lng": 13.405}
        }))
        .unwrap();

        assert_eq!(hit.osm_type, "");
        assert_eq!(hit.point, Point { lat: 52.52, lng: 13.405 });
    }

    #[test]
    fn place_detail_reads_descr_and_numeric_rate() {
        let detail: PlaceDetail = serde_json::from_value(json!({
            "xid": "N1",
            "name": "Museum",
            "rate": 3,
            "kinds": "museums,cultural,,interesting_places",
            "info": {"descr": "Old building"}
        }))
        .unwrap();

        assert_eq!(detail.rate, "3");
        assert_eq!(detail.description.as_deref(), Some("Old building"));
        assert_eq!(detail.tags().collect::<Vec<_>>(), ["museums", "cultural", "interesting_places"]);
        assert!(detail.address.is_none());
    }

    #[test]
    fn place_detail_falls_back_to_wikipedia_extract() {
        let detail: PlaceDetail = serde_json::from_value(json!({
            "xid": "N2",
            "name": "",
            "rate": "3h",
            "kinds": "churches",
            "info": {"desc": "ignored"},
            "wikipedia_extracts": {"text": "A church."}
        }))
        .unwrap();

        assert_eq!(detail.rate, "3h");
        assert_eq!(detail.description.as_deref(), Some("A church."));
    }

    #[test]
    fn place_detail_without_description_is_none() {
        let detail: PlaceDetail = serde_json::from_value(json!({
            "xid": "N3",
            "name": "Bench",
            "kinds": "benches",
            "info": {"descr": "  "}
        }))
        .unwrap();

        assert_eq!(detail.description, None);
        assert_eq!(detail.rate, "");
    }

    #[test]
    fn address_components_keep_fixed_order() {
        let address = Address {
            country: Some("Germany".into()),
            state: None,
            suburb: Some("Mitte".into()),
            road: Some("Unter den Linden".into()),
            house_number: Some("1".into()),
        };

        assert_eq!(
            address.components().collect::<Vec<_>>(),
            ["Germany", "Mitte", "Unter den Linden", "1"]
        );
    }

    #[test]
    fn places_page_unwraps_feature_properties() {
        let page: PlacesPage = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"xid": "A", "name": "a", "dist": 10.5}},
                {"type": "Feature", "properties": {"xid": "B"}}
            ]
        }))
        .unwrap();

        let xids: Vec<_> = page.into_summaries().into_iter().map(|s| s.xid).collect();
        assert_eq!(xids, ["A", "B"]);
    }
}
