//! Nominatim geocoding client
//!
//! Defaults to the public OSM instance, whose usage policy caps clients
//! at one request per second — every call goes through the pacer first.
//! https://operations.osmfoundation.org/policies/nominatim/

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::services::location;
use crate::types::{Coordinates, GeocodedLocation};

const USER_AGENT: &str = "ELDTripPlanner/1.0";

/// Minimum spacing between consecutive requests from one client
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// Nominatim /search result
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ReverseAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
}

/// Nominatim /reverse result
#[derive(Debug, Deserialize)]
pub struct ReverseResult {
    pub display_name: Option<String>,
    pub address: Option<ReverseAddress>,
}

/// Nominatim geocoding client
pub struct NominatimClient {
    base_url: String,
    client: reqwest::Client,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimClient {
    /// Create a new client
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            last_request: Mutex::new(None),
        }
    }

    /// Wait out the remainder of the 1 req/s window, then claim the slot
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Geocode a free-text address, biased to the US
    pub async fn search(&self, address: &str) -> Result<Option<GeocodedLocation>> {
        self.pace().await;

        let url = format!(
            "{}/search?q={}&format=json&limit=1&countrycodes=us",
            self.base_url,
            urlencoding::encode(address)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send geocoding request")?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let results: Vec<SearchResult> = response
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        match results.first() {
            Some(result) => {
                let lat: f64 = result.lat.parse().context("Invalid latitude")?;
                let lng: f64 = result.lon.parse().context("Invalid longitude")?;

                Ok(Some(GeocodedLocation {
                    coordinates: Coordinates { lat, lng },
                    display_name: result.display_name.clone(),
                }))
            }
            None => Ok(None),
        }
    }

    /// Name a coordinate at city level ("City, ST" when possible)
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>> {
        self.pace().await;

        // zoom 10 = city level
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json&zoom=10&addressdetails=1",
            self.base_url, lat, lng
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send reverse geocoding request")?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let result: ReverseResult = response
            .json()
            .await
            .context("Failed to parse reverse geocoding response")?;

        Ok(reverse_label(result))
    }
}

/// Build the "City, ST" label from a reverse geocoding result.
///
/// Falls back through town/village/county for the place name and to the
/// raw display string when no structured address came back.
pub fn reverse_label(result: ReverseResult) -> Option<String> {
    if let Some(address) = result.address {
        let city = address
            .city
            .or(address.town)
            .or(address.village)
            .or(address.county);

        if let Some(city) = city {
            let state_abbrev = address.state.as_deref().map(short_state);
            return match state_abbrev {
                Some(state) if !state.is_empty() => Some(format!("{}, {}", city, state)),
                _ => Some(city),
            };
        }
    }

    result.display_name
}

fn short_state(state: &str) -> String {
    match location::state_abbreviation(state) {
        Some(abbrev) => abbrev.to_string(),
        None => state.chars().take(2).collect::<String>().to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_parses() {
        let body = r#"[{"lat":"32.7762719","lon":"-96.7968559","display_name":"Dallas, Dallas County, Texas, United States"}]"#;
        let results: Vec<SearchResult> = serde_json::from_str(body).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lat, "32.7762719");
        assert_eq!(results[0].display_name, "Dallas, Dallas County, Texas, United States");
    }

    #[test]
    fn reverse_label_prefers_city_and_abbreviated_state() {
        let result: ReverseResult = serde_json::from_str(
            r#"{"display_name":"long name","address":{"city":"Amarillo","state":"Texas"}}"#,
        )
        .unwrap();

        assert_eq!(reverse_label(result), Some("Amarillo, TX".to_string()));
    }

    #[test]
    fn reverse_label_falls_back_through_town_and_county() {
        let town: ReverseResult = serde_json::from_str(
            r#"{"address":{"town":"Tucumcari","state":"New Mexico"}}"#,
        )
        .unwrap();
        assert_eq!(reverse_label(town), Some("Tucumcari, NM".to_string()));

        let county: ReverseResult = serde_json::from_str(
            r#"{"address":{"county":"Carson County","state":"Texas"}}"#,
        )
        .unwrap();
        assert_eq!(reverse_label(county), Some("Carson County, TX".to_string()));
    }

    #[test]
    fn reverse_label_without_address_uses_display_name() {
        let result: ReverseResult =
            serde_json::from_str(r#"{"display_name":"Somewhere remote"}"#).unwrap();
        assert_eq!(reverse_label(result), Some("Somewhere remote".to_string()));
    }

    #[test]
    fn unknown_state_is_shortened_to_two_letters() {
        let result: ReverseResult = serde_json::from_str(
            r#"{"address":{"city":"Springfield","state":"Provincia"}}"#,
        )
        .unwrap();
        assert_eq!(reverse_label(result), Some("Springfield, PR".to_string()));
    }

    // Network tests hit the public Nominatim API and are ignored by default

    #[tokio::test]
    #[ignore = "Requires network access"]
    async fn geocode_dallas() {
        let client = NominatimClient::new("https://nominatim.openstreetmap.org");

        let result = client.search("Dallas, TX").await.unwrap();

        assert!(result.is_some());
        let location = result.unwrap();
        // Dallas is around 32.78°N, 96.80°W
        assert!((location.coordinates.lat - 32.78).abs() < 0.2);
        assert!((location.coordinates.lng + 96.80).abs() < 0.2);
    }
}
