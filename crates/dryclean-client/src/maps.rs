//! Boundary to the third-party maps service: zip geocoding, place results,
//! and static map preview URLs.

use std::time::Duration;

use async_trait::async_trait;
use dryclean_core::{AppConfig, Coordinates};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ApiError;

const STATIC_MAP_ZOOM: &str = "15";
const STATIC_MAP_SIZE: &str = "600x300";

/// One component of a place result, e.g. the postal code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

/// A place as returned by autocomplete selection or geocoding.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl PlaceResult {
    fn component(&self, kind: &str) -> Option<&AddressComponent> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
    }

    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        self.component("postal_code").map(|c| c.long_name.as_str())
    }

    /// First-level administrative region (a US state), long form.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.component("administrative_area_level_1")
            .map(|c| c.long_name.as_str())
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.geometry.map(|g| g.location)
    }
}

/// Looks up a place for a zip code.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` means the lookup ran and found nothing.
    async fn geocode_zip(&self, zip: &str) -> Result<Option<PlaceResult>, ApiError>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    #[serde(default)]
    error_message: Option<String>,
}

/// What a static map preview is centred on.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCenter {
    Coordinates(Coordinates),
    Address(String),
}

impl MapCenter {
    fn as_param(&self) -> String {
        match self {
            MapCenter::Coordinates(c) => format!("{},{}", c.lat, c.lng),
            MapCenter::Address(a) => a.clone(),
        }
    }
}

/// Builds static map image URLs. Pure string formatting; no caching.
#[derive(Debug, Clone)]
pub struct StaticMapBuilder {
    base_url: Url,
    api_key: Option<String>,
}

impl StaticMapBuilder {
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base(base_url)?,
            api_key,
        })
    }

    #[must_use]
    pub fn url(&self, center: &MapCenter) -> String {
        let center = center.as_param();
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["maps", "api", "staticmap"]);
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("center", &center)
                .append_pair("zoom", STATIC_MAP_ZOOM)
                .append_pair("size", STATIC_MAP_SIZE)
                .append_pair("markers", &format!("color:red|{center}"));
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }
        url.into()
    }
}

/// Geocoding client for the maps web service.
pub struct MapsClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl MapsClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the `reqwest::Client` cannot be built or
    /// [`ApiError::InvalidBaseUrl`] if the maps base URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_base_url(
            &config.maps_base_url,
            config.maps_api_key.clone(),
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// # Errors
    ///
    /// As for [`MapsClient::from_config`].
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: parse_base(base_url)?,
            api_key,
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[must_use]
    pub fn static_maps(&self) -> StaticMapBuilder {
        StaticMapBuilder {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
        }
    }

    fn geocode_url(&self, address: &str, key: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["maps", "api", "geocode", "json"]);
        }
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", key);
        url
    }
}

#[async_trait]
impl Geocoder for MapsClient {
    async fn geocode_zip(&self, zip: &str) -> Result<Option<PlaceResult>, ApiError> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let url = self.geocode_url(zip, key);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
                context: format!("geocode(zip={zip})"),
                source: e,
            })?;

        match parsed.status.as_str() {
            "OK" => Ok(parsed.results.into_iter().next()),
            "ZERO_RESULTS" => Ok(None),
            other => Err(ApiError::Api {
                status: 200,
                message: parsed
                    .error_message
                    .unwrap_or_else(|| format!("geocoding failed: {other}")),
            }),
        }
    }
}

fn parse_base(base_url: &str) -> Result<Url, ApiError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })
}
