/**
 * Address Geocoding
 *
 * Turns a free-text address into coordinates. The lookup is an opaque
 * external collaborator behind the [`Geocoder`] trait:
 *
 * - [`GoogleGeocoder`] calls the Google Geocoding API over `reqwest`
 * - [`FixedGeocoder`] always answers with one location (no API key, tests)
 */

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use thiserror::Error;

use crate::backend::error::BackendError;
use crate::shared::Location;

/// Future returned by [`Geocoder::locate`]
pub type GeocodeFuture<'a> = Pin<Box<dyn Future<Output = Result<Location, GeocodeError>> + Send + 'a>>;

/// Address to coordinates lookup
pub trait Geocoder
where
    Self: Send + Sync,
{
    fn locate<'a>(&'a self, address: &'a str) -> GeocodeFuture<'a>;
}

/// Geocoding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The service knows no location for the address
    #[error("no location found for address")]
    NoResults,
    /// The request could not be completed or the reply was unusable
    #[error("geocoding request failed: {0}")]
    Transport(String),
}

impl From<GeocodeError> for BackendError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NoResults => {
                BackendError::validation("Could not find location for the specified address.")
            }
            GeocodeError::Transport(detail) => {
                tracing::error!("Geocoding failed: {}", detail);
                BackendError::unknown("Could not resolve the address, please try again later.")
            }
        }
    }
}

/// Default Google Geocoding API endpoint
pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

/// Google Geocoding API client
#[derive(Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for GoogleGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocoder")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GoogleGeocoder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, GOOGLE_GEOCODE_URL)
    }

    /// Point the client at another endpoint (mock servers)
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// The request URL carries the API key, so it never reaches the error text.
fn transport(err: reqwest::Error) -> GeocodeError {
    GeocodeError::Transport(err.without_url().to_string())
}

impl Geocoder for GoogleGeocoder {
    fn locate<'a>(&'a self, address: &'a str) -> GeocodeFuture<'a> {
        Box::pin(async move {
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[("address", address), ("key", self.api_key.as_str())])
                .send()
                .await
                .map_err(transport)?
                .error_for_status()
                .map_err(transport)?;

            let body: GeocodeResponse = response
                .json()
                .await
                .map_err(transport)?;

            match body.status.as_str() {
                "OK" => body
                    .results
                    .into_iter()
                    .next()
                    .map(|result| result.geometry.location)
                    .ok_or(GeocodeError::NoResults),
                "ZERO_RESULTS" => Err(GeocodeError::NoResults),
                other => Err(GeocodeError::Transport(format!("service answered {other}"))),
            }
        })
    }
}

/// Geocoder that ignores the address
#[derive(Debug, Clone, Copy)]
pub struct FixedGeocoder {
    location: Location,
}

impl FixedGeocoder {
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl Default for FixedGeocoder {
    fn default() -> Self {
        Self::new(Location::new(40.7484474, -73.9871516))
    }
}

impl Geocoder for FixedGeocoder {
    fn locate<'a>(&'a self, _address: &'a str) -> GeocodeFuture<'a> {
        let location = self.location;
        Box::pin(async move { Ok(location) })
    }
}
