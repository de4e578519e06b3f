//! User location resolution
//!
//! IP geolocation first, then geocoding of a fixed place name. Only when
//! both come back empty does resolution fail.

use reqwest::Client;
use serde::Deserialize;

use super::{Coordinates, LocationSource, UserLocation};
use crate::cli::config::LocationConfig;
use crate::errors::GeoError;

/// ipinfo-style response, `loc` is "lat,lon"
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    loc: Option<String>,
}

/// Nominatim search hit; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

pub struct Locator {
    client: Client,
    config: LocationConfig,
}

impl Locator {
    pub fn new(client: Client, config: LocationConfig) -> Self {
        Self { client, config }
    }

    /// Place name used when IP lookup yields nothing
    pub fn fallback_place(&self) -> &str {
        &self.config.fallback_place
    }

    /// Best available position for the user
    pub async fn resolve_location(&self) -> Result<UserLocation, GeoError> {
        if self.config.ip_lookup {
            if let Some(coords) = self.lookup_ip().await {
                return Ok(UserLocation {
                    coords,
                    source: LocationSource::Ip,
                });
            }
            tracing::info!(place = %self.config.fallback_place, "IP lookup failed, geocoding fallback place");
        }

        match self.geocode(&self.config.fallback_place).await {
            Some(coords) => Ok(UserLocation {
                coords,
                source: LocationSource::Geocoded(self.config.fallback_place.clone()),
            }),
            None => Err(GeoError::LocationUnavailable),
        }
    }

    /// Coordinates for the caller's public IP, if the service knows them
    pub async fn lookup_ip(&self) -> Option<Coordinates> {
        let response = match self.client.get(&self.config.ip_lookup_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "IP geolocation request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "IP geolocation rejected");
            return None;
        }

        let body: IpLookupResponse = response.json().await.ok()?;
        parse_loc(body.loc.as_deref()?)
    }

    /// First geocoding hit for `place`
    pub async fn geocode(&self, place: &str) -> Option<Coordinates> {
        let response = match self
            .client
            .get(&self.config.geocode_url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, place, "geocoding request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), place, "geocoding rejected");
            return None;
        }

        let hits: Vec<GeocodeHit> = response.json().await.ok()?;
        let hit = hits.into_iter().next()?;
        Some(Coordinates::new(hit.lat.parse().ok()?, hit.lon.parse().ok()?))
    }
}

fn parse_loc(loc: &str) -> Option<Coordinates> {
    let (lat, lon) = loc.split_once(',')?;
    Some(Coordinates::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loc() {
        assert_eq!(parse_loc("22.5726,88.3639"), Some(Coordinates::new(22.5726, 88.3639)));
        assert_eq!(parse_loc(" 1.5 , -2.25 "), Some(Coordinates::new(1.5, -2.25)));
        assert_eq!(parse_loc("22.5726"), None);
        assert_eq!(parse_loc("north,east"), None);
    }

    #[test]
    fn test_fallback_place() {
        let locator = Locator::new(Client::new(), LocationConfig::default());
        assert_eq!(locator.fallback_place(), "Kolkata, India");
    }
}
