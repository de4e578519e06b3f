//! Overpass query for hospitals and pharmacies around a point

use reqwest::Client;
use serde::Deserialize;

use super::{Coordinates, Facility};
use crate::cli::config::FacilitiesConfig;
use crate::errors::GeoError;

/// Name used when an OSM node carries no `name` tag
pub const UNKNOWN_FACILITY: &str = "Unknown Hospital/Pharmacy";

const AMENITIES: [&str; 2] = ["hospital", "pharmacy"];

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Option<Vec<OverpassElement>>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: std::collections::HashMap<String, String>,
}

pub struct FacilityFinder {
    client: Client,
    config: FacilitiesConfig,
}

impl FacilityFinder {
    pub fn new(client: Client, config: FacilitiesConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &FacilitiesConfig {
        &self.config
    }

    /// Overpass QL selecting hospital and pharmacy nodes within the radius
    pub fn build_query(&self, at: Coordinates) -> String {
        let selectors: String = AMENITIES
            .iter()
            .map(|amenity| {
                format!(
                    "  node[\"amenity\"=\"{}\"](around:{},{},{});\n",
                    amenity, self.config.radius_m, at.lat, at.lon
                )
            })
            .collect();

        format!("[out:json];\n(\n{});\nout;\n", selectors)
    }

    /// Facilities near the point.
    ///
    /// Transport failures are errors. A non-success status or an
    /// unparseable body means "no results" and yields an empty list.
    pub async fn fetch_nearby(&self, at: Coordinates) -> Result<Vec<Facility>, GeoError> {
        let query = self.build_query(at);
        tracing::debug!(lat = at.lat, lon = at.lon, radius_m = self.config.radius_m, "querying Overpass");

        let response = self
            .client
            .get(&self.config.overpass_url)
            .query(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| GeoError::Request(e.to_string()))?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Overpass query rejected");
            return Ok(Vec::new());
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeoError::Request(format!("Failed to read response body: {}", e)))?;

        let facilities = parse_facilities(&body);
        tracing::info!(count = facilities.len(), "Overpass query complete");
        Ok(facilities)
    }
}

/// Map Overpass elements to facilities; malformed JSON gives an empty list
fn parse_facilities(body: &str) -> Vec<Facility> {
    let parsed: OverpassResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "malformed Overpass response");
            return Vec::new();
        }
    };

    parsed
        .elements
        .unwrap_or_default()
        .into_iter()
        .filter_map(|mut element| {
            let (lat, lon) = (element.lat?, element.lon?);
            let name = element
                .tags
                .remove("name")
                .unwrap_or_else(|| UNKNOWN_FACILITY.to_string());
            Some(Facility { name, lat, lon })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_covers_both_amenities() {
        let finder = FacilityFinder::new(Client::new(), FacilitiesConfig::default());
        let query = finder.build_query(Coordinates::new(22.5, 88.3));

        assert!(query.starts_with("[out:json];"));
        assert!(query.contains("node[\"amenity\"=\"hospital\"](around:5000,22.5,88.3);"));
        assert!(query.contains("node[\"amenity\"=\"pharmacy\"](around:5000,22.5,88.3);"));
        assert!(query.trim_end().ends_with("out;"));
    }

    #[test]
    fn test_parse_defaults_missing_names() {
        let body = r#"{"elements":[
            {"type":"node","id":1,"lat":22.51,"lon":88.34,"tags":{"amenity":"hospital","name":"City Hospital"}},
            {"type":"node","id":2,"lat":22.52,"lon":88.35,"tags":{"amenity":"pharmacy"}},
            {"type":"node","id":3,"lat":22.53,"lon":88.36}
        ]}"#;

        let facilities = parse_facilities(body);
        assert_eq!(facilities.len(), 3);
        assert_eq!(facilities[0].name, "City Hospital");
        assert_eq!(facilities[1].name, UNKNOWN_FACILITY);
        assert_eq!(facilities[2].name, UNKNOWN_FACILITY);
        assert_eq!(facilities[1].lat, 22.52);
    }

    #[test]
    fn test_parse_skips_elements_without_coordinates() {
        let body = r#"{"elements":[{"type":"way","id":9,"tags":{"name":"Campus"}}]}"#;
        assert!(parse_facilities(body).is_empty());
    }

    #[test]
    fn test_parse_tolerates_bad_bodies() {
        assert!(parse_facilities("").is_empty());
        assert!(parse_facilities("<html>rate limited</html>").is_empty());
        assert!(parse_facilities(r#"{"remark":"runtime error"}"#).is_empty());
    }
}
