//! Nearby hospital and pharmacy finder
//!
//! Resolves the user's approximate position, queries OpenStreetMap via
//! the Overpass interpreter, and renders the results on a Leaflet map.

pub mod facilities;
pub mod locate;
pub mod map;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use facilities::FacilityFinder;
pub use locate::Locator;

/// Latitude/longitude in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// How the user's position was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSource {
    /// IP geolocation
    Ip,
    /// Geocoded fallback place name
    Geocoded(String),
}

/// Resolved user position
#[derive(Debug, Clone, PartialEq)]
pub struct UserLocation {
    pub coords: Coordinates,
    pub source: LocationSource,
}

/// Hospital or pharmacy near the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Facility {
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}
