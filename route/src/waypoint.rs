use anyhow::Result;
use geom::{GPSBounds, LonLat, Pt2D};
use serde::{Deserialize, Serialize};

/// One stop on the route. Order in the route defines travel direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub city: String,
    pub recipient: String,
    pub lat: f64,
    pub lng: f64,
}

impl Waypoint {
    pub fn position(&self) -> Position {
        Position::new(self.lat, self.lng)
    }

    pub(crate) fn validate(&self, idx: usize) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            bail!("Stop {idx} ({}) has latitude {} out of range", self.city, self.lat);
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            bail!("Stop {idx} ({}) has longitude {} out of range", self.city, self.lng);
        }
        Ok(())
    }
}

/// A point in degrees. Interpolation treats latitude and longitude as a flat plane, which is fine
/// for the short hops between stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `percent` is expected in [0, 1]; 0 gives `self`, 1 gives `other`.
    pub fn lerp(self, other: Position, percent: f64) -> Position {
        Position {
            lat: self.lat + (other.lat - self.lat) * percent,
            lng: self.lng + (other.lng - self.lng) * percent,
        }
    }

    pub fn to_lon_lat(self) -> LonLat {
        LonLat::new(self.lng, self.lat)
    }

    pub fn to_pt(self, gps_bounds: &GPSBounds) -> Pt2D {
        self.to_lon_lat().to_pt(gps_bounds)
    }
}
