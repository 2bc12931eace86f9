#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod export;
mod waypoint;

use anyhow::Result;
use geom::{GPSBounds, LonLat};

pub use waypoint::{Position, Waypoint};

// The map view is fit to the stops, padded by this fraction of the extent on each side
const PAD_FRACTION: f64 = 0.2;
// Keep a single stop (or stops stacked on top of each other) from producing an empty view
const MIN_PAD_DEGREES: f64 = 0.5;

/// The ordered list of stops Santa visits. The first is where the trip departs from.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self> {
        for (idx, waypoint) in waypoints.iter().enumerate() {
            waypoint.validate(idx)?;
        }
        Ok(Self { waypoints })
    }

    pub fn empty() -> Self {
        Self {
            waypoints: Vec::new(),
        }
    }

    /// Parses a JSON array of `{city, recipient, lat, lng}` in travel order.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let waypoints: Vec<Waypoint> = serde_json::from_slice(bytes)
            .map_err(|err| anyhow!("Malformed route data: {err}"))?;
        let route = Self::new(waypoints)?;
        info!("Loaded a route with {} stops", route.len());
        if !route.can_animate() {
            warn!("A route needs at least 2 stops to animate anything");
        }
        Ok(route)
    }

    pub fn load_file(path: &str) -> Result<Self> {
        let bytes = fs_err::read(path)?;
        Self::from_json(&bytes).map_err(|err| anyhow!("{path}: {err}"))
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn can_animate(&self) -> bool {
        self.waypoints.len() >= 2
    }

    pub fn get(&self, idx: usize) -> Option<&Waypoint> {
        self.waypoints.get(idx)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// The legs between consecutive stops, as (from, to)
    pub fn segments(&self) -> impl Iterator<Item = (&Waypoint, &Waypoint)> {
        self.waypoints.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    pub fn num_segments(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// The (south-west, north-east) corners covering every stop, padded for display. An empty
    /// route covers the whole world.
    pub fn padded_extent(&self) -> (Position, Position) {
        if self.waypoints.is_empty() {
            return (Position::new(-90.0, -180.0), Position::new(90.0, 180.0));
        }

        let mut min = self.waypoints[0].position();
        let mut max = min;
        for waypoint in &self.waypoints {
            min.lat = min.lat.min(waypoint.lat);
            min.lng = min.lng.min(waypoint.lng);
            max.lat = max.lat.max(waypoint.lat);
            max.lng = max.lng.max(waypoint.lng);
        }

        let pad_lat = ((max.lat - min.lat) * PAD_FRACTION).max(MIN_PAD_DEGREES);
        let pad_lng = ((max.lng - min.lng) * PAD_FRACTION).max(MIN_PAD_DEGREES);
        (
            Position::new((min.lat - pad_lat).max(-90.0), (min.lng - pad_lng).max(-180.0)),
            Position::new((max.lat + pad_lat).min(90.0), (max.lng + pad_lng).min(180.0)),
        )
    }

    pub fn gps_bounds(&self) -> GPSBounds {
        let (min, max) = self.padded_extent();
        let mut gps_bounds = GPSBounds::new();
        gps_bounds.update(LonLat::new(min.lng, min.lat));
        gps_bounds.update(LonLat::new(max.lng, max.lat));
        gps_bounds
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const THREE_STOPS: &str = r#"[
        {"city": "North Pole", "recipient": "Elves", "lat": 90.0, "lng": 0.0},
        {"city": "Tokyo", "recipient": "Yuki", "lat": 35.68, "lng": 139.69},
        {"city": "Sydney", "recipient": "Jack", "lat": -33.87, "lng": 151.21}
    ]"#;

    #[test]
    fn parse_stops_in_order() {
        let route = Route::from_json(THREE_STOPS.as_bytes()).unwrap();
        assert_eq!(route.len(), 3);
        assert!(route.can_animate());
        assert_eq!(route.get(1).unwrap().city, "Tokyo");
        assert_eq!(route.get(2).unwrap().recipient, "Jack");
        assert_eq!(route.num_segments(), 2);

        let legs: Vec<(&str, &str)> = route
            .segments()
            .map(|(from, to)| (from.city.as_str(), to.city.as_str()))
            .collect();
        assert_eq!(legs, vec![("North Pole", "Tokyo"), ("Tokyo", "Sydney")]);
    }

    #[test]
    fn load_sample_data() {
        let route = Route::load_file("../data/locations.json").unwrap();
        assert_eq!(route.len(), 10);
        assert_eq!(route.get(0).unwrap().city, "North Pole");

        let err = Route::load_file("../data/missing.json").unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn malformed_payloads_are_errors() {
        assert!(Route::from_json(b"not json").is_err());
        assert!(Route::from_json(br#"{"city": "Oslo"}"#).is_err());
        // Missing recipient
        assert!(Route::from_json(br#"[{"city": "Oslo", "lat": 1.0, "lng": 2.0}]"#).is_err());
        // Coordinates as strings
        assert!(
            Route::from_json(br#"[{"city": "Oslo", "recipient": "A", "lat": "1", "lng": 2}]"#)
                .is_err()
        );
        let err = Route::from_json(
            br#"[{"city": "Nowhere", "recipient": "Nobody", "lat": 123.0, "lng": 0.0}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Nowhere"));
    }

    #[test]
    fn short_routes_load_but_cannot_animate() {
        let empty = Route::from_json(b"[]").unwrap();
        assert!(empty.is_empty());
        assert!(!empty.can_animate());
        assert_eq!(empty.segments().count(), 0);

        let single =
            Route::from_json(br#"[{"city": "North Pole", "recipient": "Elves", "lat": 90, "lng": 0}]"#)
                .unwrap();
        assert_eq!(single.len(), 1);
        assert!(!single.can_animate());
        assert_eq!(single.num_segments(), 0);
    }

    #[test]
    fn extent_is_padded() {
        let route = Route::new(vec![
            Waypoint {
                city: "A".to_string(),
                recipient: "a".to_string(),
                lat: 0.0,
                lng: 0.0,
            },
            Waypoint {
                city: "B".to_string(),
                recipient: "b".to_string(),
                lat: 10.0,
                lng: 20.0,
            },
        ])
        .unwrap();
        let (min, max) = route.padded_extent();
        assert_abs_diff_eq!(min.lat, -2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(min.lng, -4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max.lat, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max.lng, 24.0, epsilon = 1e-9);
    }

    #[test]
    fn extent_clamps_to_the_globe() {
        let route = Route::from_json(THREE_STOPS.as_bytes()).unwrap();
        let (min, max) = route.padded_extent();
        assert_eq!(max.lat, 90.0);
        assert!(min.lat < -33.87);
        assert!(max.lng <= 180.0);

        let (min, max) = Route::empty().padded_extent();
        assert_eq!((min.lat, min.lng, max.lat, max.lng), (-90.0, -180.0, 90.0, 180.0));
    }
}
