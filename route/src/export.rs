use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};

use crate::Route;

impl Route {
    /// One point per stop, then the whole path as a single line.
    pub fn to_geojson(&self) -> GeoJson {
        let mut features = Vec::new();
        for waypoint in self.waypoints() {
            let mut properties = JsonObject::new();
            properties.insert("city".to_string(), waypoint.city.clone().into());
            properties.insert("recipient".to_string(), waypoint.recipient.clone().into());
            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![waypoint.lng, waypoint.lat]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }

        if self.can_animate() {
            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::LineString(
                    self.waypoints()
                        .iter()
                        .map(|waypoint| vec![waypoint.lng, waypoint.lat])
                        .collect(),
                ))),
                id: None,
                properties: None,
                foreign_members: None,
            });
        }

        GeoJson::FeatureCollection(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn dump_geojson(&self) {
        match serde_json::to_string(&self.to_geojson()) {
            Ok(json) => info!("GeoJSON covering the route: {json}"),
            Err(err) => warn!("Couldn't serialize the route as GeoJSON: {err}"),
        }
    }
}
