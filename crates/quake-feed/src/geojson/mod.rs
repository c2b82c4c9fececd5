// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! GeoJSON decoding.
//!
//! Converts a GeoJSON `FeatureCollection` into [`Feature`] records. Only the
//! properties used for display are kept. Features with a null geometry or a
//! geometry type that cannot be drawn (`MultiPoint`, `GeometryCollection`)
//! are skipped, as are single features with malformed coordinates.

mod wire;

use log::debug;
use thiserror::Error;

/// Errors that can occur while decoding a feed body.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reported per feature; the feature is skipped, not the collection.
    #[error("invalid coordinates for {kind} geometry")]
    Coordinates { kind: String },
}

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Drawable geometry of a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single position (earthquake epicenter).
    Point(GeoPoint),
    /// One or more open or closed paths. Polygon rings are flattened into
    /// individual paths.
    Paths(Vec<Vec<GeoPoint>>),
}

/// A decoded feature. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feed-assigned identifier, if any.
    pub id: Option<String>,
    pub geometry: Geometry,
    /// Event magnitude (earthquake feeds only).
    pub magnitude: Option<f64>,
    /// Human readable location, e.g. "10km N of Testville".
    pub place: Option<String>,
    /// Event time in milliseconds since the Unix epoch.
    pub time_ms: Option<i64>,
    /// Boundary name (plate boundary feeds only), e.g. "AF-AN".
    pub name: Option<String>,
}

impl Feature {
    /// Position of a point feature.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        match self.geometry {
            Geometry::Point(p) => Some(p),
            Geometry::Paths(_) => None,
        }
    }

    /// Paths of a line or polygon feature.
    #[must_use]
    pub fn paths(&self) -> &[Vec<GeoPoint>] {
        match &self.geometry {
            Geometry::Paths(paths) => paths,
            Geometry::Point(_) => &[],
        }
    }
}

/// Decode a GeoJSON `FeatureCollection` body.
pub fn parse_feature_collection(body: &[u8]) -> Result<Vec<Feature>, DecodeError> {
    let collection: wire::WireCollection = serde_json::from_slice(body)?;
    let total = collection.features.len();

    let mut features = Vec::with_capacity(total);
    for raw in collection.features {
        if let Some(feature) = raw.into_feature() {
            features.push(feature);
        }
    }

    if features.len() < total {
        debug!("Skipped {} features without usable geometry", total - features.len());
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_usgs_point() {
        let body = br#"{
            "type": "FeatureCollection",
            "metadata": {"generated": 1609459300000, "count": 1},
            "features": [{
                "type": "Feature",
                "properties": {"mag": 3.5, "place": "10km N of Testville", "time": 1609459200000, "tsunami": 0},
                "geometry": {"type": "Point", "coordinates": [-117.5, 34.1, 8.2]},
                "id": "ci40000001"
            }]
        }"#;

        let features = parse_feature_collection(body).unwrap();
        assert_eq!(features.len(), 1);
        let quake = &features[0];
        assert_eq!(quake.id.as_deref(), Some("ci40000001"));
        assert_eq!(quake.magnitude, Some(3.5));
        assert_eq!(quake.place.as_deref(), Some("10km N of Testville"));
        assert_eq!(quake.time_ms, Some(1_609_459_200_000));
        assert_eq!(quake.point(), Some(GeoPoint::new(34.1, -117.5)));
        assert!(quake.paths().is_empty());
    }

    #[test]
    fn test_parse_null_magnitude() {
        let body = br#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"mag":null,"place":null,"time":1},
             "geometry":{"type":"Point","coordinates":[1.0,2.0]}}]}"#;

        let features = parse_feature_collection(body).unwrap();
        assert_eq!(features[0].magnitude, None);
        assert_eq!(features[0].place, None);
        assert_eq!(features[0].id, None);
    }

    #[test]
    fn test_parse_boundary_line() {
        let body = br#"{"type":"FeatureCollection","features":[
            {"type":"Feature",
             "properties":{"LAYER":"plate boundary","Name":"AF-AN","Source":"Mueller et al. [1987]","PlateA":"AF","PlateB":"AN","Type":""},
             "geometry":{"type":"LineString","coordinates":[[-0.4379,-54.8518],[-0.0388,-54.6772],[0.4398,-54.4996]]}}]}"#;

        let features = parse_feature_collection(body).unwrap();
        let boundary = &features[0];
        assert_eq!(boundary.name.as_deref(), Some("AF-AN"));
        assert_eq!(boundary.magnitude, None);
        assert_eq!(boundary.time_ms, None);
        assert_eq!(boundary.paths().len(), 1);
        assert_eq!(boundary.paths()[0][0], GeoPoint::new(-54.8518, -0.4379));
        assert!(boundary.point().is_none());
    }

    #[test]
    fn test_polygon_rings_become_paths() {
        let body = br#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},
             "geometry":{"type":"MultiPolygon","coordinates":[
                [[[0,0],[1,0],[1,1],[0,0]],[[0.2,0.2],[0.4,0.2],[0.4,0.4],[0.2,0.2]]],
                [[[5,5],[6,5],[6,6],[5,5]]]
             ]}}]}"#;

        let features = parse_feature_collection(body).unwrap();
        assert_eq!(features[0].paths().len(), 3);
        assert_eq!(features[0].paths()[2].len(), 4);
    }

    #[test]
    fn test_skips_null_and_undrawable_geometry() {
        let body = br#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"mag":1.0},"geometry":null},
            {"type":"Feature","properties":{"mag":1.0},"geometry":{"type":"MultiPoint","coordinates":[[0,0],[1,1]]}},
            {"type":"Feature","properties":{"mag":2.0},"geometry":{"type":"Point","coordinates":[3,4]}}
        ]}"#;

        let features = parse_feature_collection(body).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].magnitude, Some(2.0));
    }

    #[test]
    fn test_numeric_id_is_kept_as_text() {
        let body = br#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":42,"properties":null,"geometry":{"type":"Point","coordinates":[3,4]}}]}"#;

        let features = parse_feature_collection(body).unwrap();
        assert_eq!(features[0].id.as_deref(), Some("42"));
    }

    #[test]
    fn test_empty_collection() {
        let features = parse_feature_collection(br#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn test_bad_coordinates_skip_only_that_feature() {
        let body = br#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":"short","properties":{"mag":1.0},"geometry":{"type":"Point","coordinates":[3]}},
            {"type":"Feature","id":"text","properties":{"mag":1.5},"geometry":{"type":"LineString","coordinates":"oops"}},
            {"type":"Feature","id":"ok","properties":{"mag":2.0},"geometry":{"type":"Point","coordinates":[3,4]}},
            {"type":"Feature","id":"ring","properties":{},"geometry":{"type":"Polygon","coordinates":[[[0,0],[1]]]}}
        ]}"#;

        let features = parse_feature_collection(body).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].id.as_deref(), Some("ok"));
        assert_eq!(features[0].point(), Some(GeoPoint::new(4.0, 3.0)));
    }

    #[test]
    fn test_not_a_collection() {
        assert!(matches!(
            parse_feature_collection(b"<html>rate limited</html>"),
            Err(DecodeError::Json(_))
        ));
    }
}
