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

//! Serde representation of the GeoJSON subset we read.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::{DecodeError, Feature, GeoPoint, Geometry};

#[derive(Debug, Deserialize)]
pub(super) struct WireCollection {
    pub features: Vec<WireFeature>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireFeature {
    #[serde(default)]
    id: Option<Value>,

    #[serde(default)]
    properties: Option<WireProperties>,

    #[serde(default)]
    geometry: Option<WireGeometry>,
}

#[derive(Debug, Default, Deserialize)]
struct WireProperties {
    #[serde(default)]
    mag: Option<f64>,

    #[serde(default)]
    place: Option<String>,

    #[serde(default)]
    time: Option<i64>,

    #[serde(default, rename = "Name")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireGeometry {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    coordinates: Value,
}

impl WireFeature {
    /// Convert into a [`Feature`], or `None` when there is nothing to draw.
    ///
    /// A feature whose coordinates are not valid positions is dropped on its
    /// own; the rest of the collection still decodes.
    pub(super) fn into_feature(self) -> Option<Feature> {
        let geometry = match self.geometry?.into_geometry() {
            Ok(geometry) => geometry?,
            Err(e) => {
                debug!("Skipping feature {:?}: {}", self.id, e);
                return None;
            }
        };

        let props = self.properties.unwrap_or_default();
        let id = self.id.and_then(|id| match id {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });

        Some(Feature {
            id,
            geometry,
            magnitude: props.mag,
            place: props.place,
            time_ms: props.time,
            name: props.name,
        })
    }
}

impl WireGeometry {
    fn into_geometry(self) -> Result<Option<Geometry>, DecodeError> {
        let geometry = match self.kind.as_str() {
            "Point" => {
                let position: Vec<f64> = self.coordinates_as()?;
                Geometry::Point(self.position(&position)?)
            }
            "LineString" => {
                let line: Vec<Vec<f64>> = self.coordinates_as()?;
                Geometry::Paths(vec![self.path(&line)?])
            }
            "MultiLineString" | "Polygon" => {
                let lines: Vec<Vec<Vec<f64>>> = self.coordinates_as()?;
                Geometry::Paths(self.paths(&lines)?)
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<Vec<f64>>>> = self.coordinates_as()?;
                let mut rings = Vec::new();
                for polygon in &polygons {
                    rings.extend(self.paths(polygon)?);
                }
                Geometry::Paths(rings)
            }
            _ => return Ok(None),
        };

        Ok(Some(geometry))
    }

    fn coordinates_as<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        serde_json::from_value(self.coordinates.clone()).map_err(|e| {
            debug!("Rejected {} coordinates: {}", self.kind, e);
            self.bad_coordinates()
        })
    }

    fn paths(&self, lines: &[Vec<Vec<f64>>]) -> Result<Vec<Vec<GeoPoint>>, DecodeError> {
        lines.iter().map(|line| self.path(line)).collect()
    }

    fn path(&self, line: &[Vec<f64>]) -> Result<Vec<GeoPoint>, DecodeError> {
        line.iter().map(|position| self.position(position)).collect()
    }

    // GeoJSON positions are [lon, lat, (elevation)].
    fn position(&self, position: &[f64]) -> Result<GeoPoint, DecodeError> {
        match position {
            [lon, lat, ..] => Ok(GeoPoint::new(*lat, *lon)),
            _ => Err(self.bad_coordinates()),
        }
    }

    fn bad_coordinates(&self) -> DecodeError {
        DecodeError::Coordinates {
            kind: self.kind.clone(),
        }
    }
}
