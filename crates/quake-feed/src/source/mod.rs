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

//! Feed source definitions.
//!
//! A feed source names one remote GeoJSON document and says how its features
//! should be interpreted (earthquake points or boundary paths).

use serde::{Deserialize, Serialize};

/// USGS summary feed of all earthquakes in the past hour.
pub const USGS_ALL_HOUR_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson";
/// USGS summary feed of all earthquakes in the past day.
pub const USGS_ALL_DAY_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";
/// USGS summary feed of all earthquakes in the past 7 days.
pub const USGS_ALL_WEEK_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
/// USGS summary feed of all earthquakes in the past 30 days.
pub const USGS_ALL_MONTH_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson";
/// PB2002 plate boundary model (Bird, 2003) as GeoJSON line features.
pub const PB2002_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// How the features of a feed are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// Point features carrying `mag`, `place` and `time`.
    Earthquakes,
    /// Line or polygon features without magnitude or time.
    Boundaries,
}

/// A single remote GeoJSON feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    /// Stable identifier, used in error reports
    pub id: String,

    /// Display name of the overlay built from this feed
    pub name: String,

    /// Absolute URL of the GeoJSON document
    pub url: String,

    /// Interpretation of the features
    pub kind: FeedKind,
}

impl FeedSource {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        kind: FeedKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            kind,
        }
    }

    /// The four USGS time windows followed by the plate boundaries.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("all_hour", "Earthquakes Past Hour", USGS_ALL_HOUR_URL, FeedKind::Earthquakes),
            Self::new("all_day", "Earthquakes Past 24 Hours", USGS_ALL_DAY_URL, FeedKind::Earthquakes),
            Self::new("all_week", "Earthquakes Past 7 Days", USGS_ALL_WEEK_URL, FeedKind::Earthquakes),
            Self::new("all_month", "Earthquakes Past 30 Days", USGS_ALL_MONTH_URL, FeedKind::Earthquakes),
            Self::new("plates", "Tectonic Plates", PB2002_BOUNDARIES_URL, FeedKind::Boundaries),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_order_and_kinds() {
        let sources = FeedSource::defaults();
        let ids: Vec<&str> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["all_hour", "all_day", "all_week", "all_month", "plates"]);
        assert!(sources[..4].iter().all(|s| s.kind == FeedKind::Earthquakes));
        assert_eq!(sources[4].kind, FeedKind::Boundaries);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FeedKind::Boundaries).unwrap();
        assert_eq!(json, "\"boundaries\"");
    }
}
