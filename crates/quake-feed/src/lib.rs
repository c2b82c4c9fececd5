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

//! Earthquake and plate boundary feed client.
//!
//! This library retrieves GeoJSON feature collections (USGS earthquake summary
//! feeds, PB2002 plate boundaries) and decodes them into immutable [`Feature`]
//! records. It is split into layers that can be used independently:
//!
//! - **Source layer**: feed definitions and the default USGS/PB2002 endpoints
//! - **GeoJSON layer**: decoding of feature collections into points and paths
//! - **Fetch layer**: async HTTP retrieval with concurrent fan-out over many feeds
//!
//! # Quick Start
//!
//! ```no_run
//! use quake_feed::{FeedClient, FeedSource, FetchConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = FeedClient::new(&FetchConfig::default()).expect("http client");
//!     for outcome in client.fetch_all(&FeedSource::defaults()).await {
//!         match outcome.result {
//!             Ok(features) => println!("{}: {} features", outcome.source.name, features.len()),
//!             Err(e) => eprintln!("{e}"),
//!         }
//!     }
//! }
//! ```
//!
//! # Decoding Only
//!
//! ```
//! use quake_feed::geojson::{parse_feature_collection, Geometry};
//!
//! let body = br#"{"type":"FeatureCollection","features":[
//!     {"type":"Feature","id":"ci1",
//!      "properties":{"mag":3.5,"place":"10km N of Testville","time":1609459200000},
//!      "geometry":{"type":"Point","coordinates":[-117.5,34.1,8.2]}}]}"#;
//!
//! let features = parse_feature_collection(body).unwrap();
//! assert_eq!(features[0].magnitude, Some(3.5));
//! assert!(matches!(features[0].geometry, Geometry::Point(_)));
//! ```

pub mod fetch;
pub mod geojson;
pub mod source;

pub use fetch::{FeedClient, FeedError, FeedOutcome, FetchConfig};
pub use geojson::{parse_feature_collection, DecodeError, Feature, GeoPoint, Geometry};
pub use source::{FeedKind, FeedSource};
