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

//! Async feed retrieval.
//!
//! Every feed is independent, so [`FeedClient::fetch_all`] requests all of them
//! at once and waits for the whole set before returning. Failures are reported
//! per feed; one bad feed never hides the others. There is no retry.

use std::time::Duration;

use log::{info, warn};
use thiserror::Error;
use tokio::task::JoinSet;

use crate::geojson::{parse_feature_collection, Feature};
use crate::source::FeedSource;

/// Errors reported for a single feed. Each variant names the failing feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("failed to fetch feed '{feed}': {reason}")]
    FetchFailed { feed: String, reason: String },

    #[error("feed '{feed}' answered with HTTP {status}")]
    HttpStatus { feed: String, status: u16 },

    #[error("feed '{feed}' is not a GeoJSON feature collection: {reason}")]
    Malformed { feed: String, reason: String },
}

impl FeedError {
    /// Identifier of the feed that failed.
    #[must_use]
    pub fn feed(&self) -> &str {
        match self {
            Self::FetchFailed { feed, .. }
            | Self::HttpStatus { feed, .. }
            | Self::Malformed { feed, .. } => feed,
        }
    }
}

/// HTTP settings for feed requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upper bound for one request, connection through body.
    pub timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            user_agent: concat!("quake-feed/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Result of fetching one feed, paired with its source.
#[derive(Debug, Clone)]
pub struct FeedOutcome {
    pub source: FeedSource,
    pub result: Result<Vec<Feature>, FeedError>,
}

/// Feed client wrapping a shared HTTP connection pool.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch and decode a single feed.
    pub async fn fetch(&self, source: &FeedSource) -> Result<Vec<Feature>, FeedError> {
        info!("Fetching {} from {}", source.id, source.url);

        let response = self
            .http
            .get(&source.url)
            .send()
            .await
            .map_err(|e| FeedError::FetchFailed {
                feed: source.id.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                feed: source.id.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FeedError::FetchFailed {
            feed: source.id.clone(),
            reason: e.to_string(),
        })?;

        let features = parse_feature_collection(&body).map_err(|e| FeedError::Malformed {
            feed: source.id.clone(),
            reason: e.to_string(),
        })?;

        info!("Loaded {} features from {} ({} bytes)", features.len(), source.id, body.len());
        Ok(features)
    }

    /// Fetch every feed concurrently.
    ///
    /// Returns once all requests have completed. Outcomes are in the same
    /// order as `sources`, whatever order the responses arrived in.
    pub async fn fetch_all(&self, sources: &[FeedSource]) -> Vec<FeedOutcome> {
        let mut tasks = JoinSet::new();
        for (index, source) in sources.iter().enumerate() {
            let client = self.clone();
            let source = source.clone();
            tasks.spawn(async move {
                let result = client.fetch(&source).await;
                (index, result)
            });
        }

        let mut results: Vec<Option<Result<Vec<Feature>, FeedError>>> = vec![None; sources.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => warn!("Feed task ended abnormally: {}", e),
            }
        }

        sources
            .iter()
            .zip(results)
            .map(|(source, result)| {
                let result = result.unwrap_or_else(|| {
                    Err(FeedError::FetchFailed {
                        feed: source.id.clone(),
                        reason: "fetch task ended before completing".to_string(),
                    })
                });
                if let Err(e) = &result {
                    warn!("{}", e);
                }
                FeedOutcome {
                    source: source.clone(),
                    result,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_feed() {
        let errors = [
            FeedError::FetchFailed { feed: "all_hour".into(), reason: "dns".into() },
            FeedError::HttpStatus { feed: "all_hour".into(), status: 503 },
            FeedError::Malformed { feed: "all_hour".into(), reason: "eof".into() },
        ];
        for error in &errors {
            assert_eq!(error.feed(), "all_hour");
            assert!(error.to_string().contains("'all_hour'"));
        }
    }

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("quake-feed/"));
    }

    #[tokio::test]
    async fn test_fetch_all_empty() {
        let client = FeedClient::new(&FetchConfig::default()).unwrap();
        assert!(client.fetch_all(&[]).await.is_empty());
    }
}
