//! Recommendation webhook client.
//!
//! Sends the user's song to the remote recommendation workflow as a single
//! JSON POST and hands back the parsed response body. Interpreting that body
//! is left to [`crate::interpret`].
//!
//! # Example
//! ```no_run
//! use songmatch::search::SongQuery;
//! use songmatch::webhook::{RecommendationBackend, WebhookBackend};
//!
//! let backend = WebhookBackend::new("https://example.org/webhook");
//! let query = SongQuery::new("Blinding Lights", "The Weeknd")?;
//! let body = backend.fetch(&query)?;
//! # Ok::<(), songmatch::Error>(())
//! ```

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::search::SongQuery;

/// Body of the POST sent to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    pub song_title: String,
    pub artist: String,
    /// RFC 3339, UTC, millisecond precision
    pub timestamp: String,
    pub user_agent: String,
    pub platform: String,
}

impl SearchPayload {
    pub fn new(query: &SongQuery) -> Self {
        SearchPayload {
            song_title: query.title().to_string(),
            artist: query.artist().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent: user_agent(),
            platform: platform(),
        }
    }
}

/// `songmatch/<version> (<os>; <arch>)`
pub fn user_agent() -> String {
    format!(
        "songmatch/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

pub fn platform() -> String {
    format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
}

// ---------------------------------------------------------------------------
// Backend seam
// ---------------------------------------------------------------------------

/// Anything that can answer a song query with a raw JSON body.
pub trait RecommendationBackend {
    /// Short display name for log messages.
    fn name(&self) -> &str;

    /// Fetch the raw response for one query. Must not retry.
    fn fetch(&self, query: &SongQuery) -> Result<Value>;
}

/// The HTTP webhook backend.
pub struct WebhookBackend {
    url: String,
    agent: ureq::Agent,
}

impl WebhookBackend {
    pub fn new(url: &str) -> Self {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .user_agent(&user_agent())
                .build(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RecommendationBackend for WebhookBackend {
    fn name(&self) -> &str {
        "webhook"
    }

    fn fetch(&self, query: &SongQuery) -> Result<Value> {
        let payload = SearchPayload::new(query);
        log::debug!("Sending to webhook {}: {:?}", self.url, payload);

        let response = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .send_json(&payload)?;

        let status = response.status();
        let text = response.into_string()?;
        log::debug!("Webhook response ({}): {}", status, text);

        serde_json::from_str(&text).map_err(|e| Error::MalformedBody(e.to_string()))
    }
}
