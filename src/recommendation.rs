//! Canonical recommendation record and where a result set came from.

use serde::Serialize;
use std::fmt;

/// A fully populated song card, after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub bpm: i64,
    pub energy: i64,
    pub year: i64,
    pub tags: Vec<String>,
    /// Always within 0..=100
    pub match_score: u8,
    pub reason: String,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({}% match)", self.title, self.artist, self.match_score)
    }
}

/// Why the backup list was shown instead of live results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No HTTP answer at all
    Transport(String),
    /// The webhook answered with a non-success status
    HttpStatus(u16),
    /// Success status, but the body was not JSON
    MalformedBody(String),
    /// JSON we could not find a non-empty recommendation list in
    NoRecommendations,
    /// Any other failure during the search
    Unexpected(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Transport(e) => write!(f, "connection failed ({})", e),
            FallbackReason::HttpStatus(code) => write!(f, "webhook responded with status {}", code),
            FallbackReason::MalformedBody(e) => write!(f, "malformed response ({})", e),
            FallbackReason::NoRecommendations => write!(f, "no recommendations in response"),
            FallbackReason::Unexpected(e) => write!(f, "{}", e),
        }
    }
}

/// Source of a displayed result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Webhook,
    Backup(FallbackReason),
}

impl Origin {
    pub fn is_backup(&self) -> bool {
        matches!(self, Origin::Backup(_))
    }

    /// Badge shown on every card of the result set
    pub fn badge(&self) -> &'static str {
        match self {
            Origin::Webhook => "AI",
            Origin::Backup(_) => "Backup",
        }
    }

    /// One-line status, as shown after the search finishes
    pub fn status_message(&self, count: usize) -> String {
        match self {
            Origin::Webhook => format!("AI found {} recommendations!", count),
            Origin::Backup(FallbackReason::Transport(_))
            | Origin::Backup(FallbackReason::MalformedBody(_)) => {
                "Connection failed. Using backup...".to_string()
            }
            Origin::Backup(FallbackReason::Unexpected(_)) => {
                "Using backup recommendations".to_string()
            }
            Origin::Backup(_) => "Using backup recommendations...".to_string(),
        }
    }
}
