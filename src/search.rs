//! One search: validate the query, ask the backend, interpret and normalize
//! the answer, and fall back to the bundled list whenever anything goes
//! wrong.
//!
//! [`Searcher::search`] never fails. Every error path is logged and turned
//! into a backup result tagged with its [`FallbackReason`].

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::backup::backup_recommendations;
use crate::error::{Error, Result};
use crate::interpret::extract_candidates;
use crate::normalize::normalize_all;
use crate::recommendation::{FallbackReason, Origin, Recommendation};
use crate::webhook::RecommendationBackend;

/// A validated title/artist pair. At least one side is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    title: String,
    artist: String,
}

impl SongQuery {
    /// Trim both inputs; refuse the query when both are blank.
    pub fn new(title: &str, artist: &str) -> Result<Self> {
        let title = title.trim();
        let artist = artist.trim();
        if title.is_empty() && artist.is_empty() {
            return Err(Error::EmptyQuery);
        }
        Ok(SongQuery {
            title: title.to_string(),
            artist: artist.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }
}

/// What one search produced.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub query: SongQuery,
    pub recommendations: Vec<Recommendation>,
    pub origin: Origin,
    /// Position of this search in the order searches were started
    pub sequence: u64,
}

impl SearchResult {
    pub fn status_message(&self) -> String {
        self.origin.status_message(self.recommendations.len())
    }
}

pub struct Searcher<B> {
    backend: B,
    backup: Vec<Recommendation>,
    sequence: AtomicU64,
}

impl<B: RecommendationBackend> Searcher<B> {
    pub fn new(backend: B) -> Self {
        Self::with_backup(backend, backup_recommendations())
    }

    /// Use a different fallback list instead of the bundled one.
    pub fn with_backup(backend: B, backup: Vec<Recommendation>) -> Self {
        Searcher {
            backend,
            backup,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one search. Live results when the backend delivers a non-empty
    /// list, otherwise the backup list.
    pub fn search(&self, query: &SongQuery) -> SearchResult {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!(
            "Search #{} via {}: \"{}\" by \"{}\"",
            sequence,
            self.backend.name(),
            query.title(),
            query.artist()
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.live_results(query)))
            .unwrap_or_else(|_| Err(FallbackReason::Unexpected("search aborted".to_string())));

        let (recommendations, origin) = match outcome {
            Ok(recommendations) => {
                log::info!("Search #{}: {} AI recommendation(s)", sequence, recommendations.len());
                (recommendations, Origin::Webhook)
            }
            Err(reason) => {
                log::warn!("Search #{}: {}, using backup recommendations", sequence, reason);
                (self.backup.clone(), Origin::Backup(reason))
            }
        };

        SearchResult {
            query: query.clone(),
            recommendations,
            origin,
            sequence,
        }
    }

    fn live_results(&self, query: &SongQuery) -> std::result::Result<Vec<Recommendation>, FallbackReason> {
        let body = self.backend.fetch(query).map_err(fallback_reason)?;

        match extract_candidates(&body) {
            Some(candidates) if !candidates.is_empty() => Ok(normalize_all(&candidates)),
            _ => Err(FallbackReason::NoRecommendations),
        }
    }
}

fn fallback_reason(err: Error) -> FallbackReason {
    match err {
        Error::Transport(e) => FallbackReason::Transport(e),
        Error::HttpStatus(code) => FallbackReason::HttpStatus(code),
        Error::MalformedBody(e) => FallbackReason::MalformedBody(e),
        other => FallbackReason::Unexpected(other.to_string()),
    }
}

/// Holds the result currently on display.
///
/// Results are offered as they complete; one that belongs to an older
/// search than the held result is dropped, so a slow response can never
/// replace a newer one.
#[derive(Debug, Default)]
pub struct ResultSlot {
    current: Mutex<Option<SearchResult>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` unless a newer one is already held. Returns whether it was stored.
    pub fn offer(&self, result: SearchResult) -> bool {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(held) = current.as_ref() {
            if held.sequence > result.sequence {
                log::debug!(
                    "Discarding stale result #{} (showing #{})",
                    result.sequence,
                    held.sequence
                );
                return false;
            }
        }
        *current = Some(result);
        true
    }

    pub fn current(&self) -> Option<SearchResult> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recommendation `n` (1-based) of the held result.
    pub fn recommendation(&self, n: usize) -> Option<Recommendation> {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current
            .as_ref()
            .and_then(|result| n.checked_sub(1).and_then(|i| result.recommendations.get(i)))
            .cloned()
    }
}
