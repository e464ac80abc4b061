pub mod backup;
pub mod config;
pub mod display;
pub mod error;
pub mod interpret;
pub mod listen;
pub mod normalize;
pub mod presets;
pub mod recommendation;
pub mod search;
pub mod webhook;

pub use backup::{backup_recommendations, BackupSong, BACKUP_SONGS};
pub use config::Config;
pub use display::render_results;
pub use error::{Error, Result};
pub use interpret::extract_candidates;
pub use normalize::{normalize_all, normalize_candidate};
pub use recommendation::{FallbackReason, Origin, Recommendation};
pub use search::{ResultSlot, SearchResult, Searcher, SongQuery};
pub use webhook::{RecommendationBackend, WebhookBackend};
