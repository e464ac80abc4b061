//! Turn loosely typed candidate records into [`Recommendation`]s.
//!
//! Nothing in a candidate is trusted: every field may be missing or of the
//! wrong type. Missing fields get deterministic, position-dependent defaults
//! so a sparse response still renders as a stable list of cards.

use serde_json::Value;

use crate::recommendation::Recommendation;

pub const DEFAULT_ARTIST: &str = "Various Artist";
pub const DEFAULT_GENRE: &str = "Various";
pub const DEFAULT_REASON: &str = "AI recommended based on your search";
pub const PLACEHOLDER_TAGS: [&str; 3] = ["recommended", "popular", "similar"];

/// Normalize every candidate, in order.
pub fn normalize_all(candidates: &[Value]) -> Vec<Recommendation> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| normalize_candidate(candidate, index))
        .collect()
}

/// Normalize the candidate found at `index` (0-based) in the response list.
pub fn normalize_candidate(candidate: &Value, index: usize) -> Recommendation {
    let i = index as i64;

    let genre = text_field(candidate, "genre");
    let tags = tags_for(candidate, genre.as_deref());

    Recommendation {
        title: text_field(candidate, "title").unwrap_or_else(|| format!("Song {}", index + 1)),
        artist: text_field(candidate, "artist").unwrap_or_else(|| DEFAULT_ARTIST.to_string()),
        genre: genre.unwrap_or_else(|| DEFAULT_GENRE.to_string()),
        bpm: int_field(candidate, "bpm").unwrap_or(120 + i * 10),
        energy: int_field(candidate, "energy").unwrap_or(70 + i * 5),
        year: int_field(candidate, "year").unwrap_or(2020 + i),
        tags,
        match_score: match_score(candidate.get("matchScore"), index),
        reason: text_field(candidate, "reason").unwrap_or_else(|| DEFAULT_REASON.to_string()),
    }
}

/// Score on a 0..=100 scale.
///
/// Values up to 10 are read as a 0-10 rating and scaled by ten; larger
/// values are taken as a percentage. Non-numeric or missing scores fall
/// back to `85 - 5 * index`.
pub fn match_score(raw: Option<&Value>, index: usize) -> u8 {
    let score = match raw.and_then(Value::as_f64) {
        Some(x) if x <= 10.0 => (x * 10.0).round(),
        Some(x) => x.round(),
        None => 85.0 - 5.0 * index as f64,
    };
    score.clamp(0.0, 100.0) as u8
}

fn tags_for(candidate: &Value, genre: Option<&str>) -> Vec<String> {
    if let Some(items) = candidate.get("tags").and_then(Value::as_array) {
        return items.iter().filter_map(scalar_text).collect();
    }
    match genre {
        Some(genre) => vec![genre.to_string()],
        None => PLACEHOLDER_TAGS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Render a scalar as text; containers and null have no text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn text_field(candidate: &Value, key: &str) -> Option<String> {
    match candidate.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn int_field(candidate: &Value, key: &str) -> Option<i64> {
    let value = match candidate.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if value == 0.0 || !value.is_finite() {
        return None;
    }
    Some(value.round() as i64)
}
