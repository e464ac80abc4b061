//! "Listen" links: a video search for the recommended song, opened in the
//! user's browser.

use crate::error::{Error, Result};

pub const VIDEO_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

/// Words of `"{title} {artist} official audio"` with everything that is not
/// a letter, digit, underscore or whitespace treated as a separator.
fn query_words(title: &str, artist: &str) -> Vec<String> {
    let raw = format!("{} {} official audio", title, artist);
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().map(String::from).collect()
}

/// The search query with whitespace runs collapsed to `+`, before URL encoding.
pub fn search_query(title: &str, artist: &str) -> String {
    query_words(title, artist).join("+")
}

/// Full video-search URL for a song.
pub fn search_url(title: &str, artist: &str) -> String {
    let encoded: Vec<String> = query_words(title, artist)
        .iter()
        .map(|w| urlencoding::encode(w).into_owned())
        .collect();
    format!("{}{}", VIDEO_SEARCH_URL, encoded.join("+"))
}

/// Open the video search for a song in the default browser.
pub fn open_search(title: &str, artist: &str) -> Result<String> {
    let url = search_url(title, artist);
    log::info!("Opening video search for \"{}\" by {}", title, artist);
    webbrowser::open(&url).map_err(|e| Error::Browser(e.to_string()))?;
    Ok(url)
}
