//! Example songs and form prefill from shared links.

/// A ready-made example search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub title: &'static str,
    pub artist: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset { name: "weeknd", title: "Blinding Lights", artist: "The Weeknd" },
    Preset { name: "queen", title: "Bohemian Rhapsody", artist: "Queen" },
    Preset { name: "sheeran", title: "Shape of You", artist: "Ed Sheeran" },
    Preset { name: "nirvana", title: "Smells Like Teen Spirit", artist: "Nirvana" },
    Preset { name: "eilish", title: "bad guy", artist: "Billie Eilish" },
];

/// Pre-filled when nothing else is given.
pub const DEFAULT_EXAMPLE: Preset = PRESETS[0];

/// Look a preset up by name (case-insensitive) or 1-based number.
pub fn find_preset(key: &str) -> Option<Preset> {
    let key = key.trim();
    if let Ok(n) = key.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| PRESETS.get(i)).copied();
    }
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(key)).copied()
}

/// Title and artist taken from a link's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefill {
    pub title: String,
    pub artist: String,
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Read the `title` and `artist` parameters from a URL or bare query string.
///
/// Returns `None` when neither parameter carries a value. The first
/// occurrence of a repeated parameter wins.
pub fn parse_prefill(url_or_query: &str) -> Option<Prefill> {
    let without_fragment = url_or_query.split('#').next().unwrap_or("");
    let query = match without_fragment.split_once('?') {
        Some((_, q)) => q,
        None if without_fragment.contains('=') => without_fragment,
        None => "",
    };

    let mut title: Option<String> = None;
    let mut artist: Option<String> = None;
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let slot = match decode_component(key).as_str() {
            "title" => &mut title,
            "artist" => &mut artist,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(decode_component(value));
        }
    }

    let title = title.unwrap_or_default();
    let artist = artist.unwrap_or_default();
    if title.is_empty() && artist.is_empty() {
        return None;
    }
    Some(Prefill { title, artist })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_preset() {
        assert_eq!(find_preset("queen").unwrap().title, "Bohemian Rhapsody");
        assert_eq!(find_preset("QUEEN").unwrap().artist, "Queen");
        assert_eq!(find_preset("1").unwrap(), DEFAULT_EXAMPLE);
        assert!(find_preset("0").is_none());
        assert!(find_preset("99").is_none());
        assert!(find_preset("abba").is_none());
    }

    #[test]
    fn test_prefill_from_url() {
        let prefill = parse_prefill("https://songs.example/?title=Take+On+Me&artist=a-ha#results").unwrap();
        assert_eq!(prefill.title, "Take On Me");
        assert_eq!(prefill.artist, "a-ha");
    }

    #[test]
    fn test_prefill_percent_encoded() {
        let prefill = parse_prefill("?artist=Beyonc%C3%A9").unwrap();
        assert_eq!(prefill.title, "");
        assert_eq!(prefill.artist, "Beyoncé");
    }

    #[test]
    fn test_prefill_bare_query_first_wins() {
        let prefill = parse_prefill("title=One&title=Two").unwrap();
        assert_eq!(prefill.title, "One");
    }

    #[test]
    fn test_prefill_absent() {
        assert!(parse_prefill("https://songs.example/").is_none());
        assert!(parse_prefill("https://songs.example/?title=&artist=").is_none());
        assert!(parse_prefill("?page=2").is_none());
    }
}
