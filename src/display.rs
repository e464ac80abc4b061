//! Terminal rendering of search results.
//!
//! A result renders as a header for the song that was searched for, the
//! status line, a result count and one card per recommendation:
//!
//! ```text
//!   1. Save Your Tears
//!      The Weeknd
//!      92% Match  Same artist, similar synth-pop sound
//!      [████████████████████████████░░]
//!      Genre: Synth-pop   BPM: 118   Year: 2020
//!      #synth #emotional #pop [Backup]
//! ```
//!
//! Everything writes into any `io::Write`, coloured with crossterm when
//! `color` is set and as plain text otherwise.

use std::io::{self, Write};
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::recommendation::{Origin, Recommendation};
use crate::search::{SearchResult, SongQuery};

/// Width of the match bar in character cells.
pub const MATCH_BAR_WIDTH: usize = 30;

/// Number of tags shown per card.
pub const CARD_TAGS: usize = 3;

/// Write `text`, coloured when `color` is enabled.
fn paint<W: Write>(out: &mut W, text: &str, fg: Color, color: bool) -> io::Result<()> {
    if color {
        queue!(out, SetForegroundColor(fg), Print(text), ResetColor)
    } else {
        write!(out, "{}", text)
    }
}

fn bold<W: Write>(out: &mut W, text: &str, color: bool) -> io::Result<()> {
    if color {
        queue!(out, SetAttribute(Attribute::Bold), Print(text), SetAttribute(Attribute::Reset))
    } else {
        write!(out, "{}", text)
    }
}

/// Colour for a match score, matching the bar.
fn score_color(score: u8) -> Color {
    if score >= 85 {
        Color::Green
    } else if score >= 70 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Render the song being searched for.
pub fn render_query<W: Write>(out: &mut W, query: &SongQuery, color: bool) -> io::Result<()> {
    let artist = if query.artist().is_empty() { "Unknown Artist" } else { query.artist() };

    bold(out, &format!("\"{}\"", query.title()), color)?;
    writeln!(out)?;
    paint(out, artist, Color::Grey, color)?;
    write!(out, "\n\n")?;
    Ok(())
}

/// Render the transient status line shown after a search.
pub fn render_status<W: Write>(out: &mut W, result: &SearchResult, color: bool) -> io::Result<()> {
    let (icon, fg) = match result.origin {
        Origin::Webhook => ("✓", Color::Green),
        Origin::Backup(_) => ("!", Color::Red),
    };
    paint(out, &format!("{} {}", icon, result.status_message()), fg, color)?;
    writeln!(out)?;
    Ok(())
}

/// Draw a bar of `MATCH_BAR_WIDTH` cells, filled in proportion to `score`.
pub fn render_match_bar<W: Write>(out: &mut W, score: u8, color: bool) -> io::Result<()> {
    let filled = (score as usize * MATCH_BAR_WIDTH + 50) / 100;
    let filled = filled.min(MATCH_BAR_WIDTH);

    write!(out, "[")?;
    paint(out, &"█".repeat(filled), score_color(score), color)?;
    write!(out, "{}]", "░".repeat(MATCH_BAR_WIDTH - filled))?;
    Ok(())
}

/// Render one recommendation card. `position` is 1-based.
pub fn render_card<W: Write>(
    out: &mut W,
    position: usize,
    rec: &Recommendation,
    origin: &Origin,
    color: bool,
) -> io::Result<()> {
    write!(out, "{:>3}. ", position)?;
    bold(out, &rec.title, color)?;
    write!(out, "\n     {}\n     ", rec.artist)?;

    paint(out, &format!("{}% Match", rec.match_score), score_color(rec.match_score), color)?;
    write!(out, "  {}\n     ", rec.reason)?;

    render_match_bar(out, rec.match_score, color)?;
    write!(
        out,
        "\n     Genre: {}   BPM: {}   Year: {}\n     ",
        rec.genre, rec.bpm, rec.year
    )?;

    for tag in rec.tags.iter().take(CARD_TAGS) {
        write!(out, "#{} ", tag)?;
    }
    let badge_color = if origin.is_backup() { Color::Blue } else { Color::Magenta };
    paint(out, &format!("[{}]", origin.badge()), badge_color, color)?;
    write!(out, "\n\n")?;
    Ok(())
}

/// Render a full search result: header, status, count and all cards.
pub fn render_results<W: Write>(out: &mut W, result: &SearchResult, color: bool) -> io::Result<()> {
    render_query(out, &result.query, color)?;
    render_status(out, result, color)?;
    write!(out, "{} results\n\n", result.recommendations.len())?;

    for (i, rec) in result.recommendations.iter().enumerate() {
        render_card(out, i + 1, rec, &result.origin, color)?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::backup_recommendations;
    use crate::recommendation::FallbackReason;

    fn render_plain(result: &SearchResult) -> String {
        let mut buf = Vec::new();
        render_results(&mut buf, result, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn backup_result() -> SearchResult {
        SearchResult {
            query: SongQuery::new("Blinding Lights", "").unwrap(),
            recommendations: backup_recommendations(),
            origin: Origin::Backup(FallbackReason::HttpStatus(502)),
            sequence: 1,
        }
    }

    #[test]
    fn test_match_bar_fill() {
        let mut buf = Vec::new();
        render_match_bar(&mut buf, 50, false).unwrap();
        let bar = String::from_utf8(buf).unwrap();
        assert_eq!(bar.matches('█').count(), 15);
        assert_eq!(bar.matches('░').count(), 15);

        let mut buf = Vec::new();
        render_match_bar(&mut buf, 100, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().matches('█').count(), MATCH_BAR_WIDTH);
    }

    #[test]
    fn test_backup_cards() {
        let text = render_plain(&backup_result());

        assert!(text.contains("\"Blinding Lights\""));
        assert!(text.contains("Unknown Artist"));
        assert!(text.contains("Using backup recommendations..."));
        assert!(text.contains("6 results"));
        assert!(text.contains("  1. Save Your Tears"));
        assert!(text.contains("92% Match"));
        assert!(text.contains("#synth #emotional #pop [Backup]"));
        assert!(!text.contains("#retro"));
        assert_eq!(text.matches("[Backup]").count(), 6);
    }

    #[test]
    fn test_webhook_cards_get_ai_badge() {
        let mut result = backup_result();
        result.origin = Origin::Webhook;
        result.recommendations.truncate(2);

        let text = render_plain(&result);
        assert!(text.contains("AI found 2 recommendations!"));
        assert_eq!(text.matches("[AI]").count(), 2);
    }

    #[test]
    fn test_plain_output_uses_unix_line_endings() {
        let text = render_plain(&backup_result());
        assert!(!text.contains('\r'));
        assert!(text.contains("Year: 2020\n"));
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let text = render_plain(&backup_result());
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_color_output_has_escapes() {
        let mut buf = Vec::new();
        render_results(&mut buf, &backup_result(), true).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains('\u{1b}'));
    }
}
