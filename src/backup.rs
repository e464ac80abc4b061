//! Bundled fallback recommendations, shown whenever the webhook gives us
//! nothing usable.

use crate::recommendation::Recommendation;

/// One row of the bundled catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupSong {
    pub id: u32,
    pub title: &'static str,
    pub artist: &'static str,
    pub genre: &'static str,
    pub bpm: i64,
    pub energy: i64,
    pub danceability: u8,
    pub mood: &'static str,
    pub year: i64,
    pub tags: &'static [&'static str],
    pub popularity: u8,
    pub match_score: u8,
    pub reason: &'static str,
}

impl BackupSong {
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            title: self.title.to_string(),
            artist: self.artist.to_string(),
            genre: self.genre.to_string(),
            bpm: self.bpm,
            energy: self.energy,
            year: self.year,
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            match_score: self.match_score,
            reason: self.reason.to_string(),
        }
    }
}

pub const BACKUP_SONGS: &[BackupSong] = &[
    BackupSong {
        id: 1,
        title: "Save Your Tears",
        artist: "The Weeknd",
        genre: "Synth-pop",
        bpm: 118,
        energy: 72,
        danceability: 68,
        mood: "Melancholy",
        year: 2020,
        tags: &["synth", "emotional", "pop", "retro", "melodic"],
        popularity: 95,
        match_score: 92,
        reason: "Same artist, similar synth-pop sound",
    },
    BackupSong {
        id: 2,
        title: "Levitating",
        artist: "Dua Lipa",
        genre: "Disco-pop",
        bpm: 116,
        energy: 88,
        danceability: 90,
        mood: "Upbeat",
        year: 2020,
        tags: &["disco", "funk", "dance", "pop", "groovy"],
        popularity: 96,
        match_score: 85,
        reason: "Similar upbeat tempo and danceable rhythm",
    },
    BackupSong {
        id: 3,
        title: "As It Was",
        artist: "Harry Styles",
        genre: "Synth-pop",
        bpm: 174,
        energy: 78,
        danceability: 72,
        mood: "Nostalgic",
        year: 2022,
        tags: &["synth", "80s", "emotional", "pop", "nostalgic"],
        popularity: 96,
        match_score: 88,
        reason: "Similar 80s synth influences",
    },
    BackupSong {
        id: 4,
        title: "Watermelon Sugar",
        artist: "Harry Styles",
        genre: "Pop Rock",
        bpm: 95,
        energy: 80,
        danceability: 85,
        mood: "Happy",
        year: 2019,
        tags: &["summer", "feel-good", "guitar", "pop", "romantic"],
        popularity: 93,
        match_score: 78,
        reason: "Catchy pop melody and summer vibes",
    },
    BackupSong {
        id: 5,
        title: "Stay",
        artist: "The Kid LAROI, Justin Bieber",
        genre: "Pop",
        bpm: 170,
        energy: 75,
        danceability: 65,
        mood: "Emotional",
        year: 2021,
        tags: &["emo", "melodic", "pop", "heartbreak", "melancholy"],
        popularity: 92,
        match_score: 82,
        reason: "Similar emotional pop style",
    },
    BackupSong {
        id: 6,
        title: "Good 4 U",
        artist: "Olivia Rodrigo",
        genre: "Pop Rock",
        bpm: 166,
        energy: 92,
        danceability: 88,
        mood: "Angry",
        year: 2021,
        tags: &["punk", "guitar", "angsty", "pop", "rock"],
        popularity: 91,
        match_score: 75,
        reason: "High energy pop with rock influences",
    },
];

/// The backup list in display form, in table order.
pub fn backup_recommendations() -> Vec<Recommendation> {
    BACKUP_SONGS.iter().map(BackupSong::to_recommendation).collect()
}
