//! Song data types.
//!
//! A [`SongDraft`] is what the formatter produces and the store saves; the
//! store hands back [`SongRecord`]s and [`SongSummary`]s.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chords::{align, AlignedDocument};
use crate::constants::song::{PLACEHOLDER_TITLE, UNKNOWN_AUTHOR};
use crate::types::{SongId, UserId};

/// Structured song data before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDraft {
    /// Song title.
    pub title: String,
    /// Author or artist.
    pub author: String,
    /// Lyrics with inline `[Chord]` tokens.
    pub chord_text: String,
}

impl SongDraft {
    /// Create a draft from its parts.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        chord_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            chord_text: chord_text.into(),
        }
    }

    /// Stand-in saved when the song could not be formatted.
    pub fn placeholder(message: impl Into<String>) -> Self {
        Self::new(PLACEHOLDER_TITLE, UNKNOWN_AUTHOR, message)
    }
}

/// A persisted song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Store-assigned identifier.
    pub id: SongId,
    /// Song title.
    pub title: String,
    /// Author or artist.
    pub author: String,
    /// Lyrics with inline `[Chord]` tokens.
    pub chord_text: String,
    /// When the record was saved.
    pub inserted_at: DateTime<Utc>,
}

impl SongRecord {
    /// Id, title and author only.
    pub fn summary(&self) -> SongSummary {
        SongSummary {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }
}

/// Listing entry for the history screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    /// Store-assigned identifier.
    pub id: SongId,
    /// Song title.
    pub title: String,
    /// Author or artist.
    pub author: String,
}

/// A song linked to the account that uploaded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSong {
    /// Identifier within the user-song table.
    pub id: u64,
    /// Owning account.
    pub user_id: UserId,
    /// The saved song this entry links to.
    pub song_id: SongId,
    /// Song title.
    pub title: String,
    /// Author or artist.
    pub author: String,
    /// Structured song content.
    pub content: serde_json::Value,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

impl UserSong {
    /// Listing entry pointing at the linked song.
    pub fn summary(&self) -> SongSummary {
        SongSummary {
            id: self.song_id,
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }
}

/// What the presentation screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongView {
    /// Song title.
    pub title: String,
    /// Author or artist.
    pub author: String,
    /// Chord rows over lyric rows.
    pub lines: AlignedDocument,
}

impl SongView {
    /// Align a song's chord text for display.
    pub fn new(title: impl Into<String>, author: impl Into<String>, chord_text: &str) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            lines: align(chord_text),
        }
    }
}

impl From<&SongRecord> for SongView {
    fn from(record: &SongRecord) -> Self {
        Self::new(&record.title, &record.author, &record.chord_text)
    }
}

impl From<&SongDraft> for SongView {
    fn from(draft: &SongDraft) -> Self {
        Self::new(&draft.title, &draft.author, &draft.chord_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_draft() {
        let draft = SongDraft::placeholder("Connection failed: timeout");
        assert_eq!(draft.title, "Error");
        assert_eq!(draft.author, "Unknown");
        assert_eq!(draft.chord_text, "Connection failed: timeout");
    }

    #[test]
    fn test_view_aligns_chord_text() {
        let draft = SongDraft::new("Porque Ele Vive", "Unknown", "[D]Deus\n[G]mado");
        let view = SongView::from(&draft);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines.lines()[1].lyric_row, "   mado");
    }
}
