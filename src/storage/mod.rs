//! Song persistence.
//!
//! [`SongStore`] is the seam the flows depend on. [`JsonSongStore`] keeps the
//! songs in a JSON file; [`MemorySongStore`] keeps them in memory.

mod json;
mod memory;

pub use json::JsonSongStore;
pub use memory::MemorySongStore;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::song::{SongDraft, SongRecord, SongSummary, UserSong};
use crate::types::{SongId, UserId};

/// Storage for song records.
pub trait SongStore: Send + Sync {
    /// Persist a draft, assigning the next id.
    fn save(&self, draft: &SongDraft) -> Result<SongRecord>;

    /// All songs, newest first.
    fn list_all(&self) -> Result<Vec<SongSummary>>;

    /// Look up a song by id.
    fn find_by_id(&self, id: SongId) -> Result<Option<SongRecord>>;

    /// Look up a song by exact title; the earliest match wins.
    fn find_by_title(&self, title: &str) -> Result<Option<SongRecord>>;

    /// Link a saved song to the account that uploaded it.
    fn save_for_user(&self, user: &UserId, record: &SongRecord) -> Result<UserSong>;

    /// Songs linked to an account, newest first.
    fn list_for_user(&self, user: &UserId) -> Result<Vec<UserSong>>;
}

/// The persisted document shared by both store implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SongTable {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    songs: Vec<SongRecord>,
    #[serde(default = "first_id")]
    next_user_song_id: u64,
    #[serde(default)]
    user_songs: Vec<UserSong>,
}

const fn first_id() -> u64 {
    1
}

impl Default for SongTable {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            songs: Vec::new(),
            next_user_song_id: first_id(),
            user_songs: Vec::new(),
        }
    }
}

impl SongTable {
    pub(crate) fn insert(&mut self, draft: &SongDraft) -> SongRecord {
        let record = SongRecord {
            id: SongId::new(self.next_id),
            title: draft.title.clone(),
            author: draft.author.clone(),
            chord_text: draft.chord_text.clone(),
            inserted_at: Utc::now(),
        };
        self.next_id += 1;
        self.songs.push(record.clone());
        record
    }

    pub(crate) fn summaries(&self) -> Vec<SongSummary> {
        let mut out: Vec<_> = self.songs.iter().map(SongRecord::summary).collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        out
    }

    pub(crate) fn by_id(&self, id: SongId) -> Option<SongRecord> {
        self.songs.iter().find(|s| s.id == id).cloned()
    }

    pub(crate) fn by_title(&self, title: &str) -> Option<SongRecord> {
        self.songs
            .iter()
            .filter(|s| s.title == title)
            .min_by_key(|s| s.id)
            .cloned()
    }

    pub(crate) fn insert_for_user(&mut self, user: &UserId, record: &SongRecord) -> UserSong {
        let entry = UserSong {
            id: self.next_user_song_id,
            user_id: user.clone(),
            song_id: record.id,
            title: record.title.clone(),
            author: record.author.clone(),
            content: serde_json::json!({
                "title": record.title,
                "author": record.author,
                "chord_text": record.chord_text,
            }),
            created_at: Utc::now(),
        };
        self.next_user_song_id += 1;
        self.user_songs.push(entry.clone());
        entry
    }

    pub(crate) fn for_user(&self, user: &UserId) -> Vec<UserSong> {
        let mut out: Vec<_> = self
            .user_songs
            .iter()
            .filter(|s| &s.user_id == user)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        out
    }
}
