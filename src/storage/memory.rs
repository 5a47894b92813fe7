use std::sync::{Mutex, MutexGuard};

use super::{SongStore, SongTable};
use crate::error::{Error, Result};
use crate::song::{SongDraft, SongRecord, SongSummary, UserSong};
use crate::types::{SongId, UserId};

/// In-memory song store, used when no data directory is available and in tests.
#[derive(Debug, Default)]
pub struct MemorySongStore {
    table: Mutex<SongTable>,
}

impl MemorySongStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<MutexGuard<'_, SongTable>> {
        self.table.lock().map_err(|_| Error::storage("song table lock poisoned"))
    }
}

impl SongStore for MemorySongStore {
    fn save(&self, draft: &SongDraft) -> Result<SongRecord> {
        Ok(self.table()?.insert(draft))
    }

    fn list_all(&self) -> Result<Vec<SongSummary>> {
        Ok(self.table()?.summaries())
    }

    fn find_by_id(&self, id: SongId) -> Result<Option<SongRecord>> {
        Ok(self.table()?.by_id(id))
    }

    fn find_by_title(&self, title: &str) -> Result<Option<SongRecord>> {
        Ok(self.table()?.by_title(title))
    }

    fn save_for_user(&self, user: &UserId, record: &SongRecord) -> Result<UserSong> {
        Ok(self.table()?.insert_for_user(user, record))
    }

    fn list_for_user(&self, user: &UserId) -> Result<Vec<UserSong>> {
        Ok(self.table()?.for_user(user))
    }
}
