use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::{SongStore, SongTable};
use crate::error::{Error, Result};
use crate::song::{SongDraft, SongRecord, SongSummary, UserSong};
use crate::types::{SongId, UserId};

/// Song store persisted as a single JSON document.
///
/// The whole table is kept in memory and rewritten on every insert. Writes go
/// to a sibling temp file first and are then renamed over the store.
#[derive(Debug)]
pub struct JsonSongStore {
    path: PathBuf,
    table: Mutex<SongTable>,
}

impl JsonSongStore {
    /// Open the store at `path`, creating the file and its directory if missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let table = if path.exists() {
            load_table(&path)?
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs_err::create_dir_all(parent).map_err(|e| Error::storage(e.to_string()))?;
            }
            let table = SongTable::default();
            write_table(&path, &table)?;
            tracing::info!("Created song store at {}", path.display());
            table
        };

        Ok(Self { path, table: Mutex::new(table) })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn table(&self) -> Result<MutexGuard<'_, SongTable>> {
        self.table.lock().map_err(|_| Error::storage("song table lock poisoned"))
    }

    /// Apply `f` to a copy of the table and persist it; memory only changes
    /// once the write has succeeded.
    fn mutate<T>(&self, f: impl FnOnce(&mut SongTable) -> T) -> Result<T> {
        let mut guard = self.table()?;
        let mut next = guard.clone();
        let out = f(&mut next);
        write_table(&self.path, &next)?;
        *guard = next;
        Ok(out)
    }
}

fn load_table(path: &Path) -> Result<SongTable> {
    let raw = fs_err::read_to_string(path).map_err(|e| Error::storage(e.to_string()))?;
    if raw.trim().is_empty() {
        return Ok(SongTable::default());
    }
    serde_json::from_str(&raw)
        .map_err(|e| Error::storage(format!("corrupt song store {}: {e}", path.display())))
}

fn write_table(path: &Path, table: &SongTable) -> Result<()> {
    let json = serde_json::to_string_pretty(table)
        .map_err(|e| Error::storage(format!("could not serialize songs: {e}")))?;
    let tmp = path.with_extension("json.tmp");
    fs_err::write(&tmp, json).map_err(|e| Error::storage(e.to_string()))?;
    fs_err::rename(&tmp, path).map_err(|e| Error::storage(e.to_string()))?;
    Ok(())
}

impl SongStore for JsonSongStore {
    fn save(&self, draft: &SongDraft) -> Result<SongRecord> {
        let record = self.mutate(|table| table.insert(draft))?;
        tracing::info!("Saved song {} ({:?})", record.id, record.title);
        Ok(record)
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
        self.mutate(|table| table.insert_for_user(user, record))
    }

    fn list_for_user(&self, user: &UserId) -> Result<Vec<UserSong>> {
        Ok(self.table()?.for_user(user))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_file_and_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("songs.json");
        let store = JsonSongStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_songs_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("songs.json");
        {
            let store = JsonSongStore::open(&path).unwrap();
            store.save(&SongDraft::new("Hosana", "Hillsong", "[E]Hosana")).unwrap();
            store.save(&SongDraft::new("Te Louvarei", "Toque no Altar", "")).unwrap();
        }

        let store = JsonSongStore::open(&path).unwrap();
        let found = store.find_by_title("Hosana").unwrap().unwrap();
        assert_eq!(found.id, SongId::new(1));
        assert_eq!(found.chord_text, "[E]Hosana");

        let next = store.save(&SongDraft::new("Third", "x", "")).unwrap();
        assert_eq!(next.id, SongId::new(3));
        assert!(store.find_by_id(SongId::new(99)).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_storage_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("songs.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonSongStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("songs.json");
        let store = JsonSongStore::open(&path).unwrap();

        // A directory where the temp file should go makes the write fail.
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();
        let err = store.save(&SongDraft::new("Lost", "x", "")).unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_user_songs_persist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("songs.json");
        let user = UserId::new("ana");
        {
            let store = JsonSongStore::open(&path).unwrap();
            let record = store.save(&SongDraft::new("A", "x", "[C]a")).unwrap();
            store.save_for_user(&user, &record).unwrap();
        }
        let store = JsonSongStore::open(&path).unwrap();
        let owned = store.list_for_user(&user).unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].title, "A");
    }
}
