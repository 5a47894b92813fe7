//! Upload, browse and view flows.
//!
//! Each flow composes the injected collaborators and recovers locally:
//! formatting failures become placeholder songs, storage failures are logged
//! and turn into empty lists or "not found". Only an unreadable upload is
//! reported back as an error.

use std::sync::Arc;

use crate::auth::Session;
use crate::error::{Error, Result};
use crate::extract::TextExtractor;
use crate::llm::{format_or_placeholder, SongFormatter};
use crate::song::{SongDraft, SongRecord, SongSummary, SongView, UserSong};
use crate::storage::SongStore;
use crate::types::SongId;

/// Outcome of looking a song up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The song, aligned for display.
    Found(SongView),
    /// No such song.
    NotFound,
}

/// The song library and its collaborators.
#[derive(Clone)]
pub struct SongLibrary {
    store: Arc<dyn SongStore>,
    formatter: Arc<dyn SongFormatter>,
    extractor: Arc<dyn TextExtractor>,
}

impl SongLibrary {
    /// Create a library over the given collaborators.
    pub fn new(
        store: Arc<dyn SongStore>,
        formatter: Arc<dyn SongFormatter>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self { store, formatter, extractor }
    }

    /// Extract, format, save and align an uploaded document.
    ///
    /// Fails only when the document cannot be read.
    pub async fn upload(&self, session: &Session, bytes: Vec<u8>) -> Result<SongView> {
        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| Error::Extraction(format!("extraction task failed: {e}")))??;

        Ok(self.upload_text(session, &text).await)
    }

    /// Format, save and align already-extracted text.
    pub async fn upload_text(&self, session: &Session, text: &str) -> SongView {
        tracing::debug!("Formatting {} characters of chord sheet text", text.chars().count());

        let draft = format_or_placeholder(self.formatter.as_ref(), text).await;
        self.persist(session, &draft).await;
        SongView::from(&draft)
    }

    /// Save a draft and link it to the session's user.
    ///
    /// Store calls run on the blocking pool.
    async fn persist(&self, session: &Session, draft: &SongDraft) {
        let store = Arc::clone(&self.store);
        let user = session.user.clone();
        let draft = draft.clone();

        let saved = tokio::task::spawn_blocking(move || {
            let record = match store.save(&draft) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Could not save song {:?}: {e}", draft.title);
                    return;
                }
            };
            if let Some(user) = user {
                if let Err(e) = store.save_for_user(&user, &record) {
                    tracing::warn!("Could not link song {} to {user}: {e}", record.id);
                }
            }
        })
        .await;

        if let Err(e) = saved {
            tracing::warn!("Save task failed: {e}");
        }
    }

    /// All songs sorted case-insensitively by title.
    ///
    /// Empty titles sort first; equal titles keep the store's order.
    pub fn browse(&self) -> Vec<SongSummary> {
        match self.store.list_all() {
            Ok(mut songs) => {
                songs.sort_by_cached_key(|s| s.title.trim().to_lowercase());
                songs
            }
            Err(e) => {
                tracing::warn!("Could not list songs: {e}");
                Vec::new()
            }
        }
    }

    /// Look a song up by id.
    pub fn view_by_id(&self, id: SongId) -> Lookup {
        Self::lookup(self.store.find_by_id(id), &format!("id {id}"))
    }

    /// Look a song up by exact title.
    pub fn view_by_title(&self, title: &str) -> Lookup {
        Self::lookup(self.store.find_by_title(title), &format!("title {title:?}"))
    }

    /// Songs uploaded by the session's user, newest first.
    pub fn my_songs(&self, session: &Session) -> Vec<SongSummary> {
        self.history_for(session).iter().map(UserSong::summary).collect()
    }

    /// User-song links for the session's user, newest first.
    pub fn history_for(&self, session: &Session) -> Vec<UserSong> {
        let Some(user) = &session.user else {
            return Vec::new();
        };
        self.store.list_for_user(user).unwrap_or_else(|e| {
            tracing::warn!("Could not list songs for {user}: {e}");
            Vec::new()
        })
    }

    fn lookup(result: Result<Option<SongRecord>>, what: &str) -> Lookup {
        match result {
            Ok(Some(record)) => Lookup::Found(SongView::from(&record)),
            Ok(None) => Lookup::NotFound,
            Err(e) => {
                tracing::warn!("Could not look up song by {what}: {e}");
                Lookup::NotFound
            }
        }
    }
}
