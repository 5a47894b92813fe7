//! Language model integration.
//!
//! Sends extracted chord sheet text to an OpenAI-compatible chat-completion
//! API and turns the answer into a [`SongDraft`](crate::song::SongDraft).

/// API client for chat-completion requests
pub mod api;
/// Recovering song JSON from free-form model output
pub mod parse;
/// Wire types for the chat-completion API
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::song::SongDraft;

// Re-export key components
pub use api::ChatClient;
pub use parse::{extract_json_object, parse_song_json};

/// Turns free text into structured song data.
#[async_trait]
pub trait SongFormatter: Send + Sync {
    /// Structure the text of a chord sheet.
    async fn format_song(&self, text: &str) -> Result<SongDraft>;
}

/// Format a song, falling back to a placeholder draft on any failure.
///
/// The failure is logged and its message becomes the placeholder's chord text.
pub async fn format_or_placeholder(formatter: &dyn SongFormatter, text: &str) -> SongDraft {
    match formatter.format_song(text).await {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!("Song formatting failed, saving placeholder: {e}");
            SongDraft::placeholder(e.user_message())
        }
    }
}
