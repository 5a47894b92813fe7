//! Chat-completion wire types.
//!
//! Only the fields the client reads or writes are modelled.

use serde::{Deserialize, Serialize};

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// `system`, `user` or `assistant`.
    pub role: String,
    /// Message text; absent for some tool-call responses.
    #[serde(default)]
    pub content: Option<String>,
}

impl Message {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: Some(content.into()) }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: Some(content.into()) }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<Message>,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Response body of `POST /chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completions, usually one.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The assistant's reply.
    pub message: Message,
}

impl ChatResponse {
    /// Trimmed text of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
    }
}

/// Song JSON as the model returns it.
///
/// Portuguese keys (`titulo`, `autor`, `cifra`) are accepted as well.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongPayload {
    /// Song title.
    #[serde(default, alias = "titulo")]
    pub title: Option<String>,
    /// Author or artist.
    #[serde(default, alias = "autor")]
    pub author: Option<String>,
    /// Lyrics with inline `[chord]` tokens.
    #[serde(default, alias = "chords", alias = "cifra")]
    pub chord_text: Option<String>,
}
