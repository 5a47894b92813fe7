//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Language model defaults.
pub mod llm {
    /// Chat model used when `OPENAI_MODEL` is unset.
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// API root used when `OPENAI_BASE_URL` is unset.
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

    /// Sampling temperature used when `OPENAI_TEMPERATURE` is unset.
    pub const DEFAULT_TEMPERATURE: f32 = 0.3;

    /// Request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// System prompt sent ahead of the extracted chord sheet text.
    pub const SYSTEM_PROMPT: &str = "You turn gospel and worship song chord sheets into JSON. \
If the text is not a gospel/Christian song, reply politely that you only process songs of that genre. \
Do not include tablature, explanations or extra formatting. \
The answer MUST be bare JSON with exactly the keys \"title\", \"author\" and \"chord_text\". \
In \"chord_text\" put each chord in square brackets right before the syllable it falls on, \
one lyric line per line.\n\n\
Example:\n\
{\n  \"title\": \"Porque Ele Vive\",\n  \"author\": \"Unknown\",\n  \
\"chord_text\": \"[D]Deus enviou Seu Filho a[G]mado\\n[Em]Pra me salvar e per[A]doar\\n...\"\n}";
}

/// Song defaults used when data is missing or a collaborator fails.
pub mod song {
    /// Title of the placeholder record saved when formatting fails.
    pub const PLACEHOLDER_TITLE: &str = "Error";

    /// Author used for placeholders and when the model omits one.
    pub const UNKNOWN_AUTHOR: &str = "Unknown";

    /// Title used when the model omits one.
    pub const UNTITLED: &str = "Untitled";

    /// Message shown when a record lookup finds nothing.
    pub const NOT_FOUND_MESSAGE: &str = "Song not found";
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}

/// Search constants.
pub mod search {
    /// Minimum fuzzy score for the history filter.
    pub const MIN_FUZZY_SCORE: i64 = 20;
}
