//! Recovering song JSON from model output.
//!
//! Models often wrap the JSON in chatter ("Sure! Here it is: {...}") or code
//! fences, so the object is cut out by its outermost braces before parsing.

use crate::constants::song::{UNKNOWN_AUTHOR, UNTITLED};
use crate::error::{Error, Result};
use crate::llm::types::SongPayload;
use crate::song::SongDraft;

/// Slice from the first `{` to the last `}` inclusive.
pub fn extract_json_object(content: &str) -> Option<&str> {
    let content = content.trim();
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (start < end).then(|| &content[start..=end])
}

/// Parse model output into a draft, filling in missing fields.
pub fn parse_song_json(content: &str) -> Result<SongDraft> {
    let json = extract_json_object(content).ok_or_else(|| {
        Error::malformed(format!("no JSON object in response: {}", preview(content)))
    })?;

    let payload: SongPayload = serde_json::from_str(json)
        .map_err(|e| Error::malformed(format!("invalid song JSON: {e}")))?;

    Ok(SongDraft {
        title: payload.title.unwrap_or_else(|| UNTITLED.to_string()),
        author: payload.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        chord_text: payload.chord_text.unwrap_or_default(),
    })
}

fn preview(content: &str) -> String {
    let head: String = content.chars().take(80).collect();
    if head.len() < content.len() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_extract_bare_object() {
        assert_eq!(extract_json_object(" {\"a\":1} "), Some("{\"a\":1}"));
    }

    #[test]
    fn test_extract_with_chatter_and_fences() {
        let content = "Claro! Aqui está:\n```json\n{\"title\": \"X\"}\n```\nBom louvor!";
        assert_eq!(extract_json_object(content), Some("{\"title\": \"X\"}"));
    }

    #[test]
    fn test_extract_none() {
        assert_eq!(extract_json_object("I only process gospel songs."), None);
        assert_eq!(extract_json_object("} backwards {"), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn test_parse_english_keys() {
        let draft = parse_song_json(
            r#"{"title": "Porque Ele Vive", "author": "Bill Gaither", "chord_text": "[D]Deus\n[G]mado"}"#,
        )
        .unwrap();
        assert_eq!(draft.title, "Porque Ele Vive");
        assert_eq!(draft.author, "Bill Gaither");
        assert_eq!(draft.chord_text, "[D]Deus\n[G]mado");
    }

    #[test]
    fn test_parse_portuguese_keys() {
        let draft =
            parse_song_json(r#"{"titulo": "Grandioso És Tu", "autor": "Desconhecido", "cifra": "[C]Se"}"#)
                .unwrap();
        assert_eq!(draft.title, "Grandioso És Tu");
        assert_eq!(draft.author, "Desconhecido");
        assert_eq!(draft.chord_text, "[C]Se");
    }

    #[test]
    fn test_parse_missing_fields_use_defaults() {
        let draft = parse_song_json("{}").unwrap();
        assert_eq!(draft.title, "Untitled");
        assert_eq!(draft.author, "Unknown");
        assert_eq!(draft.chord_text, "");
    }

    #[test]
    fn test_parse_refusal_is_malformed() {
        let err = parse_song_json("Desculpe, só processo músicas gospel.").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_broken_json_is_malformed() {
        let err = parse_song_json("{\"title\": }").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
