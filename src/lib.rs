//! `chordsheet` - chord sheet uploader and viewer.
//!
//! Turns an uploaded chord-sheet PDF into a stored song: text is extracted,
//! a language model structures it into title, author and bracketed chord
//! text, and the aligner stacks each chord above the syllable it precedes.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod auth;
pub mod chords;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod llm;
pub mod render;
pub mod routes;
pub mod services;
pub mod song;
pub mod storage;
pub mod types;
pub mod ui;
