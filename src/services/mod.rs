//! Service modules for the song workflows.
//!
//! This module contains the flows the front-end drives, kept apart from the
//! App struct so they can be tested with fake collaborators.

pub mod library;
pub mod search;

pub use library::{Lookup, SongLibrary};
