//! Search strategies for the song history.
//!
//! This module provides abstractions for filtering saved songs by a typed
//! query, used by the history screen's `/` filter.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::constants::search::MIN_FUZZY_SCORE;
use crate::song::SongSummary;

/// Trait for song search strategies.
pub trait SearchStrategy: Send + Sync {
    /// Find songs matching a query, most relevant first.
    ///
    /// # Arguments
    /// * `query` - The search query (typed by the user)
    /// * `songs` - The songs to search
    /// * `limit` - Maximum number of results to return
    fn find_matches<'a>(
        &self,
        query: &str,
        songs: &'a [SongSummary],
        limit: usize,
    ) -> Vec<&'a SongSummary>;

    /// Get the name of this search strategy (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Fuzzy matching over "title author".
pub struct FuzzySearch {
    /// Minimum score a song needs to be listed.
    pub min_score: i64,
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self { min_score: MIN_FUZZY_SCORE }
    }
}

impl SearchStrategy for FuzzySearch {
    fn find_matches<'a>(
        &self,
        query: &str,
        songs: &'a [SongSummary],
        limit: usize,
    ) -> Vec<&'a SongSummary> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return songs.iter().take(limit).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<_> = songs
            .iter()
            .filter_map(|song| {
                let haystack = format!("{} {}", song.title, song.author).to_lowercase();
                let score = matcher.fuzzy_match(&haystack, &query)?;
                (score >= self.min_score).then_some((song, score))
            })
            .collect();

        // Stable sort keeps the incoming (alphabetical) order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().take(limit).map(|(s, _)| s).collect()
    }

    fn name(&self) -> &'static str {
        "FuzzySearch"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::SongId;

    fn song(id: u64, title: &str, author: &str) -> SongSummary {
        SongSummary { id: SongId::new(id), title: title.to_string(), author: author.to_string() }
    }

    #[test]
    fn test_fuzzy_search() {
        let songs = vec![
            song(1, "Porque Ele Vive", "Bill Gaither"),
            song(2, "Grandioso És Tu", "Carl Boberg"),
            song(3, "Hosana", "Hillsong"),
        ];

        let results = FuzzySearch::default().find_matches("ele vive", &songs, 10);
        assert!(!results.is_empty());
        assert_eq!(results[0].title, "Porque Ele Vive");
    }

    #[test]
    fn test_matches_author() {
        let songs = vec![song(1, "Hosana", "Hillsong"), song(2, "Te Louvarei", "Toque no Altar")];
        let results = FuzzySearch::default().find_matches("hillsong", &songs, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, SongId::new(1));
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let songs = vec![song(1, "A", "x"), song(2, "B", "y")];
        assert_eq!(FuzzySearch::default().find_matches("  ", &songs, 10).len(), 2);
        assert_eq!(FuzzySearch::default().find_matches("", &songs, 1).len(), 1);
    }
}
