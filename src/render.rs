//! Plain-text rendering of aligned songs.

use crate::chords::AlignedDocument;
use crate::song::SongView;

/// Which half of an aligned line a display row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Chord tokens.
    Chords,
    /// Lyric text.
    Lyrics,
}

/// A single display row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    /// Source half of the aligned line.
    pub kind: RowKind,
    /// Row text with trailing whitespace removed.
    pub text: &'a str,
}

/// Display rows for a document, chord row above lyric row.
///
/// Lines without chords contribute only their lyric row, so blank source
/// lines still show up as stanza breaks. Chord-only lines drop their blank
/// lyric row.
pub fn rows(doc: &AlignedDocument) -> Vec<Row<'_>> {
    let mut out = Vec::with_capacity(doc.len() * 2);
    for line in doc.iter() {
        let lyrics = line.lyric_row.trim_end();
        if line.has_chords() {
            out.push(Row { kind: RowKind::Chords, text: line.chord_row.trim_end() });
            if !lyrics.trim_start().is_empty() {
                out.push(Row { kind: RowKind::Lyrics, text: lyrics });
            }
        } else {
            out.push(Row { kind: RowKind::Lyrics, text: lyrics });
        }
    }
    out
}

/// Stack a document into monospace text.
pub fn render_text(doc: &AlignedDocument) -> String {
    rows(doc)
        .iter()
        .map(|row| row.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a song with its title and author above the aligned rows.
pub fn render_song(view: &SongView) -> String {
    format!("{}\n{}\n\n{}", view.title, view.author, render_text(&view.lines))
}
