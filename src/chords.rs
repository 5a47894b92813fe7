//! Chord/lyric line alignment.
//!
//! Chord sheets arrive as lyric lines with inline chord tokens, e.g.
//! `[D]Deus enviou Seu Filho a[G]mado`. [`align`] splits every line into a
//! chord row and a lyric row that line up column for column when stacked in a
//! monospace font:
//!
//! ```text
//! [D]                       [G]
//!    Deus enviou Seu Filho a   mado
//! ```
//!
//! Columns are counted in `char`s. Display width is not taken into account.

use serde::Serialize;

/// A bracketed chord token found on a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordToken {
    /// Column of the opening `[`.
    pub start: usize,
    /// Column of the closing `]` (inclusive).
    pub end: usize,
    /// Token text including both brackets.
    pub text: String,
}

impl ChordToken {
    /// Number of columns the token occupies.
    pub const fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// One source line split into its chord row and lyric row.
///
/// Both rows always have the same number of characters as the source line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlignedLine {
    /// Chord tokens at their original columns, spaces everywhere else.
    pub chord_row: String,
    /// Lyric text with every chord token blanked out.
    pub lyric_row: String,
}

impl AlignedLine {
    /// Whether the chord row carries at least one token.
    pub fn has_chords(&self) -> bool {
        self.chord_row.chars().any(|c| c != ' ')
    }
}

/// Aligned lines in source order, one per input line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct AlignedDocument(Vec<AlignedLine>);

impl AlignedDocument {
    /// All aligned lines.
    pub fn lines(&self) -> &[AlignedLine] {
        &self.0
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True only for a default-constructed document; [`align`] always yields at least one line.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> std::slice::Iter<'_, AlignedLine> {
        self.0.iter()
    }
}

/// Align every line of a chord-annotated text block.
///
/// The text is split on `\n` without any trimming, so `""` yields a single
/// empty line and a trailing newline yields a trailing empty line.
pub fn align(text: &str) -> AlignedDocument {
    AlignedDocument(text.split('\n').map(align_line).collect())
}

/// Align a single line. `line` should not contain `\n`.
pub fn align_line(line: &str) -> AlignedLine {
    let chars: Vec<char> = line.chars().collect();
    let mut chord_row = String::with_capacity(line.len());
    let mut lyric_row = String::with_capacity(line.len());

    let mut col = 0;
    for token in scan_tokens(&chars) {
        push_lyrics(&chars[col..token.start], &mut chord_row, &mut lyric_row);
        chord_row.push_str(&token.text);
        lyric_row.push_str(&" ".repeat(token.width()));
        col = token.end + 1;
    }
    push_lyrics(&chars[col..], &mut chord_row, &mut lyric_row);

    AlignedLine { chord_row, lyric_row }
}

/// Chord tokens on a single line, left to right.
pub fn chord_tokens(line: &str) -> Vec<ChordToken> {
    let chars: Vec<char> = line.chars().collect();
    scan_tokens(&chars)
}

/// Every `[`…`]` token, with inclusive columns.
///
/// The first `[` pairs with the first `]` after it, whatever lies between.
fn scan_tokens(chars: &[char]) -> Vec<ChordToken> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '[' {
            let Some(offset) = chars[i + 1..].iter().position(|&c| c == ']') else {
                // No `]` left on the line, so no later `[` can close either.
                break;
            };
            let end = i + 1 + offset;
            tokens.push(ChordToken {
                start: i,
                end,
                text: chars[i..=end].iter().collect(),
            });
            i = end + 1;
        } else {
            i += 1;
        }
    }
    tokens
}

fn push_lyrics(chars: &[char], chord_row: &mut String, lyric_row: &mut String) {
    for &c in chars {
        chord_row.push(' ');
        lyric_row.push(c);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn rows(line: &str) -> (String, String) {
        let aligned = align_line(line);
        (aligned.chord_row, aligned.lyric_row)
    }

    #[test]
    fn test_no_brackets() {
        let (chords, lyrics) = rows("Hello world");
        assert_eq!(chords, " ".repeat(11));
        assert_eq!(lyrics, "Hello world");
    }

    #[test]
    fn test_single_chord() {
        let (chords, lyrics) = rows("[D]Hello");
        assert_eq!(chords, "[D]     ");
        assert_eq!(lyrics, "   Hello");
    }

    #[test]
    fn test_chord_mid_word() {
        let (chords, lyrics) = rows("[D]Deus enviou Seu Filho a[G]mado");
        assert_eq!(chords, "[D]                       [G]    ");
        assert_eq!(lyrics, "   Deus enviou Seu Filho a   mado");
    }

    #[test]
    fn test_unterminated_bracket_is_literal() {
        let (chords, lyrics) = rows("Hello [D world");
        assert_eq!(chords, " ".repeat(14));
        assert_eq!(lyrics, "Hello [D world");
        assert!(chord_tokens("Hello [D world").is_empty());
    }

    #[test]
    fn test_unterminated_after_token() {
        let (chords, lyrics) = rows("[A]la [B");
        assert_eq!(chords, "[A]     ");
        assert_eq!(lyrics, "   la [B");
    }

    #[test]
    fn test_stray_closing_bracket() {
        let (chords, lyrics) = rows("la] [C]x");
        assert_eq!(chords, "    [C] ");
        assert_eq!(lyrics, "la]    x");
    }

    #[test]
    fn test_adjacent_tokens() {
        let (chords, lyrics) = rows("[A][B]word");
        assert_eq!(chords, "[A][B]    ");
        assert_eq!(lyrics, "      word");
    }

    #[test]
    fn test_nested_open_pairs_with_first_close() {
        let (chords, lyrics) = rows("[A[B]x");
        assert_eq!(chords, "[A[B] ");
        assert_eq!(lyrics, "     x");
        let tokens = chord_tokens("[A[B]x");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "[A[B]");
    }

    #[test]
    fn test_chord_only_line() {
        let (chords, lyrics) = rows("[Em7]");
        assert_eq!(chords, "[Em7]");
        assert_eq!(lyrics, "     ");
    }

    #[test]
    fn test_empty_input_yields_one_empty_line() {
        let doc = align("");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.lines()[0], AlignedLine::default());
    }

    #[test]
    fn test_multi_line() {
        let doc = align("[A]Line1\n[B]Line2");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.lines()[0].chord_row, "[A]     ");
        assert_eq!(doc.lines()[0].lyric_row, "   Line1");
        assert_eq!(doc.lines()[1].chord_row, "[B]     ");
        assert_eq!(doc.lines()[1].lyric_row, "   Line2");
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let doc = align("[A]la\n");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.lines()[1], AlignedLine::default());
    }

    #[test]
    fn test_bracket_does_not_cross_lines() {
        let doc = align("[A\n]b");
        assert_eq!(doc.lines()[0].lyric_row, "[A");
        assert_eq!(doc.lines()[1].lyric_row, "]b");
        assert!(doc.iter().all(|line| !line.has_chords()));
    }

    #[test]
    fn test_columns_are_chars_not_bytes() {
        let (chords, lyrics) = rows("a[G]ção");
        assert_eq!(chords, " [G]   ");
        assert_eq!(lyrics, "a   ção");
        assert_eq!(chords.chars().count(), lyrics.chars().count());
    }

    #[test]
    fn test_token_columns() {
        let tokens = chord_tokens("ab[C]d[Dm]");
        assert_eq!(
            tokens,
            vec![
                ChordToken { start: 2, end: 4, text: "[C]".to_string() },
                ChordToken { start: 6, end: 9, text: "[Dm]".to_string() },
            ]
        );
        assert_eq!(tokens[1].width(), 4);
    }

    #[test]
    fn test_all_brackets_does_not_panic() {
        let doc = align("[[[[]]]][");
        let line = &doc.lines()[0];
        assert_eq!(line.chord_row, "[[[[]    ");
        assert_eq!(line.lyric_row, "     ]]][");
    }
}
