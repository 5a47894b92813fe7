//! Align a bracketed chord sheet from the command line.
//!
//! Usage:
//!   `cargo run --bin align_sheet -- <sheet.txt>`
//!   `cargo run --bin align_sheet -- <sheet.pdf> --json`
//!   `cat sheet.txt | cargo run --bin align_sheet`
//!
//! Prints chords stacked over lyrics, or the aligned rows as JSON. PDFs are
//! run through text extraction first; no language model is involved.

use anyhow::{bail, Context, Result};
use chordsheet::chords::{align, chord_tokens};
use chordsheet::extract::{PdfTextExtractor, TextExtractor};
use chordsheet::render::render_text;
use std::env;
use std::io::{self, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .compact()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let files: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let text = match files.as_slice() {
        [] => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
        [path] => read_sheet(Path::new(path.as_str()))?,
        _ => bail!("Usage: align_sheet [<file>] [--json]"),
    };

    let doc = align(&text);
    let chords: usize = text.split('\n').map(|line| chord_tokens(line).len()).sum();
    tracing::debug!("Aligned {} lines with {chords} chords", doc.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", render_text(&doc));
    }
    Ok(())
}

fn read_sheet(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        let bytes = fs_err::read(path)?;
        let extractor = PdfTextExtractor;
        tracing::debug!("Extracting {} with {}", path.display(), extractor.name());
        Ok(extractor.extract(&bytes)?)
    } else {
        Ok(fs_err::read_to_string(path)?)
    }
}
