//! Plain-text term lists.
//!
//! One term per line, with synonyms separated by commas:
//!
//! ```text
//! word
//! thing, same
//! ```
//!
//! Whitespace around each synonym is trimmed. Lines line up with terms by
//! position, so a blank line is kept as an empty group; blank lines at the end
//! of the file are ignored. There is no quoting or escaping.

use std::{io, path::Path};

/// Parse the contents of a term file.
#[must_use]
pub fn parse(content: &str) -> Vec<Vec<String>> {
    content
        .trim_end()
        .lines()
        .map(|line| {
            line.split(',')
                .map(str::trim)
                .filter(|synonym| !synonym.is_empty())
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// Render term groups in the term file format.
pub fn render<G, S>(groups: impl IntoIterator<Item = G>) -> String
where
    G: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for group in groups {
        let line: Vec<S> = group.into_iter().collect();
        let line: Vec<&str> = line.iter().map(AsRef::as_ref).collect();
        out.push_str(&line.join(", "));
        out.push('\n');
    }
    out
}

/// Read a term file.
///
/// # Errors
///
/// Fails if the file cannot be read.
pub fn load(path: &Path) -> io::Result<Vec<Vec<String>>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse(&content))
}

/// Write a term file, replacing any existing file.
///
/// # Errors
///
/// Fails if the file cannot be written.
pub fn save<G, S>(path: &Path, groups: impl IntoIterator<Item = G>) -> io::Result<()>
where
    G: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    std::fs::write(path, render(groups))?;
    tracing::debug!("Saved terms to {}", path.display());
    Ok(())
}
