//! Pulling tags out of parsed HTML/XML records.
//!
//! Parsing is left to whichever markup library the caller uses; anything
//! that implements [`TagContainer`] can be queried with [`extract`].

use std::str::FromStr;

/// A parsed element that can be searched for nested tags.
pub trait TagContainer: Sized {
    /// Find the first nested tag with the given name.
    fn find(&self, tag: &str) -> Option<Self>;

    /// Find every nested tag with the given name.
    fn find_all(&self, tag: &str) -> Vec<Self>;

    /// The text content of the element.
    fn text(&self) -> String;
}

/// How [`extract`] returns a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// The first matching tag itself.
    Raw,
    /// The text of the first matching tag.
    Str,
    /// Every matching tag.
    All,
}

/// An unrecognised extraction mode.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("extraction mode '{0}' is not understood (expected 'raw', 'str' or 'all')")]
pub struct BadModeError(String);

impl FromStr for ExtractMode {
    type Err = BadModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "str" => Ok(Self::Str),
            "all" => Ok(Self::All),
            other => Err(BadModeError(other.to_string())),
        }
    }
}

/// The result of an [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    /// A single tag.
    Raw(T),
    /// The text of a tag.
    Str(String),
    /// Every matching tag.
    All(Vec<T>),
}

/// Extract a tag from a container.
///
/// Returns `None` when the tag is missing. In [`ExtractMode::All`] a missing
/// tag gives an empty list rather than `None`.
pub fn extract<T: TagContainer>(data: &T, tag: &str, mode: ExtractMode) -> Option<Extracted<T>> {
    match mode {
        ExtractMode::Raw => data.find(tag).map(Extracted::Raw),
        ExtractMode::Str => data.find(tag).map(|found| Extracted::Str(found.text())),
        ExtractMode::All => Some(Extracted::All(data.find_all(tag))),
    }
}
