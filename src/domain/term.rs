use std::fmt;

use nonempty::NonEmpty;

use crate::domain::query::{Join, combine};

/// A search term.
///
/// A term is a group of synonyms or alternative phrasings that are OR-joined
/// when a query is built, together with optional refinements:
///
/// - inclusions must co-occur with a match
/// - exclusions disqualify a match
///
/// Terms can carry a human-readable label that is independent of the search
/// strings themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    label: Option<String>,
    search: NonEmpty<String>,
    inclusions: Vec<String>,
    exclusions: Vec<String>,
}

impl Term {
    /// Create a term with no label and no refinements.
    #[must_use]
    pub const fn new(search: NonEmpty<String>) -> Self {
        Self {
            label: None,
            search,
            inclusions: Vec::new(),
            exclusions: Vec::new(),
        }
    }

    /// Create a term from a list of search strings.
    ///
    /// Returns `None` if `search` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use litmine::Term;
    ///
    /// let term = Term::from_strings(["brain", "cortex"]).unwrap();
    /// assert_eq!(term.search(), ["brain", "cortex"]);
    /// assert!(Term::from_strings(Vec::<String>::new()).is_none());
    /// ```
    pub fn from_strings<I, S>(search: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let search = search.into_iter().map(Into::into).collect();
        NonEmpty::from_vec(search).map(Self::new)
    }

    /// Attach a label to the term.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach inclusion terms.
    #[must_use]
    pub fn with_inclusions<I, S>(mut self, inclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inclusions = inclusions.into_iter().map(Into::into).collect();
        self
    }

    /// Attach exclusion terms.
    #[must_use]
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = exclusions.into_iter().map(Into::into).collect();
        self
    }

    /// The explicit label, if one was set.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The label to display for this term.
    ///
    /// Falls back to the first search string when no label was set.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.search.first().as_str())
    }

    /// The search strings, in order.
    #[must_use]
    pub fn search(&self) -> Vec<&str> {
        self.search.iter().map(String::as_str).collect()
    }

    /// Terms that are required to co-occur.
    #[must_use]
    pub fn inclusions(&self) -> &[String] {
        &self.inclusions
    }

    /// Terms that disqualify a match.
    #[must_use]
    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    /// Build the query string for this term.
    ///
    /// The search strings are OR-joined, inclusions are AND-ed on as a
    /// further OR group, and each exclusion is prefixed with `NOT`.
    ///
    /// ```
    /// use litmine::Term;
    ///
    /// let term = Term::from_strings(["brain", "cortex"])
    ///     .unwrap()
    ///     .with_inclusions(["human"])
    ///     .with_exclusions(["mouse"]);
    ///
    /// assert_eq!(term.query(), r#"("brain"OR"cortex")AND("human")NOT"mouse""#);
    /// ```
    #[must_use]
    pub fn query(&self) -> String {
        let mut query = combine(self.search.iter(), Join::Or);

        if !self.inclusions.is_empty() {
            query.push_str("AND");
            query.push_str(&combine(&self.inclusions, Join::Or));
        }

        if !self.exclusions.is_empty() {
            query.push_str(&combine(&self.exclusions, Join::Not));
        }

        query
    }

    pub(crate) fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub(crate) fn set_search(&mut self, search: NonEmpty<String>) {
        self.search = search;
    }

    pub(crate) fn set_inclusions(&mut self, inclusions: Vec<String>) {
        self.inclusions = inclusions;
    }

    pub(crate) fn set_exclusions(&mut self, exclusions: Vec<String>) {
        self.exclusions = exclusions;
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.display_label(), self.search().join(", "))
    }
}

/// One group of search strings, as supplied to [`TermSet::add_terms`].
///
/// A bare string converts to a single-element group.
///
/// [`TermSet::add_terms`]: crate::TermSet::add_terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchGroup(Vec<String>);

impl SearchGroup {
    /// The strings in the group.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consume the group, returning its strings.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for SearchGroup {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for SearchGroup {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for SearchGroup {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for SearchGroup {
    fn from(value: Vec<&str>) -> Self {
        Self(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SearchGroup {
    fn from(value: [&str; N]) -> Self {
        Self(value.into_iter().map(str::to_string).collect())
    }
}
