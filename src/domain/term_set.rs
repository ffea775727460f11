//! An in-memory collection of search terms
//!
//! The [`TermSet`] holds an ordered list of [`Term`] records. Each record
//! carries its own label and refinements, so positions can never drift apart.
//! Inclusions and exclusions are loaded (or not) for the set as a whole: a
//! set either has refinements for every term, or for none of them.

use std::{fmt::Write as _, iter, ops::Index, path::PathBuf};

use nonempty::NonEmpty;

use crate::{
    domain::term::{SearchGroup, Term},
    storage::{DirectoryError, DirectorySource, check_directory, term_file},
};

/// Folder that term files are read from when a [`ProjectDirectory`] is given.
///
/// [`ProjectDirectory`]: crate::ProjectDirectory
pub const TERMS_FOLDER: &str = "terms";

/// Which list of a [`TermSet`] an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// The search terms themselves.
    Terms,
    /// Terms required to co-occur.
    Inclusions,
    /// Terms that disqualify a match.
    Exclusions,
}

impl TermKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Terms => "terms",
            Self::Inclusions => "inclusions",
            Self::Exclusions => "exclusions",
        }
    }
}

/// What [`TermSet::unload_terms`] clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unload {
    /// Remove every term (and with it, every refinement).
    Terms,
    /// Clear the inclusions.
    Inclusions,
    /// Clear the exclusions.
    Exclusions,
    /// Clear everything.
    All,
}

/// The input to [`TermSet::add_terms`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermSource {
    /// Raw groups of strings, one group per term.
    Groups(Vec<SearchGroup>),
    /// Complete term values, which bring their own labels and refinements.
    Terms(Vec<Term>),
    /// The name of a term file (without the `.txt` extension).
    File(String),
}

impl TermSource {
    /// Build a source from anything that converts to search groups.
    ///
    /// ```
    /// use litmine::{SearchGroup, TermSource};
    ///
    /// let source = TermSource::groups(vec![SearchGroup::from("word"), ["thing", "same"].into()]);
    /// # let _ = source;
    /// ```
    pub fn groups<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<SearchGroup>,
    {
        Self::Groups(groups.into_iter().map(Into::into).collect())
    }

    /// Reference a term file by name.
    pub fn file(name: impl Into<String>) -> Self {
        Self::File(name.into())
    }
}

impl From<Term> for TermSource {
    fn from(term: Term) -> Self {
        Self::Terms(vec![term])
    }
}

impl From<Vec<Term>> for TermSource {
    fn from(terms: Vec<Term>) -> Self {
        Self::Terms(terms)
    }
}

/// A way of looking up a term: by position, or by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKey<'a> {
    /// Position in the set.
    Index(usize),
    /// Label of the term.
    Label(&'a str),
}

impl From<usize> for TermKey<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for TermKey<'a> {
    fn from(label: &'a str) -> Self {
        Self::Label(label)
    }
}

/// Errors raised by [`TermSet`] operations.
#[derive(Debug, thiserror::Error)]
pub enum TermSetError {
    /// A list would no longer line up with the terms.
    #[error("inconsistent data: {list} has {found} entries, but there are {expected} terms")]
    InconsistentData {
        /// The list that is out of line.
        list: &'static str,
        /// The number of terms.
        expected: usize,
        /// The length the list would have.
        found: usize,
    },
    /// No term has the requested label.
    #[error("no term with label '{0}'")]
    LabelNotFound(String),
    /// The requested position is past the end of the set.
    #[error("term index {index} is out of range for {len} terms")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of terms in the set.
        len: usize,
    },
    /// A term was given without any search strings.
    #[error("term {0} has no search strings")]
    EmptySearch(usize),
    /// A term file could not be read.
    #[error("failed to load term file {}: {source}", path.display())]
    Load {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The term file location could not be resolved.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// An ordered collection of search terms.
///
/// ```
/// use litmine::{DirectorySource, TermKind, TermSet, TermSource};
///
/// let mut terms = TermSet::new();
/// terms
///     .add_terms(TermSource::groups([["brain", "cortex"]]), TermKind::Terms, DirectorySource::None, false)
///     .unwrap();
///
/// assert_eq!(terms.n_terms(), 1);
/// assert_eq!(terms["brain"].search(), ["brain", "cortex"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet {
    terms: Vec<Term>,
    inclusions_loaded: bool,
    exclusions_loaded: bool,
    /// Labels supplied while the set holds no terms.
    detached_labels: Vec<String>,
}

impl TermSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add terms, inclusions or exclusions to the set.
    ///
    /// `kind` selects which list raw groups and files populate. It is ignored
    /// for [`TermSource::Terms`], which always populate every list together.
    /// When `append` is `false` the selected list is replaced.
    ///
    /// Files are looked up as `<name>.txt` in the `terms` folder of
    /// `directory`.
    ///
    /// The set is left unchanged if the operation fails.
    ///
    /// # Errors
    ///
    /// - [`TermSetError::InconsistentData`] if a list would no longer match the
    ///   number of terms
    /// - [`TermSetError::EmptySearch`] if a term has no search strings
    /// - [`TermSetError::Load`] or [`TermSetError::Directory`] if a term file
    ///   cannot be found or read
    pub fn add_terms<'d>(
        &mut self,
        source: impl Into<TermSource>,
        kind: TermKind,
        directory: impl Into<DirectorySource<'d>>,
        append: bool,
    ) -> Result<(), TermSetError> {
        let mut next = self.clone();

        match source.into() {
            TermSource::Terms(terms) => next.add_term_values(terms, append)?,
            TermSource::Groups(groups) => {
                let groups = groups.into_iter().map(SearchGroup::into_inner).collect();
                next.add_groups(groups, kind, append)?;
            }
            TermSource::File(name) => {
                let groups = load_term_file(&name, &directory.into())?;
                next.add_groups(groups, kind, append)?;
            }
        }

        next.normalize();
        next.check_consistency()?;
        *self = next;
        Ok(())
    }

    fn add_term_values(&mut self, terms: Vec<Term>, append: bool) -> Result<(), TermSetError> {
        if append && !self.terms.is_empty() {
            let n_new = terms.len();
            let expected = self.terms.len() + n_new;
            if !self.inclusions_loaded {
                return Err(TermSetError::InconsistentData {
                    list: TermKind::Inclusions.name(),
                    expected,
                    found: n_new,
                });
            }
            if !self.exclusions_loaded {
                return Err(TermSetError::InconsistentData {
                    list: TermKind::Exclusions.name(),
                    expected,
                    found: n_new,
                });
            }
            self.terms.extend(terms);
        } else {
            self.terms = terms;
        }

        self.inclusions_loaded = true;
        self.exclusions_loaded = true;
        self.detached_labels.clear();
        Ok(())
    }

    fn add_groups(
        &mut self,
        groups: Vec<Vec<String>>,
        kind: TermKind,
        append: bool,
    ) -> Result<(), TermSetError> {
        match kind {
            TermKind::Terms => self.add_search_groups(groups, append),
            TermKind::Inclusions | TermKind::Exclusions => {
                self.add_refinements(groups, kind, append)
            }
        }
    }

    fn add_search_groups(
        &mut self,
        groups: Vec<Vec<String>>,
        append: bool,
    ) -> Result<(), TermSetError> {
        let offset = if append { self.terms.len() } else { 0 };
        let search = groups
            .into_iter()
            .enumerate()
            .map(|(i, group)| NonEmpty::from_vec(group).ok_or(TermSetError::EmptySearch(offset + i)))
            .collect::<Result<Vec<_>, _>>()?;

        let loaded = self.loaded_refinement();

        if append {
            if let Some(list) = loaded {
                if !search.is_empty() {
                    return Err(TermSetError::InconsistentData {
                        list,
                        expected: self.terms.len() + search.len(),
                        found: self.terms.len(),
                    });
                }
            }
            self.terms.extend(search.into_iter().map(Term::new));
        } else if let Some(list) = loaded {
            if search.len() != self.terms.len() {
                return Err(TermSetError::InconsistentData {
                    list,
                    expected: search.len(),
                    found: self.terms.len(),
                });
            }
            for (term, search) in self.terms.iter_mut().zip(search) {
                term.set_search(search);
                term.set_label(None);
            }
        } else {
            self.terms = search.into_iter().map(Term::new).collect();
        }

        self.detached_labels.clear();
        Ok(())
    }

    fn add_refinements(
        &mut self,
        groups: Vec<Vec<String>>,
        kind: TermKind,
        append: bool,
    ) -> Result<(), TermSetError> {
        let loaded = match kind {
            TermKind::Inclusions => self.inclusions_loaded,
            _ => self.exclusions_loaded,
        };

        if groups.is_empty() {
            if !append {
                self.clear_refinement(kind);
            }
            return Ok(());
        }

        let existing = if append && loaded { self.terms.len() } else { 0 };
        let found = existing + groups.len();
        if found != self.terms.len() {
            return Err(TermSetError::InconsistentData {
                list: kind.name(),
                expected: self.terms.len(),
                found,
            });
        }

        for (term, group) in self.terms.iter_mut().zip(groups) {
            match kind {
                TermKind::Inclusions => term.set_inclusions(group),
                _ => term.set_exclusions(group),
            }
        }
        match kind {
            TermKind::Inclusions => self.inclusions_loaded = true,
            _ => self.exclusions_loaded = true,
        }
        Ok(())
    }

    /// Set the labels of the terms, in order.
    ///
    /// With `check_consistency` the number of labels must match the number of
    /// terms. Without it, labels are applied positionally: any surplus is
    /// dropped, terms past the end of the list are left unlabelled, and labels given to an empty set are held until terms arrive
    /// (and reported by [`labels`](Self::labels) in the meantime).
    ///
    /// # Errors
    ///
    /// Returns [`TermSetError::InconsistentData`] if `check_consistency` is set
    /// and the number of labels does not match the number of terms.
    pub fn add_labels<I, S>(&mut self, labels: I, check_consistency: bool) -> Result<(), TermSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if check_consistency && labels.len() != self.terms.len() {
            return Err(TermSetError::InconsistentData {
                list: "labels",
                expected: self.terms.len(),
                found: labels.len(),
            });
        }

        if self.terms.is_empty() {
            self.detached_labels = labels;
            return Ok(());
        }

        if labels.len() > self.terms.len() {
            tracing::warn!(
                "Dropping {} label(s) with no matching term",
                labels.len() - self.terms.len()
            );
        }

        let labels = labels.into_iter().map(Some).chain(iter::repeat(None));
        for (term, label) in self.terms.iter_mut().zip(labels) {
            term.set_label(label);
        }
        Ok(())
    }

    /// Remove a term, by position or label.
    ///
    /// Returns the removed term.
    ///
    /// # Errors
    ///
    /// Returns an error if no term matches `key`.
    pub fn drop_term<'k>(&mut self, key: impl Into<TermKey<'k>>) -> Result<Term, TermSetError> {
        let index = self.resolve(key.into())?;
        let term = self.terms.remove(index);
        tracing::debug!("Dropped term '{}'", term.display_label());
        self.normalize();
        Ok(term)
    }

    /// Clear terms, or their refinements.
    ///
    /// Removing the terms removes every refinement with them. If
    /// `clear_labels` is `false`, the explicit labels of the removed terms are
    /// kept and reported by [`labels`](Self::labels) until new terms are added.
    pub fn unload_terms(&mut self, which: Unload, clear_labels: bool) {
        match which {
            Unload::Inclusions => self.clear_refinement(TermKind::Inclusions),
            Unload::Exclusions => self.clear_refinement(TermKind::Exclusions),
            Unload::Terms | Unload::All => {
                if clear_labels {
                    self.detached_labels.clear();
                } else if !self.terms.is_empty() {
                    self.detached_labels = self
                        .terms
                        .iter()
                        .filter_map(|term| term.label().map(str::to_string))
                        .collect();
                }
                self.terms.clear();
                self.normalize();
            }
        }
    }

    /// Reset every label to unset.
    pub fn unload_labels(&mut self) {
        for term in &mut self.terms {
            term.set_label(None);
        }
        self.detached_labels.clear();
    }

    /// Position of the term with the given label.
    ///
    /// Terms without an explicit label are matched by their first search
    /// string.
    ///
    /// # Errors
    ///
    /// Returns [`TermSetError::LabelNotFound`] if no term matches.
    pub fn get_index(&self, label: &str) -> Result<usize, TermSetError> {
        self.terms
            .iter()
            .position(|term| term.display_label() == label)
            .ok_or_else(|| TermSetError::LabelNotFound(label.to_string()))
    }

    /// Get a term, by position or label.
    ///
    /// # Errors
    ///
    /// Returns an error if no term matches `key`.
    pub fn get_term<'k>(&self, key: impl Into<TermKey<'k>>) -> Result<&Term, TermSetError> {
        let index = self.resolve(key.into())?;
        Ok(&self.terms[index])
    }

    fn resolve(&self, key: TermKey<'_>) -> Result<usize, TermSetError> {
        match key {
            TermKey::Index(index) if index < self.terms.len() => Ok(index),
            TermKey::Index(index) => Err(TermSetError::IndexOutOfRange {
                index,
                len: self.terms.len(),
            }),
            TermKey::Label(label) => self.get_index(label),
        }
    }

    /// Iterate over the terms in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Whether the set holds any terms.
    #[must_use]
    pub fn has_terms(&self) -> bool {
        !self.terms.is_empty()
    }

    /// The number of terms.
    #[must_use]
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// The search strings of every term.
    #[must_use]
    pub fn terms(&self) -> Vec<Vec<&str>> {
        self.terms.iter().map(Term::search).collect()
    }

    /// The label of every term.
    ///
    /// Terms without an explicit label report their first search string.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        if self.terms.is_empty() {
            self.detached_labels.iter().map(String::as_str).collect()
        } else {
            self.terms.iter().map(Term::display_label).collect()
        }
    }

    /// The inclusions of every term, or nothing if none are loaded.
    #[must_use]
    pub fn inclusions(&self) -> Vec<&[String]> {
        if self.inclusions_loaded {
            self.terms.iter().map(Term::inclusions).collect()
        } else {
            Vec::new()
        }
    }

    /// The exclusions of every term, or nothing if none are loaded.
    #[must_use]
    pub fn exclusions(&self) -> Vec<&[String]> {
        if self.exclusions_loaded {
            self.terms.iter().map(Term::exclusions).collect()
        } else {
            Vec::new()
        }
    }

    /// A printable listing of one of the lists in the set.
    #[must_use]
    pub fn check_terms(&self, kind: TermKind) -> String {
        let mut out = format!("List of {} used:\n\n", kind.name());
        for term in &self.terms {
            let values = match kind {
                TermKind::Terms => term.search().join(", "),
                TermKind::Inclusions => term.inclusions().join(", "),
                TermKind::Exclusions => term.exclusions().join(", "),
            };
            // writing to a String cannot fail
            let _ = writeln!(out, "{:<24} : {values}", term.display_label());
        }
        out
    }

    /// Verify that every list lines up with the terms.
    ///
    /// This runs after every mutation; it is public so that callers can assert
    /// it too.
    ///
    /// # Errors
    ///
    /// Returns [`TermSetError::InconsistentData`] naming the list that is out
    /// of line.
    pub fn check_consistency(&self) -> Result<(), TermSetError> {
        let n_terms = self.terms.len();

        let stray = |list: &'static str, found: usize| -> Result<(), TermSetError> {
            if found == 0 || found == n_terms {
                Ok(())
            } else {
                Err(TermSetError::InconsistentData {
                    list,
                    expected: n_terms,
                    found,
                })
            }
        };

        if !self.inclusions_loaded {
            stray(
                TermKind::Inclusions.name(),
                self.terms.iter().filter(|t| !t.inclusions().is_empty()).count(),
            )?;
        }
        if !self.exclusions_loaded {
            stray(
                TermKind::Exclusions.name(),
                self.terms.iter().filter(|t| !t.exclusions().is_empty()).count(),
            )?;
        }
        if n_terms > 0 && !self.detached_labels.is_empty() {
            return Err(TermSetError::InconsistentData {
                list: "labels",
                expected: n_terms,
                found: n_terms + self.detached_labels.len(),
            });
        }
        Ok(())
    }

    fn loaded_refinement(&self) -> Option<&'static str> {
        if self.inclusions_loaded {
            Some(TermKind::Inclusions.name())
        } else if self.exclusions_loaded {
            Some(TermKind::Exclusions.name())
        } else {
            None
        }
    }

    fn clear_refinement(&mut self, kind: TermKind) {
        for term in &mut self.terms {
            match kind {
                TermKind::Inclusions => term.set_inclusions(Vec::new()),
                _ => term.set_exclusions(Vec::new()),
            }
        }
        match kind {
            TermKind::Inclusions => self.inclusions_loaded = false,
            _ => self.exclusions_loaded = false,
        }
    }

    /// An empty set has nothing loaded.
    fn normalize(&mut self) {
        if self.terms.is_empty() {
            self.inclusions_loaded = false;
            self.exclusions_loaded = false;
        }
    }
}

fn load_term_file(
    name: &str,
    directory: &DirectorySource<'_>,
) -> Result<Vec<Vec<String>>, TermSetError> {
    let folder = check_directory(directory, TERMS_FOLDER)?;
    let path = folder.join(format!("{name}.txt"));
    tracing::debug!("Loading terms from {}", path.display());
    term_file::load(&path).map_err(|source| TermSetError::Load { path, source })
}

impl FromIterator<Term> for TermSet {
    fn from_iter<T: IntoIterator<Item = Term>>(iter: T) -> Self {
        let terms: Vec<Term> = iter.into_iter().collect();
        let loaded = !terms.is_empty();
        Self {
            terms,
            inclusions_loaded: loaded,
            exclusions_loaded: loaded,
            detached_labels: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a TermSet {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl Index<usize> for TermSet {
    type Output = Term;

    fn index(&self, index: usize) -> &Self::Output {
        &self.terms[index]
    }
}

impl Index<&str> for TermSet {
    type Output = Term;

    /// # Panics
    ///
    /// Panics if no term has the label.
    fn index(&self, label: &str) -> &Self::Output {
        match self.get_index(label) {
            Ok(index) => &self.terms[index],
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::storage::{Structure, create_file_structure};

    fn add(set: &mut TermSet, source: impl Into<TermSource>, kind: TermKind) {
        set.add_terms(source, kind, DirectorySource::None, false)
            .unwrap();
    }

    /// Two labelled terms with inclusions and exclusions loaded.
    fn loaded_set() -> TermSet {
        let mut set = TermSet::new();
        add(
            &mut set,
            TermSource::groups([["test1", "test sin"], ["test2", "uh oh"]]),
            TermKind::Terms,
        );
        add(
            &mut set,
            TermSource::groups([["yeh", "definitely"], ["need", "required"]]),
            TermKind::Inclusions,
        );
        add(
            &mut set,
            TermSource::groups([["exc1", "blehh"], ["exc2", "meh"]]),
            TermKind::Exclusions,
        );
        set.add_labels(["label0", "label1"], true).unwrap();
        set
    }

    fn term() -> Term {
        Term::from_strings(["search"])
            .unwrap()
            .with_label("label")
            .with_inclusions(["inclusion"])
            .with_exclusions(["exclusion"])
    }

    #[test]
    fn new_set_is_empty() {
        let set = TermSet::new();
        assert!(!set.has_terms());
        assert_eq!(set.n_terms(), 0);
        assert!(set.labels().is_empty());
    }

    #[test]
    fn index_by_label_and_position() {
        let set = loaded_set();

        assert_eq!(set["label0"].label(), Some("label0"));
        assert_eq!(set[1].label(), Some("label1"));
        assert_eq!(set.get_index("label0").unwrap(), 0);
    }

    #[test]
    fn get_term_by_index_and_label_agree() {
        let set = loaded_set();

        let by_index = set.get_term(0_usize).unwrap();
        let by_label = set.get_term("label0").unwrap();

        assert_eq!(by_index, by_label);
        assert_eq!(by_index.inclusions(), ["yeh", "definitely"]);
    }

    #[test]
    fn missing_label_is_not_found() {
        let set = loaded_set();
        assert!(matches!(
            set.get_index("missing"),
            Err(TermSetError::LabelNotFound(label)) if label == "missing"
        ));
        assert!(matches!(
            set.get_term(5_usize),
            Err(TermSetError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn iteration_yields_terms_in_order() {
        let set = loaded_set();
        let labels: Vec<_> = set.iter().map(Term::display_label).collect();
        assert_eq!(labels, ["label0", "label1"]);
        assert_eq!((&set).into_iter().count(), 2);
    }

    #[test]
    fn add_groups_populates_each_list() {
        let mut set = TermSet::new();

        add(&mut set, TermSource::groups([vec!["word"], vec!["thing", "same"]]), TermKind::Terms);
        assert_eq!(set.terms(), vec![vec!["word"], vec!["thing", "same"]]);

        add(&mut set, TermSource::groups([["need"], ["required"]]), TermKind::Inclusions);
        assert_eq!(set.inclusions(), [["need".to_string()], ["required".to_string()]]);

        add(&mut set, TermSource::groups([["not"], ["this"]]), TermKind::Exclusions);
        assert_eq!(set.exclusions(), [["not".to_string()], ["this".to_string()]]);

        assert!(set.has_terms());
    }

    #[test]
    fn bare_strings_become_single_element_groups() {
        let mut set = TermSet::new();
        add(
            &mut set,
            TermSource::groups(vec![SearchGroup::from("word"), ["thing", "same"].into()]),
            TermKind::Terms,
        );
        add(&mut set, TermSource::groups(["need", "required"]), TermKind::Inclusions);

        assert_eq!(set.terms(), vec![vec!["word"], vec!["thing", "same"]]);
        assert_eq!(set.inclusions()[0], ["need".to_string()]);
    }

    #[test]
    fn append_extends_terms() {
        let mut set = TermSet::new();
        add(&mut set, TermSource::groups([vec!["word"], vec!["thing", "same"]]), TermKind::Terms);
        set.add_terms(TermSource::groups(["added"]), TermKind::Terms, DirectorySource::None, true)
            .unwrap();

        assert_eq!(set.n_terms(), 3);
        assert_eq!(set.terms()[0], ["word"]);
        assert_eq!(set.terms()[2], ["added"]);
    }

    #[test]
    fn term_values_populate_lists_in_lockstep() {
        let mut set = TermSet::new();
        add(&mut set, term(), TermKind::Terms);

        assert_eq!(set.labels(), ["label"]);
        assert_eq!(set.terms()[0], ["search"]);
        assert_eq!(set.inclusions()[0], ["inclusion".to_string()]);
        assert_eq!(set.exclusions()[0], ["exclusion".to_string()]);

        add(&mut set, vec![term(), term()], TermKind::Terms);
        assert_eq!(set.n_terms(), 2);
        assert_eq!(set.labels()[1], "label");
        assert_eq!(set.exclusions().len(), 2);
    }

    #[test]
    fn appending_term_values_to_unrefined_terms_is_inconsistent() {
        let mut set = TermSet::new();
        add(&mut set, TermSource::groups(["word"]), TermKind::Terms);

        let result = set.add_terms(term(), TermKind::Terms, DirectorySource::None, true);

        assert!(matches!(
            result,
            Err(TermSetError::InconsistentData { list: "inclusions", .. })
        ));
        assert_eq!(set.n_terms(), 1);
    }

    #[test]
    fn mismatched_inclusions_are_rejected_and_set_is_unchanged() {
        let mut set = TermSet::new();
        add(&mut set, TermSource::groups(["word", "thing"]), TermKind::Terms);

        let result = set.add_terms(
            TermSource::groups(["need"]),
            TermKind::Inclusions,
            DirectorySource::None,
            false,
        );

        assert!(matches!(
            result,
            Err(TermSetError::InconsistentData { list: "inclusions", expected: 2, found: 1 })
        ));
        assert!(set.inclusions().is_empty());
    }

    #[test]
    fn appending_inclusions_beyond_term_count_is_rejected() {
        let mut set = loaded_set();
        let result = set.add_terms(
            TermSource::groups(["extra"]),
            TermKind::Inclusions,
            DirectorySource::None,
            true,
        );
        assert!(matches!(
            result,
            Err(TermSetError::InconsistentData { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn appending_terms_while_refinements_are_loaded_is_rejected() {
        let mut set = loaded_set();
        let result = set.add_terms(
            TermSource::groups(["extra"]),
            TermKind::Terms,
            DirectorySource::None,
            true,
        );
        assert!(matches!(result, Err(TermSetError::InconsistentData { .. })));
        assert_eq!(set.n_terms(), 2);
        set.check_consistency().unwrap();
    }

    #[test]
    fn replacing_terms_keeps_matching_refinements() {
        let mut set = loaded_set();
        add(&mut set, TermSource::groups(["a", "b"]), TermKind::Terms);

        assert_eq!(set.terms(), vec![vec!["a"], vec!["b"]]);
        assert_eq!(set.inclusions().len(), 2);
        assert_eq!(set.labels(), ["a", "b"]);
    }

    #[test]
    fn empty_search_group_is_rejected() {
        let mut set = TermSet::new();
        let result = set.add_terms(
            TermSource::Groups(vec![SearchGroup::from("ok"), SearchGroup::default()]),
            TermKind::Terms,
            DirectorySource::None,
            false,
        );
        assert!(matches!(result, Err(TermSetError::EmptySearch(1))));
    }

    #[test]
    fn add_terms_from_file() {
        let tmp = TempDir::new().unwrap();
        let db = create_file_structure(Some(tmp.path()), "lisc_db", Structure::default()).unwrap();
        let terms = db.get_folder_path("terms").unwrap();
        std::fs::write(terms.join("test_terms.txt"), "word\nthing, same").unwrap();
        std::fs::write(terms.join("test_inclusions.txt"), "need\nrequired").unwrap();
        std::fs::write(terms.join("test_exclusions.txt"), "not\navoid\n").unwrap();

        let mut set = TermSet::new();
        set.add_terms(TermSource::file("test_terms"), TermKind::Terms, &db, false)
            .unwrap();
        set.add_terms(TermSource::file("test_inclusions"), TermKind::Inclusions, &db, false)
            .unwrap();
        set.add_terms(TermSource::file("test_exclusions"), TermKind::Exclusions, &db, false)
            .unwrap();

        assert_eq!(set.terms(), vec![vec!["word"], vec!["thing", "same"]]);
        assert_eq!(set.inclusions().len(), 2);
        assert_eq!(set.exclusions()[1], ["avoid".to_string()]);
    }

    #[test]
    fn add_terms_from_plain_path() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("words.txt"), "alpha, beta\n").unwrap();

        let mut set = TermSet::new();
        set.add_terms(TermSource::file("words"), TermKind::Terms, tmp.path(), false)
            .unwrap();

        assert_eq!(set.terms(), vec![vec!["alpha", "beta"]]);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let tmp = TempDir::new().unwrap();
        let mut set = TermSet::new();
        let result = set.add_terms(TermSource::file("nope"), TermKind::Terms, tmp.path(), false);
        assert!(matches!(result, Err(TermSetError::Load { .. })));
    }

    #[test]
    fn labels_without_terms_are_held_when_unchecked() {
        let mut set = TermSet::new();
        set.add_labels(["first", "second"], false).unwrap();
        assert_eq!(set.labels(), ["first", "second"]);

        set.unload_terms(Unload::All, false);
        add(&mut set, TermSource::groups(["word", "thing"]), TermKind::Terms);
        set.add_labels(["first", "second"], true).unwrap();
        assert_eq!(set.labels(), ["first", "second"]);

        set.unload_terms(Unload::All, false);
        add(&mut set, TermSource::groups(["word", "thing"]), TermKind::Terms);
        assert_eq!(set.labels(), ["word", "thing"]);
        assert!(set.iter().all(|term| term.label().is_none()));
    }

    #[test]
    fn checked_labels_must_match_term_count() {
        let mut set = TermSet::new();
        add(&mut set, TermSource::groups(["word", "thing"]), TermKind::Terms);

        assert!(matches!(
            set.add_labels(["only"], true),
            Err(TermSetError::InconsistentData { list: "labels", expected: 2, found: 1 })
        ));
        assert!(matches!(
            set.add_labels(["a", "b", "c"], true),
            Err(TermSetError::InconsistentData { list: "labels", .. })
        ));
        assert!(TermSet::new().add_labels(["a"], true).is_err());
    }

    #[test]
    fn unchecked_labels_drop_surplus() {
        let mut set = TermSet::new();
        add(&mut set, TermSource::groups(["word", "thing"]), TermKind::Terms);

        set.add_labels(["a", "b", "c"], false).unwrap();

        assert_eq!(set.labels(), ["a", "b"]);
        set.check_consistency().unwrap();
    }

    #[test]
    fn unchecked_short_labels_unset_the_rest() {
        let mut set = TermSet::new();
        add(&mut set, TermSource::groups(["a", "b", "c"]), TermKind::Terms);
        set.add_labels(["l0", "l1", "l2"], true).unwrap();

        set.add_labels(["x"], false).unwrap();

        let labels: Vec<_> = set.iter().map(Term::label).collect();
        assert_eq!(labels, [Some("x"), None, None]);
        assert_eq!(set.labels(), ["x", "b", "c"]);
    }

    #[test]
    fn refinement_file_with_gap_leaves_term_unrefined() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("inclusions.txt"), "need\n\nrequired\n").unwrap();

        let mut set = TermSet::new();
        add(&mut set, TermSource::groups(["a", "b", "c"]), TermKind::Terms);
        set.add_terms(TermSource::file("inclusions"), TermKind::Inclusions, tmp.path(), false)
            .unwrap();

        assert_eq!(set[0].inclusions(), ["need"]);
        assert!(set[1].inclusions().is_empty());
        assert_eq!(set[2].inclusions(), ["required"]);
        assert_eq!(set[1].query(), r#"("b")"#);
        set.check_consistency().unwrap();
    }

    #[test]
    fn term_file_with_gap_is_an_empty_search() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("terms.txt"), "word\n\nthing\n").unwrap();

        let mut set = TermSet::new();
        let result = set.add_terms(TermSource::file("terms"), TermKind::Terms, tmp.path(), false);

        assert!(matches!(result, Err(TermSetError::EmptySearch(1))));
        assert!(!set.has_terms());
    }

    #[test]
    fn drop_term_removes_from_every_list() {
        let mut set = loaded_set();

        let dropped = set.drop_term("label1").unwrap();

        assert_eq!(dropped.label(), Some("label1"));
        assert!(!set.labels().contains(&"label1"));
        assert_eq!(set.n_terms(), 1);
        assert_eq!(set.inclusions().len(), 1);
        assert_eq!(set.exclusions().len(), 1);
        assert_eq!(set[0].inclusions(), ["yeh", "definitely"]);
    }

    #[test]
    fn drop_unknown_term_fails() {
        let mut set = loaded_set();
        assert!(set.drop_term("nope").is_err());
        assert!(set.drop_term(9_usize).is_err());
        assert_eq!(set.n_terms(), 2);
    }

    #[test]
    fn unload_individual_lists() {
        let mut set = loaded_set();

        set.unload_terms(Unload::Inclusions, true);
        assert!(set.inclusions().is_empty());
        assert_eq!(set.exclusions().len(), 2);

        set.unload_terms(Unload::Exclusions, true);
        assert!(set.exclusions().is_empty());

        set.unload_terms(Unload::Terms, true);
        assert!(set.terms().is_empty());
        assert_eq!(set.n_terms(), 0);
        assert!(set.labels().is_empty());
    }

    #[test]
    fn unload_all() {
        let mut set = loaded_set();
        set.unload_terms(Unload::All, true);

        assert!(set.inclusions().is_empty());
        assert!(set.exclusions().is_empty());
        assert!(!set.has_terms());
    }

    #[test]
    fn unload_terms_can_keep_labels() {
        let mut set = loaded_set();
        set.unload_terms(Unload::Terms, false);

        assert!(!set.has_terms());
        assert_eq!(set.labels(), ["label0", "label1"]);
    }

    #[test]
    fn unload_labels_resets_to_unset() {
        let mut set = loaded_set();
        set.unload_labels();

        assert!(set.iter().all(|term| term.label().is_none()));
        assert_eq!(set.labels(), ["test1", "test2"]);
    }

    #[test]
    fn check_terms_lists_every_term() {
        let set = loaded_set();

        let terms = set.check_terms(TermKind::Terms);
        assert!(terms.starts_with("List of terms used:"));
        assert!(terms.contains("test1, test sin"));

        let exclusions = set.check_terms(TermKind::Exclusions);
        assert!(exclusions.contains("exc2, meh"));
    }

    #[test]
    fn collected_set_is_consistent() {
        let set: TermSet = vec![term(), term().with_label("other")].into_iter().collect();
        set.check_consistency().unwrap();
        assert_eq!(set.labels(), ["label", "other"]);
        assert_eq!(set.inclusions().len(), 2);
    }

    #[test]
    #[should_panic(expected = "no term with label 'missing'")]
    fn indexing_unknown_label_panics() {
        let set = loaded_set();
        let _ = &set["missing"];
    }
}
