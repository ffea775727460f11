//! Declarative folder layout for a project.
//!
//! A [`Structure`] is a tree of named [`Folder`]s rooted at `base`. Every
//! folder name is unique within the tree, so a folder can be referred to by
//! name alone.

use std::path::{Path, PathBuf};

/// Name of the root folder of every structure.
pub const BASE: &str = "base";

/// A named folder and the folders nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    name: String,
    children: Vec<Folder>,
}

impl Folder {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    /// The folder name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Folders directly inside this one.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Self> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.name == name || self.children.iter().any(|child| child.contains(name))
    }
}

/// Errors raised while building a [`Structure`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StructureError {
    /// A folder names a parent that has not been defined yet.
    #[error("folder '{folder}' has unknown parent '{parent}'")]
    UnknownParent {
        /// The folder being added.
        folder: String,
        /// The parent it refers to.
        parent: String,
    },
    /// A folder name is used twice.
    #[error("folder '{0}' is defined more than once")]
    DuplicateFolder(String),
    /// A folder tries to use the reserved root name.
    #[error("'base' is reserved for the root folder")]
    ReservedName,
}

/// The folder tree of a project.
///
/// ```
/// use litmine::Structure;
///
/// let structure = Structure::from_levels([
///     (1, vec![("base", vec!["terms"])]),
///     (2, vec![("terms", vec!["raw"])]),
/// ])
/// .unwrap();
///
/// assert_eq!(structure.names(), ["base", "terms", "raw"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    root: Folder,
}

impl Default for Structure {
    /// The default project layout:
    ///
    /// ```text
    /// base
    /// ├── terms
    /// ├── logs
    /// ├── data
    /// │   ├── counts
    /// │   └── words
    /// │       ├── raw
    /// │       └── summary
    /// └── figures
    /// ```
    fn default() -> Self {
        let mut structure = Self::empty();
        for (parent, children) in [
            (BASE, &["terms", "logs", "data", "figures"][..]),
            ("data", &["counts", "words"][..]),
            ("words", &["raw", "summary"][..]),
        ] {
            for child in children {
                structure
                    .attach(parent, child)
                    .unwrap_or_else(|e| unreachable!("default structure is valid: {e}"));
            }
        }
        structure
    }
}

impl Structure {
    /// A structure with only the root folder.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: Folder::new(BASE.to_string()),
        }
    }

    /// Build a structure from a level-by-level definition.
    ///
    /// Each level maps parent folders to the folders created inside them.
    /// Levels are applied in ascending order, regardless of the order they are
    /// given in; within a level, order is preserved.
    ///
    /// # Errors
    ///
    /// Fails if a parent is not defined at an earlier level (or earlier in the
    /// same level), or if a folder name is used twice.
    pub fn from_levels<L, P, C, S>(levels: L) -> Result<Self, StructureError>
    where
        L: IntoIterator<Item = (u32, P)>,
        P: IntoIterator<Item = (S, C)>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut levels: Vec<(u32, P)> = levels.into_iter().collect();
        levels.sort_by_key(|(level, _)| *level);

        let mut structure = Self::empty();
        for (_, parents) in levels {
            for (parent, children) in parents {
                for child in children {
                    structure.attach(parent.as_ref(), child.as_ref())?;
                }
            }
        }
        Ok(structure)
    }

    /// Build a structure from `(folder, parent)` pairs.
    ///
    /// A parent must appear before any of its children.
    ///
    /// # Errors
    ///
    /// Fails if a parent is not defined before it is referred to, or if a
    /// folder name is used twice.
    pub fn from_parents<I, S>(folders: I) -> Result<Self, StructureError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut structure = Self::empty();
        for (folder, parent) in folders {
            structure.attach(parent.as_ref(), folder.as_ref())?;
        }
        Ok(structure)
    }

    /// Add a folder inside an existing one.
    ///
    /// # Errors
    ///
    /// Fails if `parent` does not exist or `name` is already in use.
    pub fn attach(&mut self, parent: &str, name: &str) -> Result<(), StructureError> {
        if name == BASE {
            return Err(StructureError::ReservedName);
        }
        if self.root.contains(name) {
            return Err(StructureError::DuplicateFolder(name.to_string()));
        }
        let parent_folder =
            self.root
                .find_mut(parent)
                .ok_or_else(|| StructureError::UnknownParent {
                    folder: name.to_string(),
                    parent: parent.to_string(),
                })?;
        parent_folder.children.push(Folder::new(name.to_string()));
        Ok(())
    }

    /// The root folder.
    #[must_use]
    pub const fn root(&self) -> &Folder {
        &self.root
    }

    /// Whether a folder with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.root.contains(name)
    }

    /// Every folder name, parents before children, breadth first.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.walk(Path::new(""))
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Every folder with its path relative to `base`, breadth first.
    ///
    /// The root folder maps to `base` itself.
    #[must_use]
    pub fn walk(&self, base: &Path) -> Vec<(&str, PathBuf)> {
        let mut out = vec![(self.root.name.as_str(), base.to_path_buf())];
        let mut next = 0;
        let mut queue = vec![&self.root];

        while next < queue.len() {
            let folder = queue[next];
            let path = out[next].1.clone();
            for child in &folder.children {
                out.push((child.name.as_str(), path.join(&child.name)));
                queue.push(child);
            }
            next += 1;
        }
        out
    }

    /// `(folder, parent)` pairs for every folder below the root.
    #[must_use]
    pub fn to_parents(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let mut queue = vec![&self.root];
        while let Some(folder) = queue.pop() {
            for child in &folder.children {
                out.push((child.name.clone(), folder.name.clone()));
            }
            queue.extend(folder.children.iter().rev());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let structure = Structure::default();
        assert_eq!(
            structure.names(),
            ["base", "terms", "logs", "data", "figures", "counts", "words", "raw", "summary"]
        );
    }

    #[test]
    fn walk_joins_ancestor_names() {
        let structure = Structure::default();
        let paths = structure.walk(Path::new("db"));

        assert!(paths.contains(&("base", PathBuf::from("db"))));
        assert!(paths.contains(&("counts", PathBuf::from("db/data/counts"))));
        assert!(paths.contains(&("summary", PathBuf::from("db/data/words/summary"))));
    }

    #[test]
    fn levels_are_applied_in_ascending_order() {
        let structure = Structure::from_levels([
            (2, vec![("terms", vec!["raw"])]),
            (1, vec![("base", vec!["terms"])]),
        ])
        .unwrap();

        assert_eq!(structure.names(), ["base", "terms", "raw"]);
    }

    #[test]
    fn child_before_parent_is_rejected() {
        let result = Structure::from_levels([
            (1, vec![("base", vec!["terms"])]),
            (2, vec![("data", vec!["raw"])]),
        ]);

        assert_eq!(
            result,
            Err(StructureError::UnknownParent {
                folder: "raw".to_string(),
                parent: "data".to_string()
            })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = Structure::from_parents([("terms", "base"), ("data", "base"), ("terms", "data")]);
        assert_eq!(result, Err(StructureError::DuplicateFolder("terms".to_string())));
    }

    #[test]
    fn base_is_reserved() {
        let mut structure = Structure::empty();
        assert_eq!(structure.attach("base", "base"), Err(StructureError::ReservedName));
    }

    #[test]
    fn parents_round_trip() {
        let structure = Structure::default();
        let parents = structure.to_parents();
        let rebuilt = Structure::from_parents(parents.iter().map(|(f, p)| (f.as_str(), p.as_str())))
            .unwrap();
        assert_eq!(rebuilt, structure);
    }
}
