//! A project folder on disk
//!
//! The [`ProjectDirectory`] resolves every folder of a [`Structure`] to a path
//! below a base folder, and answers questions about the files inside them.
//! It does not touch the filesystem until asked to; use
//! [`create_file_structure`] to create the folders.

use std::{
    collections::BTreeMap,
    ffi::OsStr,
    io::{self, Write},
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::storage::{BASE, Structure};

/// Default name of the project folder created by [`create_file_structure`].
pub const DEFAULT_NAME: &str = "lisc_db";

/// Errors raised by [`ProjectDirectory`] operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The folder is not part of the project structure.
    #[error("folder '{0}' is not available in the directory structure")]
    UnknownFolder(String),
    /// A filesystem operation failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// A project folder laid out according to a [`Structure`].
///
/// ```
/// use std::path::Path;
///
/// use litmine::ProjectDirectory;
///
/// let db = ProjectDirectory::new("lisc_db");
/// assert_eq!(
///     db.get_file_path("counts", "tutorial_counts.json").unwrap(),
///     Path::new("lisc_db/data/counts/tutorial_counts.json")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDirectory {
    structure: Structure,
    paths: BTreeMap<String, PathBuf>,
}

impl ProjectDirectory {
    /// A project at `base` with the default structure.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self::with_structure(base, Structure::default())
    }

    /// A project at `base` with a custom structure.
    #[must_use]
    pub fn with_structure(base: impl Into<PathBuf>, structure: Structure) -> Self {
        let base = base.into();
        let paths = structure
            .walk(&base)
            .into_iter()
            .map(|(name, path)| (name.to_string(), path))
            .collect();
        Self { structure, paths }
    }

    /// The base folder of the project.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.paths[BASE]
    }

    /// The folder structure of the project.
    #[must_use]
    pub const fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Every folder name with its resolved path.
    #[must_use]
    pub const fn paths(&self) -> &BTreeMap<String, PathBuf> {
        &self.paths
    }

    /// The path of a folder in the project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UnknownFolder`] if the structure has no such
    /// folder.
    pub fn get_folder_path(&self, folder: &str) -> Result<&Path, DirectoryError> {
        self.paths
            .get(folder)
            .map(PathBuf::as_path)
            .ok_or_else(|| DirectoryError::UnknownFolder(folder.to_string()))
    }

    /// The path of a file inside a folder of the project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UnknownFolder`] if the structure has no such
    /// folder.
    pub fn get_file_path(&self, folder: &str, file_name: &str) -> Result<PathBuf, DirectoryError> {
        Ok(self.get_folder_path(folder)?.join(file_name))
    }

    /// The names of the entries in a folder.
    ///
    /// With `drop_ext`, everything from the first `.` of each name is removed.
    ///
    /// # Errors
    ///
    /// Fails if the folder is unknown or cannot be read.
    pub fn get_files(
        &self,
        folder: &str,
        drop_ext: bool,
        sort: bool,
    ) -> Result<Vec<String>, DirectoryError> {
        let path = self.get_folder_path(folder)?;
        let io_error = |source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(path).map_err(io_error)? {
            let name = entry.map_err(io_error)?.file_name();
            let name = name.to_string_lossy();
            let name = if drop_ext {
                name.split('.').next().unwrap_or_default()
            } else {
                &*name
            };
            files.push(name.to_string());
        }

        if sort {
            files.sort();
        }
        Ok(files)
    }

    /// Write the on-disk layout of the project to `out`.
    ///
    /// # Errors
    ///
    /// Fails if the tree cannot be walked or `out` cannot be written to.
    pub fn check_file_structure(&self, out: &mut impl Write) -> Result<(), DirectoryError> {
        check_file_structure(self.base(), out)
    }
}

/// Where [`check_directory`] finds a folder.
#[derive(Debug, Clone, Default)]
pub enum DirectorySource<'a> {
    /// A folder of a project.
    Project(&'a ProjectDirectory),
    /// A path, used as-is.
    Path(PathBuf),
    /// Nowhere: resolves to an empty (relative) path.
    #[default]
    None,
}

impl<'a> From<&'a ProjectDirectory> for DirectorySource<'a> {
    fn from(directory: &'a ProjectDirectory) -> Self {
        Self::Project(directory)
    }
}

impl From<PathBuf> for DirectorySource<'_> {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for DirectorySource<'_> {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for DirectorySource<'_> {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl<'a, T> From<Option<T>> for DirectorySource<'a>
where
    T: Into<Self>,
{
    fn from(source: Option<T>) -> Self {
        source.map_or(Self::None, Into::into)
    }
}

/// Resolve a folder from a directory source.
///
/// - a project resolves to the path of `folder` within it
/// - a path is returned unchanged, ignoring `folder`
/// - no source resolves to an empty path
///
/// # Errors
///
/// Returns [`DirectoryError::UnknownFolder`] if a project has no such folder.
pub fn check_directory(
    directory: &DirectorySource<'_>,
    folder: &str,
) -> Result<PathBuf, DirectoryError> {
    match directory {
        DirectorySource::Project(project) => Ok(project.get_folder_path(folder)?.to_path_buf()),
        DirectorySource::Path(path) => Ok(path.clone()),
        DirectorySource::None => Ok(PathBuf::new()),
    }
}

/// Create every folder of a project structure on disk.
///
/// The project folder is `base/name`, where `base` defaults to the current
/// directory. Folders that already exist are left alone, so this can be run
/// repeatedly.
///
/// # Errors
///
/// Fails if the current directory cannot be determined or a folder cannot be
/// created.
pub fn create_file_structure(
    base: Option<&Path>,
    name: &str,
    structure: Structure,
) -> Result<ProjectDirectory, DirectoryError> {
    let base = match base {
        Some(base) => base.to_path_buf(),
        None => std::env::current_dir().map_err(|source| DirectoryError::Io {
            path: PathBuf::from("."),
            source,
        })?,
    };

    let directory = ProjectDirectory::with_structure(base.join(name), structure);

    for (_, path) in directory.structure().walk(directory.base()) {
        match std::fs::create_dir(&path) {
            Ok(()) => tracing::debug!("Created {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!("Already exists: {}", path.display());
            }
            Err(source) => return Err(DirectoryError::Io { path, source }),
        }
    }

    tracing::info!("Project structure ready at {}", directory.base().display());
    Ok(directory)
}

/// Write the layout of the tree below `base` to `out`.
///
/// Folders end in `/` and each level is indented by four spaces. Hidden
/// files are skipped, but hidden folders and their contents are listed.
/// Entries are sorted by name.
///
/// # Errors
///
/// Fails if the tree cannot be walked or `out` cannot be written to.
pub fn check_file_structure(base: &Path, out: &mut impl Write) -> Result<(), DirectoryError> {
    let io_error = |source| DirectoryError::Io {
        path: base.to_path_buf(),
        source,
    };

    let walker = WalkDir::new(base).sort_by_file_name().into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || entry.file_type().is_dir()
            || !entry.file_name().to_string_lossy().starts_with('.')
    });

    for entry in walker {
        let entry = entry.map_err(|e| io_error(e.into()))?;
        let indent = " ".repeat(4 * entry.depth());
        let name = display_name(entry.path());

        if entry.file_type().is_dir() {
            writeln!(out, "{indent}{name}/").map_err(io_error)?;
        } else {
            writeln!(out, "{indent}{name}").map_err(io_error)?;
        }
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_else(|| OsStr::new("."))
        .to_string_lossy()
        .into_owned()
}
