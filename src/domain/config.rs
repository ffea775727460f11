use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::storage::{Structure, StructureError};

/// File name of the project configuration, in the project base folder.
pub const CONFIG_FILE: &str = "config.toml";

/// Configuration for a literature-mining project.
///
/// This holds the folder layout of the project. An empty folder list means
/// the default layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Custom folders as `(folder, parent)` pairs, parents first.
    ///
    /// If this is empty, the default structure is used.
    folders: Vec<(String, String)>,
}

impl Config {
    /// A configuration describing the given structure.
    #[must_use]
    pub fn with_structure(structure: &Structure) -> Self {
        Self {
            folders: structure.to_parents(),
        }
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration from a project base folder.
    ///
    /// Falls back to the default configuration if there is no readable
    /// configuration file.
    #[must_use]
    pub fn load_or_default(base: &Path) -> Self {
        let path = base.join(CONFIG_FILE);
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The custom folders, as `(folder, parent)` pairs.
    #[must_use]
    pub fn folders(&self) -> &[(String, String)] {
        &self.folders
    }

    /// The project structure described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom folders do not form a valid tree.
    pub fn structure(&self) -> Result<Structure, StructureError> {
        if self.folders.is_empty() {
            Ok(Structure::default())
        } else {
            Structure::from_parents(
                self.folders
                    .iter()
                    .map(|(folder, parent)| (folder.as_str(), parent.as_str())),
            )
        }
    }
}

/// A single custom folder, as written in the configuration file.
#[derive(Debug, Serialize, Deserialize)]
struct FolderEntry {
    name: String,
    parent: String,
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        folders: Vec<FolderEntry>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { folders } => Self {
                folders: folders
                    .into_iter()
                    .map(|entry| (entry.name, entry.parent))
                    .collect(),
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            folders: config
                .folders
                .into_iter()
                .map(|(name, parent)| FolderEntry { name, parent })
                .collect(),
        }
    }
}
