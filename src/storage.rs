//! On-disk project layout and term files.

mod directory;
mod structure;
pub mod term_file;

pub use directory::{
    DEFAULT_NAME, DirectoryError, DirectorySource, ProjectDirectory, check_directory,
    check_file_structure, create_file_structure,
};
pub use structure::{BASE, Folder, Structure, StructureError};
