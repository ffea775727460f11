//! Literature Mining Toolkit
//!
//! Search terms are managed as a [`TermSet`], and projects are laid out on
//! disk as a [`ProjectDirectory`].

pub mod domain;
pub use domain::{
    Config, MetaData, Requester, SearchGroup, Term, TermKey, TermKind, TermSet, TermSetError,
    TermSource, Unload,
};

pub mod extract;

pub mod storage;
pub use storage::{
    DirectoryError, DirectorySource, ProjectDirectory, Structure, StructureError, check_directory,
    create_file_structure,
};
