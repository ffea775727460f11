//! Domain models for literature mining.
//!
//! This module contains the search term types, query construction, run
//! metadata and project configuration.

mod config;
pub use config::{CONFIG_FILE, Config};

mod metadata;
pub use metadata::{MetaData, Requester};

pub mod query;

mod term;
pub use term::{SearchGroup, Term};

pub mod term_set;
pub use term_set::{TermKey, TermKind, TermSet, TermSetError, TermSource, Unload};
