//! Verdict Catalog - versioned storage for rulesets, actions and workflows
//!
//! The catalog is copy-on-write: readers hold an immutable `Arc` snapshot
//! and are never affected by concurrent updates; writers build a new
//! snapshot and swap it in atomically. A file-system loader reads the
//! standard YAML repository layout (`rulesets/`, `actions/`,
//! `workflows/`).

pub mod catalog;
pub mod error;
pub mod loader;

pub use catalog::{Catalog, CatalogSnapshot};
pub use error::{CatalogError, Result};
pub use loader::{CatalogSource, FileSystemCatalog};
