// Public fallible APIs in this crate share one concrete error contract (`FacetteError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type"
)]

pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fixture;
pub mod library;
pub mod search;
pub mod stats;

pub use browse::{CollectionView, EntryView, ROOT_PARENT, resolve_collection};
pub use catalog::{Catalog, Metric, Origin, Source};
pub use config::{ConfigOverrides, ServerConfig};
pub use error::{FacetteError, Result};
pub use library::{Collection, CollectionEntry, Graph, Group, GroupEntry, GroupKind, Library};
pub use search::{SearchResults, Searchable, matches, search, search_catalog, tokenize};
pub use stats::CardinalityReport;
