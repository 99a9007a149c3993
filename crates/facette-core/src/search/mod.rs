//! Free-text search over catalog sources and library collections.
//!
//! Matching is a boolean AND of case-insensitive substrings over one name
//! field per entity. There is no ranking and no dedup across corpora.

use std::sync::Arc;

use crate::catalog::{Catalog, Source, sources_in};
use crate::library::{Collection, Library};

mod tokenize;


pub use tokenize::tokenize;

/// An entity exposing the single name field searches compare against.
pub trait Searchable {
    fn search_name(&self) -> &str;
}

impl Searchable for Source {
    fn search_name(&self) -> &str {
        &self.name
    }
}

impl Searchable for Collection {
    fn search_name(&self) -> &str {
        &self.name
    }
}

impl<T: Searchable + ?Sized> Searchable for Arc<T> {
    fn search_name(&self) -> &str {
        self.as_ref().search_name()
    }
}

/// True when every token is a substring of the lowercased entity name.
///
/// An empty token slice never matches.
#[must_use]
pub fn matches<E: Searchable + ?Sized>(entity: &E, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return false;
    }
    let name = entity.search_name().to_lowercase();
    tokens.iter().all(|token| name.contains(token.as_str()))
}

#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub query: String,
    pub sources: Vec<Arc<Source>>,
    pub collections: Vec<Arc<Collection>>,
}

impl SearchResults {
    #[must_use]
    pub fn count(&self) -> usize {
        self.sources.len() + self.collections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Filters both corpora against `query`, preserving their input order.
///
/// A query that is empty once trimmed returns no results at all.
pub fn search<S, C>(query: &str, sources: S, collections: C) -> SearchResults
where
    S: IntoIterator<Item = Arc<Source>>,
    C: IntoIterator<Item = Arc<Collection>>,
{
    if query.trim().is_empty() {
        return SearchResults {
            query: query.to_string(),
            ..SearchResults::default()
        };
    }

    let tokens = tokenize(query);
    SearchResults {
        query: query.to_string(),
        sources: filter_corpus(sources, &tokens),
        collections: filter_corpus(collections, &tokens),
    }
}

/// Runs [`search`] over a snapshot of the catalog's sources and the library's collections.
pub fn search_catalog(catalog: &Catalog, library: &Library, query: &str) -> SearchResults {
    let sources = sources_in(&catalog.snapshot());
    let collections = library.snapshot().collections.clone();
    search(query, sources, collections)
}

fn filter_corpus<E, I>(corpus: I, tokens: &[String]) -> Vec<E>
where
    E: Searchable,
    I: IntoIterator<Item = E>,
{
    corpus
        .into_iter()
        .filter(|entity| matches(entity, tokens))
        .collect()
}
