//! Rendering collaborator: page value objects and their askama templates.

use std::sync::Arc;

use askama::Template;
use axum::http::StatusCode;

use facette_core::{Collection, CollectionView, EntryView, SearchResults, Source};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRow {
    pub id: String,
    pub name: String,
}

impl From<&Arc<Collection>> for CollectionRow {
    fn from(collection: &Arc<Collection>) -> Self {
        Self {
            id: collection.id.clone(),
            name: collection.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub name: String,
    pub origin: String,
}

impl From<&Arc<Source>> for SourceRow {
    fn from(source: &Arc<Source>) -> Self {
        Self {
            name: source.name.clone(),
            origin: source.origin.clone(),
        }
    }
}

/// Terminal states of the browse dispatcher, each carrying its page data.
#[derive(Debug)]
pub enum BrowseView {
    Index {
        roots: Vec<Arc<Collection>>,
    },
    Collection {
        view: CollectionView,
        children: Vec<Arc<Collection>>,
    },
    Search(SearchResults),
}

impl BrowseView {
    pub fn render(&self, url_prefix: &str) -> askama::Result<String> {
        match self {
            Self::Index { roots } => IndexPage {
                url_prefix,
                collections: roots.iter().map(CollectionRow::from).collect(),
            }
            .render(),
            Self::Collection { view, children } => CollectionPage {
                url_prefix,
                id: &view.collection.id,
                name: &view.collection.name,
                description: &view.collection.description,
                parent: &view.parent,
                is_root: view.is_root(),
                query: view.query.as_deref().unwrap_or_default(),
                entries: &view.entries,
                children: children.iter().map(CollectionRow::from).collect(),
            }
            .render(),
            Self::Search(results) => SearchPage {
                url_prefix,
                query: &results.query,
                count: results.count(),
                sources: results.sources.iter().map(SourceRow::from).collect(),
                collections: results.collections.iter().map(CollectionRow::from).collect(),
            }
            .render(),
        }
    }
}

#[derive(Template)]
#[template(path = "browse/index.html")]
struct IndexPage<'a> {
    url_prefix: &'a str,
    collections: Vec<CollectionRow>,
}

#[derive(Template)]
#[template(path = "browse/collection.html")]
struct CollectionPage<'a> {
    url_prefix: &'a str,
    id: &'a str,
    name: &'a str,
    description: &'a str,
    parent: &'a str,
    is_root: bool,
    query: &'a str,
    entries: &'a [EntryView],
    children: Vec<CollectionRow>,
}

#[derive(Template)]
#[template(path = "browse/search.html")]
struct SearchPage<'a> {
    url_prefix: &'a str,
    query: &'a str,
    count: usize,
    sources: Vec<SourceRow>,
    collections: Vec<CollectionRow>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    url_prefix: &'a str,
    status: u16,
    reason: &'static str,
    trace_id: String,
}

impl<'a> ErrorPage<'a> {
    pub fn new(url_prefix: &'a str, status: StatusCode, trace_id: String) -> Self {
        Self {
            url_prefix,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            trace_id,
        }
    }

    pub fn render_page(&self) -> askama::Result<String> {
        self.render()
    }
}
