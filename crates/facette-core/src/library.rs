//! Library of dashboard items: graphs, collections and groups.
//!
//! Same snapshot discipline as [`crate::catalog::Catalog`]: readers clone an
//! `Arc` of the current item set, writers swap in a rebuilt one.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{FacetteError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: String,
    #[serde(default)]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl CollectionEntry {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, key: &str, value: serde_json::Value) -> Self {
        self.options.insert(key.to_string(), value);
        self
    }

    fn title_option(&self) -> Option<&str> {
        self.options
            .get("title")
            .and_then(serde_json::Value::as_str)
            .filter(|title| !title.is_empty())
    }

    fn is_enabled(&self) -> bool {
        self.options
            .get("enabled")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub entries: Vec<CollectionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Collection {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            parent: None,
            entries: Vec::new(),
            modified: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_entry(mut self, entry: CollectionEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Source,
    Metric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub pattern: String,
    #[serde(default)]
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub kind: GroupKind,
    #[serde(default)]
    pub entries: Vec<GroupEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct LibraryItems {
    pub graphs: BTreeMap<String, Arc<Graph>>,
    pub collections: Vec<Arc<Collection>>,
    pub groups: BTreeMap<String, Arc<Group>>,
}

impl LibraryItems {
    fn collection(&self, id: &str) -> Option<&Arc<Collection>> {
        self.collections.iter().find(|collection| collection.id == id)
    }
}

pub type LibrarySnapshot = Arc<LibraryItems>;

#[derive(Debug, Default)]
pub struct Library {
    items: RwLock<LibrarySnapshot>,
}

impl Library {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> LibrarySnapshot {
        Arc::clone(&self.items.read())
    }

    /// Replaces every item at once. Later collections win over earlier ones
    /// sharing the same id, keeping the first one's position.
    pub fn replace(
        &self,
        graphs: impl IntoIterator<Item = Graph>,
        collections: impl IntoIterator<Item = Collection>,
        groups: impl IntoIterator<Item = Group>,
    ) {
        let mut items = LibraryItems {
            graphs: graphs
                .into_iter()
                .map(|graph| (graph.id.clone(), Arc::new(graph)))
                .collect(),
            collections: Vec::new(),
            groups: groups
                .into_iter()
                .map(|group| (group.id.clone(), Arc::new(group)))
                .collect(),
        };
        for collection in collections {
            upsert_collection(&mut items.collections, collection);
        }
        *self.items.write() = Arc::new(items);
    }

    pub fn insert_graph(&self, graph: Graph) {
        self.update(|items| {
            items.graphs.insert(graph.id.clone(), Arc::new(graph));
        });
    }

    pub fn insert_collection(&self, collection: Collection) {
        self.update(|items| upsert_collection(&mut items.collections, collection));
    }

    pub fn insert_group(&self, group: Group) {
        self.update(|items| {
            items.groups.insert(group.id.clone(), Arc::new(group));
        });
    }

    fn update(&self, apply: impl FnOnce(&mut LibraryItems)) {
        let mut guard = self.items.write();
        let mut next = guard.as_ref().clone();
        apply(&mut next);
        *guard = Arc::new(next);
    }

    pub fn get_collection(&self, id: &str) -> Result<Arc<Collection>> {
        self.snapshot()
            .collection(id)
            .cloned()
            .ok_or_else(|| FacetteError::NotFound(format!("collection: {id}")))
    }

    pub fn get_graph(&self, id: &str) -> Result<Arc<Graph>> {
        self.snapshot()
            .graphs
            .get(id)
            .cloned()
            .ok_or_else(|| FacetteError::NotFound(format!("graph: {id}")))
    }

    pub fn collections(&self) -> Vec<Arc<Collection>> {
        self.snapshot().collections.clone()
    }

    pub fn graphs(&self) -> Vec<Arc<Graph>> {
        self.snapshot().graphs.values().cloned().collect()
    }

    pub fn groups(&self) -> Vec<Arc<Group>> {
        self.snapshot().groups.values().cloned().collect()
    }

    /// Direct children of `id`, in stored order.
    pub fn children(&self, id: &str) -> Vec<Arc<Collection>> {
        self.snapshot()
            .collections
            .iter()
            .filter(|collection| collection.parent.as_deref() == Some(id))
            .cloned()
            .collect()
    }

    pub fn graph_count(&self) -> usize {
        self.snapshot().graphs.len()
    }

    pub fn collection_count(&self) -> usize {
        self.snapshot().collections.len()
    }

    pub fn group_count(&self) -> usize {
        self.snapshot().groups.len()
    }

    /// Display title of an entry: its `title` option, else the graph name, else the entry id.
    pub fn entry_title(&self, entry: &CollectionEntry) -> String {
        entry_title_in(&self.snapshot(), entry)
    }

    /// Returns a copy of `collection` holding only the enabled entries whose
    /// title contains `query`, case-insensitively. The stored collection is
    /// left as is.
    pub fn filter_collection(&self, collection: &Collection, query: &str) -> Collection {
        let items = self.snapshot();
        let needle = query.to_lowercase();
        let entries = collection
            .entries
            .iter()
            .filter(|entry| entry.is_enabled())
            .filter(|entry| {
                needle.is_empty() || entry_title_in(&items, entry).to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Collection {
            entries,
            ..collection.clone()
        }
    }
}

fn upsert_collection(collections: &mut Vec<Arc<Collection>>, collection: Collection) {
    let collection = Arc::new(collection);
    match collections
        .iter_mut()
        .find(|existing| existing.id == collection.id)
    {
        Some(slot) => *slot = collection,
        None => collections.push(collection),
    }
}

fn entry_title_in(items: &LibraryItems, entry: &CollectionEntry) -> String {
    if let Some(title) = entry.title_option() {
        return title.to_string();
    }
    items
        .graphs
        .get(&entry.id)
        .map_or_else(|| entry.id.clone(), |graph| graph.name.clone())
}
