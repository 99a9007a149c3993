use crate::error::Result;
use crate::library::{Collection, Library};

/// Parent marker of a collection sitting at the root of the tree.
pub const ROOT_PARENT: &str = "null";

#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub id: String,
    pub title: String,
}

/// Read-side projection of a collection for the browse page.
#[derive(Debug, Clone)]
pub struct CollectionView {
    pub collection: Collection,
    /// Parent collection id, or [`ROOT_PARENT`]. Never empty.
    pub parent: String,
    pub query: Option<String>,
    pub entries: Vec<EntryView>,
}

impl CollectionView {
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent == ROOT_PARENT
    }
}

/// Looks up collection `id` and, when `raw_query` is non-empty, narrows it to
/// the entries the library's filter keeps.
pub fn resolve_collection(library: &Library, id: &str, raw_query: &str) -> Result<CollectionView> {
    let stored = library.get_collection(id)?;
    let (collection, query) = if raw_query.is_empty() {
        (stored.as_ref().clone(), None)
    } else {
        (
            library.filter_collection(&stored, raw_query),
            Some(raw_query.to_string()),
        )
    };

    let parent = parent_marker(&collection);
    let entries = collection
        .entries
        .iter()
        .map(|entry| EntryView {
            id: entry.id.clone(),
            title: library.entry_title(entry),
        })
        .collect();

    Ok(CollectionView {
        collection,
        parent,
        query,
        entries,
    })
}

fn parent_marker(collection: &Collection) -> String {
    collection
        .parent
        .as_deref()
        .filter(|parent| !parent.is_empty())
        .unwrap_or(ROOT_PARENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::library::{CollectionEntry, Graph};

    fn sample() -> Library {
        let library = Library::new();
        library.insert_graph(Graph {
            id: "g1".to_string(),
            name: "Load average".to_string(),
            description: String::new(),
            modified: None,
        });
        library.insert_collection(
            Collection::new("root", "Infrastructure")
                .with_entry(CollectionEntry::new("g1"))
                .with_entry(CollectionEntry::new("g2").with_option("title", json!("Disk IO"))),
        );
        library.insert_collection(Collection::new("child", "Web tier").with_parent("root"));
        library.insert_collection(Collection::new("orphan", "Orphan").with_parent(""));
        library
    }

    #[test]
    fn root_collection_gets_root_marker() {
        let view = resolve_collection(&sample(), "root", "").expect("resolve");
        assert_eq!(view.parent, ROOT_PARENT);
        assert!(view.is_root());
        assert!(view.query.is_none());
        assert_eq!(view.entries.len(), 2);
    }

    #[test]
    fn empty_parent_reference_is_never_exposed() {
        let view = resolve_collection(&sample(), "orphan", "").expect("resolve");
        assert_eq!(view.parent, ROOT_PARENT);
    }

    #[test]
    fn child_collection_points_at_parent_id() {
        let view = resolve_collection(&sample(), "child", "").expect("resolve");
        assert_eq!(view.parent, "root");
        assert!(!view.is_root());
    }

    #[test]
    fn unknown_collection_is_not_found() {
        let err = resolve_collection(&sample(), "missing", "").expect_err("missing");
        assert!(err.is_not_found());
    }

    #[test]
    fn query_filters_entries_and_keeps_identity() {
        let library = sample();
        let view = resolve_collection(&library, "root", "disk").expect("resolve");
        assert_eq!(view.collection.id, "root");
        assert_eq!(view.query.as_deref(), Some("disk"));
        assert_eq!(
            view.entries,
            vec![EntryView {
                id: "g2".to_string(),
                title: "Disk IO".to_string(),
            }]
        );
        assert_eq!(library.get_collection("root").expect("root").entries.len(), 2);
    }

    #[test]
    fn query_matching_nothing_yields_empty_view() {
        let view = resolve_collection(&sample(), "root", "network").expect("resolve");
        assert!(view.entries.is_empty());
        assert!(view.collection.entries.is_empty());
        assert_eq!(view.parent, ROOT_PARENT);
    }
}
