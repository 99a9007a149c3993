//! Cardinality summary of the catalog and library.

use std::collections::HashSet;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogSnapshot};
use crate::library::{Library, LibrarySnapshot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardinalityReport {
    pub origins: usize,
    pub sources: usize,
    pub metrics: usize,
    pub graphs: usize,
    pub collections: usize,
    pub groups: usize,
}

/// Set of distinct keys accepting inserts through a shared reference.
#[derive(Debug, Default)]
pub struct DistinctSet {
    keys: Mutex<HashSet<String>>,
}

impl DistinctSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str) {
        self.keys.lock().insert(key.to_owned());
    }

    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counts origins, distinct source keys and distinct metric keys across the
/// whole catalog, plus the library's item counts.
#[must_use]
pub fn estimate(origins: &CatalogSnapshot, library: &LibrarySnapshot) -> CardinalityReport {
    let sources = DistinctSet::new();
    let metrics = DistinctSet::new();

    for origin in origins.values() {
        for (key, source) in &origin.sources {
            sources.insert(key);
            for metric in source.metric_keys() {
                metrics.insert(metric);
            }
        }
    }

    CardinalityReport {
        origins: origins.len(),
        sources: sources.len(),
        metrics: metrics.len(),
        graphs: library.graphs.len(),
        collections: library.collections.len(),
        groups: library.groups.len(),
    }
}

/// Snapshots both collaborators and estimates over them.
#[must_use]
pub fn collect(catalog: &Catalog, library: &Library) -> CardinalityReport {
    let report = estimate(&catalog.snapshot(), &library.snapshot());
    tracing::debug!(
        origins = report.origins,
        sources = report.sources,
        metrics = report.metrics,
        "computed catalog cardinality"
    );
    report
}
