//! Time-series catalog: origins own sources, sources own metrics.
//!
//! The catalog is shared by every request and may be replaced by a reload at
//! any time. Readers take an `Arc` snapshot and walk it without holding the
//! lock; writers build a new map and swap it in.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

pub type CatalogSnapshot = Arc<BTreeMap<String, Arc<Origin>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

impl Metric {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            original_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub name: String,
    pub origin: String,
    pub metrics: BTreeMap<String, Metric>,
}

impl Source {
    #[must_use]
    pub fn new(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            metrics: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in metrics {
            let metric = Metric::new(name);
            self.metrics.insert(metric.name.clone(), metric);
        }
        self
    }

    pub fn metric_keys(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Origin {
    pub name: String,
    pub sources: BTreeMap<String, Arc<Source>>,
}

impl Origin {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: BTreeMap::new(),
        }
    }

    /// Adds a source keyed by its name, rebinding its origin to this one.
    #[must_use]
    pub fn with_source(mut self, mut source: Source) -> Self {
        source.origin.clone_from(&self.name);
        self.sources.insert(source.name.clone(), Arc::new(source));
        self
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    origins: RwLock<CatalogSnapshot>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_origins(origins: impl IntoIterator<Item = Origin>) -> Self {
        let catalog = Self::new();
        catalog.replace(origins);
        catalog
    }

    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        Arc::clone(&self.origins.read())
    }

    pub fn origins(&self) -> Vec<Arc<Origin>> {
        self.snapshot().values().cloned().collect()
    }

    /// All sources in natural order: origins by key, then sources by key.
    pub fn sources(&self) -> Vec<Arc<Source>> {
        sources_in(&self.snapshot())
    }

    pub fn origin_count(&self) -> usize {
        self.snapshot().len()
    }

    pub fn replace(&self, origins: impl IntoIterator<Item = Origin>) {
        let next = origins
            .into_iter()
            .map(|origin| (origin.name.clone(), Arc::new(origin)))
            .collect::<BTreeMap<_, _>>();
        *self.origins.write() = Arc::new(next);
    }

    pub fn insert_origin(&self, origin: Origin) {
        let mut guard = self.origins.write();
        let mut next = guard.as_ref().clone();
        next.insert(origin.name.clone(), Arc::new(origin));
        *guard = Arc::new(next);
    }

    /// Inserts or replaces a source under `origin`, creating the origin when missing.
    pub fn insert_source(&self, origin: &str, source: Source) {
        let mut guard = self.origins.write();
        let mut next = guard.as_ref().clone();
        let current = next
            .get(origin)
            .map_or_else(|| Origin::new(origin), |existing| existing.as_ref().clone());
        next.insert(origin.to_string(), Arc::new(current.with_source(source)));
        *guard = Arc::new(next);
    }
}

pub(crate) fn sources_in(snapshot: &CatalogSnapshot) -> Vec<Arc<Source>> {
    snapshot
        .values()
        .flat_map(|origin| origin.sources.values().cloned())
        .collect()
}
