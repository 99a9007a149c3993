//! JSON data document seeding the catalog and library.
//!
//! ```json
//! {
//!   "catalog": { "origins": [ { "name": "collectd", "sources": [ { "name": "web1", "metrics": ["load"] } ] } ] },
//!   "library": { "graphs": [], "collections": [], "groups": [] }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Catalog, Metric, Origin, Source};
use crate::error::{FacetteError, Result};
use crate::library::{Collection, Graph, Group, Library};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataDocument {
    #[serde(default)]
    pub catalog: CatalogDocument,
    #[serde(default)]
    pub library: LibraryDocument,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub origins: Vec<OriginDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OriginDocument {
    pub name: String,
    #[serde(default)]
    pub sources: Vec<SourceDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceDocument {
    pub name: String,
    #[serde(default)]
    pub metrics: Vec<MetricDocument>,
}

/// A metric given either as a bare name or as a full object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MetricDocument {
    Name(String),
    Full(Metric),
}

impl MetricDocument {
    fn into_metric(self) -> Metric {
        match self {
            Self::Name(name) => Metric::new(name),
            Self::Full(metric) => metric,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryDocument {
    #[serde(default)]
    pub graphs: Vec<Graph>,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl DataDocument {
    pub fn parse(raw: &str) -> Result<Self> {
        let document = serde_json::from_str::<Self>(raw)?;
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<()> {
        if let Some(origin) = self.catalog.origins.iter().find(|o| o.name.trim().is_empty()) {
            return Err(FacetteError::Validation(format!(
                "origin name must not be empty ({} sources)",
                origin.sources.len()
            )));
        }
        if let Some(collection) = self
            .library
            .collections
            .iter()
            .find(|collection| collection.id.trim().is_empty())
        {
            return Err(FacetteError::Validation(format!(
                "collection id must not be empty: {}",
                collection.name
            )));
        }
        Ok(())
    }

    fn origins(&self) -> Vec<Origin> {
        self.catalog
            .origins
            .iter()
            .map(|origin| {
                origin
                    .sources
                    .iter()
                    .fold(Origin::new(origin.name.clone()), |acc, source| {
                        let mut built = Source::new(source.name.clone(), origin.name.clone());
                        for metric in source.metrics.iter().cloned().map(MetricDocument::into_metric) {
                            built.metrics.insert(metric.name.clone(), metric);
                        }
                        acc.with_source(built)
                    })
            })
            .collect()
    }

    /// Swaps the catalog and library contents for this document's.
    pub fn apply(&self, catalog: &Catalog, library: &Library) {
        catalog.replace(self.origins());
        library.replace(
            self.library.graphs.iter().cloned(),
            self.library.collections.iter().cloned(),
            self.library.groups.iter().cloned(),
        );
        tracing::info!(
            origins = self.catalog.origins.len(),
            collections = self.library.collections.len(),
            "applied data document"
        );
    }
}

pub fn load_data(path: &Path) -> Result<DataDocument> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            FacetteError::NotFound(format!("data file: {}", path.display()))
        } else {
            FacetteError::Io(err)
        }
    })?;
    DataDocument::parse(&raw)
}
