use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use facette_core::{
    Catalog, ConfigOverrides, Library, SearchResults, ServerConfig, fixture, search_catalog, stats,
};

use crate::cli::{Cli, Commands};

mod support;
mod web;


use self::support::print_json;
use self::web::serve;

pub(crate) fn run(cli: Cli) -> Result<()> {
    let overrides = overrides_for(&cli);
    let config = ServerConfig::load(cli.config.as_deref(), overrides)
        .context("failed to resolve configuration")?;
    let (catalog, library) = load_collaborators(&config)?;

    match cli.command {
        Commands::Web(_) => serve(config, catalog, library),
        Commands::Stats => print_json(&stats::collect(&catalog, &library)),
        Commands::Search(args) => {
            let results = search_catalog(&catalog, &library, &args.query);
            print_json(&SearchOutput::from(&results))
        }
    }
}

fn overrides_for(cli: &Cli) -> ConfigOverrides {
    let mut overrides = ConfigOverrides {
        data_path: cli.data.clone(),
        ..ConfigOverrides::default()
    };
    if let Commands::Web(args) = &cli.command {
        overrides.host.clone_from(&args.host);
        overrides.port = args.port;
        overrides.url_prefix.clone_from(&args.url_prefix);
    }
    overrides
}

fn load_collaborators(config: &ServerConfig) -> Result<(Arc<Catalog>, Arc<Library>)> {
    let catalog = Arc::new(Catalog::new());
    let library = Arc::new(Library::new());
    if let Some(path) = config.data_path.as_deref() {
        let document = fixture::load_data(path)
            .with_context(|| format!("failed to load data file {}", path.display()))?;
        document.apply(&catalog, &library);
    } else {
        tracing::warn!("no data file configured; catalog and library start empty");
    }
    Ok((catalog, library))
}

#[derive(Debug, Serialize)]
struct SearchOutput {
    query: String,
    count: usize,
    sources: Vec<SourceOutput>,
    collections: Vec<CollectionOutput>,
}

#[derive(Debug, Serialize)]
struct SourceOutput {
    origin: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct CollectionOutput {
    id: String,
    name: String,
}

impl From<&SearchResults> for SearchOutput {
    fn from(results: &SearchResults) -> Self {
        Self {
            query: results.query.clone(),
            count: results.count(),
            sources: results
                .sources
                .iter()
                .map(|source| SourceOutput {
                    origin: source.origin.clone(),
                    name: source.name.clone(),
                })
                .collect(),
            collections: results
                .collections
                .iter()
                .map(|collection| CollectionOutput {
                    id: collection.id.clone(),
                    name: collection.name.clone(),
                })
                .collect(),
        }
    }
}
