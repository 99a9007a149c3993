use std::sync::Arc;

use anyhow::Result;
use facette_core::{Catalog, Library, ServerConfig};
use facette_web::WebState;

pub(super) fn serve(
    config: ServerConfig,
    catalog: Arc<Catalog>,
    library: Arc<Library>,
) -> Result<()> {
    tracing::info!(
        bind = %config.bind_addr(),
        url_prefix = %config.url_prefix,
        data = ?config.data_path,
        "starting web server"
    );
    facette_web::serve_web(WebState::new(catalog, library, config))
}
