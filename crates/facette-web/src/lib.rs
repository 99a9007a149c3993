use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router, middleware,
    routing::{any, get},
};

use facette_core::{Catalog, Library, ServerConfig};

mod dto;
mod error;
mod handlers;
mod headers;
mod views;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct WebState {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) library: Arc<Library>,
    pub(crate) config: Arc<ServerConfig>,
}

impl WebState {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, library: Arc<Library>, config: ServerConfig) -> Self {
        Self {
            catalog,
            library,
            config: Arc::new(config),
        }
    }
}

/// Start the browse web server and block until shutdown.
///
/// # Errors
/// Returns an error when the runtime cannot be created, the socket cannot be
/// bound, or the server exits with a runtime failure.
pub fn serve_web(state: WebState) -> Result<()> {
    let bind_addr = state.config.bind_addr();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build web runtime")?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind web server at {bind_addr}"))?;
        tracing::info!(
            "facette listening on http://{}{}/browse/",
            listener.local_addr()?,
            state.config.url_prefix
        );

        axum::serve(listener, app_router(state))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("shutdown requested");
            })
            .await
            .context("web server failed")
    })
}

pub(crate) fn app_router(state: WebState) -> Router {
    let prefix = state.config.url_prefix.clone();
    let mut router = Router::new()
        .route(&format!("{prefix}/"), get(handlers::root_redirect))
        .route(&format!("{prefix}/browse/"), any(handlers::browse_index))
        .route(
            &format!("{prefix}/browse/collections/{{*id}}"),
            any(handlers::browse_collection),
        )
        .route(&format!("{prefix}/browse/search"), any(handlers::browse_search))
        .route(&format!("{prefix}/stats"), any(handlers::serve_stats))
        .route(&format!("{prefix}/reload"), any(handlers::reload));
    if !prefix.is_empty() {
        router = router.route(&prefix, get(handlers::root_redirect));
    }
    router
        .fallback(handlers::fallback)
        .layer(middleware::from_fn(headers::response_headers_middleware))
        .with_state(state)
}
