use axum::{
    Json,
    extract::{Path, Query, State, rejection::{PathRejection, QueryRejection}},
    http::{Method, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use facette_core::{fixture, resolve_collection, search_catalog, stats};

use crate::WebState;
use crate::dto::BrowseQuery;
use crate::error::{WebError, api_error_response, page_error_response};
use crate::views::BrowseView;

const BROWSE_PATH: &str = "/browse/";

pub async fn root_redirect(State(state): State<WebState>) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, state.config.url(BROWSE_PATH))],
    )
        .into_response()
}

pub async fn browse_index(State(state): State<WebState>, method: Method) -> Response {
    respond_page(&state, &method, "browse.index", || {
        let roots = state
            .library
            .collections()
            .into_iter()
            .filter(|collection| collection.parent.as_deref().is_none_or(str::is_empty))
            .collect();
        Ok(BrowseView::Index { roots })
    })
}

/// The identifier is extracted fallibly so the method check still runs first;
/// an undecodable identifier names no collection.
pub async fn browse_collection(
    State(state): State<WebState>,
    method: Method,
    id: Result<Path<String>, PathRejection>,
    query: Result<Query<BrowseQuery>, QueryRejection>,
) -> Response {
    let query = browse_query(query);
    respond_page(&state, &method, "browse.collection", || {
        let Path(id) = id.map_err(|rejection| {
            tracing::debug!(%rejection, "collection identifier rejected");
            WebError::NotFound
        })?;
        let view = resolve_collection(&state.library, &id, &query.q)?;
        let children = state.library.children(&view.collection.id);
        Ok(BrowseView::Collection { view, children })
    })
}

pub async fn browse_search(
    State(state): State<WebState>,
    method: Method,
    query: Result<Query<BrowseQuery>, QueryRejection>,
) -> Response {
    let query = browse_query(query);
    respond_page(&state, &method, "browse.search", || {
        Ok(BrowseView::Search(search_catalog(
            &state.catalog,
            &state.library,
            &query.q,
        )))
    })
}

/// Anything no route claimed. Paths under the browse namespace still get the
/// method check first, as the other browse pages do.
pub async fn fallback(State(state): State<WebState>, method: Method, uri: Uri) -> Response {
    let in_browse = uri
        .path()
        .strip_prefix(state.config.url_prefix.as_str())
        .is_some_and(|local| local.starts_with(BROWSE_PATH));
    if in_browse {
        return respond_page(&state, &method, "browse.unknown", || Err(WebError::NotFound));
    }
    page_error_response(WebError::NotFound, "fallback", &state.config.url_prefix)
}

pub async fn serve_stats(State(state): State<WebState>, method: Method) -> Response {
    respond_api(&method, "stats", || {
        Ok(stats::collect(&state.catalog, &state.library))
    })
}

pub async fn reload(State(state): State<WebState>, method: Method) -> Response {
    if let Err(err) = ensure_read_method(&method) {
        return api_error_response(err, "reload");
    }
    match reload_data(&state) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => api_error_response(err, "reload"),
    }
}

fn reload_data(state: &WebState) -> Result<(), WebError> {
    let Some(path) = state.config.data_path.as_deref() else {
        tracing::info!("reload requested without a data file; nothing to do");
        return Ok(());
    };
    let document = fixture::load_data(path).map_err(|err| {
        WebError::Internal(format!("reload of {} failed: {err}", path.display()))
    })?;
    document.apply(&state.catalog, &state.library);
    tracing::info!(path = %path.display(), "reloaded catalog and library");
    Ok(())
}

/// A query string that does not decode into `q` is treated as no query.
fn browse_query(query: Result<Query<BrowseQuery>, QueryRejection>) -> BrowseQuery {
    match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!(%rejection, "browse query rejected");
            BrowseQuery::default()
        }
    }
}

fn ensure_read_method(method: &Method) -> Result<(), WebError> {
    if *method == Method::GET || *method == Method::HEAD {
        Ok(())
    } else {
        Err(WebError::MethodNotAllowed)
    }
}

/// Method check, then view construction, then rendering; every failure
/// becomes an error page.
fn respond_page(
    state: &WebState,
    method: &Method,
    operation: &str,
    build: impl FnOnce() -> Result<BrowseView, WebError>,
) -> Response {
    tracing::debug!(operation, %method, "dispatching browse request");
    let rendered = ensure_read_method(method)
        .and_then(|()| build())
        .and_then(|view| Ok(view.render(&state.config.url_prefix)?));
    match rendered {
        Ok(body) => Html(body).into_response(),
        Err(err) => page_error_response(err, operation, &state.config.url_prefix),
    }
}

fn respond_api<T: Serialize>(
    method: &Method,
    operation: &str,
    build: impl FnOnce() -> Result<T, WebError>,
) -> Response {
    match ensure_read_method(method).and_then(|()| build()) {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(err) => api_error_response(err, operation),
    }
}
