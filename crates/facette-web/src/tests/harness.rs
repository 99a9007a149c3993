use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request},
    response::Response,
};
use serde_json::json;
use tower::util::ServiceExt;

use facette_core::{
    Catalog, Collection, CollectionEntry, Graph, Group, GroupKind, Library, Origin,
    ServerConfig, Source,
};

use crate::{WebState, app_router};

pub(super) struct TestHarness {
    pub(super) state: WebState,
    pub(super) router: Router,
}

impl TestHarness {
    pub(super) fn setup() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub(super) fn with_config(config: ServerConfig) -> Self {
        let catalog = Arc::new(Catalog::from_origins([
            Origin::new("collectd")
                .with_source(Source::new("CPU Load Avg", "").with_metrics(["load.1", "load.5"]))
                .with_source(Source::new("web1.example.net", "").with_metrics(["cpu.idle"])),
            Origin::new("graphite")
                .with_source(Source::new("web1.example.net", "").with_metrics(["cpu.idle", "hits"])),
        ]));

        let library = Arc::new(Library::new());
        library.replace(
            [
                Graph {
                    id: "g-load".to_string(),
                    name: "Load average".to_string(),
                    description: String::new(),
                    modified: None,
                },
                Graph {
                    id: "g-hits".to_string(),
                    name: "Web hits".to_string(),
                    description: String::new(),
                    modified: None,
                },
            ],
            [
                Collection::new("infra", "Infrastructure")
                    .with_entry(CollectionEntry::new("g-load"))
                    .with_entry(CollectionEntry::new("g-hits")),
                Collection::new("web", "Web frontends")
                    .with_parent("infra")
                    .with_entry(CollectionEntry::new("g-hits").with_option("title", json!("Frontend hits"))),
            ],
            [Group {
                id: "grp-web".to_string(),
                name: "Web hosts".to_string(),
                kind: GroupKind::Source,
                entries: Vec::new(),
            }],
        );

        let state = WebState::new(catalog, library, config);
        let router = app_router(state.clone());
        Self { state, router }
    }

    pub(super) async fn get(&self, uri: &str) -> Response {
        self.send(Method::GET, uri).await
    }

    pub(super) async fn send(&self, method: Method, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response")
    }
}

pub(super) async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub(super) async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body bytes");
    serde_json::from_slice(&bytes).expect("decode json")
}

pub(super) fn header_value<'a>(headers: &'a axum::http::HeaderMap, key: &str) -> Option<&'a str> {
    headers.get(key).and_then(|value| value.to_str().ok())
}
