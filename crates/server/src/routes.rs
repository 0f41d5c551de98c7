use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::albums::{AlbumStore, InMemoryAlbumStore};

use crate::metrics;

pub mod albums;

/// State shared by every handler. The store is the only owner of the album
/// collection; handlers reach it through this handle.
#[derive(Clone)]
pub struct ServerState {
    pub albums: Arc<dyn AlbumStore>,
}

impl ServerState {
    pub fn new(albums: Arc<dyn AlbumStore>) -> Self {
        Self { albums }
    }

    /// Fresh in-memory store holding the startup records, with its size
    /// mirrored into the `album_store_albums` gauge.
    pub fn seeded() -> Self {
        let store = InMemoryAlbumStore::seeded().observe_len(metrics::set_album_count);
        Self::new(Arc::new(store))
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics_endpoint() -> (StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: album CRUD plus health and metrics.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let album_routes = Router::new()
        .route("/albums", get(albums::list_albums).post(albums::create_album))
        .route(
            "/albums/:id",
            get(albums::get_album)
                .put(albums::update_album)
                .delete(albums::delete_album),
        );

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .merge(album_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
