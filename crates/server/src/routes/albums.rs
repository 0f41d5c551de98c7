use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::albums::{Album, AlbumInput};
use service::errors::ServiceError;
use tracing::info;

use crate::errors::{malformed_body, ApiError};
use crate::metrics;
use crate::routes::ServerState;

/// Count the outcome of `op` and lift a store error into its HTTP form.
fn observe<T>(op: &'static str, res: Result<T, ServiceError>) -> Result<T, ApiError> {
    match res {
        Ok(v) => {
            metrics::record(op, "ok");
            Ok(v)
        }
        Err(e) => {
            metrics::record(op, e.outcome());
            info!(op, error = %e, "album request rejected");
            Err(e.into())
        }
    }
}

/// A literal `null` body binds as an all-empty input and so fails validation
/// rather than parsing.
fn parse_body(
    op: &'static str,
    body: Result<Json<Option<AlbumInput>>, JsonRejection>,
) -> Result<AlbumInput, ApiError> {
    match body {
        Ok(Json(input)) => Ok(input.unwrap_or_default()),
        Err(rejection) => observe(op, Err(malformed_body(rejection))),
    }
}

/// GET /albums
pub async fn list_albums(State(state): State<ServerState>) -> Json<Vec<Album>> {
    let albums = state.albums.list().await;
    metrics::record("list", "ok");
    Json(albums)
}

/// GET /albums/:id
pub async fn get_album(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Album>, ApiError> {
    let album = observe("get", state.albums.get(&id).await)?;
    Ok(Json(album))
}

/// POST /albums
pub async fn create_album(
    State(state): State<ServerState>,
    body: Result<Json<Option<AlbumInput>>, JsonRejection>,
) -> Result<(StatusCode, Json<Album>), ApiError> {
    let input = parse_body("create", body)?;
    let album = observe("create", state.albums.create(input).await)?;
    info!(id = %album.id, title = %album.title, "created album");
    Ok((StatusCode::CREATED, Json(album)))
}

/// PUT /albums/:id
///
/// The body is parsed before the lookup, so a malformed body is reported
/// even for an unknown id.
pub async fn update_album(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<Option<AlbumInput>>, JsonRejection>,
) -> Result<Json<Album>, ApiError> {
    let input = parse_body("update", body)?;
    let album = observe("update", state.albums.update(&id, input).await)?;
    info!(id = %album.id, "updated album");
    Ok(Json(album))
}

/// DELETE /albums/:id
pub async fn delete_album(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    observe("delete", state.albums.delete(&id).await)?;
    info!(%id, "deleted album");
    Ok(StatusCode::NO_CONTENT)
}
