//! Gauge assertions live in their own test binary: the Prometheus registry is
//! process-global and the other router tests mutate their own stores in parallel.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use server::startup::build_app;

async fn gauge(app: &Router) -> anyhow::Result<Option<String>> {
    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    Ok(text
        .lines()
        .find(|l| l.starts_with("album_store_albums "))
        .map(str::to_owned))
}

async fn call(app: &Router, method: &str, uri: &str, body: &str) -> anyhow::Result<StatusCode> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))?;
    Ok(app.clone().oneshot(req).await?.status())
}

#[tokio::test]
async fn album_gauge_tracks_collection_size_from_startup() -> anyhow::Result<()> {
    let app = build_app();
    assert_eq!(gauge(&app).await?.as_deref(), Some("album_store_albums 3"));

    let status = call(&app, "POST", "/albums", r#"{"id":"4","title":"X","artist":"Y","price":9.99}"#).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(gauge(&app).await?.as_deref(), Some("album_store_albums 4"));

    let status = call(&app, "POST", "/albums", r#"{"id":"5","title":"X","artist":"Y","price":0}"#).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(gauge(&app).await?.as_deref(), Some("album_store_albums 4"));

    let req = Request::builder().method("DELETE").uri("/albums/1").body(Body::empty())?;
    assert_eq!(app.clone().oneshot(req).await?.status(), StatusCode::NO_CONTENT);
    assert_eq!(gauge(&app).await?.as_deref(), Some("album_store_albums 3"));
    Ok(())
}
