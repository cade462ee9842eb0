use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    Error, Res,
    api::{self, AppState},
};

/// Routes of the web front end.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/loading", post(api::loading))
        .route("/playlists", get(api::playlists))
        .route("/processing", post(api::processing))
        .route("/analysis", get(api::analysis))
        .route("/analyse", get(api::analysis))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_api_server(state: AppState, address: &str) -> Res<()> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| Error::Config(format!("invalid server address '{address}': {e}")))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
