use std::{net::SocketAddr, str::FromStr};

use axum::{
    Router,
    routing::{get, post},
};

use crate::{Res, api, api::AppState, info};

/// All routes of the web UI bound to the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/auth", post(api::submit_redirect))
        .route("/callback", get(api::callback))
        .route("/play", post(api::play))
        .route("/dice", post(api::dice))
        .route("/playlist/search", post(api::search_playlist))
        .route("/logout", post(api::logout))
        .route("/health", get(api::health))
        .with_state(state)
}

/// Binds the configured address and serves the web UI until the process ends.
pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&state.config.server_addr)
        .map_err(|e| format!("Failed to parse server address '{}': {}", state.config.server_addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    info!("Spotify redirect URI is {}", state.config.redirect_uri);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
