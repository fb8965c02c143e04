use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::api::AppState;

/// Liveness check for hosting platforms; also tells whether someone is logged in.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let authenticated = state.session.lock().await.is_authenticated();

    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": authenticated,
    }))
}
