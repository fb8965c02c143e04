use std::collections::HashMap;

use axum::{extract::Query, response::Html};

use crate::pages;

/// Redirect target registered with Spotify.
///
/// Performs no exchange: it only shows the `code` parameter so the user can
/// carry it back to the app, which matters on phones where the redirect
/// opens in a different browser than the one running the app.
pub async fn callback(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    Html(pages::redirect_page(
        params.get("code").map(String::as_str).filter(|c| !c.is_empty()),
        params.get("error").map(String::as_str),
    ))
}
