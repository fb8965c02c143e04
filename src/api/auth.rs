use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    api::AppState,
    error::{AppError, Result},
    pages,
    spotify::auth::{authorize_url, parse_redirect, verify_state},
    utils, warning,
};

#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RedirectForm {
    #[serde(default)]
    pub redirect_url: String,
}

/// Landing page.
///
/// When the redirect URI points at the app itself, Spotify lands here with
/// `?code=` and the login completes without any pasting.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<Response> {
    if let Some(error) = params.error {
        return Err(AppError::AuthorizationDenied(error));
    }

    if let Some(code) = params.code.filter(|c| !c.trim().is_empty()) {
        let expected = state.session.lock().await.pending_state().map(str::to_string);
        verify_state(expected.as_deref(), params.state.as_deref())?;
        state.login_with_code(code.trim()).await?;
        return Ok(Redirect::to("/").into_response());
    }

    let user = {
        let mut session = state.session.lock().await;
        if !session.is_authenticated() {
            // reuse the pending state so a reloaded tab still accepts the redirect
            let login_state = session
                .pending_state()
                .map(str::to_string)
                .unwrap_or_else(utils::generate_state);
            session.begin_login(login_state.clone());
            let url = authorize_url(&state.config, &login_state);
            return Ok(Html(pages::login_page(&url)).into_response());
        }
        session.user().unwrap_or("Spotify user").to_string()
    };

    let client = state.spotify().await?;
    let page = match client.current_user_playlists().await {
        Ok(playlists) => pages::home_page(&user, &playlists, None),
        Err(AppError::Api { status: 401, message }) => {
            warning!("Spotify rejected the access token: {}", message);
            state.session.lock().await.logout();
            return Ok(Redirect::to("/").into_response());
        }
        Err(e) => {
            warning!("Failed to load playlists: {}", e);
            pages::home_page(&user, &[], Some(&e.to_string()))
        }
    };

    Ok(Html(page).into_response())
}

/// Finishes the login from a pasted redirect URL or bare code.
pub async fn submit_redirect(
    State(state): State<AppState>,
    Form(form): Form<RedirectForm>,
) -> Result<Redirect> {
    let params = parse_redirect(&form.redirect_url)?;

    let expected = state.session.lock().await.pending_state().map(str::to_string);
    verify_state(expected.as_deref(), params.state.as_deref())?;

    state.login_with_code(&params.code).await?;
    Ok(Redirect::to("/"))
}

pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.session.lock().await.logout();
    Redirect::to("/")
}
