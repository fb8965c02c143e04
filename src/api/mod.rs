//! # API Module
//!
//! HTTP handlers of the web UI. All pages are rendered on the server so the
//! app works in any mobile browser without JavaScript.
//!
//! ## Endpoints
//!
//! - [`index`] - login page, or the criteria form once logged in
//! - [`submit_redirect`] - takes the pasted redirect URL and finishes the login
//! - [`callback`] - the redirect page that shows the authorization code
//! - [`play`] - plays a track matching the selected criteria
//! - [`dice`] - plays a random track from a playlist
//! - [`search_playlist`] - lists playlist tracks matching text filters
//! - [`logout`] - forgets the session
//! - [`health`] - status and version for monitoring
//!
//! Handlers share one [`AppState`]. Errors are returned as
//! [`crate::error::AppError`], which renders itself as an HTML page.

mod auth;
mod callback;
mod health;
mod play;

use std::{sync::Arc, time::Duration};

use reqwest::Client;

use crate::{
    config::Config,
    error::{AppError, Result},
    management::{Session, SharedSession},
    spotify::{self, SpotifyClient},
    success,
};

pub use auth::{index, logout, submit_redirect};
pub use callback::callback;
pub use health::health;
pub use play::{dice, play, search_playlist};

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub session: SharedSession,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(AppState {
            config: Arc::new(config),
            http,
            session: Session::shared(),
        })
    }

    /// A Web API client for the logged in user.
    ///
    /// The session lock is only held to read and store the token; a refresh
    /// happens without it. If the refresh fails the session is cleared so the
    /// next page shows the login again.
    pub async fn spotify(&self) -> Result<SpotifyClient> {
        let mut manager = {
            let session = self.session.lock().await;
            session
                .tokens()
                .cloned()
                .ok_or(AppError::NotAuthenticated)?
        };

        let was_expired = manager.is_expired();
        let access_token = match manager.get_valid_token(&self.http, &self.config).await {
            Ok(token) => token,
            Err(e) => {
                self.session.lock().await.logout();
                return Err(e);
            }
        };

        if was_expired {
            self.session.lock().await.update_tokens(manager);
        }

        Ok(SpotifyClient::new(
            self.http.clone(),
            &self.config.api_url,
            access_token,
        ))
    }

    /// Exchanges an authorization code and stores the token in the session.
    ///
    /// The token is checked with `GET /me` before it is kept. Returns the
    /// user's display name.
    pub async fn login_with_code(&self, code: &str) -> Result<String> {
        let token = spotify::auth::exchange_code(&self.http, &self.config, code).await?;
        let client = SpotifyClient::new(
            self.http.clone(),
            &self.config.api_url,
            token.access_token.clone(),
        );
        let user = client.current_user().await?;
        let name = user.name().to_string();

        self.session.lock().await.complete_login(token, name.clone());
        success!("Logged in to Spotify as {}", name);
        Ok(name)
    }
}
