use reqwest::Client;

use crate::{config::Config, error::Result, spotify, success, types::Token, utils};

/// Seconds before the real expiry at which a token counts as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the access token of the session and refreshes it on demand.
///
/// Tokens live in process memory only. Nothing refreshes them in the
/// background; an expired token is refreshed the next time it is needed.
#[derive(Debug, Clone)]
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Returns an access token that is valid for at least a few minutes,
    /// refreshing it first if necessary.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::error::AppError::TokenExchange`] when the refresh
    /// token was revoked or is missing; the user has to log in again then.
    pub async fn get_valid_token(&mut self, http: &Client, config: &Config) -> Result<String> {
        if self.is_expired() {
            let new_token =
                spotify::auth::refresh_token(http, config, &self.token.refresh_token).await?;
            self.token = new_token;
            success!("Spotify access token refreshed");
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(utils::now_timestamp())
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now + EXPIRY_MARGIN_SECS >= expires_at
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
