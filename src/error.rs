use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{pages, warning};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing Spotify configuration: {0}")]
    MissingConfig(String),

    #[error("Not logged in to Spotify")]
    NotAuthenticated,

    #[error("Could not read an authorization code from the pasted URL: {0}")]
    InvalidRedirect(String),

    #[error("Spotify authorization was denied: {0}")]
    AuthorizationDenied(String),

    #[error("The pasted URL belongs to a different login attempt, please log in again")]
    StateMismatch,

    #[error("Error getting access token: {0}")]
    TokenExchange(String),

    #[error("Invalid selection: {0}")]
    Validation(String),

    #[error("No active Spotify device found - open Spotify on one of your devices and start playing something")]
    NoActiveDevice,

    #[error("Spotify Premium is required for playback control")]
    PremiumRequired,

    #[error("No track matched the selected criteria")]
    NoTrackFound,

    #[error("No tracks found in this playlist")]
    PlaylistEmpty,

    #[error("Spotify rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Spotify API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request to Spotify failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidRedirect(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AuthorizationDenied(_) | AppError::PremiumRequired => StatusCode::FORBIDDEN,
            AppError::StateMismatch | AppError::NoActiveDevice => StatusCode::CONFLICT,
            AppError::NoTrackFound | AppError::PlaylistEmpty => StatusCode::NOT_FOUND,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::TokenExchange(_) | AppError::Api { .. } | AppError::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warning!("{}", self);
        (status, Html(pages::error_page(&self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
