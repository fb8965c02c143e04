//! Configuration management for moodplay.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. Priority order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the local data directory (`<data_local_dir>/moodplay/.env`)
//! 3. `.env` in the working directory
//! 4. Application defaults (where applicable)
//!
//! The `SPOTIPY_*` names used by Spotipy setups are accepted as fallbacks for the
//! three credentials so existing deployments keep working.

use std::{env, path::PathBuf};

use crate::{
    criteria::SelectionStrategy,
    error::{AppError, Result},
};

/// Scopes needed to read the library and playlists and to control playback.
pub const DEFAULT_SCOPE: &str =
    "user-library-read user-read-playback-state user-modify-playback-state playlist-read-private";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8501";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads `.env` files into the process environment.
///
/// Creates `<data_local_dir>/moodplay/` if it does not exist so the user has
/// an obvious place to put the file. Missing `.env` files are not an error;
/// the variables may just as well come from the hosting environment.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> std::result::Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodplay/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // dotenv never overrides variables that are already set, so loading the
    // data dir file first gives it precedence over the working directory one
    dotenv::from_path(&path).ok();
    dotenv::dotenv().ok();
    Ok(())
}

/// Runtime configuration of the web UI and its Spotify client.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub server_addr: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    /// Forces Spotify to show the consent dialog even if already approved,
    /// which makes switching accounts on a shared phone possible.
    pub show_dialog: bool,
    pub market: Option<String>,
    pub selection: SelectionStrategy,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingConfig`] naming every missing credential,
    /// or [`AppError::Validation`] for an unknown `MOODPLAY_SELECTION`.
    pub fn from_env() -> Result<Self> {
        let client_id = credential("SPOTIFY_CLIENT_ID", "SPOTIPY_CLIENT_ID");
        let client_secret = credential("SPOTIFY_CLIENT_SECRET", "SPOTIPY_CLIENT_SECRET");
        let redirect_uri = credential("SPOTIFY_REDIRECT_URI", "SPOTIPY_REDIRECT_URI");

        let (Some(client_id), Some(client_secret), Some(redirect_uri)) =
            (client_id.clone(), client_secret.clone(), redirect_uri.clone())
        else {
            let missing: Vec<&str> = [
                ("SPOTIFY_CLIENT_ID", client_id.is_none()),
                ("SPOTIFY_CLIENT_SECRET", client_secret.is_none()),
                ("SPOTIFY_REDIRECT_URI", redirect_uri.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect();

            return Err(AppError::MissingConfig(format!(
                "set {} in the environment or in a .env file",
                missing.join(", ")
            )));
        };

        let selection = match optional("MOODPLAY_SELECTION") {
            Some(value) => value.parse()?,
            None => SelectionStrategy::default(),
        };

        Ok(Config {
            client_id,
            client_secret,
            redirect_uri,
            scope: optional("SPOTIFY_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            server_addr: optional("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            api_url: optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            auth_url: optional("SPOTIFY_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: optional("SPOTIFY_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            show_dialog: optional("SPOTIFY_SHOW_DIALOG")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            market: optional("SPOTIFY_MARKET"),
            selection,
        })
    }

    /// Configuration with the public Spotify endpoints and the given
    /// credentials. Used by tests and tools that do not read the environment.
    pub fn with_credentials(client_id: &str, client_secret: &str, redirect_uri: &str) -> Self {
        Config {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: redirect_uri.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            show_dialog: true,
            market: None,
            selection: SelectionStrategy::default(),
        }
    }
}

fn credential(name: &str, fallback: &str) -> Option<String> {
    optional(name).or_else(|| optional(fallback))
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Interprets common truthy spellings; anything else is `false`.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
