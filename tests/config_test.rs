use std::env;

use moodplay::{
    config::{Config, DEFAULT_API_URL, DEFAULT_SCOPE, DEFAULT_SERVER_ADDRESS},
    criteria::SelectionStrategy,
    error::AppError,
};

const VARS: [&str; 11] = [
    "SPOTIFY_CLIENT_ID",
    "SPOTIFY_CLIENT_SECRET",
    "SPOTIFY_REDIRECT_URI",
    "SPOTIPY_CLIENT_ID",
    "SPOTIPY_CLIENT_SECRET",
    "SPOTIPY_REDIRECT_URI",
    "SPOTIFY_SHOW_DIALOG",
    "SPOTIFY_MARKET",
    "MOODPLAY_SELECTION",
    "SERVER_ADDRESS",
    "SPOTIFY_API_URL",
];

fn clear() {
    for name in VARS {
        unsafe { env::remove_var(name) };
    }
}

fn set(name: &str, value: &str) {
    unsafe { env::set_var(name, value) };
}

// Kept as one test: the process environment is shared by every test in a binary.
#[test]
fn test_config_from_env() {
    clear();
    match Config::from_env() {
        Err(AppError::MissingConfig(message)) => assert!(
            message.contains("SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET, SPOTIFY_REDIRECT_URI"),
            "{}",
            message
        ),
        other => panic!("expected missing config, got {:?}", other),
    }

    set("SPOTIFY_CLIENT_ID", "id");
    set("SPOTIFY_REDIRECT_URI", "   ");
    match Config::from_env() {
        Err(AppError::MissingConfig(message)) => {
            assert!(message.contains("SPOTIFY_CLIENT_SECRET, SPOTIFY_REDIRECT_URI"));
            assert!(!message.contains("SPOTIFY_CLIENT_ID"));
        }
        other => panic!("expected missing config, got {:?}", other),
    }

    clear();
    set("SPOTIPY_CLIENT_ID", "legacy-id");
    set("SPOTIPY_CLIENT_SECRET", "legacy-secret");
    set("SPOTIPY_REDIRECT_URI", "https://example.org/callback");
    let config = Config::from_env().unwrap();
    assert_eq!(config.client_id, "legacy-id");
    assert_eq!(config.client_secret, "legacy-secret");
    assert_eq!(config.redirect_uri, "https://example.org/callback");
    assert_eq!(config.scope, DEFAULT_SCOPE);
    assert_eq!(config.server_addr, DEFAULT_SERVER_ADDRESS);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert!(config.show_dialog);
    assert_eq!(config.market, None);
    assert_eq!(config.selection, SelectionStrategy::Search);

    set("SPOTIFY_CLIENT_ID", "new-id");
    set("SPOTIFY_SHOW_DIALOG", "no");
    set("SPOTIFY_MARKET", "DE");
    set("MOODPLAY_SELECTION", "recommendations");
    let config = Config::from_env().unwrap();
    assert_eq!(config.client_id, "new-id");
    assert!(!config.show_dialog);
    assert_eq!(config.market.as_deref(), Some("DE"));
    assert_eq!(config.selection, SelectionStrategy::Recommendations);

    set("MOODPLAY_SELECTION", "shuffle");
    assert!(matches!(Config::from_env(), Err(AppError::Validation(_))));

    clear();
}
