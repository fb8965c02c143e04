use moodplay::{
    config::{Config, DEFAULT_SCOPE, parse_flag},
    error::AppError,
    management::{Session, TokenManager},
    spotify::auth::*,
    types::Token,
    utils::{escape_html, generate_state},
};
use url::Url;

fn test_config() -> Config {
    Config::with_credentials("my-client", "my-secret", "https://example.org/callback")
}

fn token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: DEFAULT_SCOPE.to_string(),
        expires_in,
        obtained_at,
    }
}

#[test]
fn test_authorize_url_contains_required_parameters() {
    let url = Url::parse(&authorize_url(&test_config(), "state123")).unwrap();
    let params: std::collections::HashMap<String, String> = url.query_pairs().into_owned().collect();

    assert_eq!(url.host_str(), Some("accounts.spotify.com"));
    assert_eq!(params["client_id"], "my-client");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], "https://example.org/callback");
    assert_eq!(params["state"], "state123");
    assert_eq!(params["show_dialog"], "true");

    let scopes: Vec<&str> = params["scope"].split(' ').collect();
    for scope in [
        "user-library-read",
        "user-read-playback-state",
        "user-modify-playback-state",
        "playlist-read-private",
    ] {
        assert!(scopes.contains(&scope), "missing scope {}", scope);
    }
}

#[test]
fn test_parse_full_redirect_url() {
    let params =
        parse_redirect("  https://example.org/callback?code=AQB-x_y&state=abc \n").unwrap();

    assert_eq!(params.code, "AQB-x_y");
    assert_eq!(params.state.as_deref(), Some("abc"));
}

#[test]
fn test_parse_query_string_and_bare_code() {
    assert_eq!(parse_redirect("?code=abc123").unwrap().code, "abc123");
    assert_eq!(parse_redirect("code=abc123&state=s").unwrap().code, "abc123");

    let bare = parse_redirect("AQBxyz-123_456").unwrap();
    assert_eq!(bare.code, "AQBxyz-123_456");
    assert_eq!(bare.state, None);
}

#[test]
fn test_parse_redirect_url_without_scheme() {
    let params = parse_redirect("myapp.example.com/callback?code=AQBxyz&state=s1").unwrap();

    assert_eq!(params.code, "AQBxyz");
    assert_eq!(params.state.as_deref(), Some("s1"));
}

#[test]
fn test_parse_percent_encoded_code() {
    let params = parse_redirect("https://example.org/callback?code=a%2Bb").unwrap();
    assert_eq!(params.code, "a+b");
}

#[test]
fn test_parse_redirect_errors() {
    assert!(matches!(
        parse_redirect(""),
        Err(AppError::InvalidRedirect(_))
    ));
    assert!(matches!(
        parse_redirect("https://example.org/callback"),
        Err(AppError::InvalidRedirect(_))
    ));
    assert!(matches!(
        parse_redirect("https://example.org/callback?code="),
        Err(AppError::InvalidRedirect(_))
    ));
    assert!(matches!(
        parse_redirect("not a url at all"),
        Err(AppError::InvalidRedirect(_))
    ));

    match parse_redirect("https://example.org/callback?error=access_denied&state=x") {
        Err(AppError::AuthorizationDenied(reason)) => assert_eq!(reason, "access_denied"),
        other => panic!("expected denial, got {:?}", other),
    }
}

#[test]
fn test_verify_state() {
    assert!(verify_state(Some("a"), Some("a")).is_ok());
    assert!(verify_state(None, Some("a")).is_ok());
    assert!(verify_state(Some("a"), None).is_ok());
    assert!(matches!(
        verify_state(Some("a"), Some("b")),
        Err(AppError::StateMismatch)
    ));
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_token_expiry_uses_margin() {
    let manager = TokenManager::new(token(1_000, 3_600));

    assert!(!manager.is_expired_at(1_000));
    assert!(!manager.is_expired_at(4_359));
    assert!(manager.is_expired_at(4_360));
    assert!(manager.is_expired_at(10_000));
}

#[test]
fn test_session_lifecycle() {
    let mut session = Session::default();
    assert!(!session.is_authenticated());

    session.begin_login("pending".to_string());
    assert_eq!(session.pending_state(), Some("pending"));

    session.complete_login(token(0, 3600), "Test User".to_string());
    assert!(session.is_authenticated());
    assert_eq!(session.pending_state(), None);
    assert_eq!(session.user(), Some("Test User"));

    session.logout();
    assert!(!session.is_authenticated());
    assert_eq!(session.user(), None);

    // a refresh finishing after logout must not log the user back in
    session.update_tokens(TokenManager::new(token(0, 3600)));
    assert!(!session.is_authenticated());
}

#[test]
fn test_parse_flag() {
    assert!(parse_flag("true"));
    assert!(parse_flag(" YES "));
    assert!(parse_flag("1"));
    assert!(!parse_flag("false"));
    assert!(!parse_flag("nope"));
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
}
