use reqwest::Client;
use url::{Url, form_urlencoded};

use crate::{
    config::Config,
    error::{AppError, Result},
    types::{Token, TokenErrorResponse, TokenResponse},
    utils,
};

/// Code and state read back from the pasted redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectParams {
    pub code: String,
    pub state: Option<String>,
}

/// Builds the Spotify authorization URL the user opens to log in.
///
/// Every parameter is percent-encoded. `state` is echoed back by Spotify in
/// the redirect and is checked when the user pastes it in.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config, &utils::generate_state());
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorize_url(config: &Config, state: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}&show_dialog={show_dialog}",
        auth_url = config.auth_url,
        client_id = urlencoding::encode(&config.client_id),
        redirect_uri = urlencoding::encode(&config.redirect_uri),
        scope = urlencoding::encode(&config.scope),
        state = urlencoding::encode(state),
        show_dialog = config.show_dialog,
    )
}

/// Extracts the authorization code from whatever the user pasted.
///
/// Accepted forms:
/// - the full redirect URL, `https://host/callback?code=AQB...&state=xyz`,
///   with or without the scheme
/// - only its query string, `?code=AQB...` or `code=AQB...`
/// - the bare code as shown on the redirect page
///
/// # Errors
///
/// - [`AppError::AuthorizationDenied`] if the redirect carries `error=`
/// - [`AppError::InvalidRedirect`] if no code can be found
pub fn parse_redirect(input: &str) -> Result<RedirectParams> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::InvalidRedirect(
            "nothing was pasted".to_string(),
        ));
    }

    if let Ok(url) = Url::parse(input) {
        // a fragment can hold the parameters too when a static host rewrites the URL
        let query = url.query().or(url.fragment()).unwrap_or_default();
        return params_from_query(query);
    }

    // mobile address bars often drop the scheme, `host/callback?code=...`
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    };
    if query.contains('=') {
        return params_from_query(query);
    }

    if is_code_like(input) {
        return Ok(RedirectParams {
            code: input.to_string(),
            state: None,
        });
    }

    Err(AppError::InvalidRedirect(
        "paste the full address of the page Spotify sent you to".to_string(),
    ))
}

fn params_from_query(query: &str) -> Result<RedirectParams> {
    let mut code = None;
    let mut state = None;
    let mut error = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AppError::AuthorizationDenied(error));
    }

    match code.filter(|c| !c.trim().is_empty()) {
        Some(code) => Ok(RedirectParams {
            code: code.trim().to_string(),
            state,
        }),
        None => Err(AppError::InvalidRedirect(
            "the URL has no 'code' parameter".to_string(),
        )),
    }
}

fn is_code_like(input: &str) -> bool {
    input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Rejects a pasted redirect whose `state` differs from the pending login.
///
/// A missing state on either side is accepted: bare codes carry none, and
/// a restarted server has forgotten the one it issued.
pub fn verify_state(expected: Option<&str>, received: Option<&str>) -> Result<()> {
    match (expected, received) {
        (Some(expected), Some(received)) if expected != received => Err(AppError::StateMismatch),
        _ => Ok(()),
    }
}

/// Exchanges an authorization code for an access token.
///
/// Uses the confidential client flow: the client id and secret are sent as
/// HTTP Basic credentials together with the code and the redirect URI that
/// was used to obtain it.
///
/// # Errors
///
/// - [`AppError::TokenExchange`] with Spotify's description when the code is
///   invalid, expired, or was already used
/// - [`AppError::Http`] on network failures
pub async fn exchange_code(http: &Client, config: &Config, code: &str) -> Result<Token> {
    let res = http
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let token = read_token_response(res).await?;
    Ok(token_from_response(token, None))
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may or may not rotate the refresh token; when the response does
/// not contain one the old refresh token is kept.
pub async fn refresh_token(http: &Client, config: &Config, refresh_token: &str) -> Result<Token> {
    let res = http
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    let token = read_token_response(res).await?;
    Ok(token_from_response(token, Some(refresh_token)))
}

async fn read_token_response(res: reqwest::Response) -> Result<TokenResponse> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(err) => err.error_description.unwrap_or(err.error),
            Err(_) => format!("token endpoint returned {}", status),
        };
        return Err(AppError::TokenExchange(message));
    }

    serde_json::from_str(&body)
        .map_err(|e| AppError::TokenExchange(format!("unexpected token response: {}", e)))
}

fn token_from_response(res: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: res.access_token,
        refresh_token: res
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: res.scope.unwrap_or_default(),
        expires_in: res.expires_in,
        obtained_at: utils::now_timestamp(),
    }
}
