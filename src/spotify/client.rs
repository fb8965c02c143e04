use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::time::sleep;

use crate::{
    error::{AppError, Result},
    types::{ApiErrorResponse, UserProfile},
    warning,
};

const BAD_GATEWAY_RETRIES: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(2);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Thin Spotify Web API client bound to one access token.
///
/// Transient failures are retried the same way for every endpoint:
/// - `502 Bad Gateway` is retried a few times with a fixed delay
/// - `429 Too Many Requests` waits for `Retry-After` if it is at most two
///   minutes, otherwise it fails with [`AppError::RateLimited`]
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
    retry_delay: Duration,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: &str, token: String) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            retry_delay: BAD_GATEWAY_DELAY,
        }
    }

    /// Overrides the pause between `502` retries.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        self.get_json_url(&url, query).await
    }

    /// GET on an absolute URL, used to follow `next` links of paged results.
    pub(crate) async fn get_json_url<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .send(|| self.http.request(Method::GET, url).query(query))
            .await?;
        let response = error_for_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// PUT with a JSON body. The raw response is returned so callers can
    /// interpret endpoint-specific statuses.
    pub(crate) async fn put_json<B: Serialize>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Response> {
        let url = self.url(path);
        self.send(|| self.http.request(Method::PUT, &url).query(query).json(body))
            .await
    }

    async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempts = 0;

        loop {
            let response = build().bearer_auth(&self.token).send().await?;

            match response.status() {
                StatusCode::BAD_GATEWAY if attempts < BAD_GATEWAY_RETRIES => {
                    attempts += 1;
                    sleep(self.retry_delay).await;
                    continue; // retry
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.trim().parse::<u64>().ok())
                        .unwrap_or(1);

                    if retry_after > MAX_RETRY_AFTER_SECS || attempts >= BAD_GATEWAY_RETRIES {
                        return Err(AppError::RateLimited(retry_after));
                    }

                    warning!("Rate limited by Spotify, retrying in {} seconds", retry_after);
                    attempts += 1;
                    sleep(Duration::from_secs(retry_after)).await;
                    continue;
                }
                _ => return Ok(response),
            }
        }
    }

    /// Profile of the logged in user, used to validate a fresh token.
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.get_json("/me", &[]).await
    }
}

/// Turns a non-success response into [`AppError::Api`], keeping Spotify's message.
pub(crate) async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

pub(crate) fn api_error(status: StatusCode, body: &str) -> AppError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(err) => err.error.message,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body.trim().to_string(),
    };

    AppError::Api {
        status: status.as_u16(),
        message,
    }
}
