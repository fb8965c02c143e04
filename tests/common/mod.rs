#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use moodplay::{config::Config, spotify::SpotifyClient};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct PlayCall {
    pub device_id: Option<String>,
    pub uris: Vec<String>,
}

/// Local stand-in for the Spotify accounts service and Web API.
#[derive(Clone)]
pub struct FakeSpotify {
    pub base: String,
    pub active_device: bool,
    pub plays: Arc<Mutex<Vec<PlayCall>>>,
    pub searches: Arc<Mutex<Vec<String>>>,
    pub token_requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    /// Number of upcoming `/me` requests answered with `502`.
    pub bad_gateways: Arc<AtomicUsize>,
    /// `Retry-After` of a single upcoming `429` on `/me`.
    pub retry_after: Arc<Mutex<Option<u64>>>,
    pub me_requests: Arc<AtomicUsize>,
    /// Answers `/me/playlists` with `401` as for a revoked token.
    pub revoked: Arc<AtomicBool>,
}

impl FakeSpotify {
    pub async fn start(active_device: bool) -> FakeSpotify {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let fake = FakeSpotify {
            base: format!("http://{}", addr),
            active_device,
            plays: Arc::new(Mutex::new(Vec::new())),
            searches: Arc::new(Mutex::new(Vec::new())),
            token_requests: Arc::new(Mutex::new(Vec::new())),
            bad_gateways: Arc::new(AtomicUsize::new(0)),
            retry_after: Arc::new(Mutex::new(None)),
            me_requests: Arc::new(AtomicUsize::new(0)),
            revoked: Arc::new(AtomicBool::new(false)),
        };

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me", get(me))
            .route("/v1/me/player/devices", get(devices))
            .route("/v1/me/player/play", put(play))
            .route("/v1/search", get(search))
            .route("/v1/recommendations", get(recommendations))
            .route("/v1/me/playlists", get(playlists))
            .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
            .with_state(fake.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        fake
    }

    pub fn config(&self) -> Config {
        let mut config = Config::with_credentials(
            "test-client",
            "test-secret",
            "http://localhost:8501/callback",
        );
        config.api_url = format!("{}/v1", self.base);
        config.token_url = format!("{}/api/token", self.base);
        config
    }

    pub fn client(&self) -> SpotifyClient {
        SpotifyClient::new(
            reqwest::Client::new(),
            &format!("{}/v1", self.base),
            "valid-token".to_string(),
        )
        .with_retry_delay(Duration::from_millis(10))
    }

    pub fn fail_with_bad_gateway(&self, times: usize) {
        self.bad_gateways.store(times, Ordering::SeqCst);
    }

    pub fn rate_limit_once(&self, retry_after: u64) {
        *self.retry_after.lock().unwrap() = Some(retry_after);
    }

    pub fn revoke_token(&self) {
        self.revoked.store(true, Ordering::SeqCst);
    }

    pub fn me_requests(&self) -> usize {
        self.me_requests.load(Ordering::SeqCst)
    }

    pub fn plays(&self) -> Vec<PlayCall> {
        self.plays.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

pub fn track_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "artists": [{ "id": "artist1", "name": "The Testers" }],
        "album": { "id": "album1", "name": "Fixtures" },
        "preview_url": null,
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", id) }
    })
}

async fn token(
    State(fake): State<FakeSpotify>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    fake.token_requests.lock().unwrap().push(form.clone());

    if form.get("code").map(String::as_str) == Some("expired-code") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Authorization code expired"
            })),
        )
            .into_response();
    }

    let mut body = json!({
        "access_token": "fresh-access-token",
        "token_type": "Bearer",
        "scope": "user-read-playback-state user-modify-playback-state",
        "expires_in": 3600
    });
    if form.get("grant_type").map(String::as_str) == Some("authorization_code") {
        body["refresh_token"] = json!("fresh-refresh-token");
    }

    Json(body).into_response()
}

async fn me(State(fake): State<FakeSpotify>) -> Response {
    fake.me_requests.fetch_add(1, Ordering::SeqCst);

    let failing = fake
        .bad_gateways
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        return StatusCode::BAD_GATEWAY.into_response();
    }

    if let Some(secs) = fake.retry_after.lock().unwrap().take() {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [("retry-after", secs.to_string())],
        )
            .into_response();
    }

    Json(json!({ "id": "tester", "display_name": "Test User", "product": "premium" }))
        .into_response()
}

async fn devices(State(fake): State<FakeSpotify>) -> Json<Value> {
    Json(json!({
        "devices": [
            {
                "id": "phone-1",
                "name": "Pixel",
                "type": "Smartphone",
                "is_active": fake.active_device,
                "is_restricted": false,
                "volume_percent": 80
            }
        ]
    }))
}

async fn play(
    State(fake): State<FakeSpotify>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> StatusCode {
    let uris = body["uris"]
        .as_array()
        .map(|uris| {
            uris.iter()
                .filter_map(|u| u.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    fake.plays.lock().unwrap().push(PlayCall {
        device_id: query.get("device_id").cloned(),
        uris,
    });

    if fake.active_device {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn search(
    State(fake): State<FakeSpotify>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let q = query.get("q").cloned().unwrap_or_default();
    fake.searches.lock().unwrap().push(q.clone());

    let items = if q.contains("nothing-matches") {
        json!([])
    } else {
        json!([track_json("track1", "Sunny Fixture")])
    };

    Json(json!({ "tracks": { "items": items, "next": null, "total": 1 } }))
}

async fn recommendations() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": { "status": 404, "message": "Service not available" } })),
    )
        .into_response()
}

async fn playlists(
    State(fake): State<FakeSpotify>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if fake.revoked.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "status": 401, "message": "The access token expired" } })),
        )
            .into_response();
    }

    if query.get("page").map(String::as_str) == Some("2") {
        return Json(json!({
            "items": [{ "id": "pl2", "name": "Second", "description": null }, null],
            "next": null,
            "total": 3
        }))
        .into_response();
    }

    Json(json!({
        "items": [{ "id": "pl1", "name": "First", "description": "" }],
        "next": format!("{}/v1/me/playlists?page=2", fake.base),
        "total": 3
    }))
    .into_response()
}

async fn playlist_tracks(Path(id): Path<String>) -> Json<Value> {
    if id == "empty" {
        return Json(json!({ "items": [], "next": null, "total": 0 }));
    }

    Json(json!({
        "items": [
            { "track": track_json("track2", "Rainy Fixture") },
            { "track": null },
            { "track": { "id": null, "name": "Local File", "uri": "spotify:local:x", "artists": [] } }
        ],
        "next": null,
        "total": 3
    }))
}
