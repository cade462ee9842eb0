use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use playlyzer::{
    Error,
    config::{Config, DEFAULT_SERVER_ADDRESS},
    playlists::{ListOptions, list_playlists},
    spotify::{PlaylistSource, SpotifyClient},
};
use serde_json::json;

/// Minimal stand-in for the accounts service and the Web API.
struct FakeSpotify {
    base: String,
    token_requests: AtomicUsize,
    reject_next_tracks: AtomicBool,
    requests: Mutex<Vec<String>>,
    bearers: Mutex<Vec<String>>,
}

type Shared = Arc<FakeSpotify>;

impl FakeSpotify {
    fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn bearers(&self) -> Vec<String> {
        self.bearers.lock().unwrap().clone()
    }

    /// Records the request and checks it carries a token issued here.
    fn authorize(&self, uri: &Uri, headers: &HeaderMap) -> bool {
        let target = uri
            .path_and_query()
            .map(|p| p.as_str().to_string())
            .unwrap_or_default();
        self.requests.lock().unwrap().push(target);

        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let valid = bearer.starts_with("Bearer token-");
        self.bearers.lock().unwrap().push(bearer);
        valid
    }
}

async fn token(
    State(fake): State<Shared>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let expected = format!("Basic {}", STANDARD.encode("id:secret"));
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if auth != expected || form.get("grant_type").map(String::as_str) != Some("client_credentials")
    {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let n = fake.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({
        "access_token": format!("token-{n}"),
        "token_type": "Bearer",
        "expires_in": 3600
    }))
    .into_response()
}

async fn user_playlists(State(fake): State<Shared>, uri: Uri, headers: HeaderMap) -> Response {
    if !fake.authorize(&uri, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!({
        "items": [{ "id": "p1", "name": "One", "owner": { "id": "john doe/x" } }],
        "next": format!("{}/v1/pages/playlists-2", fake.base),
        "total": 2
    }))
    .into_response()
}

async fn second_page(State(fake): State<Shared>, uri: Uri, headers: HeaderMap) -> Response {
    if !fake.authorize(&uri, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!({
        "items": [{ "id": "p2", "name": "Two", "owner": { "id": "someone" } }],
        "next": null,
        "total": 2
    }))
    .into_response()
}

async fn tracks(
    State(fake): State<Shared>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if !fake.authorize(&uri, &headers) || fake.reject_next_tracks.swap(false, Ordering::SeqCst) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id != "p1" {
        return StatusCode::NOT_FOUND.into_response();
    }

    Json(json!({
        "items": [
            { "track": { "name": "Song", "artists": [{ "name": "X" }], "album": { "name": "A" } } },
            { "track": null }
        ],
        "next": null
    }))
    .into_response()
}

/// Starts the fake on an ephemeral port and returns it with a matching config.
async fn start_fake(secret: &str) -> (Shared, Config) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let fake = Arc::new(FakeSpotify {
        base: base.clone(),
        token_requests: AtomicUsize::new(0),
        reject_next_tracks: AtomicBool::new(false),
        requests: Mutex::new(Vec::new()),
        bearers: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/token", post(token))
        .route("/v1/users/{user}/playlists", get(user_playlists))
        .route("/v1/pages/playlists-2", get(second_page))
        .route("/v1/playlists/{id}/tracks", get(tracks))
        .with_state(Arc::clone(&fake));

    tokio::spawn(async move { axum::serve(listener, app).await });

    let config = Config {
        client_id: "id".to_string(),
        client_secret: secret.to_string(),
        api_url: format!("{base}/v1"),
        token_url: format!("{base}/token"),
        server_address: DEFAULT_SERVER_ADDRESS.to_string(),
    };
    (fake, config)
}

#[tokio::test]
async fn test_playlists_walk_pages_with_one_token() {
    let (fake, config) = start_fake("secret").await;
    let client = SpotifyClient::new(config);

    let refs = list_playlists(&client, &ListOptions::new("john doe/x", 10))
        .await
        .unwrap();

    let names: Vec<_> = refs.iter().map(|r| (r.id.as_str(), r.name.as_str())).collect();
    assert_eq!(names, vec![("p1", "One"), ("p2", "Two")]);

    assert_eq!(
        fake.requests(),
        vec![
            "/v1/users/john%20doe%2Fx/playlists?limit=50".to_string(),
            "/v1/pages/playlists-2".to_string(),
        ]
    );

    // the cached token serves both pages
    assert_eq!(fake.token_requests(), 1);
    assert!(fake.bearers().iter().all(|b| b == "Bearer token-1"));
}

#[tokio::test]
async fn test_tracks_page_request() {
    let (fake, config) = start_fake("secret").await;
    let client = SpotifyClient::new(config);

    let page = client.tracks_page("p1", None).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(page.items[1].track.is_none());
    assert!(page.next.is_none());

    assert_eq!(fake.requests(), vec!["/v1/playlists/p1/tracks?limit=100".to_string()]);
}

#[tokio::test]
async fn test_unauthorized_drops_cached_token() {
    let (fake, config) = start_fake("secret").await;
    let client = SpotifyClient::new(config);

    client.tracks_page("p1", None).await.unwrap();
    assert_eq!(fake.token_requests(), 1);

    fake.reject_next_tracks.store(true, Ordering::SeqCst);
    match client.tracks_page("p1", None).await {
        Err(Error::Api { status, url }) => {
            assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
            assert!(url.ends_with("/v1/playlists/p1/tracks?limit=100"));
        }
        other => panic!("expected an API error, got {other:?}"),
    }

    client.tracks_page("p1", None).await.unwrap();
    assert_eq!(fake.token_requests(), 2);
    assert_eq!(fake.bearers().last().map(String::as_str), Some("Bearer token-2"));
}

#[tokio::test]
async fn test_error_status_is_not_retried() {
    let (fake, config) = start_fake("secret").await;
    let client = SpotifyClient::new(config);

    let result = client.tracks_page("missing", None).await;
    assert!(matches!(
        result,
        Err(Error::Api { status, .. }) if status == reqwest::StatusCode::NOT_FOUND
    ));
    assert_eq!(fake.requests().len(), 1);
    // a 404 keeps the token
    client.tracks_page("p1", None).await.unwrap();
    assert_eq!(fake.token_requests(), 1);
}

#[tokio::test]
async fn test_rejected_credentials() {
    let (fake, config) = start_fake("wrong").await;
    let token_url = config.token_url.clone();
    let client = SpotifyClient::new(config);

    match client.tracks_page("p1", None).await {
        Err(Error::Api { status, url }) => {
            assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
            assert_eq!(url, token_url);
        }
        other => panic!("expected an API error, got {other:?}"),
    }
    assert!(fake.requests().is_empty());
}
