//! # Spotify Integration Module
//!
//! Thin client for the handful of Spotify Web API endpoints the analyser uses.
//!
//! ```text
//! Application Layer (CLI, Web, Analysis)
//!          ↓
//! PlaylistSource trait
//!          ↓
//! SpotifyClient (reqwest, JSON, client credentials token)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - client credentials grant
//! - `GET /users/{user_id}/playlists` - a user's public playlists
//! - `GET /playlists/{playlist_id}/tracks` - a playlist's track listing
//!
//! Both listing endpoints are paginated. A page carries its `items` and the URL
//! of the following page in `next`; that URL is used verbatim as the cursor for
//! the next request.
//!
//! Non-success responses are returned as [`crate::Error::Api`]; there is no
//! retry. A `401` additionally drops the cached token so the next call
//! authenticates again.

pub mod auth;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    Error, Res,
    config::Config,
    types::{Page, Playlist, PlaylistItem},
};

use auth::TokenManager;

const PLAYLISTS_PAGE_LIMIT: u32 = 50;
const TRACKS_PAGE_LIMIT: u32 = 100;

/// Source of paginated playlist data.
///
/// `next` is the cursor taken from the previous page; `None` requests the
/// first page.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn playlists_page(&self, username: &str, next: Option<&str>) -> Res<Page<Playlist>>;

    async fn tracks_page(&self, playlist_id: &str, next: Option<&str>)
    -> Res<Page<PlaylistItem>>;
}

/// Spotify Web API client.
///
/// Construct one per process and pass it (usually as
/// `Arc<dyn PlaylistSource>`) to whatever needs it.
pub struct SpotifyClient {
    http: Client,
    config: Config,
    tokens: TokenManager,
}

impl SpotifyClient {
    pub fn new(config: Config) -> Self {
        Self {
            http: Client::new(),
            config,
            tokens: TokenManager::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Res<T> {
        let token = self.tokens.get_valid_token(&self.http, &self.config).await?;
        tracing::debug!(url, "GET");

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.invalidate().await;
            }
            return Err(Error::Api {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    fn user_playlists_url(&self, username: &str) -> String {
        format!(
            "{uri}/users/{user}/playlists?limit={limit}",
            uri = self.config.api_url,
            user = urlencoding::encode(username),
            limit = PLAYLISTS_PAGE_LIMIT
        )
    }

    fn playlist_tracks_url(&self, playlist_id: &str) -> String {
        format!(
            "{uri}/playlists/{id}/tracks?limit={limit}",
            uri = self.config.api_url,
            id = urlencoding::encode(playlist_id),
            limit = TRACKS_PAGE_LIMIT
        )
    }
}

#[async_trait]
impl PlaylistSource for SpotifyClient {
    async fn playlists_page(&self, username: &str, next: Option<&str>) -> Res<Page<Playlist>> {
        let url = match next {
            Some(next) => next.to_string(),
            None => self.user_playlists_url(username),
        };
        self.get_json(&url).await
    }

    async fn tracks_page(
        &self,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Res<Page<PlaylistItem>> {
        let url = match next {
            Some(next) => next.to_string(),
            None => self.playlist_tracks_url(playlist_id),
        };
        self.get_json(&url).await
    }
}
