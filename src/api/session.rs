use std::{collections::HashMap, sync::Arc};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::{
    tasks::{AnalysisHandle, LoadHandle},
    types::{AnalysisReport, PlaylistRef},
    utils,
};

pub const SESSION_COOKIE: &str = "playlyzer_session";

/// Idle time after which a session is dropped.
pub const SESSION_TTL_MINUTES: i64 = 30;

/// Per-visitor state carried between the form, playlist and analysis pages.
#[derive(Default)]
pub struct Session {
    pub username: Option<String>,
    pub max_playlists: Option<usize>,
    pub owner_only: bool,
    /// Set once a load finished, even when it found nothing.
    pub loaded: bool,
    /// Playlists offered for selection.
    pub playlists: Vec<PlaylistRef>,
    /// Playlists picked for the last analysis.
    pub selected: Vec<PlaylistRef>,
    pub pending_load: Option<LoadHandle>,
    pub pending_analysis: Option<AnalysisHandle>,
    pub report: Option<AnalysisReport>,
}

impl Session {
    /// Name for `id` among the offered playlists.
    pub fn playlist_name(&self, id: &str) -> Option<&str> {
        self.playlists
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }
}

struct Entry {
    session: Session,
    touched_at: DateTime<Utc>,
}

/// Short-lived server-side session storage keyed by a random token.
///
/// The token travels in an HttpOnly cookie; everything else stays on the
/// server.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(SESSION_TTL_MINUTES))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the session id from `jar`, creating a session when the cookie is
    /// missing or points to an unknown or expired session. The returned jar
    /// carries the (possibly new) cookie.
    pub async fn resolve(&self, jar: CookieJar) -> (String, CookieJar) {
        let now = Utc::now();
        let mut sessions = self.inner.lock().await;
        sessions.retain(|_, e| now - e.touched_at < self.ttl);

        if let Some(id) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.touched_at = now;
                return (id, jar);
            }
        }

        let id = utils::generate_session_token();
        sessions.insert(
            id.clone(),
            Entry {
                session: Session::default(),
                touched_at: now,
            },
        );

        let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        (id, jar.add(cookie))
    }

    /// Runs `f` against the session `id`. A session that vanished in the
    /// meantime is recreated empty.
    pub async fn update<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.inner.lock().await;
        let entry = sessions.entry(id.to_string()).or_insert_with(|| Entry {
            session: Session::default(),
            touched_at: Utc::now(),
        });
        entry.touched_at = Utc::now();
        f(&mut entry.session)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
