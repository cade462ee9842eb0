//! # API Module
//!
//! HTTP handlers of the web front end.
//!
//! The flow mirrors the console: enter a username, pick among the user's
//! playlists, read the analysis.
//!
//! - `GET /` - username form
//! - `POST /loading` - starts loading playlists, then forwards to `/playlists`
//! - `GET /playlists` - playlist selection
//! - `POST /processing` - starts the analysis, then forwards to `/analysis`
//! - `GET /analysis` - results
//! - `GET /health` - liveness and version
//!
//! State between requests lives in a [`SessionStore`] keyed by a cookie. The
//! slow work runs in background tasks whose handles are parked in the session
//! and joined by the page that needs the result.

pub mod pages;
pub mod session;

use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    Error, Res,
    analysis::AnalysisOptions,
    playlists::ListOptions,
    spotify::PlaylistSource,
    tasks,
    types::PlaylistRef,
    utils,
};

pub use session::{Session, SessionStore};

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PlaylistSource>,
    pub sessions: SessionStore,
    pub options: AnalysisOptions,
}

impl AppState {
    pub fn new(source: Arc<dyn PlaylistSource>, options: AnalysisOptions) -> Self {
        Self {
            source,
            sessions: SessionStore::new(),
            options,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoadForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub max_playlists: String,
    #[serde(default)]
    pub owner_only: Option<String>,
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn index(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (id, jar) = state.sessions.resolve(jar).await;
    let page = state
        .sessions
        .update(&id, |s| {
            pages::index(s.username.as_deref(), s.max_playlists, s.owner_only)
        })
        .await;

    (jar, Html(page))
}

pub async fn loading(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoadForm>,
) -> Res<Response> {
    let username = form.username.trim().to_string();
    if username.is_empty() {
        return Ok(Redirect::to("/").into_response());
    }

    let max_playlists = utils::parse_max_playlists(&form.max_playlists).map_err(Error::Input)?;
    let owner_only = form.owner_only.is_some();

    let (id, jar) = state.sessions.resolve(jar).await;

    let mut options = ListOptions::new(username.clone(), max_playlists);
    options.owner_only = owner_only;
    let handle = tasks::spawn_load(Arc::clone(&state.source), options);

    state
        .sessions
        .update(&id, |s| {
            s.username = Some(username);
            s.max_playlists = Some(max_playlists);
            s.owner_only = owner_only;
            s.loaded = false;
            s.playlists.clear();
            s.pending_load = Some(handle);
        })
        .await;

    let page = pages::waiting(
        &format!("Loading up to {max_playlists} playlists..."),
        "/playlists",
    );
    Ok((jar, Html(page)).into_response())
}

pub async fn playlists(State(state): State<AppState>, jar: CookieJar) -> Res<Response> {
    let (id, jar) = state.sessions.resolve(jar).await;

    let pending = state.sessions.update(&id, |s| s.pending_load.take()).await;
    if let Some(handle) = pending {
        let loaded = tasks::join(handle).await?;
        state
            .sessions
            .update(&id, |s| {
                s.playlists = loaded;
                s.loaded = true;
            })
            .await;
    }

    let page = state
        .sessions
        .update(&id, |s| match (&s.username, s.loaded) {
            (Some(username), true) => Some(pages::playlists(username, &s.playlists)),
            _ => None,
        })
        .await;

    Ok(match page {
        Some(page) => (jar, Html(page)).into_response(),
        None => (jar, Redirect::to("/")).into_response(),
    })
}

/// Every checked box arrives as `playlist id = playlist name`.
pub async fn processing(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(checked): Form<Vec<(String, String)>>,
) -> Res<Response> {
    let (id, jar) = state.sessions.resolve(jar).await;

    if checked.is_empty() {
        return Ok((jar, Redirect::to("/playlists")).into_response());
    }

    let selected: Vec<PlaylistRef> = state
        .sessions
        .update(&id, |s| {
            checked
                .into_iter()
                .map(|(playlist_id, posted_name)| {
                    let name = s
                        .playlist_name(&playlist_id)
                        .map(str::to_string)
                        .unwrap_or(posted_name);
                    PlaylistRef::new(playlist_id, name)
                })
                .collect()
        })
        .await;

    let count = selected.len();
    let handle = tasks::spawn_analysis(Arc::clone(&state.source), selected.clone(), state.options);

    state
        .sessions
        .update(&id, |s| {
            s.selected = selected;
            s.report = None;
            s.pending_analysis = Some(handle);
        })
        .await;

    let page = pages::waiting(&format!("Processing {count} playlists..."), "/analysis");
    Ok((jar, Html(page)).into_response())
}

pub async fn analysis(State(state): State<AppState>, jar: CookieJar) -> Res<Response> {
    let (id, jar) = state.sessions.resolve(jar).await;

    let pending = state
        .sessions
        .update(&id, |s| s.pending_analysis.take())
        .await;
    if let Some(handle) = pending {
        let report = tasks::join(handle).await?;
        state
            .sessions
            .update(&id, |s| s.report = Some(report))
            .await;
    }

    let page = state
        .sessions
        .update(&id, |s| s.report.as_ref().map(pages::analysis))
        .await;

    Ok(match page {
        Some(page) => (jar, Html(page)).into_response(),
        None => (jar, Redirect::to("/playlists")).into_response(),
    })
}
