#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use playlyzer::{
    Error, Res,
    spotify::PlaylistSource,
    types::{Page, Playlist, PlaylistItem, PlaylistOwner, Track},
};

/// In-memory playlist source. Pages are addressed by their index, the cursor
/// handed out in `next` is `"<key>#<index>"`.
#[derive(Default)]
pub struct FakeSource {
    playlists: HashMap<String, Vec<Vec<Playlist>>>,
    tracks: HashMap<String, Vec<Vec<PlaylistItem>>>,
    failing: HashSet<String>,
    pub playlist_calls: AtomicUsize,
    pub track_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlists(mut self, user: &str, pages: Vec<Vec<Playlist>>) -> Self {
        self.playlists.insert(user.to_string(), pages);
        self
    }

    pub fn with_tracks(mut self, playlist_id: &str, pages: Vec<Vec<PlaylistItem>>) -> Self {
        self.tracks.insert(playlist_id.to_string(), pages);
        self
    }

    /// Makes the page with `cursor` fail; `"<key>#0"` is the first page.
    pub fn failing_at(mut self, cursor: &str) -> Self {
        self.failing.insert(cursor.to_string());
        self
    }

    pub fn playlist_calls(&self) -> usize {
        self.playlist_calls.load(Ordering::SeqCst)
    }

    pub fn track_calls(&self) -> usize {
        self.track_calls.load(Ordering::SeqCst)
    }

    fn page<T: Clone>(
        &self,
        key: &str,
        pages: Option<&Vec<Vec<T>>>,
        next: Option<&str>,
    ) -> Res<Page<T>> {
        let index = match next {
            Some(cursor) => cursor
                .rsplit('#')
                .next()
                .and_then(|i| i.parse::<usize>().ok())
                .ok_or_else(|| Error::Input(format!("bad cursor {cursor}")))?,
            None => 0,
        };

        let cursor = format!("{key}#{index}");
        if self.failing.contains(&cursor) {
            return Err(Error::Input(format!("{cursor} unavailable")));
        }

        let Some(pages) = pages else {
            return Err(Error::Input(format!("{key} not found")));
        };

        let items = pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < pages.len()).then(|| format!("{key}#{}", index + 1));
        Ok(Page::new(items, next))
    }
}

#[async_trait]
impl PlaylistSource for FakeSource {
    async fn playlists_page(&self, username: &str, next: Option<&str>) -> Res<Page<Playlist>> {
        self.playlist_calls.fetch_add(1, Ordering::SeqCst);
        self.page(username, self.playlists.get(username), next)
    }

    async fn tracks_page(
        &self,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Res<Page<PlaylistItem>> {
        self.track_calls.fetch_add(1, Ordering::SeqCst);
        self.page(playlist_id, self.tracks.get(playlist_id), next)
    }
}

pub fn playlist(id: &str, name: &str, owner: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        owner: PlaylistOwner {
            id: owner.to_string(),
            display_name: None,
        },
    }
}

pub fn item(name: &str, artists: &[&str], album: &str) -> PlaylistItem {
    Track::new(name, artists, album).into()
}

pub fn removed() -> PlaylistItem {
    PlaylistItem { track: None }
}
