//! Paginated listing of a user's playlists.

use async_stream::try_stream;
use futures::{Stream, StreamExt, TryStreamExt};

use crate::{
    Res,
    spotify::PlaylistSource,
    types::{Page, Playlist, PlaylistRef},
    utils::DEFAULT_MAX_PLAYLISTS,
};

/// What to list and how much of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub username: String,
    /// Only keep playlists owned by `username`.
    pub owner_only: bool,
    /// Only keep playlists whose name contains one of these fragments. Empty
    /// keeps everything.
    pub name_contains: Vec<String>,
    pub max_playlists: usize,
}

impl ListOptions {
    pub fn new(username: impl Into<String>, max_playlists: usize) -> Self {
        Self {
            username: username.into(),
            owner_only: false,
            name_contains: Vec::new(),
            max_playlists,
        }
    }

    fn keeps(&self, playlist: &Playlist) -> bool {
        if self.owner_only && playlist.owner.id != self.username {
            return false;
        }

        self.name_contains.is_empty()
            || self
                .name_contains
                .iter()
                .any(|fragment| playlist.name.contains(fragment.as_str()))
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::new("spotify", DEFAULT_MAX_PLAYLISTS)
    }
}

/// Lazily yields the playlists of `options.username` that pass the filters.
///
/// The first page is fetched on first poll. If that fetch fails the user is
/// treated as having no playlists: a warning is logged and the stream ends
/// empty. Failures on later pages are yielded as errors. Every call starts a
/// fresh walk from the first page.
///
/// The stream itself is not capped; see [`list_playlists`].
pub fn playlist_refs<'a, S>(
    source: &'a S,
    options: &'a ListOptions,
) -> impl Stream<Item = Res<PlaylistRef>> + 'a
where
    S: PlaylistSource + ?Sized,
{
    try_stream! {
        let mut current: Option<Page<Playlist>> =
            match source.playlists_page(&options.username, None).await {
                Ok(page) => Some(page),
                Err(e) => {
                    tracing::warn!(username = %options.username, error = %e, "cannot load playlists");
                    None
                }
            };

        while let Some(page) = current.take() {
            for playlist in page.items {
                if options.keeps(&playlist) {
                    yield PlaylistRef::new(playlist.id, playlist.name);
                }
            }

            if let Some(next) = page.next {
                current = Some(source.playlists_page(&options.username, Some(&next)).await?);
            }
        }
    }
}

/// Collects at most `options.max_playlists` playlists.
///
/// Stops fetching pages as soon as the cap is reached.
pub async fn list_playlists<S>(source: &S, options: &ListOptions) -> Res<Vec<PlaylistRef>>
where
    S: PlaylistSource + ?Sized,
{
    if options.max_playlists == 0 {
        return Ok(Vec::new());
    }

    playlist_refs(source, options)
        .take(options.max_playlists)
        .try_collect()
        .await
}
