//! # Analysis Module
//!
//! Per-playlist statistics over a playlist's track listing:
//!
//! - [`artists`] - the artist(s) with the most track appearances
//! - [`duplicates`] - tracks appearing more than once under a normalized identity
//! - [`normalize`] - the identity key used by the duplicate finder
//!
//! Both statistics are accumulators fed page by page, so a playlist's pages are
//! fetched once no matter which statistics are requested. Entries whose track
//! is null (removed or unavailable) are skipped by both.

pub mod artists;
pub mod duplicates;
pub mod normalize;

use async_stream::try_stream;
use futures::{Stream, StreamExt, pin_mut};
use serde::{Deserialize, Serialize};

use crate::{
    Res,
    spotify::PlaylistSource,
    types::{
        AnalysisReport, DuplicateGroup, PlaylistDuplicates, PlaylistItem, PlaylistRef,
        PlaylistTopArtists, TopArtists,
    },
    utils::{self, AnalysisMode},
};

pub use artists::{ArtistTally, DEFAULT_TOP_ARTIST_LIMIT, top_artists};
pub use duplicates::{DuplicateFinder, find_duplicates};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub mode: AnalysisMode,
    /// Whether the album name is part of a track's identity.
    pub include_album: bool,
    pub top_artist_limit: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::All,
            include_album: true,
            top_artist_limit: DEFAULT_TOP_ARTIST_LIMIT,
        }
    }
}

/// Statistics of a single playlist.
#[derive(Debug, Clone, Default)]
pub struct PlaylistAnalysis {
    pub top_artists: Option<TopArtists>,
    /// Sorted by count, highest first.
    pub duplicates: Vec<DuplicateGroup>,
    /// Entries with a non-null track.
    pub tracks: usize,
}

/// Lazily walks a playlist's track listing, one page per item.
pub fn track_pages<'a, S>(
    source: &'a S,
    playlist_id: &'a str,
) -> impl Stream<Item = Res<Vec<PlaylistItem>>> + 'a
where
    S: PlaylistSource + ?Sized,
{
    try_stream! {
        let mut next: Option<String> = None;
        loop {
            let page = source.tracks_page(playlist_id, next.as_deref()).await?;
            next = page.next;
            yield page.items;

            if next.is_none() {
                break;
            }
        }
    }
}

/// Computes the statistics selected by `options` for one playlist.
pub async fn analyse_playlist<S>(
    source: &S,
    playlist_id: &str,
    options: &AnalysisOptions,
) -> Res<PlaylistAnalysis>
where
    S: PlaylistSource + ?Sized,
{
    let mut tally = options.mode.top_artists().then(ArtistTally::new);
    let mut finder = options
        .mode
        .duplicates()
        .then(|| DuplicateFinder::new(options.include_album));
    let mut tracks = 0;

    let pages = track_pages(source, playlist_id);
    pin_mut!(pages);

    while let Some(items) = pages.next().await {
        let items = items?;
        tracks += items.iter().filter(|i| i.track.is_some()).count();

        if let Some(tally) = tally.as_mut() {
            tally.add_items(&items);
        }
        if let Some(finder) = finder.as_mut() {
            finder.add_items(&items);
        }
    }

    let mut duplicates = finder.map(DuplicateFinder::finish).unwrap_or_default();
    utils::sort_duplicate_groups(&mut duplicates);

    Ok(PlaylistAnalysis {
        top_artists: tally.map(|t| t.top(options.top_artist_limit)),
        duplicates,
        tracks,
    })
}

/// Analyses `playlists` in order and assembles the sorted report.
///
/// Playlists without any artist contribute no top-artist entry, playlists
/// without duplicates no duplicate entry. Entries are ordered by count,
/// highest first.
pub async fn analyse_playlists<S>(
    source: &S,
    playlists: &[PlaylistRef],
    options: &AnalysisOptions,
) -> Res<AnalysisReport>
where
    S: PlaylistSource + ?Sized,
{
    let mut report = AnalysisReport::default();

    for playlist in playlists {
        let analysis = analyse_playlist(source, &playlist.id, options).await?;
        tracing::debug!(
            playlist = %playlist.name,
            tracks = analysis.tracks,
            duplicates = analysis.duplicates.len(),
            "analysed playlist"
        );

        if let Some(top) = analysis.top_artists {
            if !top.artists.is_empty() {
                report.top_artists.push(PlaylistTopArtists {
                    playlist: playlist.name.clone(),
                    artists: top.artists,
                    count: top.count,
                });
            }
        }

        if !analysis.duplicates.is_empty() {
            report.duplicate_tracks.push(PlaylistDuplicates {
                playlist: playlist.name.clone(),
                duplicates: analysis.duplicates,
            });
        }
    }

    utils::sort_top_artists(&mut report.top_artists);
    utils::sort_playlist_duplicates(&mut report.duplicate_tracks);
    Ok(report)
}
