use std::collections::HashMap;

use crate::{
    types::{PlaylistItem, TopArtists},
    utils,
};

/// Number of tied artists listed before the rest is summarised.
pub const DEFAULT_TOP_ARTIST_LIMIT: usize = 10;

/// Running count of artist appearances within one playlist.
#[derive(Debug, Default)]
pub struct ArtistTally {
    counts: HashMap<String, usize>,
}

impl ArtistTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every artist of every non-null track in `items`.
    pub fn add_items(&mut self, items: &[PlaylistItem]) {
        for track in items.iter().filter_map(|i| i.track.as_ref()) {
            for artist in track.artist_names() {
                *self.counts.entry(artist.to_string()).or_insert(0) += 1;
            }
        }
    }

    pub fn count(&self, artist: &str) -> usize {
        self.counts.get(artist).copied().unwrap_or(0)
    }

    /// Sum over all artists, i.e. the number of track/artist pairs seen.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Artists tied for the highest count.
    ///
    /// Names are sorted case-insensitively. If more than `limit + 1` artists
    /// are tied only the first `limit` are kept, followed by an
    /// `and N others` entry; a list one longer than `limit` is kept whole since
    /// the summary would be no shorter.
    pub fn top(&self, limit: usize) -> TopArtists {
        let Some(&top_count) = self.counts.values().max() else {
            return TopArtists::default();
        };

        let mut artists: Vec<String> = self
            .counts
            .iter()
            .filter(|(_, count)| **count == top_count)
            .map(|(name, _)| name.clone())
            .collect();
        artists.sort_by(|a, b| utils::cmp_case_insensitive(a, b));

        if artists.len() > limit + 1 {
            let others = artists.len() - limit;
            artists.truncate(limit);
            artists.push(format!("and {others} others"));
        }

        TopArtists {
            artists,
            count: top_count,
        }
    }
}

/// Top artists over a complete sequence of track pages.
pub fn top_artists<'a, I>(pages: I, limit: usize) -> TopArtists
where
    I: IntoIterator<Item = &'a [PlaylistItem]>,
{
    let mut tally = ArtistTally::new();
    for page in pages {
        tally.add_items(page);
    }
    tally.top(limit)
}
