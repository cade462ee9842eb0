use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Client credentials access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub obtained_at: u64,
}

/// One page of a Spotify paging object.
///
/// `next` is the opaque cursor of the following page (Spotify sends the full
/// URL) and is `None` on the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self {
            items,
            next,
            total: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Entry of a playlist's track listing. `track` is null for removed or
/// unavailable tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

impl From<Track> for PlaylistItem {
    fn from(track: Track) -> Self {
        Self { track: Some(track) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub album: TrackAlbum,
}

impl Track {
    pub fn new(name: &str, artists: &[&str], album: &str) -> Self {
        Self {
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| TrackArtist {
                    name: a.to_string(),
                })
                .collect(),
            album: TrackAlbum {
                name: album.to_string(),
            },
        }
    }

    /// Artist names with surrounding whitespace removed.
    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.artists.iter().map(|a| a.name.trim())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub name: String,
}

/// A playlist as carried between the listing and analysis phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub id: String,
    pub name: String,
}

impl PlaylistRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Artist(s) tied for the most appearances and their appearance count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopArtists {
    pub artists: Vec<String>,
    pub count: usize,
}

/// Tracks sharing one normalized identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub name: String,
    pub artists: Vec<String>,
    pub albums: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTopArtists {
    pub playlist: String,
    pub artists: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDuplicates {
    pub playlist: String,
    pub duplicates: Vec<DuplicateGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub top_artists: Vec<PlaylistTopArtists>,
    pub duplicate_tracks: Vec<PlaylistDuplicates>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.top_artists.is_empty() && self.duplicate_tracks.is_empty()
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
}

#[derive(Tabled)]
pub struct TopArtistTableRow {
    pub playlist: String,
    pub artists: String,
    pub count: usize,
}

#[derive(Tabled)]
pub struct DuplicateTableRow {
    pub playlist: String,
    pub track: String,
    pub artists: String,
    pub albums: String,
    pub count: usize,
}
