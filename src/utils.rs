use std::{borrow::Cow, cmp::Ordering, fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{DuplicateGroup, PlaylistDuplicates, PlaylistTopArtists};

pub const DEFAULT_MAX_PLAYLISTS: usize = 10;

/// Which statistics to compute for each playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Only the most frequent artists
    Top,
    /// Only duplicate tracks
    Dup,
    /// Both
    #[default]
    All,
}

impl AnalysisMode {
    pub fn top_artists(self) -> bool {
        matches!(self, AnalysisMode::Top | AnalysisMode::All)
    }

    pub fn duplicates(self) -> bool {
        matches!(self, AnalysisMode::Dup | AnalysisMode::All)
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisMode::Top => "top",
            AnalysisMode::Dup => "dup",
            AnalysisMode::All => "all",
        };
        f.write_str(s)
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(AnalysisMode::All),
            "top" => Ok(AnalysisMode::Top),
            "dup" | "dups" | "duplicates" => Ok(AnalysisMode::Dup),
            other => Err(format!(
                "invalid value '{other}' (expected one of: top, dup, all)"
            )),
        }
    }
}

/// Parses a max-playlists answer. Blank input means the default.
pub fn parse_max_playlists(input: &str) -> Result<usize, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_MAX_PLAYLISTS);
    }

    trimmed
        .parse::<usize>()
        .map_err(|e| format!("invalid max playlists '{trimmed}': {e}"))
}

/// Random URL-safe token used as web session id.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Case-insensitive ordering, falling back to the raw strings so the order is
/// total.
pub fn cmp_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorts duplicate groups by occurrence count, highest first.
pub fn sort_duplicate_groups(groups: &mut [DuplicateGroup]) {
    groups.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Sorts per-playlist top artists by count, highest first.
pub fn sort_top_artists(entries: &mut [PlaylistTopArtists]) {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Sorts per-playlist duplicates by the count of their largest group.
///
/// Expects the groups inside each entry to be sorted already.
pub fn sort_playlist_duplicates(entries: &mut [PlaylistDuplicates]) {
    let top = |e: &PlaylistDuplicates| e.duplicates.first().map_or(0, |d| d.count);
    entries.sort_by(|a, b| top(b).cmp(&top(a)));
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
