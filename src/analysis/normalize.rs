use crate::{types::Track, utils};

/// Keeps the alphanumeric characters of `input`, lower-cased.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Trimmed artist names of `track`, sorted case-insensitively.
pub fn sorted_artists(track: &Track) -> Vec<String> {
    let mut artists: Vec<String> = track.artist_names().map(str::to_string).collect();
    artists.sort_by(|a, b| utils::cmp_case_insensitive(a, b));
    artists
}

/// Identity key used to detect duplicate tracks.
///
/// Track name, then the sorted artist names, then (optionally) the album name,
/// reduced to lower-cased alphanumerics. Formatting differences such as case,
/// punctuation and spacing therefore do not make two entries distinct.
pub fn track_key(track: &Track, artists: &[String], include_album: bool) -> String {
    let mut key = normalize(&track.name);
    for artist in artists {
        key.push_str(&normalize(artist));
    }
    if include_album {
        key.push_str(&normalize(&track.album.name));
    }
    key
}
