use std::collections::HashMap;

use crate::types::{DuplicateGroup, PlaylistItem};

use super::normalize::{sorted_artists, track_key};

/// Groups tracks by normalized identity while pages stream in.
#[derive(Debug)]
pub struct DuplicateFinder {
    include_album: bool,
    index: HashMap<String, usize>,
    groups: Vec<DuplicateGroup>,
}

impl DuplicateFinder {
    pub fn new(include_album: bool) -> Self {
        Self {
            include_album,
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub fn add_items(&mut self, items: &[PlaylistItem]) {
        for track in items.iter().filter_map(|i| i.track.as_ref()) {
            let artists = sorted_artists(track);
            let key = track_key(track, &artists, self.include_album);
            let album = &track.album.name;

            match self.index.get(&key) {
                Some(&pos) => {
                    let group = &mut self.groups[pos];
                    group.count += 1;

                    let album_lower = album.to_lowercase();
                    if !group.albums.iter().any(|a| a.to_lowercase() == album_lower) {
                        group.albums.push(album.clone());
                    }
                }
                None => {
                    self.index.insert(key, self.groups.len());
                    self.groups.push(DuplicateGroup {
                        name: track.name.clone(),
                        artists,
                        albums: vec![album.clone()],
                        count: 1,
                    });
                }
            }
        }
    }

    /// Number of distinct identities seen so far.
    pub fn distinct(&self) -> usize {
        self.groups.len()
    }

    /// Groups seen more than once, in order of first appearance.
    pub fn finish(self) -> Vec<DuplicateGroup> {
        self.groups.into_iter().filter(|g| g.count > 1).collect()
    }
}

/// Duplicate groups over a complete sequence of track pages.
pub fn find_duplicates<'a, I>(pages: I, include_album: bool) -> Vec<DuplicateGroup>
where
    I: IntoIterator<Item = &'a [PlaylistItem]>,
{
    let mut finder = DuplicateFinder::new(include_album);
    for page in pages {
        finder.add_items(page);
    }
    finder.finish()
}
