mod common;

use common::{FakeSource, item, removed};
use playlyzer::{
    analysis::{
        AnalysisOptions, ArtistTally, DEFAULT_TOP_ARTIST_LIMIT, DuplicateFinder,
        analyse_playlist, analyse_playlists, find_duplicates,
        normalize::{normalize, sorted_artists, track_key},
        top_artists,
    },
    types::{PlaylistItem, PlaylistRef, Track},
    utils::AnalysisMode,
};

#[test]
fn test_top_artists_single_winner() {
    let items = vec![
        item("A", &["X"], "One"),
        item("A", &["X"], "One"),
        item("B", &["Y"], "Two"),
    ];

    let top = top_artists([items.as_slice()], DEFAULT_TOP_ARTIST_LIMIT);
    assert_eq!(top.artists, vec!["X".to_string()]);
    assert_eq!(top.count, 2);
}

#[test]
fn test_top_artists_ties_sorted_case_insensitively() {
    let items = vec![
        item("A", &["beta"], ""),
        item("B", &["Alpha"], ""),
        item("C", &["Gamma"], ""),
        item("D", &["gamma"], ""),
    ];

    let top = top_artists([items.as_slice()], DEFAULT_TOP_ARTIST_LIMIT);
    assert_eq!(top.count, 1);
    assert_eq!(top.artists, vec!["Alpha", "beta", "Gamma", "gamma"]);
}

#[test]
fn test_top_artists_trims_names() {
    let items = vec![item("A", &[" X "], ""), item("B", &["X"], "")];

    let top = top_artists([items.as_slice()], DEFAULT_TOP_ARTIST_LIMIT);
    assert_eq!(top.artists, vec!["X"]);
    assert_eq!(top.count, 2);
}

#[test]
fn test_top_artists_empty_input() {
    let top = top_artists(std::iter::empty::<&[PlaylistItem]>(), DEFAULT_TOP_ARTIST_LIMIT);
    assert!(top.artists.is_empty());
    assert_eq!(top.count, 0);

    let only_removed = vec![removed(), removed()];
    let top = top_artists([only_removed.as_slice()], DEFAULT_TOP_ARTIST_LIMIT);
    assert!(top.artists.is_empty());
    assert_eq!(top.count, 0);
}

#[test]
fn test_top_artists_truncates_long_ties() {
    let names: Vec<String> = (0..12).map(|i| format!("Artist {i:02}")).collect();
    let items: Vec<PlaylistItem> = names.iter().map(|n| item("T", &[n.as_str()], "")).collect();

    let top = top_artists([items.as_slice()], 10);
    assert_eq!(top.artists.len(), 11);
    assert_eq!(top.artists[0], "Artist 00");
    assert_eq!(top.artists[9], "Artist 09");
    assert_eq!(top.artists[10], "and 2 others");
    assert_eq!(top.count, 1);
}

#[test]
fn test_top_artists_keeps_one_past_limit() {
    let names: Vec<String> = (0..11).map(|i| format!("Artist {i:02}")).collect();
    let items: Vec<PlaylistItem> = names.iter().map(|n| item("T", &[n.as_str()], "")).collect();

    let top = top_artists([items.as_slice()], 10);
    assert_eq!(top.artists.len(), 11);
    assert!(top.artists.iter().all(|a| a.starts_with("Artist")));
}

#[test]
fn test_tally_total_matches_track_artist_pairs() {
    let pages = vec![
        vec![
            item("A", &["X", "Y"], "One"),
            removed(),
            item("B", &["Y"], "One"),
        ],
        vec![item("C", &["Z", "X", "W"], "Two"), removed()],
    ];

    let mut tally = ArtistTally::new();
    for page in &pages {
        tally.add_items(page);
    }

    let pairs: usize = pages
        .iter()
        .flatten()
        .filter_map(|i| i.track.as_ref())
        .map(|t| t.artists.len())
        .sum();

    assert_eq!(tally.total(), pairs);
    assert_eq!(tally.total(), 6);
    assert_eq!(tally.count("X"), 2);
    assert_eq!(tally.count("Y"), 2);
    assert_eq!(tally.count("nobody"), 0);
}

#[test]
fn test_duplicates_identical_tracks() {
    let items = vec![
        item("Song", &["X"], "Album"),
        item("Song", &["X"], "Album"),
    ];

    let groups = find_duplicates([items.as_slice()], true);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count, 2);
    assert_eq!(groups[0].albums, vec!["Album"]);
    assert_eq!(groups[0].name, "Song");
    assert_eq!(groups[0].artists, vec!["X"]);
}

#[test]
fn test_duplicates_ignore_case_and_punctuation() {
    let items = vec![
        item("Hello, World!", &["X"], "Album"),
        item("hello world", &["X"], "Album"),
    ];

    let groups = find_duplicates([items.as_slice()], true);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count, 2);
    // first spelling is the representative
    assert_eq!(groups[0].name, "Hello, World!");
}

#[test]
fn test_duplicates_artist_order_does_not_matter() {
    let items = vec![
        item("Song", &["B", "a"], "Album"),
        item("Song", &["a", "B"], "Album"),
    ];

    let groups = find_duplicates([items.as_slice()], true);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].artists, vec!["a", "B"]);
}

#[test]
fn test_duplicates_album_part_of_identity() {
    let items = vec![
        item("Song", &["X"], "Album"),
        item("Song", &["X"], "Live"),
    ];

    assert!(find_duplicates([items.as_slice()], true).is_empty());

    let groups = find_duplicates([items.as_slice()], false);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].albums, vec!["Album", "Live"]);
}

#[test]
fn test_duplicates_albums_compared_case_insensitively() {
    let items = vec![
        item("Song", &["X"], "Album"),
        item("Song", &["X"], "ALBUM"),
        item("Song", &["X"], "Other"),
    ];

    let groups = find_duplicates([items.as_slice()], false);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count, 3);
    assert_eq!(groups[0].albums, vec!["Album", "Other"]);
}

#[test]
fn test_duplicates_never_report_single_occurrences() {
    let items = vec![
        item("One", &["X"], "A"),
        item("Two", &["X"], "A"),
        item("Two", &["X"], "A"),
        removed(),
        item("Three", &["Y"], "B"),
    ];

    let mut finder = DuplicateFinder::new(true);
    finder.add_items(&items);
    assert_eq!(finder.distinct(), 3);

    let groups = finder.finish();
    assert_eq!(groups.len(), 1);
    assert!(groups.iter().all(|g| g.count > 1));
}

#[test]
fn test_duplicates_across_pages() {
    let first = vec![item("Song", &["X"], "A")];
    let second = vec![item("SONG", &["x"], "a")];

    let groups = find_duplicates([first.as_slice(), second.as_slice()], true);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count, 2);
}

#[test]
fn test_normalize() {
    assert_eq!(normalize("Hello, World!"), "helloworld");
    assert_eq!(normalize("  A-ha  "), "aha");
    assert_eq!(normalize("Beyoncé"), "beyoncé");
    assert_eq!(normalize("!!!"), "");
}

#[test]
fn test_track_key() {
    let track = Track::new("Take On Me", &["a-ha"], "Hunting High and Low");
    let artists = sorted_artists(&track);

    assert_eq!(track_key(&track, &artists, false), "takeonmeaha");
    assert_eq!(
        track_key(&track, &artists, true),
        "takeonmeahahuntinghighandlow"
    );
}

#[tokio::test]
async fn test_analyse_playlist_reads_every_page_once() {
    let source = FakeSource::new().with_tracks(
        "p1",
        vec![
            vec![item("A", &["X"], "One"), removed()],
            vec![item("A", &["X"], "One"), item("B", &["Y"], "Two")],
        ],
    );

    let analysis = analyse_playlist(&source, "p1", &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(source.track_calls(), 2);
    assert_eq!(analysis.tracks, 3);

    let top = analysis.top_artists.unwrap();
    assert_eq!(top.artists, vec!["X"]);
    assert_eq!(top.count, 2);

    assert_eq!(analysis.duplicates.len(), 1);
    assert_eq!(analysis.duplicates[0].count, 2);
}

#[tokio::test]
async fn test_analyse_playlist_respects_mode() {
    let source = FakeSource::new().with_tracks(
        "p1",
        vec![vec![item("A", &["X"], "One"), item("A", &["X"], "One")]],
    );

    let top_only = AnalysisOptions {
        mode: AnalysisMode::Top,
        ..Default::default()
    };
    let analysis = analyse_playlist(&source, "p1", &top_only).await.unwrap();
    assert!(analysis.top_artists.is_some());
    assert!(analysis.duplicates.is_empty());

    let dup_only = AnalysisOptions {
        mode: AnalysisMode::Dup,
        ..Default::default()
    };
    let analysis = analyse_playlist(&source, "p1", &dup_only).await.unwrap();
    assert!(analysis.top_artists.is_none());
    assert_eq!(analysis.duplicates.len(), 1);
}

#[tokio::test]
async fn test_analyse_playlist_propagates_page_errors() {
    let source = FakeSource::new()
        .with_tracks("p1", vec![vec![item("A", &["X"], "")], vec![]])
        .failing_at("p1#1");

    let result = analyse_playlist(&source, "p1", &AnalysisOptions::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_analyse_playlists_sorts_and_skips_empty() {
    let source = FakeSource::new()
        .with_tracks(
            "small",
            vec![vec![item("A", &["X"], "1"), item("A", &["X"], "1")]],
        )
        .with_tracks(
            "big",
            vec![vec![
                item("B", &["Y"], "2"),
                item("B", &["Y"], "2"),
                item("B", &["Y"], "2"),
                item("C", &["Y"], "2"),
                item("C", &["Y"], "2"),
            ]],
        )
        .with_tracks("empty", vec![vec![removed()]]);

    let playlists = vec![
        PlaylistRef::new("small", "Small"),
        PlaylistRef::new("empty", "Empty"),
        PlaylistRef::new("big", "Big"),
    ];

    let report = analyse_playlists(&source, &playlists, &AnalysisOptions::default())
        .await
        .unwrap();

    let top: Vec<_> = report
        .top_artists
        .iter()
        .map(|e| (e.playlist.as_str(), e.count))
        .collect();
    assert_eq!(top, vec![("Big", 5), ("Small", 2)]);

    let dups: Vec<_> = report
        .duplicate_tracks
        .iter()
        .map(|e| e.playlist.as_str())
        .collect();
    assert_eq!(dups, vec!["Big", "Small"]);

    let big = &report.duplicate_tracks[0].duplicates;
    assert_eq!(big[0].name, "B");
    assert_eq!(big[0].count, 3);
    assert_eq!(big[1].name, "C");
    assert_eq!(big[1].count, 2);
}

#[tokio::test]
async fn test_analyse_playlists_without_playlists() {
    let source = FakeSource::new();
    let report = analyse_playlists(&source, &[], &AnalysisOptions::default())
        .await
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(source.track_calls(), 0);
}
