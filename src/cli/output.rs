use std::{borrow::Cow, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    types::{AnalysisReport, DuplicateTableRow, PlaylistRef, PlaylistTableRow, TopArtistTableRow},
    warning,
};

pub fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub fn print_playlists(playlists: &[PlaylistRef]) {
    let rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .map(|p| PlaylistTableRow {
            id: p.id.clone(),
            name: p.name.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub fn print_report(report: &AnalysisReport) {
    if report.is_empty() {
        warning!("Nothing to report.");
        return;
    }

    if !report.top_artists.is_empty() {
        let rows: Vec<TopArtistTableRow> = report
            .top_artists
            .iter()
            .map(|e| TopArtistTableRow {
                playlist: e.playlist.clone(),
                artists: e.artists.join(", "),
                count: e.count,
            })
            .collect();

        println!("Top artists");
        println!("{}", Table::new(rows));
    }

    if !report.duplicate_tracks.is_empty() {
        // one row per group, playlist name only on its first row
        let rows: Vec<DuplicateTableRow> = report
            .duplicate_tracks
            .iter()
            .flat_map(|entry| {
                entry
                    .duplicates
                    .iter()
                    .enumerate()
                    .map(move |(i, group)| DuplicateTableRow {
                        playlist: if i == 0 {
                            entry.playlist.clone()
                        } else {
                            String::new()
                        },
                        track: group.name.clone(),
                        artists: group.artists.join(", "),
                        albums: group.albums.join(", "),
                        count: group.count,
                    })
            })
            .collect();

        println!("Duplicate tracks");
        println!("{}", Table::new(rows));
    }
}

pub fn print_json(report: &AnalysisReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(e) => warning!("Cannot serialize report. Err: {}", e),
    }
}
