use std::sync::Arc;

use crate::{
    analysis::AnalysisOptions,
    error,
    playlists::ListOptions,
    spotify::PlaylistSource,
    success, tasks,
    types::AnalysisReport,
    warning,
};

use super::output;

/// Loads the playlists of `list.username` and prints their analysis, as
/// tables or as JSON.
///
/// In JSON mode stdout carries nothing but the report.
pub async fn analyse(
    source: Arc<dyn PlaylistSource>,
    list: ListOptions,
    options: AnalysisOptions,
    json: bool,
) {
    let username = list.username.clone();

    let pb = output::spinner(format!("Loading playlists of {username}..."));
    let playlists = match tasks::join(tasks::spawn_load(Arc::clone(&source), list)).await {
        Ok(playlists) => playlists,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to load playlists. Err: {}", e);
        }
    };

    if playlists.is_empty() {
        pb.finish_and_clear();
        if json {
            output::print_json(&AnalysisReport::default());
        } else {
            warning!("No public playlists found for {}", username);
        }
        return;
    }

    pb.set_message(format!("Analysing {} playlists...", playlists.len()));
    let count = playlists.len();
    let result = tasks::join(tasks::spawn_analysis(source, playlists, options)).await;
    pb.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => error!("Failed to analyse playlists. Err: {}", e),
    };

    if json {
        output::print_json(&report);
    } else {
        output::print_report(&report);
        success!("Analysed {} playlists of {}", count, username);
    }
}
