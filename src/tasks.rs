//! Background tasks for the two phases of a run.
//!
//! Loading playlists and analysing them are network bound. Each phase runs as
//! its own tokio task so an interactive caller (console loop, web handler)
//! stays responsive; the caller gets a handle and joins it for the typed
//! result. The analysis phase is only spawned once the load phase was joined.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    Res,
    analysis::{self, AnalysisOptions},
    playlists::{self, ListOptions},
    spotify::PlaylistSource,
    types::{AnalysisReport, PlaylistRef},
};

pub type LoadHandle = JoinHandle<Res<Vec<PlaylistRef>>>;
pub type AnalysisHandle = JoinHandle<Res<AnalysisReport>>;

/// Spawns the playlist listing phase.
pub fn spawn_load(source: Arc<dyn PlaylistSource>, options: ListOptions) -> LoadHandle {
    tokio::spawn(async move { playlists::list_playlists(source.as_ref(), &options).await })
}

/// Spawns the analysis phase over `playlists`.
pub fn spawn_analysis(
    source: Arc<dyn PlaylistSource>,
    playlists: Vec<PlaylistRef>,
    options: AnalysisOptions,
) -> AnalysisHandle {
    tokio::spawn(async move {
        analysis::analyse_playlists(source.as_ref(), &playlists, &options).await
    })
}

/// Waits for a task and flattens a panicked or cancelled task into the error.
pub async fn join<T>(handle: JoinHandle<Res<T>>) -> Res<T> {
    handle.await?
}

/// Runs both phases back to back and returns the playlists alongside the
/// report.
pub async fn run(
    source: Arc<dyn PlaylistSource>,
    list: ListOptions,
    options: AnalysisOptions,
) -> Res<(Vec<PlaylistRef>, AnalysisReport)> {
    let playlists = join(spawn_load(Arc::clone(&source), list)).await?;
    let report = join(spawn_analysis(source, playlists.clone(), options)).await?;
    Ok((playlists, report))
}
