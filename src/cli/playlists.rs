use std::sync::Arc;

use crate::{
    error, playlists::ListOptions, spotify::PlaylistSource, success, tasks, warning,
};

use super::output;

pub async fn list_playlists(source: Arc<dyn PlaylistSource>, options: ListOptions) {
    let username = options.username.clone();

    let pb = output::spinner(format!("Loading playlists of {username}..."));
    let result = tasks::join(tasks::spawn_load(source, options)).await;
    pb.finish_and_clear();

    match result {
        Ok(playlists) if playlists.is_empty() => {
            warning!("No public playlists found for {}", username)
        }
        Ok(playlists) => {
            output::print_playlists(&playlists);
            success!("Found {} playlists of {}", playlists.len(), username);
        }
        Err(e) => error!("Failed to load playlists. Err: {}", e),
    }
}
