use std::{io::ErrorKind, sync::Arc};

use dialoguer::{Input, theme::ColorfulTheme};
use tokio::signal;

use crate::{
    Error, Res,
    analysis::AnalysisOptions,
    info,
    playlists::ListOptions,
    spotify::PlaylistSource,
    success, tasks,
    utils::{self, AnalysisMode, DEFAULT_MAX_PLAYLISTS},
    warning,
};

use super::output;

const DEFAULT_USERNAME: &str = "spotify";

/// Interactive loop: ask for a user, a playlist cap and a mode, print the
/// analysis, repeat. Failed rounds are reported and the loop goes on.
///
/// Ctrl+C at a prompt arrives as an interrupted read (the terminal is in raw
/// mode) and ends the loop. Ctrl+C while a round is fetching arrives as a
/// signal and ends the process.
pub async fn console(source: Arc<dyn PlaylistSource>, options: AnalysisOptions) {
    info!("Press Ctrl+C to quit.");

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                println!();
                success!("Bye.");
                // a pending prompt sits on a blocking thread the runtime would wait for
                std::process::exit(0);
            }
            outcome = round(Arc::clone(&source), options) => match outcome {
                Ok(()) => {}
                Err(Error::Interrupted) => {
                    println!();
                    success!("Bye.");
                    return;
                }
                Err(e) => warning!("{}", e),
            }
        }
    }
}

async fn round(source: Arc<dyn PlaylistSource>, options: AnalysisOptions) -> Res<()> {
    let username: String = prompt(|| {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Spotify username")
            .default(DEFAULT_USERNAME.to_string())
            .interact_text()
    })
    .await?;

    let max_playlists: String = prompt(|| {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Max playlists")
            .default(DEFAULT_MAX_PLAYLISTS.to_string())
            .validate_with(|input: &String| utils::parse_max_playlists(input).map(|_| ()))
            .interact_text()
    })
    .await?;
    let max_playlists = utils::parse_max_playlists(&max_playlists).map_err(Error::Input)?;

    let mode: String = prompt(|| {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Mode (top/dup/all)")
            .default(AnalysisMode::All.to_string())
            .validate_with(|input: &String| input.parse::<AnalysisMode>().map(|_| ()))
            .interact_text()
    })
    .await?;
    let mode: AnalysisMode = mode.parse().map_err(Error::Input)?;

    let list = ListOptions::new(username.trim(), max_playlists);
    let options = AnalysisOptions { mode, ..options };

    let pb = output::spinner(format!("Analysing playlists of {}...", list.username));
    let result = tasks::run(source, list, options).await;
    pb.finish_and_clear();

    let (playlists, report) = result?;
    if playlists.is_empty() {
        warning!("No public playlists found for {}", username.trim());
        return Ok(());
    }

    output::print_report(&report);
    success!("Analysed {} playlists", playlists.len());
    Ok(())
}

/// Runs a blocking dialoguer prompt off the async workers.
async fn prompt<T, F>(ask: F) -> Res<T>
where
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(ask).await?.map_err(prompt_error)
}

/// Maps a failed prompt to the crate error. An interrupted read is the user
/// pressing Ctrl+C and becomes [`Error::Interrupted`].
pub fn prompt_error(error: dialoguer::Error) -> Error {
    match error {
        dialoguer::Error::IO(e) if e.kind() == ErrorKind::Interrupted => Error::Interrupted,
        other => Error::Input(other.to_string()),
    }
}
