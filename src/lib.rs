//! Spotify Playlist Analyser Library
//!
//! This library fetches a user's public playlists from the Spotify Web API and
//! computes per-playlist statistics: the most frequent artist(s) and the tracks
//! that appear more than once under a normalized identity.
//!
//! # Modules
//!
//! - `analysis` - Top-artist and duplicate-track aggregation
//! - `api` - HTTP handlers for the web front end
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Crate error type
//! - `logging` - Tracing subscriber setup
//! - `playlists` - Paginated playlist listing
//! - `server` - Web server setup
//! - `spotify` - Spotify Web API client
//! - `tasks` - Background tasks for the load and analysis phases
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playlyzer::{config, playlists, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> playlyzer::Res<()> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::new(config::Config::from_env()?);
//!     let refs = playlists::list_playlists(&client, &Default::default()).await?;
//!     println!("{} playlists", refs.len());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod playlists;
pub mod server;
pub mod spotify;
pub mod tasks;
pub mod types;
pub mod utils;

pub use error::Error;

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading playlists for {}", username);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors: the process terminates with exit code 1 right after
/// the message is printed.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems, the program keeps running.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
