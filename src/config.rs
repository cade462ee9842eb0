//! Configuration management for the playlist analyser.
//!
//! Values come from environment variables and `.env` files. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the local data directory (`<data_local_dir>/playlyzer/.env`)
//! 3. `.env` in the current working directory
//! 4. Application defaults (where applicable)
//!
//! Everything is collected once into a [`Config`] value which is handed to the
//! components that need it instead of being read from the environment ad hoc.

use std::{env, io::ErrorKind, path::PathBuf};

use crate::{Error, Res};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";

/// Loads environment variables from `.env` files.
///
/// Creates `<data_local_dir>/playlyzer/` if needed and reads the `.env` file
/// inside it, then a `.env` in the working directory. Variables that are
/// already set are never overwritten. Missing files are not an error, a file
/// that exists but cannot be parsed is.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playlyzer/.env`
/// - macOS: `~/Library/Application Support/playlyzer/.env`
/// - Windows: `%LOCALAPPDATA%/playlyzer/.env`
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    load_env_file(dotenv::from_path(&path))?;
    load_env_file(dotenv::dotenv().map(|_| ()))?;
    Ok(())
}

fn load_env_file(result: dotenv::Result<()>) -> Res<()> {
    match result {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Config(e.to_string())),
    }
}

/// Location of the user's `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlyzer/.env");
    path
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SPOTIFY_CLIENT_ID`, required.
    pub client_id: String,
    /// `SPOTIFY_CLIENT_SECRET`, required.
    pub client_secret: String,
    /// `SPOTIFY_API_URL`, base URL of the Web API without trailing slash.
    pub api_url: String,
    /// `SPOTIFY_API_TOKEN_URL`, client credentials token endpoint.
    pub token_url: String,
    /// `SERVER_ADDRESS`, bind address of the web front end.
    pub server_address: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEnv`] when the client id or secret is unset or
    /// empty.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| value(key).ok_or(Error::MissingEnv(key));

        Ok(Self {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            api_url: value("SPOTIFY_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            token_url: value("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            server_address: value("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        })
    }
}

