use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{Error, Res, config::Config, types::Token};

/// Seconds before the real expiry at which a token is considered stale.
const EXPIRY_BUFFER_SECS: u64 = 240;

/// Requests an app access token with the client credentials grant.
///
/// The token only grants access to public data, which is all the analyser
/// needs: public playlists of any user and their track listings.
///
/// # Errors
///
/// Network failures, a non-success status from the token endpoint or a body
/// that is not a token all surface as errors.
pub async fn request_token(http: &Client, config: &Config) -> Res<Token> {
    let response = http
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::Api {
            status: response.status(),
            url: config.token_url.clone(),
        });
    }

    let mut token = response.json::<Token>().await?;
    token.obtained_at = Utc::now().timestamp() as u64;
    Ok(token)
}

/// Caches the current access token and renews it shortly before it expires.
pub struct TokenManager {
    token: Mutex<Option<Token>>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(None),
        }
    }

    /// Returns a usable access token, fetching a new one when needed.
    pub async fn get_valid_token(&self, http: &Client, config: &Config) -> Res<String> {
        let mut lock = self.token.lock().await;

        if let Some(token) = lock.as_ref() {
            if !is_expired(token, Utc::now().timestamp() as u64) {
                return Ok(token.access_token.clone());
            }
        }

        tracing::debug!("requesting new client credentials token");
        let token = request_token(http, config).await?;
        let access_token = token.access_token.clone();
        *lock = Some(token);
        Ok(access_token)
    }

    /// Drops the cached token so the next request fetches a fresh one.
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `token` is expired, or about to, at unix time `now`.
pub fn is_expired(token: &Token, now: u64) -> bool {
    now + EXPIRY_BUFFER_SECS >= token.obtained_at + token.expires_in
}
