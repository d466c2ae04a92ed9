//! Access-token acquisition and caching.
//!
//! The service hands out year-long bearer tokens through an OAuth2 password
//! grant. The exchange runs at most once per process: a cached token on
//! disk is reused across runs, and the loaded token is immutable for the
//! life of the process.

use crate::config::ServiceConfig;
use crate::error::Error;
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// A bearer token for the game service.
///
/// Immutable once loaded. `Debug` keeps the secret out of logs.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// The raw token, for building an `Authorization: Bearer` header.
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(***)")
    }
}

/// Token endpoint response. Extra fields (scope, expiry) are ignored.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Loads the cached token, or performs the password-grant exchange and
/// caches the result.
///
/// `force` skips the cache and always re-requests.
#[instrument(skip_all, fields(cache = %config.token_cache().display(), force))]
pub async fn load_or_request(
    config: &ServiceConfig,
    http: &reqwest::Client,
    force: bool,
) -> Result<AccessToken, Error> {
    if !force {
        if let Some(token) = read_cache(config).await? {
            info!("Using cached access token");
            return Ok(token);
        }
    }
    let token = request_token(config, http).await?;
    write_cache(config, &token).await?;
    Ok(token)
}

/// Reads a previously cached token, if one exists and is non-empty.
async fn read_cache(config: &ServiceConfig) -> Result<Option<AccessToken>, Error> {
    let path = config.token_cache();
    if !path.exists() {
        debug!("No cached token");
        return Ok(None);
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::auth(format!("failed to read token cache: {e}")))?;
    let token = content.trim();
    if token.is_empty() {
        debug!("Token cache is empty");
        return Ok(None);
    }
    Ok(Some(AccessToken(token.to_string())))
}

/// Writes the token to the cache file for the next run.
async fn write_cache(config: &ServiceConfig, token: &AccessToken) -> Result<(), Error> {
    tokio::fs::write(config.token_cache(), token.reveal())
        .await
        .map_err(|e| Error::auth(format!("failed to write token cache: {e}")))?;
    debug!("Cached access token");
    Ok(())
}

/// Runs the OAuth2 password-grant exchange.
#[instrument(skip_all)]
async fn request_token(
    config: &ServiceConfig,
    http: &reqwest::Client,
) -> Result<AccessToken, Error> {
    config.validate()?;
    info!("Requesting a new access token");

    let form = [
        ("client_id", config.client_id().as_str()),
        ("client_secret", config.client_secret().as_str()),
        ("grant_type", "password"),
        ("username", config.username().as_str()),
        ("password", config.password().as_str()),
    ];

    let response = http
        .post(config.token_url())
        .form(&form)
        .send()
        .await
        .map_err(|e| Error::auth(format!("token request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::auth(format!(
            "token endpoint returned {status}: {body}"
        )));
    }

    let parsed: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::auth(format!("malformed token response: {e}")))?;
    info!("Access token obtained");
    Ok(AccessToken(parsed.access_token))
}
