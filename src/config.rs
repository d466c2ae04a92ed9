//! Service credentials and client configuration.
//!
//! Loaded once at startup from a TOML file, then overridden by `SENTE_*`
//! environment variables, and passed by reference into whatever needs it.
//! Nothing in the core reaches for ambient state.

use crate::error::Error;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Connection and credential settings for the game service.
///
/// The client id/secret pair comes from the service's developer page; the
/// password is an app-specific one, not the account password. None of these
/// belong in source control; keep the TOML file out of the repository.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Root URL of the service.
    #[serde(default = "default_base_url")]
    base_url: String,

    /// OAuth client id.
    #[serde(default)]
    client_id: String,

    /// OAuth client secret.
    #[serde(default)]
    client_secret: String,

    /// Account username.
    #[serde(default)]
    username: String,

    /// App-specific password for the password grant.
    #[serde(default)]
    password: String,

    /// File the access token is cached in between runs.
    #[serde(default = "default_token_cache")]
    token_cache: PathBuf,
}

fn default_base_url() -> String {
    "https://online-go.com".to_string()
}

fn default_token_cache() -> PathBuf {
    PathBuf::from("access_token.txt")
}

/// Environment variables that override file values, paired with a field
/// selector. Checked in [`ServiceConfig::apply_env`].
const ENV_OVERRIDES: [&str; 5] = [
    "SENTE_BASE_URL",
    "SENTE_CLIENT_ID",
    "SENTE_CLIENT_SECRET",
    "SENTE_USERNAME",
    "SENTE_PASSWORD",
];

impl ServiceConfig {
    /// Loads configuration from a TOML file and applies env overrides.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "failed to read {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse config: {e}")))?;
        config.apply_env();
        info!(username = %config.username, "Config loaded");
        Ok(config)
    }

    /// Builds a config purely from `SENTE_*` environment variables.
    #[instrument]
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self {
            base_url: default_base_url(),
            client_id: String::new(),
            client_secret: String::new(),
            username: String::new(),
            password: String::new(),
            token_cache: default_token_cache(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Overwrites fields from their `SENTE_*` environment variables.
    fn apply_env(&mut self) {
        for name in ENV_OVERRIDES {
            let Ok(value) = std::env::var(name) else {
                continue;
            };
            debug!(name, "Applying environment override");
            match name {
                "SENTE_BASE_URL" => self.base_url = value,
                "SENTE_CLIENT_ID" => self.client_id = value,
                "SENTE_CLIENT_SECRET" => self.client_secret = value,
                "SENTE_USERNAME" => self.username = value,
                "SENTE_PASSWORD" => self.password = value,
                _ => unreachable!("unlisted override"),
            }
        }
        if let Ok(value) = std::env::var("SENTE_TOKEN_CACHE") {
            self.token_cache = PathBuf::from(value);
        }
    }

    /// Checks that every credential needed for the token exchange is
    /// present, naming all the missing ones at once.
    pub fn validate(&self) -> Result<(), Error> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", &self.username),
            ("password", &self.password),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::config(format!(
                "missing credentials: {}",
                missing.join(", ")
            )))
        }
    }

    /// URL of the OAuth token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/oauth2/access_token", self.base_url.trim_end_matches('/'))
    }

    /// Root of the versioned REST API.
    pub fn api_root(&self) -> String {
        format!("{}/api/v1", self.base_url.trim_end_matches('/'))
    }
}
