//! OAuth token lifecycle for the SaluteSpeech API
//!
//! Access tokens are short-lived. [`TokenManager`] caches the current one
//! together with its absolute expiry and refreshes transparently when it is
//! absent or about to expire, so callers never deal with expiry themselves.

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::{API_KEY_ENV, Config};
use crate::{Error, Result};

/// Safety margin subtracted from a token's expiry when checking freshness
const EXPIRY_MARGIN_MS: u64 = 2000;

/// Token endpoint response body
#[derive(Deserialize)]
struct TokenGrant {
    access_token: String,
    /// Unix epoch milliseconds at which the token stops being valid
    expires_at: u64,
}

/// A cached bearer token with its absolute expiry
#[derive(Clone)]
struct CachedToken {
    value: String,
    expires_at_ms: u64,
}

impl CachedToken {
    /// A token within [`EXPIRY_MARGIN_MS`] of expiry counts as stale
    fn is_fresh(&self, now_ms: u64) -> bool {
        self.expires_at_ms.saturating_sub(EXPIRY_MARGIN_MS) > now_ms
    }
}

/// Produces a valid bearer token on demand, refreshing when absent or stale
///
/// Each manager is an independent instance with its own credential and cache;
/// there is no process-global state.
pub struct TokenManager {
    config: Config,
    client: reqwest::Client,
    credential: OnceLock<Option<String>>,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    /// Create a manager for the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self {
            config,
            client,
            credential: OnceLock::new(),
            cached: Mutex::new(None),
        })
    }

    /// Resolve the Basic authorization credential
    ///
    /// An explicit key in the configuration wins; otherwise [`API_KEY_ENV`] is
    /// read from the environment, at most once per instance.
    fn credential(&self) -> Result<&str> {
        let resolved = self.credential.get_or_init(|| match &self.config.api_key {
            Some(key) => Some(key.clone()),
            None => std::env::var(API_KEY_ENV).ok(),
        });

        match resolved.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(Error::Config(format!("{API_KEY_ENV} is not set"))),
        }
    }

    /// Return a bearer token, refreshing the cache when needed
    ///
    /// The cache lock is held across the refresh so overlapping calls cannot
    /// race two refreshes against each other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no credential is available,
    /// [`Error::Auth`] when the token endpoint refuses the refresh, and
    /// [`Error::Transport`] on network failures.
    pub async fn token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(now_ms()) {
                return Ok(token.value.clone());
            }
            tracing::debug!(expires_at_ms = token.expires_at_ms, "cached token is stale");
        }

        let fresh = self.refresh().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    /// Request a new token from the OAuth endpoint
    ///
    /// A failed refresh leaves the cache untouched.
    async fn refresh(&self) -> Result<CachedToken> {
        let credential = self.credential()?;
        let rquid = Uuid::new_v4();

        tracing::debug!(%rquid, url = %self.config.token_url, "requesting access token");

        let response = self
            .client
            .post(&self.config.token_url)
            .header("Authorization", format!("Basic {credential}"))
            .header("RqUID", rquid.to_string())
            .form(&[("scope", self.config.scope.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::error!(status = %status, "token endpoint refused the request");
            return Err(Error::Auth { status });
        }

        let grant: TokenGrant = response.json().await?;
        tracing::debug!(expires_at_ms = grant.expires_at, "token refreshed");

        Ok(CachedToken {
            value: grant.access_token,
            expires_at_ms: grant.expires_at,
        })
    }
}

/// Current time as Unix epoch milliseconds
#[allow(clippy::cast_possible_truncation)]
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}
