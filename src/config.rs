//! Configuration for the SaluteSpeech client

use std::time::Duration;

use crate::{Error, Result};

/// OAuth token endpoint
pub const TOKEN_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";

/// REST synthesis endpoint; the voice is appended as a query parameter
pub const SYNTHESIS_URL: &str = "https://smartspeech.sber.ru/rest/v1/text:synthesize";

/// OAuth scope for personal accounts
pub const SCOPE: &str = "SALUTE_SPEECH_PERS";

/// Environment variable holding the Basic authorization credential
pub const API_KEY_ENV: &str = "SALUTESPEECH_API_KEY";

/// PCM sample rate requested from the synthesis endpoint
pub const SAMPLE_RATE: u32 = 24000;

/// Client configuration
///
/// [`Config::default`] targets the production SaluteSpeech endpoints; tests
/// point `token_url` and `synthesis_url` at a local mock server instead.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token endpoint URL
    pub token_url: String,

    /// Synthesis endpoint URL
    pub synthesis_url: String,

    /// OAuth scope requested on token refresh
    pub scope: String,

    /// Sample rate suffix sent with the voice code
    pub sample_rate: u32,

    /// Timeout applied to every request on both endpoints
    pub timeout: Duration,

    /// Skip TLS certificate verification.
    ///
    /// SECURITY: defaults to `true` for behavioral parity with the upstream
    /// service, which is reached without certificate verification. Set to
    /// `false` to verify certificates.
    pub insecure_tls: bool,

    /// Explicit API key; when `None` the [`API_KEY_ENV`] environment variable
    /// is read lazily on first token refresh
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            synthesis_url: SYNTHESIS_URL.to_string(),
            scope: SCOPE.to_string(),
            sample_rate: SAMPLE_RATE,
            timeout: Duration::from_secs(10),
            insecure_tls: true,
            api_key: None,
        }
    }
}

impl Config {
    /// Build an HTTP client honoring the TLS and timeout settings
    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .danger_accept_invalid_certs(self.insecure_tls)
            .timeout(self.timeout)
            .build()
            .map_err(Error::from)
    }
}
