//! Error types for the SaluteSpeech client

use reqwest::StatusCode;
use thiserror::Error;

use crate::voice::Voice;

/// Result type alias for SaluteSpeech operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while obtaining tokens or synthesizing speech
///
/// None of these are recovered internally; every failure surfaces to the
/// caller as a terminal result for that invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credential)
    #[error("configuration error: {0}")]
    Config(String),

    /// Token endpoint rejected the refresh request
    #[error("authentication failed: token endpoint returned {status}")]
    Auth {
        /// HTTP status returned by the token endpoint
        status: StatusCode,
    },

    /// Unrecognized voice name
    #[error("invalid voice {voice:?}, valid voices: {}", Voice::names().join(", "))]
    InvalidVoice {
        /// The offending name as passed by the caller
        voice: String,
    },

    /// Synthesis endpoint returned a non-success status
    #[error("synthesis failed: endpoint returned {status}")]
    Synthesis {
        /// HTTP status returned by the synthesis endpoint
        status: StatusCode,
    },

    /// Network-layer failure below HTTP semantics (connect, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Audio decode, encode, or playback-device error
    #[error("audio error: {0}")]
    Audio(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
