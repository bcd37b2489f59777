//! SaluteSpeech text-to-speech client
//!
//! Turns text plus a voice selection into audio played through the local
//! output device, using the SaluteSpeech cloud API:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              CLI / caller                     │
//! └───────────────────┬──────────────────────────┘
//!                     │ synthesize_and_play(text, voice)
//! ┌───────────────────▼──────────────────────────┐
//! │  SpeechClient ──► TokenManager (OAuth cache)  │
//! │       │                                       │
//! │  POST text:synthesize ──► WAV decode ──► play │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! [`TokenManager`] caches the short-lived bearer token and refreshes it
//! transparently; [`SpeechClient`] performs the synthesis call, decodes the
//! WAV response, and plays it synchronously. Neither depends on any
//! presentation layer.

pub mod auth;
pub mod config;
pub mod error;
pub mod voice;

pub use auth::TokenManager;
pub use config::Config;
pub use error::{Error, Result};
pub use voice::{AudioClip, AudioPlayback, SpeechClient, Voice};
