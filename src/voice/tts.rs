//! Text-to-speech synthesis against the SaluteSpeech REST API

use std::path::Path;

use crate::auth::TokenManager;
use crate::config::Config;
use crate::voice::playback::AudioPlayback;
use crate::voice::voices::Voice;
use crate::voice::wav::{self, AudioClip};
use crate::{Error, Result};

/// Synthesizes speech from text and plays it through local audio output
///
/// Hides the HTTP and decoding details from callers: a call either fully
/// plays (or returns) the requested audio or reports a single terminal error.
pub struct SpeechClient {
    config: Config,
    client: reqwest::Client,
    auth: TokenManager,
}

impl SpeechClient {
    /// Create a client with its own token manager built from the same
    /// configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let auth = TokenManager::new(config.clone())?;
        Self::with_token_manager(config, auth)
    }

    /// Create a client around an existing token manager
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_token_manager(config: Config, auth: TokenManager) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self {
            config,
            client,
            auth,
        })
    }

    /// Synthesize text into a decoded PCM clip
    ///
    /// # Errors
    ///
    /// Returns [`Error::Synthesis`] when the endpoint refuses the request,
    /// [`Error::Audio`] when the response body is not 16-bit PCM WAV, and
    /// whatever [`TokenManager::token`] surfaces for credential problems.
    pub async fn synthesize(&self, text: &str, voice: Voice) -> Result<AudioClip> {
        let token = self.auth.token().await?;
        let voice_param = format!("{}_{}", voice.code(), self.config.sample_rate);

        tracing::debug!(voice = %voice, code = voice.code(), chars = text.chars().count(), "synthesizing");

        let response = self
            .client
            .post(&self.config.synthesis_url)
            .query(&[("voice", voice_param.as_str())])
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/text")
            .body(text.to_owned())
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::error!(status = %status, "synthesis endpoint refused the request");
            return Err(Error::Synthesis { status });
        }

        let body = response.bytes().await?;
        let clip = wav::decode(&body)?;

        tracing::debug!(
            samples = clip.samples.len(),
            sample_rate = clip.sample_rate,
            "synthesis complete"
        );
        Ok(clip)
    }

    /// Synthesize text and play it, blocking until playback completes
    ///
    /// Playback happens at the sample rate advertised by the response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Audio`] when no output device supports the clip, plus
    /// everything [`Self::synthesize`] can return.
    pub async fn synthesize_and_play(&self, text: &str, voice: Voice) -> Result<()> {
        let clip = self.synthesize(text, voice).await?;
        let playback = AudioPlayback::new(clip.sample_rate)?;
        playback.play(&clip.samples)
    }

    /// Synthesize text and write the audio to a WAV file instead of playing it
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be written, plus everything
    /// [`Self::synthesize`] can return.
    pub async fn synthesize_to_file(&self, text: &str, voice: Voice, path: &Path) -> Result<()> {
        let clip = self.synthesize(text, voice).await?;
        let bytes = wav::encode(&clip.samples, clip.sample_rate)?;
        std::fs::write(path, bytes)?;

        tracing::info!(path = %path.display(), samples = clip.samples.len(), "audio written");
        Ok(())
    }
}
