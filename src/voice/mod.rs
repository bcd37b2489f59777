//! Voice synthesis and playback
//!
//! Text goes out to the SaluteSpeech REST endpoint; WAV audio comes back and
//! is played through the default output device.

pub mod playback;
pub mod tts;
pub mod voices;
pub mod wav;

pub use playback::AudioPlayback;
pub use tts::SpeechClient;
pub use voices::Voice;
pub use wav::AudioClip;
