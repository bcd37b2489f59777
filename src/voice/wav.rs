//! WAV codec for synthesized audio
//!
//! The synthesis endpoint returns uncompressed 16-bit PCM in a WAV container;
//! playback only needs the raw samples and the advertised sample rate.

use std::io::Cursor;
use std::time::Duration;

use crate::{Error, Result};

/// Decoded PCM audio ready for playback
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioClip {
    /// Signed 16-bit little-endian PCM samples
    pub samples: Vec<i16>,
    /// Sample rate advertised by the container
    pub sample_rate: u32,
}

impl AudioClip {
    /// Playback duration implied by the sample count
    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.samples.len() as u64 * 1000 / u64::from(self.sample_rate))
    }
}

/// Decode a WAV body into samples and sample rate
///
/// # Errors
///
/// Returns [`Error::Audio`] if the bytes are not a WAV container or the
/// payload is not 16-bit integer PCM.
pub fn decode(bytes: &[u8]) -> Result<AudioClip> {
    let mut reader =
        hound::WavReader::new(Cursor::new(bytes)).map_err(|e| Error::Audio(e.to_string()))?;

    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(Error::Audio(format!(
            "expected 16-bit PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::Audio(e.to_string()))?;

    Ok(AudioClip {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Encode samples as a mono 16-bit PCM WAV
///
/// # Errors
///
/// Returns [`Error::Audio`] if WAV encoding fails.
pub fn encode(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).map_err(|e| Error::Audio(e.to_string()))?;

        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| Error::Audio(e.to_string()))?;
        }

        writer.finalize().map_err(|e| Error::Audio(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}
