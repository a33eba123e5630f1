use thiserror::Error;

use super::audio_input::AudioInput;
use super::audio_segment::AudioSegment;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid audio data: {0}")]
    InvalidAudio(String),
    #[error("audio i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Domain interface for transcoding uploaded audio into the PCM form the
/// recognition engines consume.
///
/// Implementations return mono samples at the pipeline's target sample rate.
pub trait AudioDecoder: Send {
    fn decode(&self, input: &AudioInput) -> Result<AudioSegment, DecodeError>;
}
