use thiserror::Error;

use crate::audio::domain::audio_decoder::DecodeError;

use super::speech_recognizer::RecognizeError;

/// The closed failure taxonomy every transcription attempt resolves into.
#[derive(Error, Debug)]
pub enum TranscribeError {
    /// The pause gate was set; nothing was attempted. Recoverable by
    /// resuming and retrying.
    #[error("recognition paused")]
    Paused,
    /// The engine ran but produced no usable transcript (silence, noise,
    /// unsupported language).
    #[error("could not understand the audio")]
    Unintelligible,
    /// The engine was reachable but failed: auth, quota, malformed request,
    /// timeout, missing executable.
    #[error("recognition service error: {0}")]
    Service(String),
    /// The input audio could not be normalized to PCM.
    #[error("audio format error: {0}")]
    Format(String),
    /// A local neural model failed to load or initialize.
    #[error("model load error: {0}")]
    ModelLoad(String),
    /// The selected engine/language/model combination is not implemented.
    #[error("the {0} engine is not supported")]
    UnsupportedEngine(&'static str),
    /// Anything else an engine raised; surfaced with its message, never
    /// swallowed.
    #[error("unexpected recognition failure: {0}")]
    Unexpected(String),
}

pub type TranscriptionResult = Result<String, TranscribeError>;

impl From<RecognizeError> for TranscribeError {
    fn from(err: RecognizeError) -> Self {
        match err {
            RecognizeError::NoSpeech => TranscribeError::Unintelligible,
            RecognizeError::Service(detail) => TranscribeError::Service(detail),
            RecognizeError::ModelLoad(detail) => TranscribeError::ModelLoad(detail),
            RecognizeError::Other(detail) => TranscribeError::Unexpected(detail),
        }
    }
}

impl From<DecodeError> for TranscribeError {
    fn from(err: DecodeError) -> Self {
        TranscribeError::Format(err.to_string())
    }
}
