use thiserror::Error;

use crate::audio::domain::audio_segment::AudioSegment;

use super::language::LanguageTag;

/// Failure signals an engine can raise. The pipeline translates these into
/// the shared taxonomy at its boundary; engine-specific types stop here.
#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("no speech could be recognized")]
    NoSpeech,
    #[error("recognition service failed: {0}")]
    Service(String),
    #[error("model load failed: {0}")]
    ModelLoad(String),
    #[error("{0}")]
    Other(String),
}

/// Domain interface for speech-to-text engines.
///
/// One call transcribes one utterance and blocks until the engine finishes;
/// there is no cancellation once dispatched.
pub trait SpeechRecognizer: Send {
    fn recognize(
        &self,
        audio: &AudioSegment,
        language: &LanguageTag,
    ) -> Result<String, RecognizeError>;
}
