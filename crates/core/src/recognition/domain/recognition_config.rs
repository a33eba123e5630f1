use thiserror::Error;

use super::engine::{EngineKind, ModelSize};
use super::language::LanguageTag;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown language tag: {0}")]
    UnknownLanguageTag(String),
    #[error("automatic language detection is not supported by the {0} engine")]
    AutoLanguageNotSupported(&'static str),
    #[error("a model size only applies to the whisper engine, not {0}")]
    ModelSizeNotApplicable(&'static str),
}

/// A validated engine/language/model selection for one transcription attempt.
///
/// Constructing the config is the only validation point; everything past it
/// can assume the combination is coherent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecognitionConfig {
    engine: EngineKind,
    language: LanguageTag,
    model_size: Option<ModelSize>,
}

impl RecognitionConfig {
    pub fn new(
        engine: EngineKind,
        language: LanguageTag,
        model_size: Option<ModelSize>,
    ) -> Result<RecognitionConfig, ConfigError> {
        if model_size.is_some() && engine != EngineKind::Whisper {
            return Err(ConfigError::ModelSizeNotApplicable(engine.name()));
        }
        if language == LanguageTag::Auto && engine != EngineKind::Whisper {
            return Err(ConfigError::AutoLanguageNotSupported(engine.name()));
        }
        Ok(RecognitionConfig {
            engine,
            language,
            model_size,
        })
    }

    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    /// Whisper model tier; `Base` when none was selected.
    pub fn model_size(&self) -> ModelSize {
        self.model_size.unwrap_or_default()
    }
}
