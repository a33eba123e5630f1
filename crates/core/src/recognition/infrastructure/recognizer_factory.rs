use std::path::PathBuf;
use std::time::Duration;

use crate::recognition::domain::engine::EngineKind;
use crate::recognition::domain::recognition_config::RecognitionConfig;
use crate::recognition::domain::speech_recognizer::SpeechRecognizer;
use crate::recognition::domain::transcription::TranscribeError;
use crate::shared::model_resolver::{self, ProgressFn};

use super::google_recognizer::GoogleRecognizer;
use super::sphinx_recognizer::SphinxRecognizer;
use super::whisper_recognizer::WhisperRecognizer;

/// Builds the recognizer a validated engine selection calls for.
///
/// Selecting the whisper engine resolves (and on first use downloads) the
/// ggml model before the recognizer is constructed.
#[derive(Default)]
pub struct RecognizerFactory {
    api_key: Option<String>,
    sphinx_model_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    download_progress: Option<fn(u64, u64)>,
}

impl RecognizerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_sphinx_model_dir(mut self, dir: PathBuf) -> Self {
        self.sphinx_model_dir = Some(dir);
        self
    }

    /// Forwarded into the cloud engine's HTTP client; local engines run to
    /// completion without a deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_download_progress(mut self, progress: fn(u64, u64)) -> Self {
        self.download_progress = Some(progress);
        self
    }

    pub fn create(
        &self,
        config: &RecognitionConfig,
    ) -> Result<Box<dyn SpeechRecognizer>, TranscribeError> {
        match config.engine() {
            EngineKind::GoogleCloud => {
                let api_key = self.api_key.clone().ok_or_else(|| {
                    TranscribeError::Service("Google API key not configured".to_string())
                })?;
                let recognizer =
                    GoogleRecognizer::new(api_key, self.timeout).map_err(TranscribeError::from)?;
                log::info!("Using Google cloud recognition");
                Ok(Box::new(recognizer))
            }
            EngineKind::Sphinx => {
                let mut recognizer = SphinxRecognizer::new();
                if let Some(dir) = &self.sphinx_model_dir {
                    recognizer = recognizer.with_model_dir(dir.clone());
                }
                log::info!("Using offline sphinx recognition");
                Ok(Box::new(recognizer))
            }
            EngineKind::Whisper => {
                let size = config.model_size();
                log::info!("Resolving whisper model {}", size.model_filename());
                let model_path = model_resolver::resolve(
                    size.model_filename(),
                    &size.model_url(),
                    None,
                    self.download_progress.map(|f| Box::new(f) as ProgressFn),
                )
                .map_err(|e| TranscribeError::ModelLoad(e.to_string()))?;
                let recognizer =
                    WhisperRecognizer::new(&model_path).map_err(TranscribeError::from)?;
                Ok(Box::new(recognizer))
            }
            EngineKind::Deepgram => {
                Err(TranscribeError::UnsupportedEngine(config.engine().name()))
            }
        }
    }
}
