use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use crate::audio::domain::audio_segment::AudioSegment;
use crate::recognition::domain::language::LanguageTag;
use crate::recognition::domain::speech_recognizer::{RecognizeError, SpeechRecognizer};
use crate::shared::constants::SPHINX_BINARY;

/// Offline recognizer that runs the pocketsphinx executable against a staged
/// wave file and reads the hypothesis from stdout.
pub struct SphinxRecognizer {
    binary: PathBuf,
    model_dir: Option<PathBuf>,
}

impl SphinxRecognizer {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from(SPHINX_BINARY),
            model_dir: None,
        }
    }

    pub fn with_binary(mut self, binary: PathBuf) -> Self {
        self.binary = binary;
        self
    }

    /// Directory holding per-language acoustic models, laid out as
    /// `<dir>/<language-tag>/`. Without it the executable uses its
    /// built-in default model.
    pub fn with_model_dir(mut self, dir: PathBuf) -> Self {
        self.model_dir = Some(dir);
        self
    }
}

impl Default for SphinxRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechRecognizer for SphinxRecognizer {
    fn recognize(
        &self,
        audio: &AudioSegment,
        language: &LanguageTag,
    ) -> Result<String, RecognizeError> {
        // Stage the PCM as a wave file; the scoped handle deletes it on
        // every exit path
        let mut temp = tempfile::Builder::new()
            .prefix("voxscribe-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| RecognizeError::Service(e.to_string()))?;

        let wav = audio
            .to_wav_bytes()
            .map_err(|e| RecognizeError::Other(e.to_string()))?;
        temp.write_all(&wav)
            .map_err(|e| RecognizeError::Service(e.to_string()))?;
        temp.flush()
            .map_err(|e| RecognizeError::Service(e.to_string()))?;

        let mut command = Command::new(&self.binary);
        command.arg("-infile").arg(temp.path());
        if let (Some(dir), Some(code)) = (self.model_dir.as_deref(), language.code()) {
            command.arg("-hmm").arg(dir.join(code));
        }

        let output = command.output().map_err(|e| {
            RecognizeError::Service(format!("failed to run {}: {e}", self.binary.display()))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognizeError::Service(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        parse_hypothesis(&String::from_utf8_lossy(&output.stdout))
    }
}

/// The executable logs to stderr; stdout carries only the hypothesis.
fn parse_hypothesis(stdout: &str) -> Result<String, RecognizeError> {
    let text = stdout.trim();
    if text.is_empty() {
        Err(RecognizeError::NoSpeech)
    } else {
        Ok(text.to_string())
    }
}
