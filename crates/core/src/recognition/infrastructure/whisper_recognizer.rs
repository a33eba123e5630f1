use std::path::Path;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::recognition::domain::language::LanguageTag;
use crate::recognition::domain::speech_recognizer::{RecognizeError, SpeechRecognizer};

/// Local neural recognizer using whisper.cpp via whisper-rs.
///
/// The ggml model is loaded once at construction and reused across calls.
pub struct WhisperRecognizer {
    ctx: WhisperContext,
}

impl std::fmt::Debug for WhisperRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperRecognizer").finish()
    }
}

impl WhisperRecognizer {
    pub fn new(model_path: &Path) -> Result<WhisperRecognizer, RecognizeError> {
        if !model_path.exists() {
            return Err(RecognizeError::ModelLoad(format!(
                "model not found at {}",
                model_path.display()
            )));
        }

        let path = model_path.to_str().ok_or_else(|| {
            RecognizeError::ModelLoad("model path is not valid UTF-8".to_string())
        })?;

        let ctx = WhisperContext::new_with_params(path, WhisperContextParameters::default())
            .map_err(|e| RecognizeError::ModelLoad(e.to_string()))?;

        Ok(WhisperRecognizer { ctx })
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn recognize(
        &self,
        audio: &AudioSegment,
        language: &LanguageTag,
    ) -> Result<String, RecognizeError> {
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| RecognizeError::Other(format!("failed to create whisper state: {e}")))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some(language.whisper_code()));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| RecognizeError::Other(format!("whisper inference failed: {e}")))?;

        let mut transcript = String::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let n_tokens = segment.n_tokens();
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special markers like [_BEG_] and <|endoftext|>
                let trimmed = text.trim();
                if trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                transcript.push_str(text);
            }
        }

        // Silence and pure noise produce no tokens; surface that as a typed
        // no-speech signal rather than an empty transcript
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(RecognizeError::NoSpeech);
        }
        Ok(transcript.to_string())
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::domain::engine::ModelSize;
    use crate::shared::model_resolver;

    #[test]
    fn test_new_nonexistent_path_is_model_load_error() {
        let result = WhisperRecognizer::new(Path::new("/nonexistent/model.bin"));
        assert!(matches!(result, Err(RecognizeError::ModelLoad(_))));
    }

    #[test]
    fn test_new_nonexistent_path_error_names_the_path() {
        let err = WhisperRecognizer::new(Path::new("/nonexistent/model.bin")).unwrap_err();
        assert!(
            err.to_string().contains("/nonexistent/model.bin"),
            "unexpected error: {err}"
        );
    }

    #[test]
    #[ignore] // Requires the whisper tiny model (network download on first run)
    fn test_silent_audio_is_no_speech() {
        let size = ModelSize::Tiny;
        let model_path = model_resolver::resolve(size.model_filename(), &size.model_url(), None, None)
            .expect("failed to resolve whisper model");
        let recognizer = WhisperRecognizer::new(&model_path).expect("failed to load model");

        let audio = AudioSegment::new(vec![0.0; 3 * 16000], 16000, 1);
        let result = recognizer.recognize(&audio, &LanguageTag::Auto);

        assert!(matches!(result, Err(RecognizeError::NoSpeech)));
    }

    #[test]
    #[ignore] // Requires the whisper tiny model (network download on first run)
    fn test_sine_wave_does_not_crash() {
        let size = ModelSize::Tiny;
        let model_path = model_resolver::resolve(size.model_filename(), &size.model_url(), None, None)
            .expect("failed to resolve whisper model");
        let recognizer = WhisperRecognizer::new(&model_path).expect("failed to load model");

        let sample_rate = 16000u32;
        let samples: Vec<f32> = (0..3 * sample_rate as usize)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                (2.0 * std::f64::consts::PI * 440.0 * t).sin() as f32
            })
            .collect();
        let audio = AudioSegment::new(samples, sample_rate, 1);

        // A pure tone may or may not yield tokens; it must not error out
        // with anything other than the no-speech signal
        match recognizer.recognize(&audio, &LanguageTag::Auto) {
            Ok(_) | Err(RecognizeError::NoSpeech) => {}
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }
}
