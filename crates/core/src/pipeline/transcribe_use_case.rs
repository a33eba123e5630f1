use crate::audio::domain::audio_decoder::AudioDecoder;
use crate::audio::domain::audio_input::{AudioFormat, AudioInput};
use crate::audio::domain::audio_segment::AudioSegment;
use crate::recognition::domain::language::LanguageTag;
use crate::recognition::domain::speech_recognizer::SpeechRecognizer;
use crate::recognition::domain::transcription::{TranscribeError, TranscriptionResult};
use crate::shared::constants::TARGET_SAMPLE_RATE;

/// One user-triggered transcription attempt: pause gate, normalization,
/// recognition, failure classification.
///
/// The use case performs no file I/O and caches nothing; every run
/// reinvokes the engine. Persisting the transcript is a separate, explicit
/// caller action.
pub struct TranscribeUseCase {
    decoder: Box<dyn AudioDecoder>,
    recognizer: Box<dyn SpeechRecognizer>,
    language: LanguageTag,
}

impl TranscribeUseCase {
    pub fn new(
        decoder: Box<dyn AudioDecoder>,
        recognizer: Box<dyn SpeechRecognizer>,
        language: LanguageTag,
    ) -> Self {
        Self {
            decoder,
            recognizer,
            language,
        }
    }

    /// `paused` is read once, here. It suppresses a new attempt; it never
    /// interrupts one in flight, because recognition is a single blocking
    /// call.
    pub fn run(&self, audio: &AudioInput, paused: bool) -> TranscriptionResult {
        if paused {
            return Err(TranscribeError::Paused);
        }

        let segment = self.normalize(audio)?;
        let transcript = self.recognizer.recognize(&segment, &self.language)?;

        // Verbatim: the engine's own formatting is the output
        Ok(transcript)
    }

    /// Wave input already at the target rate is used as-is; everything else
    /// goes through the transcoder exactly once.
    fn normalize(&self, audio: &AudioInput) -> Result<AudioSegment, TranscribeError> {
        if audio.format() == AudioFormat::Wav {
            // Best-effort probe. A wave the probe cannot read (odd bit
            // depths, extensible headers) is not rejected here; the
            // transcoder reads far more than the probe does.
            if let Ok(segment) = AudioSegment::from_wav_bytes(audio.bytes()) {
                if segment.sample_rate() == TARGET_SAMPLE_RATE && segment.channels() == 1 {
                    return Ok(segment);
                }
            }
        }
        Ok(self.decoder.decode(audio)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::audio::domain::audio_decoder::DecodeError;
    use crate::recognition::domain::speech_recognizer::RecognizeError;

    // ─── Stubs ───

    struct StubDecoder {
        calls: Arc<Mutex<usize>>,
        fail: bool,
    }

    impl AudioDecoder for StubDecoder {
        fn decode(&self, _: &AudioInput) -> Result<AudioSegment, DecodeError> {
            *self.calls.lock().unwrap() += 1;
            if self.fail {
                Err(DecodeError::InvalidAudio("corrupt stream".to_string()))
            } else {
                Ok(silent_segment())
            }
        }
    }

    struct StubRecognizer {
        calls: Arc<Mutex<usize>>,
        /// `None` means the engine recognized nothing.
        transcript: Option<&'static str>,
    }

    impl SpeechRecognizer for StubRecognizer {
        fn recognize(
            &self,
            _: &AudioSegment,
            _: &LanguageTag,
        ) -> Result<String, RecognizeError> {
            *self.calls.lock().unwrap() += 1;
            match self.transcript {
                Some(t) => Ok(t.to_string()),
                None => Err(RecognizeError::NoSpeech),
            }
        }
    }

    struct FailingRecognizer;

    impl SpeechRecognizer for FailingRecognizer {
        fn recognize(
            &self,
            _: &AudioSegment,
            _: &LanguageTag,
        ) -> Result<String, RecognizeError> {
            Err(RecognizeError::Service("quota exceeded".to_string()))
        }
    }

    fn counter() -> Arc<Mutex<usize>> {
        Arc::new(Mutex::new(0))
    }

    fn silent_segment() -> AudioSegment {
        AudioSegment::new(vec![0.0; 16000], 16000, 1)
    }

    fn wav_input() -> AudioInput {
        AudioInput::new(silent_segment().to_wav_bytes().unwrap(), AudioFormat::Wav)
    }

    fn mp3_input() -> AudioInput {
        AudioInput::new(vec![0xFF, 0xFB, 0x90, 0x00], AudioFormat::Mp3)
    }

    fn english() -> LanguageTag {
        LanguageTag::parse("en-US").unwrap()
    }

    #[test]
    fn test_paused_suppresses_all_collaborators() {
        let decoder_calls = counter();
        let recognizer_calls = counter();
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: decoder_calls.clone(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                calls: recognizer_calls.clone(),
                transcript: Some("hello"),
            }),
            english(),
        );

        let result = uc.run(&wav_input(), true);

        assert!(matches!(result, Err(TranscribeError::Paused)));
        assert_eq!(*decoder_calls.lock().unwrap(), 0);
        assert_eq!(*recognizer_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_transcript_is_returned_verbatim() {
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: counter(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                calls: counter(),
                transcript: Some("  Hello, WORLD — héllo wörld  "),
            }),
            english(),
        );

        let transcript = uc.run(&wav_input(), false).unwrap();
        assert_eq!(transcript, "  Hello, WORLD — héllo wörld  ");
    }

    #[test]
    fn test_target_rate_wave_skips_the_transcoder() {
        let decoder_calls = counter();
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: decoder_calls.clone(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                calls: counter(),
                transcript: Some("hello world"),
            }),
            english(),
        );

        assert_eq!(uc.run(&wav_input(), false).unwrap(), "hello world");
        assert_eq!(*decoder_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_mp3_goes_through_the_transcoder_once() {
        let decoder_calls = counter();
        let recognizer_calls = counter();
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: decoder_calls.clone(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                calls: recognizer_calls.clone(),
                transcript: Some("hello"),
            }),
            english(),
        );

        uc.run(&mp3_input(), false).unwrap();

        assert_eq!(*decoder_calls.lock().unwrap(), 1);
        assert_eq!(*recognizer_calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_off_rate_wave_goes_through_the_transcoder() {
        let decoder_calls = counter();
        let source = AudioSegment::new(vec![0.0; 44100], 44100, 1);
        let input = AudioInput::new(source.to_wav_bytes().unwrap(), AudioFormat::Wav);

        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: decoder_calls.clone(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                calls: counter(),
                transcript: Some("hello"),
            }),
            english(),
        );

        uc.run(&input, false).unwrap();
        assert_eq!(*decoder_calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_transcoder_failure_skips_the_engine() {
        let recognizer_calls = counter();
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: counter(),
                fail: true,
            }),
            Box::new(StubRecognizer {
                calls: recognizer_calls.clone(),
                transcript: Some("hello"),
            }),
            english(),
        );

        let result = uc.run(&mp3_input(), false);

        assert!(matches!(result, Err(TranscribeError::Format(_))));
        assert_eq!(*recognizer_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_unreadable_wave_bytes_fall_through_to_the_transcoder() {
        let decoder_calls = counter();
        let recognizer_calls = counter();
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: decoder_calls.clone(),
                fail: true,
            }),
            Box::new(StubRecognizer {
                calls: recognizer_calls.clone(),
                transcript: Some("hello"),
            }),
            english(),
        );

        let input = AudioInput::new(b"RIFFbroken".to_vec(), AudioFormat::Wav);
        let result = uc.run(&input, false);

        assert!(matches!(result, Err(TranscribeError::Format(_))));
        assert_eq!(*decoder_calls.lock().unwrap(), 1);
        assert_eq!(*recognizer_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_deep_bit_depth_wave_goes_through_the_transcoder() {
        // 24-bit PCM is a valid wave the in-place probe does not read
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 24,
            sample_format: hound::SampleFormat::Int,
        };
        let mut bytes = Vec::new();
        {
            let mut writer =
                hound::WavWriter::new(std::io::Cursor::new(&mut bytes), spec).unwrap();
            for _ in 0..1600 {
                writer.write_sample(0i32).unwrap();
            }
            writer.finalize().unwrap();
        }
        let input = AudioInput::new(bytes, AudioFormat::Wav);

        let decoder_calls = counter();
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: decoder_calls.clone(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                calls: counter(),
                transcript: Some("hello"),
            }),
            english(),
        );

        assert_eq!(uc.run(&input, false).unwrap(), "hello");
        assert_eq!(*decoder_calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_no_speech_is_unintelligible() {
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: counter(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                calls: counter(),
                transcript: None,
            }),
            english(),
        );

        let result = uc.run(&wav_input(), false);
        assert!(matches!(result, Err(TranscribeError::Unintelligible)));
    }

    #[test]
    fn test_engine_failure_is_classified_not_swallowed() {
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: counter(),
                fail: false,
            }),
            Box::new(FailingRecognizer),
            english(),
        );

        let result = uc.run(&wav_input(), false);
        assert!(matches!(result, Err(TranscribeError::Service(d)) if d == "quota exceeded"));
    }

    #[test]
    fn test_repeated_runs_reinvoke_the_engine() {
        let recognizer_calls = counter();
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: counter(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                calls: recognizer_calls.clone(),
                transcript: Some("hello"),
            }),
            english(),
        );

        let input = wav_input();
        uc.run(&input, false).unwrap();
        uc.run(&input, false).unwrap();

        assert_eq!(*recognizer_calls.lock().unwrap(), 2);
    }

    #[test]
    fn test_resuming_after_pause_succeeds() {
        let uc = TranscribeUseCase::new(
            Box::new(StubDecoder {
                calls: counter(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                calls: counter(),
                transcript: Some("hello"),
            }),
            english(),
        );

        let input = wav_input();
        assert!(matches!(
            uc.run(&input, true),
            Err(TranscribeError::Paused)
        ));
        assert_eq!(uc.run(&input, false).unwrap(), "hello");
    }
}
