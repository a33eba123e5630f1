/// Sample rate every recognition engine consumes (mono PCM).
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Language tags the engines accept (the closed menu of the app).
pub const SUPPORTED_LANGUAGE_TAGS: &[&str] = &["en-US", "fr-FR", "ar-DZ", "es-ES"];

pub const GOOGLE_SPEECH_ENDPOINT: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// Base URL for the ggml whisper.cpp model files.
pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Executable invoked for offline acoustic-model recognition.
pub const SPHINX_BINARY: &str = "pocketsphinx_continuous";

/// Filename prefix for saved transcript artifacts.
pub const TRANSCRIPT_FILE_PREFIX: &str = "transcript_";
