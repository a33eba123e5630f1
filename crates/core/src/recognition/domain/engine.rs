use crate::shared::constants::WHISPER_MODEL_BASE_URL;

/// The speech-to-text engines a user can select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineKind {
    /// Google Cloud Speech REST API.
    GoogleCloud,
    /// Offline pocketsphinx acoustic model.
    Sphinx,
    /// Local whisper.cpp neural model.
    Whisper,
    /// Listed in the engine menu but not implemented; selecting it resolves
    /// to a typed unsupported-engine failure.
    Deepgram,
}

impl EngineKind {
    pub fn parse(name: &str) -> Option<EngineKind> {
        match name.to_lowercase().as_str() {
            "google" => Some(EngineKind::GoogleCloud),
            "sphinx" => Some(EngineKind::Sphinx),
            "whisper" => Some(EngineKind::Whisper),
            "deepgram" => Some(EngineKind::Deepgram),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::GoogleCloud => "google",
            EngineKind::Sphinx => "sphinx",
            EngineKind::Whisper => "whisper",
            EngineKind::Deepgram => "deepgram",
        }
    }
}

/// Whisper model tier. Larger models trade speed for accuracy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ModelSize {
    Tiny,
    #[default]
    Base,
    Small,
    Medium,
    LargeV3,
}

impl ModelSize {
    pub fn parse(name: &str) -> Option<ModelSize> {
        match name.to_lowercase().as_str() {
            "tiny" => Some(ModelSize::Tiny),
            "base" => Some(ModelSize::Base),
            "small" => Some(ModelSize::Small),
            "medium" => Some(ModelSize::Medium),
            "large-v3" | "large" => Some(ModelSize::LargeV3),
            _ => None,
        }
    }

    pub fn model_filename(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::LargeV3 => "ggml-large-v3.bin",
        }
    }

    pub fn model_url(&self) -> String {
        format!("{}/{}", WHISPER_MODEL_BASE_URL, self.model_filename())
    }
}
