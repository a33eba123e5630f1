use std::time::Duration;

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::recognition::domain::language::LanguageTag;
use crate::recognition::domain::speech_recognizer::{RecognizeError, SpeechRecognizer};
use crate::shared::constants::GOOGLE_SPEECH_ENDPOINT;

#[derive(Serialize)]
struct RecognizeRequest {
    config: RequestConfig,
    audio: RequestAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestConfig {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: String,
}

#[derive(Serialize)]
struct RequestAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<SpeechResult>,
}

#[derive(Deserialize)]
struct SpeechResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
struct Alternative {
    transcript: Option<String>,
}

/// Cloud recognizer backed by the Google Speech REST API.
///
/// Sends LINEAR16 audio and returns the best hypothesis verbatim.
pub struct GoogleRecognizer {
    api_key: String,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl GoogleRecognizer {
    /// `timeout` bounds the whole HTTP request; `None` means the client's
    /// default (no deadline).
    pub fn new(
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<GoogleRecognizer, RecognizeError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RecognizeError::Service(e.to_string()))?;

        Ok(GoogleRecognizer {
            api_key: api_key.into(),
            endpoint: GOOGLE_SPEECH_ENDPOINT.to_string(),
            client,
        })
    }

    /// Point the recognizer at a different endpoint (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl SpeechRecognizer for GoogleRecognizer {
    fn recognize(
        &self,
        audio: &AudioSegment,
        language: &LanguageTag,
    ) -> Result<String, RecognizeError> {
        let body = build_request(audio, language)?;
        let url = format!("{}?key={}", self.endpoint, self.api_key);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| RecognizeError::Service(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| RecognizeError::Service(e.to_string()))?;

        if !status.is_success() {
            return Err(RecognizeError::Service(format!(
                "HTTP {status}: {}",
                text.trim()
            )));
        }

        parse_response(&text)
    }
}

fn build_request(
    audio: &AudioSegment,
    language: &LanguageTag,
) -> Result<RecognizeRequest, RecognizeError> {
    let code = language.code().ok_or_else(|| {
        RecognizeError::Other("cloud recognition requires an explicit language tag".to_string())
    })?;

    let content = base64::engine::general_purpose::STANDARD.encode(linear16_bytes(audio));

    Ok(RecognizeRequest {
        config: RequestConfig {
            encoding: "LINEAR16",
            sample_rate_hertz: audio.sample_rate(),
            language_code: code.to_string(),
        },
        audio: RequestAudio { content },
    })
}

/// Raw little-endian 16-bit PCM, the API's LINEAR16 encoding.
fn linear16_bytes(audio: &AudioSegment) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(audio.samples().len() * 2);
    for &sample in audio.samples() {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

fn parse_response(body: &str) -> Result<String, RecognizeError> {
    let response: RecognizeResponse = serde_json::from_str(body)
        .map_err(|e| RecognizeError::Service(format!("malformed response: {e}")))?;

    // The API returns no results at all when nothing was confidently
    // recognized
    response
        .results
        .into_iter()
        .flat_map(|r| r.alternatives)
        .find_map(|a| a.transcript)
        .ok_or(RecognizeError::NoSpeech)
}
