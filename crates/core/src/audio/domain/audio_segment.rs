use std::io::Cursor;

use super::audio_decoder::DecodeError;

/// A segment of decoded audio: interleaved PCM samples normalized to [-1.0, 1.0].
#[derive(Clone, Debug)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Parse PCM wave bytes. Accepts 16-bit integer and 32-bit float samples.
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<AudioSegment, DecodeError> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes))
            .map_err(|e| DecodeError::InvalidAudio(e.to_string()))?;
        let spec = reader.spec();

        let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, 16) => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                .collect::<Result<_, _>>()
                .map_err(|e| DecodeError::InvalidAudio(e.to_string()))?,
            (hound::SampleFormat::Float, 32) => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| DecodeError::InvalidAudio(e.to_string()))?,
            (_, bits) => {
                return Err(DecodeError::UnsupportedFormat(format!(
                    "{bits}-bit wave samples"
                )))
            }
        };

        Ok(AudioSegment::new(samples, spec.sample_rate, spec.channels))
    }

    /// Encode the segment as 16-bit PCM wave bytes.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut bytes = Vec::new();
        {
            let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec)
                .map_err(|e| DecodeError::InvalidAudio(e.to_string()))?;
            for &sample in &self.samples {
                let clamped = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer
                    .write_sample(clamped)
                    .map_err(|e| DecodeError::InvalidAudio(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| DecodeError::InvalidAudio(e.to_string()))?;
        }
        Ok(bytes)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }
}
