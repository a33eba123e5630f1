use std::io::Write;
use std::path::Path;

use crate::audio::domain::audio_decoder::{AudioDecoder, DecodeError};
use crate::audio::domain::audio_input::AudioInput;
use crate::audio::domain::audio_segment::AudioSegment;
use crate::shared::constants::TARGET_SAMPLE_RATE;

/// Transcodes uploaded audio to mono PCM using ffmpeg-next.
///
/// Handles every container ffmpeg can demux (mp3, m4a, flac, ogg, wav, ...)
/// and resamples to the pipeline's target sample rate.
pub struct FfmpegDecoder {
    target_sample_rate: u32,
}

impl FfmpegDecoder {
    pub fn new() -> Self {
        Self {
            target_sample_rate: TARGET_SAMPLE_RATE,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.target_sample_rate = sample_rate;
        self
    }
}

impl Default for FfmpegDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDecoder for FfmpegDecoder {
    fn decode(&self, input: &AudioInput) -> Result<AudioSegment, DecodeError> {
        // ffmpeg demuxes from a path, so stage the bytes in a scoped temp
        // file; the handle deletes it on every exit path, error included
        let mut temp = tempfile::Builder::new()
            .prefix("voxscribe-")
            .suffix(&format!(".{}", input.format().extension()))
            .tempfile()?;
        temp.write_all(input.bytes())?;
        temp.flush()?;

        decode_file(temp.path(), self.target_sample_rate)
    }
}

fn decode_file(path: &Path, target_sample_rate: u32) -> Result<AudioSegment, DecodeError> {
    ffmpeg_next::init().map_err(ff_err)?;

    let mut ictx = ffmpeg_next::format::input(path).map_err(ff_err)?;

    let audio_stream = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Audio)
        .ok_or_else(|| DecodeError::InvalidAudio("no audio stream found".to_string()))?;

    let audio_stream_index = audio_stream.index();
    let codec_params = audio_stream.parameters();

    let codec_ctx =
        ffmpeg_next::codec::context::Context::from_parameters(codec_params).map_err(ff_err)?;
    let mut decoder = codec_ctx.decoder().audio().map_err(ff_err)?;

    let mut resampler = ffmpeg_next::software::resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Planar),
        ffmpeg_next::ChannelLayout::MONO,
        target_sample_rate,
    )
    .map_err(ff_err)?;

    let mut all_samples: Vec<f32> = Vec::new();
    let mut decoded_frame = ffmpeg_next::util::frame::audio::Audio::empty();
    let mut resampled_frame = ffmpeg_next::util::frame::audio::Audio::empty();

    let packets = ictx
        .packets()
        .filter(|(stream, _)| stream.index() == audio_stream_index);
    for (_, packet) in packets {
        decoder.send_packet(&packet).map_err(ff_err)?;

        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            resampler
                .run(&decoded_frame, &mut resampled_frame)
                .map_err(ff_err)?;
            all_samples.extend_from_slice(mono_plane(&resampled_frame));
        }
    }

    // Drain frames still buffered in the decoder
    decoder.send_eof().map_err(ff_err)?;
    while decoder.receive_frame(&mut decoded_frame).is_ok() {
        resampler
            .run(&decoded_frame, &mut resampled_frame)
            .map_err(ff_err)?;
        all_samples.extend_from_slice(mono_plane(&resampled_frame));
    }

    // The resampler can hold a tail of buffered samples
    if let Ok(Some(delay)) = resampler.flush(&mut resampled_frame) {
        if delay.output > 0 {
            all_samples.extend_from_slice(mono_plane(&resampled_frame));
        }
    }

    if all_samples.is_empty() {
        return Err(DecodeError::InvalidAudio(
            "audio stream decoded to zero samples".to_string(),
        ));
    }

    Ok(AudioSegment::new(all_samples, target_sample_rate, 1))
}

/// View a resampled frame's samples as f32. The resampler is configured for
/// planar mono, so plane 0 is the only plane.
fn mono_plane(frame: &ffmpeg_next::util::frame::audio::Audio) -> &[f32] {
    let count = frame.samples();
    if count == 0 {
        return &[];
    }
    let data = frame.data(0);
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const f32, count) }
}

fn ff_err(e: ffmpeg_next::Error) -> DecodeError {
    DecodeError::InvalidAudio(e.to_string())
}
