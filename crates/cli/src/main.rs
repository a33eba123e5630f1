use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use voxscribe_core::audio::domain::audio_input::{AudioFormat, AudioInput};
use voxscribe_core::audio::infrastructure::ffmpeg_decoder::FfmpegDecoder;
use voxscribe_core::pipeline::transcribe_use_case::TranscribeUseCase;
use voxscribe_core::recognition::domain::engine::{EngineKind, ModelSize};
use voxscribe_core::recognition::domain::language::LanguageTag;
use voxscribe_core::recognition::domain::recognition_config::RecognitionConfig;
use voxscribe_core::recognition::infrastructure::recognizer_factory::RecognizerFactory;
use voxscribe_core::storage::domain::transcript_store::TranscriptStore;
use voxscribe_core::storage::infrastructure::file_transcript_store::{
    timestamp_identifier, FileTranscriptStore,
};

/// Transcribe an audio file with a cloud or local speech engine.
#[derive(Parser)]
#[command(name = "voxscribe")]
struct Cli {
    /// Input audio file (wav, mp3, m4a, flac, ogg).
    input: PathBuf,

    /// Speech engine: google, sphinx, whisper or deepgram.
    #[arg(long, default_value = "google")]
    engine: String,

    /// Language tag (en-US, fr-FR, ar-DZ, es-ES) or "auto" (whisper only).
    #[arg(long, default_value = "en-US")]
    language: String,

    /// Whisper model size: tiny, base, small, medium or large-v3.
    #[arg(long)]
    model_size: Option<String>,

    /// Google API key (falls back to $GOOGLE_SPEECH_API_KEY).
    #[arg(long)]
    api_key: Option<String>,

    /// Directory holding per-language pocketsphinx models.
    #[arg(long)]
    sphinx_model_dir: Option<PathBuf>,

    /// Request timeout in seconds for the cloud engine.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Save the transcript under this directory as transcript_<timestamp>.txt.
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Suppress the attempt: report the paused state instead of recognizing.
    #[arg(long)]
    paused: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let engine = parse_engine(&cli.engine)?;
    let language = LanguageTag::parse(&cli.language)?;
    let model_size = cli
        .model_size
        .as_deref()
        .map(parse_model_size)
        .transpose()?;
    let config = RecognitionConfig::new(engine, language.clone(), model_size)?;

    let mut factory = RecognizerFactory::new().with_download_progress(download_progress);
    if let Some(key) = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("GOOGLE_SPEECH_API_KEY").ok())
    {
        factory = factory.with_api_key(key);
    }
    if let Some(dir) = cli.sphinx_model_dir.clone() {
        factory = factory.with_sphinx_model_dir(dir);
    }
    if let Some(secs) = cli.timeout_secs {
        factory = factory.with_timeout(Duration::from_secs(secs));
    }

    let recognizer = factory.create(&config)?;
    if engine == EngineKind::Whisper {
        eprintln!();
    }

    let format = audio_format(&cli.input)?;
    let bytes = std::fs::read(&cli.input)?;
    let audio = AudioInput::new(bytes, format);

    let use_case = TranscribeUseCase::new(Box::new(FfmpegDecoder::new()), recognizer, language);
    let transcript = use_case.run(&audio, cli.paused)?;

    println!("{transcript}");

    if let Some(dir) = cli.save_dir {
        let store = FileTranscriptStore::new(dir);
        let path = store.save(&transcript, &timestamp_identifier())?;
        log::info!("Transcript saved to {}", path.display());
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    Ok(())
}

fn parse_engine(name: &str) -> Result<EngineKind, Box<dyn std::error::Error>> {
    EngineKind::parse(name).ok_or_else(|| {
        format!("Engine must be google, sphinx, whisper or deepgram, got '{name}'").into()
    })
}

fn parse_model_size(name: &str) -> Result<ModelSize, Box<dyn std::error::Error>> {
    ModelSize::parse(name).ok_or_else(|| {
        format!("Model size must be tiny, base, small, medium or large-v3, got '{name}'").into()
    })
}

fn audio_format(path: &Path) -> Result<AudioFormat, Box<dyn std::error::Error>> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(AudioFormat::from_extension)
        .ok_or_else(|| format!("Unsupported audio file type: {}", path.display()).into())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading whisper model... {pct}%");
    } else {
        eprint!("\rDownloading whisper model... {downloaded} bytes");
    }
}
