pub mod audio_decoder;
pub mod audio_input;
pub mod audio_segment;
