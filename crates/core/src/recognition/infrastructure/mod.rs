pub mod google_recognizer;
pub mod recognizer_factory;
pub mod sphinx_recognizer;
pub mod whisper_recognizer;
