use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("transcript already exists at {0}")]
    AlreadyExists(PathBuf),
    #[error("failed to write transcript: {0}")]
    Io(#[from] std::io::Error),
}

/// Domain interface for persisting transcripts.
///
/// Saving is always an explicit caller action. Identifiers must be unique;
/// an existing artifact is never overwritten, and a saved artifact is never
/// mutated.
pub trait TranscriptStore: Send {
    fn save(&self, text: &str, identifier: &str) -> Result<PathBuf, StoreError>;
}
