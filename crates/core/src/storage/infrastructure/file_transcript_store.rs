use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::shared::constants::TRANSCRIPT_FILE_PREFIX;
use crate::storage::domain::transcript_store::{StoreError, TranscriptStore};

/// Writes transcripts as UTF-8 text files under a target directory.
pub struct FileTranscriptStore {
    dir: PathBuf,
}

impl FileTranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TranscriptStore for FileTranscriptStore {
    fn save(&self, text: &str, identifier: &str) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("{TRANSCRIPT_FILE_PREFIX}{identifier}.txt"));

        // create_new refuses to clobber an existing artifact
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    StoreError::AlreadyExists(path.clone())
                } else {
                    StoreError::Io(e)
                }
            })?;
        file.write_all(text.as_bytes())?;
        Ok(path)
    }
}

/// Timestamp-derived identifier for a new transcript artifact.
pub fn timestamp_identifier() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}
