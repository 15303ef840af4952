//! # JSONL Log File
//!
//! One `LogEntry` per line, appended in index order and never rewritten.
//!
//! The file is opened in append mode and held under an exclusive `fs2`
//! lock (flock on Unix, LockFile on Windows) for the adapter's lifetime,
//! so a second process pointed at the same file fails at open instead of
//! interleaving records.
//!
//! A failed append is cut back to the last committed byte. If the cut itself
//! fails the adapter is poisoned and refuses every later append, since the
//! file may end in a torn record.

use crate::domain::entry::LogEntry;
use crate::domain::errors::LogError;
use crate::ports::outbound::LogPersistence;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Exclusively locked JSONL log file.
#[derive(Debug)]
pub struct JsonlLogFile {
    file: File,
    path: PathBuf,
    poisoned: bool,
}

impl JsonlLogFile {
    /// Opens or creates the file at `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// `LogError::Locked` if another handle holds the lock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;

        if file.try_lock_exclusive().is_err() {
            return Err(LogError::Locked { path });
        }

        debug!(path = %path.display(), "[LogStore] log file locked");
        Ok(Self {
            file,
            path,
            poisoned: false,
        })
    }

    /// Location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once a failed append could not be rolled back.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn write_record(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes)?;
        self.file.sync_data()
    }

    /// Truncates the file to `len`, discarding a torn or unsynced record.
    fn rollback(&mut self, len: u64) {
        match self.file.set_len(len).and_then(|()| self.file.sync_data()) {
            Ok(()) => {
                warn!(path = %self.path.display(), len, "[LogStore] failed append rolled back");
            }
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    error = %e,
                    "[LogStore] rollback failed, refusing further appends"
                );
                self.poisoned = true;
            }
        }
    }
}

impl LogPersistence for JsonlLogFile {
    fn load(&mut self) -> Result<Vec<LogEntry>, LogError> {
        self.file.seek(SeekFrom::Start(0))?;
        let reader = BufReader::new(&self.file);

        let mut entries = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: LogEntry =
                serde_json::from_str(&line).map_err(|e| LogError::CorruptRecord {
                    line: i + 1,
                    message: e.to_string(),
                })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn append(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        if self.poisoned {
            return Err(LogError::Poisoned {
                path: self.path.clone(),
            });
        }
        let mut line =
            serde_json::to_string(entry).map_err(|e| LogError::Serialization(e.to_string()))?;
        line.push('\n');

        let committed = self.file.metadata()?.len();
        if let Err(e) = self.write_record(line.as_bytes()) {
            self.rollback(committed);
            return Err(e.into());
        }
        Ok(())
    }
}

impl Drop for JsonlLogFile {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
