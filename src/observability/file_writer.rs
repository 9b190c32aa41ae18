//! Rotating log file with size-based rotation and backup retention.
//!
//! [`RotatingFileWriter`] is handed to the `fmt` layer as its `MakeWriter`.
//! Every formatted event is appended to the log file; once the file grows
//! past the size limit it is renamed to `<name>.<millis>` and a fresh file is
//! started. Only the newest backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct RotatingFileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFileWriter {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Appends `buf`, rotating first when the file is over the limit.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation, opening or writing the file fails.
    pub fn append(&self, buf: &[u8]) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);

        self.check_and_rotate(&mut file)?;

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }

        match file.as_mut() {
            Some(handle) => {
                handle.write_all(buf)?;
                handle.flush()
            }
            None => Err(io::Error::new(io::ErrorKind::NotFound, "log file unavailable")),
        }
    }

    fn check_and_rotate(&self, file: &mut Option<File>) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.file_path) else {
            return Ok(());
        };
        if metadata.len() > self.max_bytes {
            *file = None;
            self.rotate()?;
        }
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        let backup_path = self.backup_path(chrono::Utc::now().timestamp_millis());
        if self.file_path.exists() {
            fs::rename(&self.file_path, backup_path)?;
        }
        self.cleanup_old_backups()
    }

    fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn backup_path(&self, stamp: i64) -> PathBuf {
        self.file_path.with_file_name(format!("{}.{stamp}", self.file_name()))
    }

    /// Deletes every backup beyond the newest `max_backups`.
    ///
    /// Individual deletion failures are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let Some(parent) = self.file_path.parent() else {
            return Ok(());
        };
        let prefix = format!("{}.", self.file_name());

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Backup names end in a millisecond stamp, newest sorts last.
        backups.sort();
        let excess = backups.len().saturating_sub(self.max_backups);
        for old in backups.iter().take(excess) {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

/// Per-event handle produced by [`MakeWriter`].
#[derive(Debug)]
pub struct RotatingFileGuard<'a> {
    writer: &'a RotatingFileWriter,
}

impl Write for RotatingFileGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingFileGuard { writer: self }
    }
}
