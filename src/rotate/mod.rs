//! Rotating file sink: write-through file with a size budget, optional
//! rotation interval, and an age/backup-count retention policy.

mod backups;
mod compress;

use crate::error::{Error, ErrorHandler, noop_error_handler};
use crate::writer::Writer;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime};

/// Second resolution; the `.seq` suffix resolves same-second collisions.
pub const DEFAULT_BACKUP_TIME_FORMAT: &str = "%Y%m%d-%H%M%S";
/// Default size budget per file.
pub const DEFAULT_MAX_SIZE: u64 = 100 * 1024 * 1024;

struct RotateState {
    /// `None` while degraded: rotation renamed the old file but could not
    /// open a fresh one. Each write retries the open.
    file: Option<File>,
    /// Bytes in the current file, counted from open so the budget covers
    /// pre-existing content.
    written: u64,
    /// Collision-resolving backup suffix counter.
    seq: u64,
    /// Next time-based rotation, when an interval is configured.
    deadline: Option<SystemTime>,
}

/// File sink that rotates when a write would push the current file past its
/// size budget (or a configured interval elapses), renames the old file to a
/// timestamped backup, and prunes backups by age and count.
///
/// All operations are serialized by a single mutex.
pub struct RotateWriter {
    path: PathBuf,
    max_size: u64,
    max_age: Option<Duration>,
    max_backups: Option<usize>,
    rotate_every: Option<Duration>,
    compress: bool,
    time_format: String,
    on_error: ErrorHandler,
    state: Mutex<RotateState>,
}

impl RotateWriter {
    /// Starts configuring a sink for `path`.
    #[must_use]
    pub fn builder(path: impl Into<PathBuf>) -> RotateBuilder {
        RotateBuilder {
            path: path.into(),
            max_size: DEFAULT_MAX_SIZE,
            max_age: None,
            max_backups: None,
            rotate_every: None,
            compress: false,
            time_format: DEFAULT_BACKUP_TIME_FORMAT.to_string(),
            on_error: noop_error_handler(),
        }
    }

    fn rotate(&self, state: &mut RotateState) -> Result<(), Error> {
        // Close before renaming; the handle is replaced on every rotation.
        state.file = None;

        let backup = backups::backup_path(
            &self.path,
            Local::now(),
            &self.time_format,
            &mut state.seq,
        );

        if let Err(e) = fs::rename(&self.path, &backup) {
            // Degrade to oversize files rather than dropping logs: reopen the
            // original and let the write proceed against it.
            (self.on_error)("rotate", &Error::Io(e));
            let file = open_log_file(&self.path)?;
            state.written = file.metadata().map_or(0, |m| m.len());
            state.file = Some(file);
            state.deadline = self.next_deadline();
            return Ok(());
        }

        match open_log_file(&self.path) {
            Ok(file) => {
                state.file = Some(file);
                state.written = 0;
            }
            Err(e) => {
                state.written = 0;
                state.deadline = self.next_deadline();
                return Err(Error::Rotation {
                    path: self.path.clone(),
                    source: e,
                });
            }
        }
        state.deadline = self.next_deadline();

        if self.compress
            && let Err(e) = compress::compress_backup(&backup)
        {
            (self.on_error)("compress", &e);
        }
        if let Err(e) = backups::prune(
            &self.path,
            self.max_age,
            self.max_backups,
            SystemTime::now(),
        ) {
            (self.on_error)("prune", &e);
        }
        Ok(())
    }

    fn next_deadline(&self) -> Option<SystemTime> {
        self.rotate_every.map(|every| SystemTime::now() + every)
    }
}

impl Writer for RotateWriter {
    fn write(&self, p: &[u8]) -> Result<usize, Error> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        // Degraded from an earlier rotation: retry the open before anything else.
        if state.file.is_none() {
            let file = open_log_file(&self.path)?;
            state.written = file.metadata().map_or(0, |m| m.len());
            state.file = Some(file);
        }

        let len = p.len() as u64;
        let interval_due = state
            .deadline
            .is_some_and(|d| SystemTime::now() >= d);
        if interval_due || (state.written > 0 && state.written + len > self.max_size) {
            self.rotate(&mut state)?;
        }

        let Some(file) = state.file.as_mut() else {
            return Err(Error::Rotation {
                path: self.path.clone(),
                source: std::io::Error::other("log file not open"),
            });
        };
        file.write_all(p)?;
        state.written += len;
        Ok(p.len())
    }

    fn sync(&self) -> Result<(), Error> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = state.file.as_ref() {
            file.sync_all()?;
        }
        Ok(())
    }

    fn close(&self) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = state.file.take() {
            file.sync_all()?;
        }
        Ok(())
    }
}

/// Configuration for a [`RotateWriter`]; `build` opens the file.
pub struct RotateBuilder {
    path: PathBuf,
    max_size: u64,
    max_age: Option<Duration>,
    max_backups: Option<usize>,
    rotate_every: Option<Duration>,
    compress: bool,
    time_format: String,
    on_error: ErrorHandler,
}

impl RotateBuilder {
    /// Size budget per file; a write that would cross it rotates first.
    #[must_use]
    pub const fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    /// Backups older than this (by mtime) are deleted at the next rotation.
    #[must_use]
    pub const fn max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    /// At most this many backups survive a rotation; oldest go first.
    #[must_use]
    pub const fn max_backups(mut self, count: usize) -> Self {
        self.max_backups = Some(count);
        self
    }

    /// Also rotate whenever this interval has elapsed, size budget or not.
    #[must_use]
    pub const fn rotate_every(mut self, every: Duration) -> Self {
        self.rotate_every = Some(every);
        self
    }

    /// Gzip each backup right after the rename.
    #[must_use]
    pub const fn compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// `chrono` pattern for the backup timestamp.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Callback for prune/compress/rename failures that must not fail writes.
    #[must_use]
    pub fn on_error(mut self, handler: ErrorHandler) -> Self {
        self.on_error = handler;
        self
    }

    /// Expands `~`, creates parent directories (mode 0755), and opens the
    /// file (mode 0644, append). The size counter starts at the file's
    /// current length.
    ///
    /// # Errors
    /// I/O errors creating the directory or opening the file.
    ///
    /// # Panics
    /// A rotation interval below 1 ms is a programming error.
    pub fn build(self) -> Result<RotateWriter, Error> {
        if let Some(every) = self.rotate_every {
            assert!(
                every >= Duration::from_millis(1),
                "rotation interval must be at least 1ms"
            );
        }

        let expanded = shellexpand::tilde(&self.path.to_string_lossy().into_owned()).into_owned();
        let path = PathBuf::from(expanded);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            create_log_dir(parent)?;
        }

        let file = open_log_file(&path)?;
        let written = file.metadata().map_or(0, |m| m.len());
        let deadline = self.rotate_every.map(|every| SystemTime::now() + every);

        Ok(RotateWriter {
            path,
            max_size: self.max_size,
            max_age: self.max_age,
            max_backups: self.max_backups,
            rotate_every: self.rotate_every,
            compress: self.compress,
            time_format: self.time_format,
            on_error: self.on_error,
            state: Mutex::new(RotateState {
                file: Some(file),
                written,
                seq: 0,
                deadline,
            }),
        })
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    opts.open(path)
}

#[cfg(unix)]
fn create_log_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(dir)
}

#[cfg(not(unix))]
fn create_log_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}
