//! Configuration struct definitions. Loading, include resolution, and
//! merging belong to the consumer; this is the typed surface they feed.

use serde::Deserialize;

/// A completely empty config document must still produce a working logger;
/// `#[serde(default)]` on every section ensures zero-config works.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum log level: `debug`, `info`, `warn`, `error`.
    pub level: String,
    /// Record encoder: `text` or `json`.
    pub handler: String,
    /// Write-discipline settings.
    pub writer: WriterConfig,
    /// File sink settings; only consulted when `writer.target` is `file`.
    pub file: FileConfig,
    /// Carried for callers that capture source locations themselves.
    pub with_source: bool,
    /// Stamp every record with the process id.
    pub with_pid: bool,
    /// Background flush interval (duration literal); empty means manual.
    pub auto_sync: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            handler: "text".to_string(),
            writer: WriterConfig::default(),
            file: FileConfig::default(),
            with_source: false,
            with_pid: false,
            auto_sync: String::new(),
        }
    }
}

/// Which sink the stack ends at and which flush discipline wraps it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// `stdout`, `stderr`, or `file`.
    pub target: String,
    /// `direct`, `buffer`, or `batch`.
    pub mode: String,
    /// Byte-size literal for `buffer` mode.
    pub buffer_size: String,
    /// Logical writes per flush for `batch` mode; at least 1.
    pub batch_size: u32,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            target: "stdout".to_string(),
            mode: "direct".to_string(),
            buffer_size: "16K".to_string(),
            batch_size: 8,
        }
    }
}

/// Rotating file sink settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Log file path; empty picks the XDG state directory default.
    pub path: String,
    /// Enable size/age/count rotation; off means plain append.
    pub rotate: bool,
    /// Byte-size literal for the per-file budget.
    pub max_size: String,
    /// Duration literal; backups older than this are pruned.
    pub max_age: String,
    /// Backups kept after pruning.
    pub max_backups: u32,
    /// Gzip backups after rotation.
    pub compress: bool,
    /// Duration literal; also rotate on this interval. Empty disables.
    pub rotate_every: String,
    /// `chrono` pattern for backup-name timestamps.
    pub time_format: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            rotate: false,
            max_size: "100M".to_string(),
            max_age: "30d".to_string(),
            max_backups: 10,
            compress: false,
            rotate_every: String::new(),
            time_format: crate::rotate::DEFAULT_BACKUP_TIME_FORMAT.to_string(),
        }
    }
}
