//! Typed configuration surface and its validation pass. Full config loading
//! (file discovery, includes, merging) is the consumer's job; the one TOML
//! entry point here covers tests and embedded documents.

mod structs;

pub use structs::{Config, FileConfig, WriterConfig};

use crate::error::Error;
use crate::level::Level;
use crate::parse::{parse_duration, parse_size};
use crate::writer::MIN_BUFFER_SIZE;
use std::path::PathBuf;
use std::time::Duration;

impl Config {
    /// Parses a TOML document and validates it.
    ///
    /// # Errors
    /// `Error::ConfigParse` on syntax errors, `Error::Config` or
    /// `Error::Parse` on rejected values.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects unknown names and out-of-range values before any I/O happens.
    ///
    /// # Errors
    /// `Error::Config` for unknown handler/target/mode/level, a zero batch
    /// count, or a buffer below the minimum; `Error::Parse` for bad
    /// size/duration literals.
    pub fn validate(&self) -> Result<(), Error> {
        self.parse_level()?;

        match self.handler.as_str() {
            "text" | "json" => {}
            other => return Err(Error::Config(format!("unknown handler: '{other}'"))),
        }
        match self.writer.target.as_str() {
            "stdout" | "stderr" | "file" => {}
            other => return Err(Error::Config(format!("unknown writer target: '{other}'"))),
        }
        match self.writer.mode.as_str() {
            "direct" | "buffer" | "batch" => {}
            other => return Err(Error::Config(format!("unknown writer mode: '{other}'"))),
        }

        if self.writer.mode == "batch" && self.writer.batch_size == 0 {
            return Err(Error::Config("batch size must be at least 1".to_string()));
        }
        if self.writer.mode == "buffer" {
            let size = parse_size(&self.writer.buffer_size)?;
            if size < MIN_BUFFER_SIZE as u64 {
                return Err(Error::Config(format!(
                    "buffer size {size} below minimum {MIN_BUFFER_SIZE}"
                )));
            }
        }

        if self.writer.target == "file" && self.file.rotate {
            parse_size(&self.file.max_size)?;
            if !self.file.max_age.is_empty() {
                parse_duration(&self.file.max_age)?;
            }
            if !self.file.rotate_every.is_empty() {
                let every = parse_duration(&self.file.rotate_every)?;
                if every < Duration::from_millis(1) {
                    return Err(Error::Config(
                        "rotation interval must be at least 1ms".to_string(),
                    ));
                }
            }
        }

        self.auto_sync_interval()?;
        Ok(())
    }

    /// The configured minimum level.
    ///
    /// # Errors
    /// `Error::Config` on an unknown level name.
    pub fn parse_level(&self) -> Result<Level, Error> {
        self.level.parse()
    }

    /// The background flush interval; `None` means manual flushing.
    ///
    /// # Errors
    /// `Error::Parse` on a bad duration literal.
    pub fn auto_sync_interval(&self) -> Result<Option<Duration>, Error> {
        if self.auto_sync.is_empty() {
            return Ok(None);
        }
        parse_duration(&self.auto_sync).map(Some)
    }

    /// The configured file path, or the XDG state-directory default when
    /// empty.
    #[must_use]
    pub fn resolved_file_path(&self) -> PathBuf {
        if self.file.path.is_empty() {
            default_log_path()
        } else {
            PathBuf::from(&self.file.path)
        }
    }
}

/// `~/.local/state/linelog/linelog.log` on XDG systems, falling back to a
/// relative path when no home directory can be resolved.
#[must_use]
pub fn default_log_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "linelog").map_or_else(
        || PathBuf::from("linelog.log"),
        |dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_dir())
                .join("linelog.log")
        },
    )
}
