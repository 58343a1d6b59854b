//! Wiring from the typed configuration document to a running logger.

use super::{Logger, LoggerBuilder};
use crate::config::Config;
use crate::error::Error;
use crate::parse::{parse_duration, parse_size};

impl Logger {
    /// Builds a logger from a validated configuration document.
    ///
    /// # Errors
    /// Validation failures (`Error::Config`, `Error::Parse`) and I/O errors
    /// opening the file sink.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let mut builder = Self::builder().level(config.parse_level()?);

        builder = match config.handler.as_str() {
            "json" => builder.json(),
            _ => builder.text(),
        };

        builder = match config.writer.target.as_str() {
            "stderr" => builder.stderr(),
            "file" => file_target(builder, config)?,
            _ => builder.stdout(),
        };

        builder = match config.writer.mode.as_str() {
            "buffer" => {
                #[allow(clippy::cast_possible_truncation)]
                let size = parse_size(&config.writer.buffer_size)? as usize;
                builder.buffered(size)
            }
            "batch" => builder.batched(config.writer.batch_size as usize),
            _ => builder.direct(),
        };

        if let Some(frequency) = config.auto_sync_interval()? {
            builder = builder.auto_sync(frequency);
        }

        builder.with_pid(config.with_pid).build()
    }
}

fn file_target(builder: LoggerBuilder, config: &Config) -> Result<LoggerBuilder, Error> {
    let mut file = builder.file(config.resolved_file_path());

    if config.file.rotate {
        file = file.max_size(parse_size(&config.file.max_size)?);
        if !config.file.max_age.is_empty() {
            file = file.max_age(parse_duration(&config.file.max_age)?);
        }
        if config.file.max_backups > 0 {
            file = file.max_backups(config.file.max_backups as usize);
        }
        if !config.file.rotate_every.is_empty() {
            file = file.rotate_every(parse_duration(&config.file.rotate_every)?);
        }
        file = file
            .compress(config.file.compress)
            .backup_time_format(config.file.time_format.clone());
    } else {
        // Plain append: a budget no write can cross means no rotation.
        file = file.max_size(u64::MAX);
    }

    Ok(file.done())
}
