//! Logger facade: level gating plus record assembly over one encoder and one
//! writer stack. Immutable after build, so concurrent producers only contend
//! on the stack's own mutex.

mod builder;
mod from_config;

pub use builder::{FileBuilder, LoggerBuilder};

use crate::clock::FastClock;
use crate::encode::Encoder;
use crate::error::{Error, ErrorHandler};
use crate::field::Field;
use crate::level::Level;
use crate::writer::{AutoSyncHandle, Writer};
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex, PoisonError};

/// Per-record buffer pre-allocation; typical records fit without growing.
pub const DEFAULT_PRE_ALLOC: usize = 256;
/// Time format used by the facade unless overridden; the encoders themselves
/// default to numeric Unix seconds.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A configured logger. Build one with [`Logger::builder`] or
/// [`Logger::from_config`].
pub struct Logger {
    min_level: Level,
    encoder: Arc<dyn Encoder>,
    writer: Arc<dyn Writer>,
    base: Vec<Field>,
    pid: Option<u32>,
    clock: Option<Arc<FastClock>>,
    pre_alloc: usize,
    on_error: ErrorHandler,
    auto_sync: Mutex<Option<AutoSyncHandle>>,
}

impl Logger {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Encodes one record and hands it to the writer stack. Severity below
    /// the minimum drops the record before any encoding work. Write failures
    /// go to the error handler; logging call sites don't handle errors.
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        if level < self.min_level {
            return;
        }

        let mut buf = Vec::with_capacity(self.pre_alloc);
        self.encoder.begin(&mut buf);
        self.encoder.append_time(&mut buf, "ts", self.timestamp());
        self.encoder.append_str(&mut buf, "level", level.as_str());
        if let Some(pid) = self.pid {
            self.encoder.append_uint(&mut buf, "pid", u64::from(pid));
        }
        self.encoder.append_str(&mut buf, "msg", msg);
        for field in &self.base {
            field.append_to(self.encoder.as_ref(), &mut buf);
        }
        for field in fields {
            field.append_to(self.encoder.as_ref(), &mut buf);
        }
        self.encoder.end(&mut buf);

        if let Err(e) = self.writer.write(&buf) {
            (self.on_error)("write", &e);
        }
    }

    /// Development-time diagnostics.
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    /// Normal operational milestones.
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    /// Non-fatal anomalies.
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    /// Unrecoverable failures.
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// A child logger whose records carry `fields` before any per-call
    /// fields. Shares the encoder and writer stack; the background flush
    /// worker stays with the parent.
    #[must_use]
    pub fn with(&self, fields: Vec<Field>) -> Self {
        let mut base = self.base.clone();
        base.extend(fields);
        Self {
            min_level: self.min_level,
            encoder: Arc::clone(&self.encoder),
            writer: Arc::clone(&self.writer),
            base,
            pid: self.pid,
            clock: self.clock.clone(),
            pre_alloc: self.pre_alloc,
            on_error: Arc::clone(&self.on_error),
            auto_sync: Mutex::new(None),
        }
    }

    /// Flushes buffered records down the stack.
    ///
    /// # Errors
    /// I/O errors from the stack.
    pub fn sync(&self) -> Result<(), Error> {
        self.writer.sync()
    }

    /// Stops the background flush worker if one is running, flushes, and
    /// closes the stack (standard streams stay open).
    ///
    /// # Errors
    /// I/O errors from the stack.
    pub fn close(&self) -> Result<(), Error> {
        let handle = self
            .auto_sync
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.stop();
        }
        self.writer.close()
    }

    /// The active severity threshold.
    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    fn timestamp(&self) -> DateTime<Local> {
        self.clock.as_ref().map_or_else(Local::now, |c| c.now())
    }
}
