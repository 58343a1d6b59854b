//! Direct Logger construction would require wiring the encoder, the sink,
//! the flush discipline, and the background worker by hand; the builder
//! hides that behind a stepwise API.

use super::{DEFAULT_PRE_ALLOC, DEFAULT_TIME_FORMAT, Logger};
use crate::clock::FastClock;
use crate::encode::{Encoder, JsonEncoder, TextEncoder};
use crate::error::{Error, ErrorHandler, noop_error_handler};
use crate::field::Field;
use crate::level::Level;
use crate::rotate::{RotateBuilder, RotateWriter};
use crate::writer::{
    BatchedWriter, BufferedWriter, StderrSink, StdoutSink, WrapWriter, Writer, auto_sync,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum EncoderChoice {
    Text,
    Json,
}

enum SinkChoice {
    Stdout,
    Stderr,
    File(RotateBuilder),
}

enum ModeChoice {
    Direct,
    Buffered(usize),
    Batched(usize),
}

/// Stepwise logger configuration; `build` wires the stack together.
pub struct LoggerBuilder {
    min_level: Level,
    encoder: EncoderChoice,
    time_format: String,
    sink: SinkChoice,
    mode: ModeChoice,
    auto_sync: Option<Duration>,
    base: Vec<Field>,
    with_pid: bool,
    fast_clock: bool,
    pre_alloc: usize,
    on_error: ErrorHandler,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// TEXT records to stdout at `info`, written directly.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Level::Info,
            encoder: EncoderChoice::Text,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            sink: SinkChoice::Stdout,
            mode: ModeChoice::Direct,
            auto_sync: None,
            base: Vec::new(),
            with_pid: false,
            fast_clock: false,
            pre_alloc: DEFAULT_PRE_ALLOC,
            on_error: noop_error_handler(),
        }
    }

    /// Records below this severity are dropped before encoding.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Tab-separated `key=value` records.
    #[must_use]
    pub fn text(mut self) -> Self {
        self.encoder = EncoderChoice::Text;
        self
    }

    /// One JSON object per record.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.encoder = EncoderChoice::Json;
        self
    }

    /// `chrono` format for time fields; empty emits Unix seconds.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Records go to standard output.
    #[must_use]
    pub fn stdout(mut self) -> Self {
        self.sink = SinkChoice::Stdout;
        self
    }

    /// Records go to standard error.
    #[must_use]
    pub fn stderr(mut self) -> Self {
        self.sink = SinkChoice::Stderr;
        self
    }

    /// Records go to a rotating file; the sub-builder carries the rotation
    /// settings.
    #[must_use]
    pub fn file(self, path: impl Into<PathBuf>) -> FileBuilder {
        FileBuilder {
            builder: RotateWriter::builder(path),
            parent: self,
        }
    }

    /// Every write goes straight to the sink.
    #[must_use]
    pub const fn direct(mut self) -> Self {
        self.mode = ModeChoice::Direct;
        self
    }

    /// Writes accumulate up to `max_size` bytes before flushing.
    #[must_use]
    pub const fn buffered(mut self, max_size: usize) -> Self {
        self.mode = ModeChoice::Buffered(max_size);
        self
    }

    /// Writes accumulate up to `max_batches` records before flushing.
    #[must_use]
    pub const fn batched(mut self, max_batches: usize) -> Self {
        self.mode = ModeChoice::Batched(max_batches);
        self
    }

    /// Background worker flushes on this interval until `close`.
    #[must_use]
    pub const fn auto_sync(mut self, frequency: Duration) -> Self {
        self.auto_sync = Some(frequency);
        self
    }

    /// Fields stamped on every record, ahead of per-call fields.
    #[must_use]
    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.base = fields;
        self
    }

    /// Stamp every record with the process id.
    #[must_use]
    pub const fn with_pid(mut self, enabled: bool) -> Self {
        self.with_pid = enabled;
        self
    }

    /// Trade up to 100 ms of timestamp skew for syscall-free time reads.
    #[must_use]
    pub const fn fast_clock(mut self, enabled: bool) -> Self {
        self.fast_clock = enabled;
        self
    }

    /// Pre-allocation for the per-record buffer.
    #[must_use]
    pub const fn pre_alloc(mut self, bytes: usize) -> Self {
        self.pre_alloc = bytes;
        self
    }

    /// Callback for errors with no caller to return to.
    #[must_use]
    pub fn error_handler(mut self, handler: ErrorHandler) -> Self {
        self.on_error = handler;
        self
    }

    /// Opens the sink, stacks the discipline and the wrap stage, and starts
    /// the background flush worker if configured.
    ///
    /// # Errors
    /// `Error::Config` for a sub-minimum buffer size; I/O errors opening the
    /// file sink.
    ///
    /// # Panics
    /// A zero batch count or a rotation interval below 1 ms is a programming
    /// error.
    pub fn build(self) -> Result<Logger, Error> {
        let sink: Arc<dyn Writer> = match self.sink {
            SinkChoice::Stdout => Arc::new(StdoutSink),
            SinkChoice::Stderr => Arc::new(StderrSink),
            SinkChoice::File(builder) => {
                Arc::new(builder.on_error(Arc::clone(&self.on_error)).build()?)
            }
        };

        let staged: Arc<dyn Writer> = match self.mode {
            ModeChoice::Direct => sink,
            ModeChoice::Buffered(max_size) => {
                Arc::new(BufferedWriter::with_size(sink, max_size)?)
            }
            ModeChoice::Batched(max_batches) => Arc::new(BatchedWriter::new(sink, max_batches)),
        };
        let writer: Arc<dyn Writer> = Arc::new(WrapWriter::new(staged));

        let encoder: Arc<dyn Encoder> = match self.encoder {
            EncoderChoice::Text => Arc::new(TextEncoder::new().time_format(self.time_format)),
            EncoderChoice::Json => Arc::new(JsonEncoder::new().time_format(self.time_format)),
        };

        let auto_sync = self
            .auto_sync
            .map(|freq| auto_sync(Arc::clone(&writer), freq, Arc::clone(&self.on_error)));

        Ok(Logger {
            min_level: self.min_level,
            encoder,
            writer,
            base: self.base,
            pid: self.with_pid.then(std::process::id),
            clock: self.fast_clock.then(|| Arc::new(FastClock::start())),
            pre_alloc: self.pre_alloc,
            on_error: self.on_error,
            auto_sync: Mutex::new(auto_sync),
        })
    }
}

/// The file sink has its own concerns (size budget, retention, naming)
/// needing a dedicated sub-builder.
pub struct FileBuilder {
    builder: RotateBuilder,
    parent: LoggerBuilder,
}

impl FileBuilder {
    /// Size budget per file.
    #[must_use]
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.builder = self.builder.max_size(bytes);
        self
    }

    /// Prune backups older than this.
    #[must_use]
    pub fn max_age(mut self, age: Duration) -> Self {
        self.builder = self.builder.max_age(age);
        self
    }

    /// Keep at most this many backups.
    #[must_use]
    pub fn max_backups(mut self, count: usize) -> Self {
        self.builder = self.builder.max_backups(count);
        self
    }

    /// Also rotate on a fixed interval.
    #[must_use]
    pub fn rotate_every(mut self, every: Duration) -> Self {
        self.builder = self.builder.rotate_every(every);
        self
    }

    /// Gzip backups after rotation.
    #[must_use]
    pub fn compress(mut self, enabled: bool) -> Self {
        self.builder = self.builder.compress(enabled);
        self
    }

    /// `chrono` pattern for backup-name timestamps.
    #[must_use]
    pub fn backup_time_format(mut self, format: impl Into<String>) -> Self {
        self.builder = self.builder.time_format(format);
        self
    }

    /// Sub-builder consumes self, so there must be a way back to the parent.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.sink = SinkChoice::File(self.builder);
        self.parent
    }
}
