//! The writer stack: a chain of `Writer` capability holders ending at a sink.
//! The built-in flush disciplines (direct, buffered, batched) can't cover
//! every use case — the trait lets users slot in custom stages.

mod batched;
mod buffered;
mod flush;

pub use batched::BatchedWriter;
pub use buffered::{BufferedWriter, DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE};
pub use flush::{AutoSyncHandle, auto_sync};

use crate::error::Error;
use std::io::Write as _;
use std::sync::{Arc, Mutex};

/// One stage of a writer stack. `write` hands over a complete encoded record;
/// a record is never split across calls, so implementations that serialize
/// each call end-to-end interleave concurrent producers at record granularity.
pub trait Writer: Send + Sync {
    /// Writes all of `buf` or fails; no partial writes surface.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn write(&self, buf: &[u8]) -> Result<usize, Error>;

    /// Moves buffered bytes downstream and asks the sink to commit them.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn sync(&self) -> Result<(), Error>;

    /// Flushes, then closes the downstream sink. Standard streams are
    /// process-wide and are never closed.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn close(&self) -> Result<(), Error>;

    /// Wrappers suppress `sync`/`close` toward stdout and stderr; the streams
    /// answer for themselves.
    fn is_standard_stream(&self) -> bool {
        false
    }
}

/// Sink for standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Writer for StdoutSink {
    fn write(&self, buf: &[u8]) -> Result<usize, Error> {
        let mut out = std::io::stdout().lock();
        out.write_all(buf)?;
        Ok(buf.len())
    }

    fn sync(&self) -> Result<(), Error> {
        std::io::stdout().lock().flush()?;
        Ok(())
    }

    fn close(&self) -> Result<(), Error> {
        Ok(())
    }

    fn is_standard_stream(&self) -> bool {
        true
    }
}

/// Sink for standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl Writer for StderrSink {
    fn write(&self, buf: &[u8]) -> Result<usize, Error> {
        let mut out = std::io::stderr().lock();
        out.write_all(buf)?;
        Ok(buf.len())
    }

    fn sync(&self) -> Result<(), Error> {
        std::io::stderr().lock().flush()?;
        Ok(())
    }

    fn close(&self) -> Result<(), Error> {
        Ok(())
    }

    fn is_standard_stream(&self) -> bool {
        true
    }
}

/// In-memory sink; lets tests and callers inspect exactly what reached the
/// bottom of a stack.
#[derive(Debug, Default)]
pub struct MemorySink {
    bytes: Mutex<Vec<u8>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        let bytes = self.bytes.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        bytes.clone()
    }
}

impl Writer for MemorySink {
    fn write(&self, buf: &[u8]) -> Result<usize, Error> {
        let mut bytes = self.bytes.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn sync(&self) -> Result<(), Error> {
        Ok(())
    }

    fn close(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Pass-through stage giving the logger facade one uniform interface over any
/// configured discipline, with the standard-stream suppression repeated at
/// this boundary.
pub struct WrapWriter {
    sink: Arc<dyn Writer>,
}

impl WrapWriter {
    #[must_use]
    pub fn new(sink: Arc<dyn Writer>) -> Self {
        Self { sink }
    }
}

impl Writer for WrapWriter {
    fn write(&self, buf: &[u8]) -> Result<usize, Error> {
        self.sink.write(buf)
    }

    fn sync(&self) -> Result<(), Error> {
        if self.sink.is_standard_stream() {
            return Ok(());
        }
        self.sink.sync()
    }

    fn close(&self) -> Result<(), Error> {
        if self.sink.is_standard_stream() {
            return Ok(());
        }
        self.sink.close()
    }

    fn is_standard_stream(&self) -> bool {
        self.sink.is_standard_stream()
    }
}
