//! Size-triggered flush discipline: writes accumulate in memory and drain to
//! the sink when the buffer would overflow or on demand.

use super::Writer;
use crate::error::Error;
use std::sync::{Arc, Mutex, PoisonError};

/// Buffers smaller than this thrash the sink with tiny writes.
pub const MIN_BUFFER_SIZE: usize = 1024;
/// Default buffer budget between flushes.
pub const DEFAULT_BUFFER_SIZE: usize = 16 * 1024;

/// Size-triggered buffer over a downstream sink. All operations are
/// serialized by one mutex; the buffer never exceeds its budget between
/// flushes by more than the last appended record.
pub struct BufferedWriter {
    buf: Mutex<Vec<u8>>,
    max_size: usize,
    sink: Arc<dyn Writer>,
}

impl BufferedWriter {
    /// Wraps `sink` with the default 16 KiB buffer.
    #[must_use]
    pub fn new(sink: Arc<dyn Writer>) -> Self {
        Self {
            buf: Mutex::new(Vec::with_capacity(DEFAULT_BUFFER_SIZE)),
            max_size: DEFAULT_BUFFER_SIZE,
            sink,
        }
    }

    /// Wraps `sink` with an explicit buffer budget.
    ///
    /// # Errors
    /// `Error::Config` if `max_size` is below [`MIN_BUFFER_SIZE`].
    pub fn with_size(sink: Arc<dyn Writer>, max_size: usize) -> Result<Self, Error> {
        if max_size < MIN_BUFFER_SIZE {
            return Err(Error::Config(format!(
                "buffer size {max_size} below minimum {MIN_BUFFER_SIZE}"
            )));
        }
        Ok(Self {
            buf: Mutex::new(Vec::with_capacity(max_size)),
            max_size,
            sink,
        })
    }

    fn flush_locked(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        if !buf.is_empty() {
            self.sink.write(buf)?;
            buf.clear();
        }
        Ok(())
    }
}

impl Writer for BufferedWriter {
    fn write(&self, p: &[u8]) -> Result<usize, Error> {
        let mut buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        if buf.len() + p.len() > self.max_size && !buf.is_empty() {
            self.flush_locked(&mut buf)?;
        }
        // A record larger than the whole buffer bypasses it.
        if p.len() > self.max_size {
            return self.sink.write(p);
        }
        buf.extend_from_slice(p);
        Ok(p.len())
    }

    fn sync(&self) -> Result<(), Error> {
        let mut buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        self.flush_locked(&mut buf)?;
        if self.sink.is_standard_stream() {
            return Ok(());
        }
        self.sink.sync()
    }

    fn close(&self) -> Result<(), Error> {
        let mut buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        self.flush_locked(&mut buf)?;
        if self.sink.is_standard_stream() {
            return Ok(());
        }
        self.sink.close()
    }
}
