//! Count-triggered flush discipline: the buffer drains after a fixed number
//! of logical writes instead of a byte budget. Different tail-latency profile
//! than [`super::BufferedWriter`], same contract.

use super::Writer;
use crate::error::Error;
use std::sync::{Arc, Mutex, PoisonError};

struct Batch {
    buf: Vec<u8>,
    pending: usize,
}

/// Count-triggered batch over a downstream sink. Counts logical writes (one
/// per `write` call); never holds more than `max_batches` pending writes
/// before flushing.
pub struct BatchedWriter {
    state: Mutex<Batch>,
    max_batches: usize,
    sink: Arc<dyn Writer>,
}

impl BatchedWriter {
    /// Wraps `sink`, flushing after every `max_batches` writes.
    ///
    /// # Panics
    /// A zero batch count is a programming error.
    #[must_use]
    pub fn new(sink: Arc<dyn Writer>, max_batches: usize) -> Self {
        assert!(max_batches >= 1, "batch count must be at least 1");
        Self {
            state: Mutex::new(Batch {
                buf: Vec::new(),
                pending: 0,
            }),
            max_batches,
            sink,
        }
    }

    fn flush_locked(&self, state: &mut Batch) -> Result<(), Error> {
        if !state.buf.is_empty() {
            self.sink.write(&state.buf)?;
            state.buf.clear();
        }
        state.pending = 0;
        Ok(())
    }
}

impl Writer for BatchedWriter {
    fn write(&self, p: &[u8]) -> Result<usize, Error> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.pending >= self.max_batches {
            self.flush_locked(&mut state)?;
        }
        state.buf.extend_from_slice(p);
        state.pending += 1;
        Ok(p.len())
    }

    fn sync(&self) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.flush_locked(&mut state)?;
        if self.sink.is_standard_stream() {
            return Ok(());
        }
        self.sink.sync()
    }

    fn close(&self) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.flush_locked(&mut state)?;
        if self.sink.is_standard_stream() {
            return Ok(());
        }
        self.sink.close()
    }
}
