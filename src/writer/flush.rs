//! Periodic background flush. One worker per writer stack blocks on a ticker
//! and a one-shot stop signal; stopping joins the worker deterministically.

use super::Writer;
use crate::error::ErrorHandler;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// Stops the background flush worker when told to, or when dropped.
pub struct AutoSyncHandle {
    stop: Sender<()>,
    worker: Option<JoinHandle<()>>,
}

impl AutoSyncHandle {
    /// Signals the worker and waits for it to return. A flush already in
    /// progress completes first; there is no mid-flush cancellation.
    pub fn stop(mut self) {
        self.stop_inner();
    }

    fn stop_inner(&mut self) {
        // The worker may already have exited; a dead channel is fine.
        let _ = self.stop.send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for AutoSyncHandle {
    fn drop(&mut self) {
        self.stop_inner();
    }
}

/// Spawns a worker that calls `writer.sync()` every `frequency`. Flush errors
/// have no caller to return to and go to `on_error` with the label
/// `"auto-sync"`.
#[must_use]
pub fn auto_sync(writer: Arc<dyn Writer>, frequency: Duration, on_error: ErrorHandler) -> AutoSyncHandle {
    let (stop, ticker) = mpsc::channel::<()>();
    let worker = std::thread::spawn(move || {
        loop {
            match ticker.recv_timeout(frequency) {
                Err(RecvTimeoutError::Timeout) => {
                    if let Err(e) = writer.sync() {
                        on_error("auto-sync", &e);
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    });
    AutoSyncHandle {
        stop,
        worker: Some(worker),
    }
}
