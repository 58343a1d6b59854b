//! Coarse wall-clock accelerator. One background thread advances an atomic
//! nanosecond counter by 100 ms per tick and resynchronizes from the real
//! clock every tenth tick, so readers pay one atomic load instead of a
//! syscall. Worst-case skew is one tick; only use it where that is
//! acceptable.

use chrono::{DateTime, Local, TimeZone};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const TICK: Duration = Duration::from_millis(100);
const TICK_NANOS: u64 = 100_000_000;
const TICKS_PER_RESYNC: u32 = 10;

/// Coarse clock handle. Share it behind an `Arc`; the tick thread stops when
/// the handle is dropped or explicitly stopped.
pub struct FastClock {
    nanos: Arc<AtomicU64>,
    stop: Sender<()>,
    worker: Option<JoinHandle<()>>,
}

impl FastClock {
    /// Starts the tick thread, seeded from the wall clock.
    #[must_use]
    pub fn start() -> Self {
        let nanos = Arc::new(AtomicU64::new(wall_nanos()));
        let (stop, ticker) = mpsc::channel::<()>();

        let counter = Arc::clone(&nanos);
        let worker = std::thread::spawn(move || {
            let mut tick = 0u32;
            loop {
                match ticker.recv_timeout(TICK) {
                    Err(RecvTimeoutError::Timeout) => {
                        tick += 1;
                        if tick % TICKS_PER_RESYNC == 0 {
                            counter.store(wall_nanos(), Ordering::Relaxed);
                        } else {
                            counter.fetch_add(TICK_NANOS, Ordering::Relaxed);
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            nanos,
            stop,
            worker: Some(worker),
        }
    }

    /// Current reading as Unix nanoseconds.
    #[must_use]
    pub fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::Relaxed)
    }

    /// Current reading as a local timestamp.
    #[must_use]
    pub fn now(&self) -> DateTime<Local> {
        let nanos = self.now_nanos();
        #[allow(clippy::cast_possible_wrap)]
        let secs = (nanos / 1_000_000_000) as i64;
        #[allow(clippy::cast_possible_truncation)]
        let subsec = (nanos % 1_000_000_000) as u32;
        match Local.timestamp_opt(secs, subsec) {
            chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => dt,
            chrono::LocalResult::None => Local::now(),
        }
    }

    /// Stops the tick thread and waits for it.
    pub fn stop(mut self) {
        self.stop_inner();
    }

    fn stop_inner(&mut self) {
        let _ = self.stop.send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for FastClock {
    fn drop(&mut self) {
        self.stop_inner();
    }
}

#[allow(clippy::cast_possible_truncation)]
fn wall_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
