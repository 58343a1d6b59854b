#![forbid(unsafe_code)]

//! `linelog` - Structured logging for server-side processes.
//!
//! One record per log event, emitted to stdout, stderr, or a rotating file,
//! through a direct, buffered, or batched writer stack:
//!
//! - Two append-only record encoders (JSON and TEXT) with typed field
//!   appenders
//! - A rotating file sink with size/interval rotation, timestamped backups,
//!   age and count retention, and optional gzip compression
//! - Concurrency-safe buffered and batched writers with manual or periodic
//!   background flushing
//! - Byte-size ("16K", "512Kb") and duration ("30s", "7d") literal parsers
//!
//! # Example
//!
//! ```no_run
//! use linelog::{Field, Level, Logger};
//!
//! let logger = Logger::builder()
//!     .level(Level::Debug)
//!     .json()
//!     .file("logs/app.log")
//!         .max_size(16 * 1024 * 1024)
//!         .max_backups(7)
//!         .done()
//!     .buffered(16 * 1024)
//!     .build()
//!     .unwrap();
//!
//! logger.info("listener started", &[Field::str("addr", "0.0.0.0:8080")]);
//! logger.warn("slow request", &[Field::uint("ms", 1532)]);
//! logger.close().unwrap();
//! ```

pub mod clock;
pub mod config;
pub mod encode;
pub mod error;
pub mod field;
pub mod level;
pub mod logger;
pub mod parse;
pub mod rotate;
pub mod writer;

pub use clock::FastClock;
pub use config::Config;
pub use encode::{Encoder, JsonEncoder, TextEncoder};
pub use error::{Error, ErrorHandler, noop_error_handler};
pub use field::{Field, Value};
pub use level::Level;
pub use logger::{FileBuilder, Logger, LoggerBuilder};
pub use parse::{format_size, parse_duration, parse_size};
pub use rotate::{RotateBuilder, RotateWriter};
pub use writer::{
    AutoSyncHandle, BatchedWriter, BufferedWriter, MemorySink, StderrSink, StdoutSink, WrapWriter,
    Writer, auto_sync,
};
