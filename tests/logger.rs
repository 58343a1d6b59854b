use linelog::{Config, Error, Field, Level, Logger, Writer};
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

fn json_lines(path: &std::path::Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn json_logger_writes_parseable_records() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");

    let logger = Logger::builder()
        .json()
        .file(&path)
        .done()
        .build()
        .unwrap();

    logger.info("started", &[Field::str("addr", "127.0.0.1:9000")]);
    logger.error("boom", &[Field::int("code", -7)]);
    logger.close().unwrap();

    let lines = json_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["level"], "info");
    assert_eq!(lines[0]["msg"], "started");
    assert_eq!(lines[0]["addr"], "127.0.0.1:9000");
    assert_eq!(lines[1]["level"], "error");
    assert_eq!(lines[1]["code"], -7);
}

#[test]
fn records_below_the_minimum_level_are_dropped() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");

    let logger = Logger::builder()
        .level(Level::Warn)
        .json()
        .file(&path)
        .done()
        .build()
        .unwrap();

    logger.debug("no", &[]);
    logger.info("no", &[]);
    logger.warn("yes", &[]);
    logger.close().unwrap();

    let lines = json_lines(&path);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["msg"], "yes");
}

#[test]
fn with_base_fields_precede_call_fields() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");

    let logger = Logger::builder()
        .json()
        .file(&path)
        .done()
        .build()
        .unwrap();
    let child = logger.with(vec![Field::str("component", "net")]);

    child.info("dial", &[Field::str("peer", "10.0.0.2")]);
    child.close().unwrap();

    let line = fs::read_to_string(&path).unwrap();
    let component_at = line.find("component").unwrap();
    let peer_at = line.find("peer").unwrap();
    assert!(component_at < peer_at);
}

#[test]
fn with_pid_stamps_the_process_id() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");

    let logger = Logger::builder()
        .json()
        .with_pid(true)
        .file(&path)
        .done()
        .build()
        .unwrap();
    logger.info("hello", &[]);
    logger.close().unwrap();

    let lines = json_lines(&path);
    assert_eq!(lines[0]["pid"], u64::from(std::process::id()));
}

#[test]
fn text_logger_emits_tab_separated_lines() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");

    let logger = Logger::builder()
        .text()
        .time_format("")
        .file(&path)
        .done()
        .build()
        .unwrap();
    logger.info("hello world", &[Field::uint("n", 5)]);
    logger.close().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let fields: Vec<&str> = content.trim_end().split('\t').collect();
    assert!(fields[0].starts_with("ts="));
    assert_eq!(fields[1], "level=info");
    assert_eq!(fields[2], "msg=hello world");
    assert_eq!(fields[3], "n=5");
}

#[test]
fn write_errors_reach_the_error_handler() {
    struct FailingSink;
    impl linelog::Writer for FailingSink {
        fn write(&self, _: &[u8]) -> Result<usize, Error> {
            Err(Error::Io(std::io::Error::other("sink down")))
        }
        fn sync(&self) -> Result<(), Error> {
            Ok(())
        }
        fn close(&self) -> Result<(), Error> {
            Ok(())
        }
    }

    // The facade has no direct custom-sink hook; drive the stack by hand the
    // way the facade does and count handler invocations.
    let failures = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&failures);
    let handler: linelog::ErrorHandler = Arc::new(move |label, _err| {
        assert_eq!(label, "auto-sync");
        counted.fetch_add(1, Ordering::SeqCst);
    });

    let buffered = Arc::new(linelog::BufferedWriter::new(Arc::new(FailingSink)));
    buffered.write(b"doomed").unwrap();
    let handle = linelog::auto_sync(
        buffered as Arc<dyn linelog::Writer>,
        Duration::from_millis(10),
        handler,
    );
    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while failures.load(Ordering::SeqCst) == 0 && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    handle.stop();
    assert!(failures.load(Ordering::SeqCst) > 0);
}

#[test]
fn from_config_defaults_build_a_stdout_logger() {
    let config = Config::default();
    let logger = Logger::from_config(&config).unwrap();
    assert_eq!(logger.min_level(), Level::Info);
    logger.info("configured", &[]);
}

#[test]
fn from_config_wires_the_file_target() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cfg.log");

    let mut config = Config::default();
    config.level = "debug".to_string();
    config.handler = "json".to_string();
    config.writer.target = "file".to_string();
    config.writer.mode = "batch".to_string();
    config.writer.batch_size = 2;
    config.file.path = path.to_str().unwrap().to_string();

    let logger = Logger::from_config(&config).unwrap();
    logger.debug("one", &[]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    logger.debug("two", &[]);
    logger.debug("three", &[]);
    // Third write crossed the batch limit and flushed the first two.
    assert_eq!(json_lines(&path).len(), 2);

    logger.close().unwrap();
    assert_eq!(json_lines(&path).len(), 3);
}

#[test]
fn auto_synced_logger_flushes_without_manual_sync() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("auto.log");

    let logger = Logger::builder()
        .json()
        .file(&path)
        .done()
        .buffered(2048)
        .auto_sync(Duration::from_millis(20))
        .build()
        .unwrap();

    logger.info("eventually", &[]);
    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while fs::read_to_string(&path).unwrap().is_empty()
        && std::time::Instant::now() < deadline
    {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(!fs::read_to_string(&path).unwrap().is_empty());
    logger.close().unwrap();
}

#[test]
fn fast_clock_timestamps_are_close_to_wall_time() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("clock.log");

    let logger = Logger::builder()
        .json()
        .time_format("")
        .fast_clock(true)
        .file(&path)
        .done()
        .build()
        .unwrap();
    logger.info("tick", &[]);
    logger.close().unwrap();

    let lines = json_lines(&path);
    let ts = lines[0]["ts"].as_i64().unwrap();
    let wall = chrono::Local::now().timestamp();
    assert!((wall - ts).abs() <= 2, "fast clock drifted: {ts} vs {wall}");
}
