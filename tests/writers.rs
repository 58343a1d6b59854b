use linelog::{
    BatchedWriter, BufferedWriter, Error, MemorySink, WrapWriter, Writer, auto_sync,
    noop_error_handler,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[test]
fn buffered_holds_until_budget_would_overflow() {
    let sink = Arc::new(MemorySink::new());
    let w = BufferedWriter::with_size(Arc::clone(&sink) as Arc<dyn Writer>, 1024).unwrap();

    w.write(&[b'a'; 512]).unwrap();
    w.write(&[b'b'; 256]).unwrap();
    assert!(sink.contents().is_empty());

    // 512 + 256 + 512 crosses the budget; the first two flush out.
    w.write(&[b'c'; 512]).unwrap();
    assert_eq!(sink.contents().len(), 768);

    w.sync().unwrap();
    assert_eq!(sink.contents().len(), 1280);
}

#[test]
fn buffered_exact_fill_then_overflow() {
    // Records that exactly fill the budget stay buffered; the overflowing
    // record evicts them.
    let sink = Arc::new(MemorySink::new());
    let w = BufferedWriter::with_size(Arc::clone(&sink) as Arc<dyn Writer>, 2048).unwrap();

    w.write(&[b'1'; 1024]).unwrap();
    w.write(&[b'2'; 1024]).unwrap();
    assert!(sink.contents().is_empty());

    w.write(&[b'9'; 8]).unwrap();
    assert_eq!(sink.contents().len(), 2048);

    w.close().unwrap();
    assert_eq!(sink.contents().len(), 2056);
}

#[test]
fn buffered_oversize_record_bypasses_the_buffer() {
    let sink = Arc::new(MemorySink::new());
    let w = BufferedWriter::with_size(Arc::clone(&sink) as Arc<dyn Writer>, 1024).unwrap();

    w.write(&[b'a'; 10]).unwrap();
    let big = vec![b'z'; 4096];
    w.write(&big).unwrap();

    // The small record flushed first, so order is preserved.
    let contents = sink.contents();
    assert_eq!(contents.len(), 10 + 4096);
    assert_eq!(&contents[..10], &[b'a'; 10]);
}

#[test]
fn buffered_rejects_sub_minimum_size() {
    let sink: Arc<dyn Writer> = Arc::new(MemorySink::new());
    match BufferedWriter::with_size(sink, 100) {
        Err(Error::Config(_)) => {}
        other => panic!("expected config error, got {other:?}", other = other.err()),
    }
}

#[test]
fn buffered_total_bytes_survive_sync() {
    let sink = Arc::new(MemorySink::new());
    let w = BufferedWriter::new(Arc::clone(&sink) as Arc<dyn Writer>);
    let mut total = 0;
    for i in 0..100usize {
        let record = vec![b'r'; 37 + (i % 61)];
        total += record.len();
        w.write(&record).unwrap();
    }
    w.sync().unwrap();
    assert_eq!(sink.contents().len(), total);
}

#[test]
fn batched_flushes_on_the_write_after_the_limit() {
    let sink = Arc::new(MemorySink::new());
    let w = BatchedWriter::new(Arc::clone(&sink) as Arc<dyn Writer>, 3);

    for _ in 0..3 {
        w.write(b"x").unwrap();
    }
    assert!(sink.contents().is_empty());

    w.write(b"y").unwrap();
    assert_eq!(sink.contents(), b"xxx".to_vec());

    w.sync().unwrap();
    assert_eq!(sink.contents(), b"xxxy".to_vec());
}

#[test]
fn batched_sync_resets_the_counter() {
    let sink = Arc::new(MemorySink::new());
    let w = BatchedWriter::new(Arc::clone(&sink) as Arc<dyn Writer>, 2);

    w.write(b"a").unwrap();
    w.sync().unwrap();
    // Counter restarted; two more writes stay pending.
    w.write(b"b").unwrap();
    w.write(b"c").unwrap();
    assert_eq!(sink.contents(), b"a".to_vec());
}

#[test]
#[should_panic(expected = "batch count")]
fn batched_zero_count_panics() {
    let sink: Arc<dyn Writer> = Arc::new(MemorySink::new());
    let _ = BatchedWriter::new(sink, 0);
}

#[test]
fn wrap_suppresses_close_toward_standard_streams() {
    struct FakeStd {
        closed: AtomicUsize,
        synced: AtomicUsize,
    }
    impl Writer for FakeStd {
        fn write(&self, buf: &[u8]) -> Result<usize, Error> {
            Ok(buf.len())
        }
        fn sync(&self) -> Result<(), Error> {
            self.synced.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn close(&self) -> Result<(), Error> {
            self.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn is_standard_stream(&self) -> bool {
            true
        }
    }

    let sink = Arc::new(FakeStd {
        closed: AtomicUsize::new(0),
        synced: AtomicUsize::new(0),
    });
    let wrap = WrapWriter::new(Arc::clone(&sink) as Arc<dyn Writer>);
    wrap.sync().unwrap();
    wrap.close().unwrap();
    assert_eq!(sink.synced.load(Ordering::SeqCst), 0);
    assert_eq!(sink.closed.load(Ordering::SeqCst), 0);
}

#[test]
fn auto_sync_flushes_in_the_background() {
    let sink = Arc::new(MemorySink::new());
    let buffered = Arc::new(BufferedWriter::new(Arc::clone(&sink) as Arc<dyn Writer>));
    buffered.write(b"pending").unwrap();
    assert!(sink.contents().is_empty());

    let handle = auto_sync(
        Arc::clone(&buffered) as Arc<dyn Writer>,
        Duration::from_millis(20),
        noop_error_handler(),
    );

    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while sink.contents().is_empty() && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    handle.stop();
    assert_eq!(sink.contents(), b"pending".to_vec());
}

#[test]
fn concurrent_writers_interleave_at_record_granularity() {
    let sink = Arc::new(MemorySink::new());
    let w = Arc::new(BufferedWriter::new(Arc::clone(&sink) as Arc<dyn Writer>));

    let mut handles = Vec::new();
    for t in 0..4u8 {
        let w = Arc::clone(&w);
        handles.push(std::thread::spawn(move || {
            let record = vec![b'0' + t; 64];
            for _ in 0..50 {
                w.write(&record).unwrap();
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
    w.sync().unwrap();

    let contents = sink.contents();
    assert_eq!(contents.len(), 4 * 50 * 64);
    // Every 64-byte chunk is one record from one thread, never split.
    for chunk in contents.chunks(64) {
        assert!(chunk.iter().all(|&b| b == chunk[0]));
    }
}
