use {
    rolling_glog::{Logger, RecordingTerminator, Severity},
    std::{fs, sync::Arc, thread, time::Duration},
    tempfile::TempDir,
};

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

#[test]
fn records_never_interleave() {
    let dir = TempDir::new().unwrap();
    let terminator = Arc::new(RecordingTerminator::new());
    let logger = Arc::new(
        Logger::builder(dir.path().join("app.log"), "64M")
            .level(Severity::Debug)
            .flush_interval(Duration::from_millis(5))
            .terminator(terminator.clone())
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let pad = "x".repeat(i % 97);
                    rolling_glog::info!(logger, "thread={} seq={} pad={} end", t, i, pad);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    logger.shutdown();

    let out = fs::read_to_string(logger.path()).unwrap();
    let mut seen = vec![0usize; THREADS];
    for line in out.lines() {
        assert!(line.starts_with('I'), "{:?}", line);
        let body = &line[line.find("] ").unwrap() + 2..];
        let mut fields = body.split(' ');
        let t: usize = fields.next().unwrap()["thread=".len()..].parse().unwrap();
        let i: usize = fields.next().unwrap()["seq=".len()..].parse().unwrap();
        let pad = &fields.next().unwrap()["pad=".len()..];
        assert_eq!(pad.len(), i % 97, "{:?}", line);
        assert_eq!(fields.next(), Some("end"));
        assert_eq!(fields.next(), None);
        // each thread's own records keep their order
        assert_eq!(seen[t], i);
        seen[t] += 1;
    }
    assert_eq!(seen, vec![PER_THREAD; THREADS]);
    assert!(terminator.codes().is_empty());
}
