// -- logger.rs --

use {
    super::{
        buffer::{BufferPool, LineBuffer},
        caller::{self, Caller},
        clock::{Clock, SystemClock},
        daemon::FlushDaemon,
        error::{Error, Result},
        record::{assemble, Payload},
        severity::{should_emit, Severity},
        sink::{RotatingSink, RotationNaming},
        size::parse_size,
        terminate::{ProcessExit, Terminator},
    },
    std::{
        fmt,
        io::{self, Write},
        path::{Path, PathBuf},
        sync::{
            atomic::{AtomicU8, Ordering},
            Arc, Mutex, MutexGuard, PoisonError,
        },
        time::Duration,
    },
};

// --

const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(30);

/// Exit code requested after a `fatal*` record.
const FATAL_EXIT_CODE: i32 = 2;

enum MaxSize {
    Spec(String),
    Bytes(u64),
}

pub struct LoggerBuilder {
    path: PathBuf,
    max_size: MaxSize,
    level: Severity,
    flush_interval: Duration,
    naming: RotationNaming,
    pool: Option<BufferPool>,
    clock: Arc<dyn Clock>,
    terminator: Arc<dyn Terminator>,
}

impl LoggerBuilder {
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    /// Zero disables periodic flushing.
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    /// Size limit in bytes, used instead of the size string.
    pub fn max_bytes(mut self, bytes: u64) -> Self {
        self.max_size = MaxSize::Bytes(bytes);
        self
    }

    pub fn naming(mut self, naming: RotationNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn pool(mut self, pool: BufferPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn build(self) -> Result<Logger> {
        let max_size = match self.max_size {
            MaxSize::Spec(s) => parse_size(&s)?,
            MaxSize::Bytes(0) => return Err(Error::InvalidSize("0".to_string())),
            MaxSize::Bytes(n) => n,
        };

        let sink = Arc::new(Mutex::new(RotatingSink::new(
            self.path.clone(),
            max_size,
            self.naming,
        )));
        let daemon = if self.flush_interval.is_zero() {
            None
        } else {
            Some(FlushDaemon::spawn(Arc::clone(&sink), self.flush_interval)?)
        };

        Ok(Logger {
            path: self.path,
            max_size,
            level: AtomicU8::new(self.level as u8),
            sink,
            pool: self.pool.unwrap_or_default(),
            clock: self.clock,
            terminator: self.terminator,
            daemon: Mutex::new(daemon),
        })
    }
}

// --

/// A glog-style logger writing every severity to one rotating file.
///
/// Records are formatted without holding the lock; only creating the file
/// and handing the bytes to the sink happen inside it.
pub struct Logger {
    path: PathBuf,
    max_size: u64,
    // relaxed: a concurrent set_level may race with in-flight records
    level: AtomicU8,
    sink: Arc<Mutex<RotatingSink>>,
    pool: BufferPool,
    clock: Arc<dyn Clock>,
    terminator: Arc<dyn Terminator>,
    daemon: Mutex<Option<FlushDaemon>>,
}

macro_rules! severity_methods {
    ($sev:expr, $print:ident, $printf:ident, $print_depth:ident, $printf_depth:ident) => {
        #[track_caller]
        pub fn $print(&self, msg: impl fmt::Display) {
            self.log_depth($sev, 0, Payload::Print(&msg));
        }

        #[track_caller]
        pub fn $printf(&self, args: fmt::Arguments<'_>) {
            self.log_depth($sev, 0, Payload::Printf(args));
        }

        #[track_caller]
        pub fn $print_depth(&self, depth: usize, msg: impl fmt::Display) {
            self.log_depth($sev, depth, Payload::Print(&msg));
        }

        #[track_caller]
        pub fn $printf_depth(&self, depth: usize, args: fmt::Arguments<'_>) {
            self.log_depth($sev, depth, Payload::Printf(args));
        }
    };
}

impl Logger {
    /// Builds a logger, exiting the process with code 1 when `max_size`
    /// is not a valid size string.
    pub fn new(
        path: impl Into<PathBuf>,
        max_size: &str,
        level: Severity,
        flush_interval_secs: u64,
    ) -> Logger {
        let built = Logger::builder(path, max_size)
            .level(level)
            .flush_interval(Duration::from_secs(flush_interval_secs))
            .build();
        match built {
            Ok(logger) => logger,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(err.exit_code())
            }
        }
    }

    pub fn builder(path: impl Into<PathBuf>, max_size: &str) -> LoggerBuilder {
        LoggerBuilder {
            path: path.into(),
            max_size: MaxSize::Spec(max_size.to_string()),
            level: Severity::Info,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            naming: RotationNaming::default(),
            pool: None,
            clock: Arc::new(SystemClock),
            terminator: Arc::new(ProcessExit),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn level(&self) -> Severity {
        Severity::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: Severity) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        should_emit(severity, self.level())
    }

    pub fn bytes_written(&self) -> u64 {
        self.lock_sink().bytes_written()
    }

    pub fn flush_daemon_running(&self) -> bool {
        self.daemon
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(false, FlushDaemon::is_running)
    }

    /// Flushes buffered records and syncs the file; errors are ignored.
    pub fn flush(&self) {
        let _ = self.lock_sink().flush_and_sync();
    }

    /// Stops the flush daemon, then flushes.
    pub fn shutdown(&self) {
        let daemon = self
            .daemon
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut daemon) = daemon {
            daemon.stop();
        }
        self.flush();
    }

    severity_methods!(Severity::Debug, debug, debugf, debug_depth, debugf_depth);
    severity_methods!(Severity::Info, info, infof, info_depth, infof_depth);
    severity_methods!(Severity::Warning, warning, warningf, warning_depth, warningf_depth);
    severity_methods!(Severity::Error, error, errorf, error_depth, errorf_depth);
    severity_methods!(Severity::Fatal, fatal, fatalf, fatal_depth, fatalf_depth);

    /// Emits a record for an explicit caller. `Fatal` still terminates.
    pub fn log_at(&self, severity: Severity, caller: Caller, args: fmt::Arguments<'_>) {
        if !self.enabled(severity) {
            return;
        }
        self.emit(severity, caller, Payload::Printf(args));
    }

    #[track_caller]
    fn log_depth(&self, severity: Severity, depth: usize, payload: Payload<'_>) {
        if !self.enabled(severity) {
            return;
        }
        let caller = caller::resolve(Caller::here(), depth);
        self.emit(severity, caller, payload);
    }

    fn emit(&self, severity: Severity, caller: Caller, payload: Payload<'_>) {
        let buf = assemble(&self.pool, severity, self.clock.now(), caller, payload);
        self.output(buf);
        if severity == Severity::Fatal {
            let mut sink = self.lock_sink();
            let _ = sink.flush_and_sync();
            self.terminator.terminate(FATAL_EXIT_CODE);
        }
    }

    fn output(&self, buf: LineBuffer) {
        let mut sink = self.lock_sink();
        if let Err(err) = sink.write(buf.as_bytes(), self.clock.now()) {
            self.exit(&mut sink, &err, buf.as_bytes());
        }
        drop(sink);
        self.pool.release(buf);
    }

    /// Reports an unrecoverable sink error and requests termination.
    /// Called with the sink lock held.
    fn exit(&self, sink: &mut RotatingSink, err: &Error, record: &[u8]) {
        {
            let mut stderr = io::stderr().lock();
            // the record must show up somewhere
            let _ = stderr.write_all(record);
            let _ = writeln!(stderr, "log: exiting because of error: {}", err);
        }
        let _ = sink.flush_and_sync();
        self.terminator.terminate(err.exit_code());
    }

    fn lock_sink(&self) -> MutexGuard<'_, RotatingSink> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("max_size", &self.max_size)
            .field("level", &self.level())
            .finish()
    }
}

// --
