// -- bridge.rs --

use {
    super::{caller::Caller, logger::Logger, severity::Severity},
    log::{LevelFilter, Log, Metadata, Record, SetLoggerError},
    std::sync::Arc,
};

// --

/// Routes records from the `log` facade into a [`Logger`].
pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger.enabled(Severity::from(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let severity = Severity::from(record.level());
        // only 'static file names can be kept in a Caller
        let caller = match (record.file_static(), record.line()) {
            (Some(file), Some(line)) => Caller::new(file, line),
            _ => Caller::unknown(),
        };
        self.logger.log_at(severity, caller, *record.args());
    }

    fn flush(&self) {
        self.logger.flush();
    }
}

/// Installs `logger` as the global `log` logger.
///
/// The `log` max level is left wide open, [`Logger::set_level`] does the
/// filtering.
pub fn install(logger: Arc<Logger>) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

// --
