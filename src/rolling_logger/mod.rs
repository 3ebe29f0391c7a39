// -- mod.rs --

mod bridge;
mod buffer;
mod caller;
mod clock;
mod daemon;
mod error;
mod header;
mod logger;
mod record;
mod severity;
mod sink;
mod size;
mod terminate;

// --

/// `info!(logger, "fmt", args..)`, reported at the macro call site.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warningf(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::core::format_args!($($arg)+))
    };
}

/// Emits at `Fatal`, then ends the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::core::format_args!($($arg)+))
    };
}

// --

pub use {
    bridge::{install, LogBridge},
    buffer::{BufferPool, LineBuffer},
    caller::{push_frame, Caller, FrameGuard},
    clock::{Clock, FixedClock, SystemClock},
    error::{Error, Result},
    header::format_header,
    logger::{Logger, LoggerBuilder},
    record::{assemble, Payload},
    severity::{should_emit, Severity},
    sink::{RotatingSink, RotationNaming},
    size::parse_size,
    terminate::{ProcessExit, RecordingTerminator, Terminator},
};
