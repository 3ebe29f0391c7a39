// -- severity.rs --

use std::fmt;

// --

/// Ordered importance of a record: `Debug < Info < Warning < Error < Fatal`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
}

const SEVERITY_CHAR: &[u8; 5] = b"DIWEF";

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Values above `Fatal` are clamped down to `Fatal`.
    pub fn from_u8(v: u8) -> Severity {
        match v {
            0 => Severity::Debug,
            1 => Severity::Info,
            2 => Severity::Warning,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }

    pub fn as_char(self) -> u8 {
        SEVERITY_CHAR[self as usize]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        };
        f.write_str(s)
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warning,
            log::Level::Error => Severity::Error,
        }
    }
}

/// A record at `severity` is emitted iff it is at least `minimum`.
#[inline]
pub fn should_emit(severity: Severity, minimum: Severity) -> bool {
    severity >= minimum
}

// --

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_matrix() {
        for (i, s) in Severity::ALL.iter().enumerate() {
            for (j, m) in Severity::ALL.iter().enumerate() {
                assert_eq!(should_emit(*s, *m), i >= j, "{} vs minimum {}", s, m);
            }
        }
    }

    #[test]
    fn out_of_range_clamps_to_fatal() {
        assert_eq!(Severity::from_u8(4), Severity::Fatal);
        assert_eq!(Severity::from_u8(200), Severity::Fatal);
        assert_eq!(Severity::from_u8(200).as_char(), b'F');
    }

    #[test]
    fn chars() {
        let chars: Vec<u8> = Severity::ALL.iter().map(|s| s.as_char()).collect();
        assert_eq!(chars, b"DIWEF".to_vec());
    }

    #[test]
    fn from_log_level() {
        assert_eq!(Severity::from(log::Level::Trace), Severity::Debug);
        assert_eq!(Severity::from(log::Level::Warn), Severity::Warning);
        assert_eq!(Severity::from(log::Level::Error), Severity::Error);
    }
}
