// -- error.rs --

use std::{io, path::PathBuf};

// --

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the logfile size {0} is incorrect")]
    InvalidSize(String),

    #[error("create log file {path}: {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("rotate log file {from} to {to}: {source}")]
    Rotate {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("write log file: {0}")]
    Write(#[source] io::Error),

    #[error("spawn flush daemon: {0}")]
    Daemon(#[source] io::Error),
}

impl Error {
    /// Process exit code requested when this error is fatal.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidSize(_) => 1,
            _ => 2,
        }
    }
}
