// -- terminate.rs --

use std::sync::Mutex;

// --

/// What the logger calls when it has to end the process.
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Exits the process with the requested code.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code)
    }
}

/// Remembers every termination request instead of acting on it.
#[derive(Debug, Default)]
pub struct RecordingTerminator {
    codes: Mutex<Vec<i32>>,
}

impl RecordingTerminator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self, code: i32) {
        if let Ok(mut codes) = self.codes.lock() {
            codes.push(code);
        }
    }
}
