// -- daemon.rs --

use {
    super::{
        error::{Error, Result},
        sink::RotatingSink,
    },
    crossbeam_channel::{bounded, select, tick, Sender},
    std::{
        sync::{Arc, Mutex, PoisonError},
        thread::{self, JoinHandle},
        time::Duration,
    },
};

// --

/// Background thread flushing and syncing the sink every `interval`.
pub struct FlushDaemon {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl FlushDaemon {
    pub fn spawn(sink: Arc<Mutex<RotatingSink>>, interval: Duration) -> Result<Self> {
        let (stop, stopped) = bounded::<()>(0);
        let ticker = tick(interval);
        let handle = thread::Builder::new()
            .name("log-flush".to_string())
            .spawn(move || loop {
                select! {
                    recv(ticker) -> _ => {
                        let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
                        let _ = sink.flush_and_sync();
                    }
                    // the sender is only ever dropped
                    recv(stopped) -> _ => break,
                }
            })
            .map_err(Error::Daemon)?;

        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Signals the thread and waits for it to exit.
    pub fn stop(&mut self) {
        drop(self.stop.take());
        // 等待flush线程退出
        self.handle.take().map(JoinHandle::join);
    }
}

impl Drop for FlushDaemon {
    fn drop(&mut self) {
        self.stop();
    }
}

// --
