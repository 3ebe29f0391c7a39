//! glog-style logging into a single file that rotates once it outgrows a
//! configured size.
//!
//! ```no_run
//! use rolling_glog::{Logger, Severity};
//!
//! let logger = Logger::new("/tmp/app.log", "64M", Severity::Info, 30);
//! rolling_glog::info!(logger, "listening on {}", 8080);
//! logger.warning("disk almost full");
//! logger.flush();
//! ```

mod rolling_logger;

pub use rolling_logger::*;
