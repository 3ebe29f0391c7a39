use {
    rolling_glog::{Logger, Severity},
    std::sync::Arc,
};

// --

fn main() {
    let logger = Arc::new(Logger::new("ex1.log", "32K", Severity::Debug, 1));
    rolling_glog::install(Arc::clone(&logger)).expect("install log bridge");

    logger.debugf(format_args!("this is a debug {}", "message"));
    rolling_glog::error!(logger, "this is printed by default");

    for i in 0..2000 {
        rolling_glog::info!(logger, "this is {}", i);
    }

    std::thread::sleep(std::time::Duration::from_millis(1500));
    for i in 0..300 {
        log::info!("this2 is {}", i);
    }

    example::test(&logger);
    logger.shutdown();
}

// --

mod example {
    use rolling_glog::Logger;

    pub fn test(logger: &Logger) {
        logger.info("from example::test()");
    }
}
