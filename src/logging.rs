use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::error;

use crate::herodraft::store::data_dir;

/// Used when `RUST_LOG` is not set.
const DEFAULT_LOG_SPEC: &str =
    "warn,herodraft=debug,herodraft_lib=debug,herodraft_model=debug,rolepool=debug";

const MAX_LOG_FILE_BYTES: u64 = 10 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 7;

pub fn init() -> LoggerHandle {
    let logger = Logger::try_with_env_or_str(DEFAULT_LOG_SPEC)
        .expect("log config text")
        .log_to_file(
            FileSpec::default()
                .directory(data_dir().join("logs"))
                .basename("herodraft"),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_BYTES),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .duplicate_to_stderr(Duplicate::Info)
        .start()
        .expect("log init");

    // A panicking request only takes its own task down, the server keeps running. Get the
    // message to disk before anything else happens.
    let orig_hook = std::panic::take_hook();
    let logger_for_panic = logger.clone();
    std::panic::set_hook(Box::new(move |panic_info| {
        let thread = std::thread::current();
        error!(
            "Panic in thread {}: {panic_info}",
            thread.name().unwrap_or("<unnamed>")
        );
        logger_for_panic.flush();
        orig_hook(panic_info);
    }));
    logger
}
