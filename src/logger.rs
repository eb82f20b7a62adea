use std::io::Write;
use std::time::Instant;

use log::{Log, Metadata, Record};
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

struct CmdtreeLogger {
    file: Option<Mutex<std::fs::File>>,
    filter: log::LevelFilter,
    start: Instant,
}

impl CmdtreeLogger {
    fn format(&self, record: &Record) -> String {
        let elapsed = self.start.elapsed().as_secs_f64();
        format!(
            "[{elapsed:.3}s] [{}] {} - {}",
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for CmdtreeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format(record);
        let _ = writeln!(std::io::stderr().lock(), "{line}");

        if let Some(ref file) = self.file {
            let _ = writeln!(file.lock(), "{line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Level filter from `RUST_LOG`, `warn` when unset or unparsable
fn filter_from_env() -> log::LevelFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(log::LevelFilter::Warn)
}

/// Initialize the global logger, writing to stderr and optionally to `log_file`.
///
/// # Errors
///
/// Returns `LoggerError::AlreadyInitialized` if a logger was already installed.
pub fn init(log_file: Option<std::fs::File>) -> Result<(), LoggerError> {
    let filter = filter_from_env();
    let logger = CmdtreeLogger {
        file: log_file.map(Mutex::new),
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger(file: Option<std::fs::File>, filter: log::LevelFilter) -> CmdtreeLogger {
        CmdtreeLogger {
            file: file.map(Mutex::new),
            filter,
            start: Instant::now(),
        }
    }

    #[test]
    fn test_level_filter() {
        let logger = logger(None, log::LevelFilter::Warn);
        let warn = Metadata::builder().level(log::Level::Warn).build();
        let debug = Metadata::builder().level(log::Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn test_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmdtree.log");
        let logger = logger(
            Some(std::fs::File::create(&path).unwrap()),
            log::LevelFilter::Debug,
        );

        logger.log(
            &Record::builder()
                .level(log::Level::Warn)
                .target("cmdtree::commands::tree")
                .args(format_args!("Duplicate command name 'add'"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(log::Level::Trace)
                .target("cmdtree")
                .args(format_args!("filtered out"))
                .build(),
        );
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("[WARN] cmdtree::commands::tree - Duplicate command name 'add'"));
    }
}
