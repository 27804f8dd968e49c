//! src/logger.rs
//!
//! `log` backend for the terminal app. The TUI owns stdout, so records are
//! kept in a bounded in-memory buffer that the Log panel renders.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Newest log lines, oldest first.
pub type LogLines = Arc<Mutex<VecDeque<String>>>;

const MAX_LINES: usize = 200;

struct PanelLogger {
    lines: LogLines,
    level: LevelFilter,
}

impl Log for PanelLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "{} {:<5} {}",
            chrono::Local::now().format("%H:%M:%S"),
            record.level(),
            record.args()
        );
        let mut lines = self.lines.lock().unwrap_or_else(|p| p.into_inner());
        if lines.len() == MAX_LINES {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    fn flush(&self) {}
}

/// Install the panel logger as the global logger.
pub fn init(level: LevelFilter) -> Result<LogLines, SetLoggerError> {
    let lines: LogLines = Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LINES)));
    log::set_boxed_logger(Box::new(PanelLogger {
        lines: lines.clone(),
        level,
    }))?;
    log::set_max_level(level);
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn buffer_is_bounded_and_filtered() {
        let logger = PanelLogger {
            lines: Arc::new(Mutex::new(VecDeque::new())),
            level: LevelFilter::Info,
        };
        for i in 0..MAX_LINES + 5 {
            logger.log(
                &Record::builder()
                    .level(Level::Info)
                    .args(format_args!("line {i}"))
                    .build(),
            );
        }
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );

        let lines = logger.lines.lock().unwrap();
        assert_eq!(lines.len(), MAX_LINES);
        assert!(lines.front().unwrap().ends_with("line 5"));
        assert!(lines.back().unwrap().ends_with(&format!("line {}", MAX_LINES + 4)));
    }
}
