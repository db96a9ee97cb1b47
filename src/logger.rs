use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, OnceLock};
use chrono::Local;

use crate::error::GameError;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Appends timestamped lines to a file. The terminal belongs to the game,
/// so nothing is ever written to stdout.
pub struct Logger {
    sink: Mutex<File>,
}

impl Logger {
    fn new(sink: File) -> Self {
        Self { sink: Mutex::new(sink) }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let entry = format_line(&Local::now().format("%Y-%m-%d %H:%M:%S").to_string(), file, line, message);
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", entry);
        }
    }
}

/// Opens `path` for appending. With no path, logging stays disabled.
pub fn init_logger(path: Option<&str>) -> Result<(), GameError> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = LOGGER.set(Logger::new(file));
    Ok(())
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

fn format_line(timestamp: &str, file: &str, line: u32, message: &str) -> String {
    let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    format!("[{}][{}:{}] {}", timestamp, file_name, line, message)
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_directories() {
        let line = format_line("2024-01-01 10:00:00", "src/game.rs", 42, "ate food");
        assert_eq!(line, "[2024-01-01 10:00:00][game.rs:42] ate food");

        let line = format_line("t", "C:\\worm\\src\\main.rs", 7, "start");
        assert_eq!(line, "[t][main.rs:7] start");
    }

    #[test]
    fn test_log_without_init_is_silent() {
        log("src/game.rs", 1, "dropped");
    }
}
