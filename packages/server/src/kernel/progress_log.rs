//! Append-only development progress log.
//!
//! One `[YYYY-MM-DD HH:MM:SS] message` line per entry, local time. Used by the
//! `/log` endpoint and for notable lifecycle events (startup, model download).

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct ProgressLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a timestamped line, creating the file and its parent directory
    /// as needed. Blocking; async callers go through `spawn_blocking`.
    pub fn record(&self, message: &str) -> io::Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "[{}] {}", timestamp, message)
    }

    /// Like [`record`](Self::record), but failures are only logged.
    pub fn record_or_warn(&self, message: &str) {
        if let Err(e) = self.record(message) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write progress log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = ProgressLog::new(dir.path().join("nested").join("progress.txt"));

        log.record("Starting server.").unwrap();
        log.record("Model ready.").unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Starting server."));
        // [YYYY-MM-DD HH:MM:SS] is 21 characters
        assert_eq!(lines[1].find(']'), Some(20));
        assert!(lines[1].ends_with("Model ready."));
    }
}
