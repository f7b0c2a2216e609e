//! Backend log file.
//!
//! Rotates daily as `sanity_backend.<date>.log` and keeps the three newest
//! files. The console layer is set up separately in `main`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

pub const BACKEND_LOG_PREFIX: &str = "sanity_backend";
pub const BACKEND_LOG_FILES: usize = 3;

/// Rolling appender for the backend log, creating `dir` if needed.
pub fn backend_log_appender(dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(BACKEND_LOG_PREFIX)
        .filename_suffix("log")
        .max_log_files(BACKEND_LOG_FILES)
        .build(dir)
        .context("Failed to open backend log file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_appender_writes_into_created_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("logs");

        let mut appender = backend_log_appender(&dir).unwrap();
        appender.write_all(b"server started\n").unwrap();
        appender.flush().unwrap();

        let files: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);

        let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("sanity_backend."));
        assert!(name.ends_with(".log"));
        assert_eq!(std::fs::read_to_string(&files[0]).unwrap(), "server started\n");
    }
}
