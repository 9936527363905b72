//! Durable append-only run log.
//!
//! Each entry is one line, `[<timestamp>] [<LEVEL>] <message>`, appended and
//! flushed immediately so a crash mid-run still leaves a usable trail. Write
//! failures are swallowed: the journal must never stop maintenance work.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Severity tag written into each journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Normal progress.
    Info,
    /// Something was skipped or degraded.
    Warn,
    /// An action failed.
    Error,
}

impl Level {
    /// Uppercase tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only log file. A journal without a path discards entries.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    path: Option<PathBuf>,
}

impl Journal {
    /// Journal writing to `path`. The parent directory is created lazily.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Journal that records nothing.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Target file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one entry.
    pub fn record(&self, level: Level, message: impl AsRef<str>) {
        let Some(path) = &self.path else {
            return;
        };
        let line = format_line(&timestamp(), level, message.as_ref());
        if let Err(e) = append(path, &line) {
            tracing::debug!(path = %path.display(), error = %e, "journal write failed");
        }
    }

    /// Append an `INFO` entry.
    pub fn info(&self, message: impl AsRef<str>) {
        self.record(Level::Info, message);
    }

    /// Append a `WARN` entry.
    pub fn warn(&self, message: impl AsRef<str>) {
        self.record(Level::Warn, message);
    }

    /// Append an `ERROR` entry.
    pub fn error(&self, message: impl AsRef<str>) {
        self.record(Level::Error, message);
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_line(timestamp: &str, level: Level, message: &str) -> String {
    // One entry per line, whatever the message contains.
    let message = message.replace(['\n', '\r'], " ");
    format!("[{timestamp}] [{level}] {message}\n")
}

fn append(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    file.sync_data()
}
