//! Logging setup.
//!
//! All modules log through `tracing` macros. This module wires those events
//! to a [`TeeSink`]: the console (stderr) always, plus an append-mode log
//! file when one is configured.
//!
//! - [`init`] installs the process-wide subscriber (used by the binary)
//! - [`scoped`] installs it for the current thread until the guard drops

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::AppError;

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Used when `RUST_LOG` is not set.
    pub level: LevelFilter,
    /// Mirror the console output into this file (appended).
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            file: None,
        }
    }
}

/// Dual-sink writer factory: console plus an optional shared file.
#[derive(Debug, Clone, Default)]
pub struct TeeSink {
    file: Option<Arc<Mutex<File>>>,
}

impl TeeSink {
    pub fn console_only() -> Self {
        Self::default()
    }

    /// Open `path` for appending (created if missing) and tee into it.
    pub fn with_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Arc::new(Mutex::new(file))),
        })
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }
}

impl<'a> MakeWriter<'a> for TeeSink {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TeeWriter {
            file: self.file.clone(),
        }
    }
}

/// One write handle: every buffer goes to stderr and, if open, the file.
#[derive(Debug)]
pub struct TeeWriter {
    file: Option<Arc<Mutex<File>>>,
}

impl TeeWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<Option<T>> {
        let Some(file) = &self.file else {
            return Ok(None);
        };
        let mut file = file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file).map(Some)
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.with_file(|file| file.write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.with_file(|file| file.flush())?;
        Ok(())
    }
}

fn build_subscriber(config: &LogConfig) -> Result<impl Subscriber + Send + Sync + 'static, AppError> {
    let sink = match &config.file {
        Some(path) => TeeSink::with_file(path)
            .map_err(|e| AppError::new(2, format!("Can't open log file '{}': {e}", path.display())))?,
        None => TeeSink::console_only(),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();

    // Escape codes would end up in the file.
    let ansi = !sink.has_file();

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(sink)
        .finish())
}

/// Install the process-wide subscriber. Call once, early in `main`.
pub fn init(config: &LogConfig) -> Result<(), AppError> {
    let subscriber = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::new(2, format!("Logging already initialized: {e}")))
}

/// Install the subscriber for the current thread; dropping the guard tears it down.
pub fn scoped(config: &LogConfig) -> Result<DefaultGuard, AppError> {
    let subscriber = build_subscriber(config)?;
    Ok(tracing::subscriber::set_default(subscriber))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tee_writer_mirrors_into_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tee.log");
        let sink = TeeSink::with_file(&path).unwrap();

        let mut writer = sink.make_writer();
        writer.write_all(b"first\n").unwrap();
        let mut second = sink.make_writer();
        second.write_all(b"second\n").unwrap();
        second.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn console_only_sink_accepts_writes() {
        let sink = TeeSink::console_only();
        assert!(!sink.has_file());
        let mut writer = sink.make_writer();
        assert_eq!(writer.write(b"console only\n").unwrap(), 13);
    }

    #[test]
    fn scoped_subscriber_writes_events_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let config = LogConfig {
            level: LevelFilter::INFO,
            file: Some(path.clone()),
        };

        {
            let _guard = scoped(&config).unwrap();
            tracing::info!("training model");
        }

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("training model"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            level: LevelFilter::INFO,
            file: Some(dir.path().join("missing").join("x.log")),
        };
        let Err(err) = scoped(&config) else {
            panic!("expected an error for a log file in a missing directory");
        };
        assert_eq!(err.exit_code(), 2);
    }
}
