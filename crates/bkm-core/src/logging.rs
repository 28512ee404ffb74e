//! Logging for `bkm`: one append-only file under the XDG state dir, stderr when that fails.
//!
//! The filter comes from `BKM_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
//! A variable that does not parse as a filter is skipped, not fatal.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `BKM_LOG` nor `RUST_LOG` yields a usable directive set.
pub const DEFAULT_FILTER: &str = "info,bkm=debug,bkm_core=debug";

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "BKM_LOG";

const LOG_FILE_NAME: &str = "bkm.log";

/// Either the shared log file or stderr, when the file handle cannot be cloned.
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFileWriter(fs::File);

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

/// Pick the filter directives: the first candidate that parses wins, else [`DEFAULT_FILTER`].
fn resolve_filter(bkm_log: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    [bkm_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .find_map(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn env_filter() -> EnvFilter {
    let bkm_log = std::env::var(LOG_ENV).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    resolve_filter(bkm_log.as_deref(), rust_log.as_deref())
}

/// Path of the log file: `~/.local/state/bkm/bkm.log`.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bkm")?;
    Ok(xdg_dirs.place_state_file(LOG_FILE_NAME)?)
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(fs::OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the file subscriber.
/// Returns Err (log dir unwritable, subscriber already set) so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFileWriter(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "bkm logging initialized");
    Ok(())
}

/// Log to stderr only; used by the CLI when [`init_logging`] fails.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
