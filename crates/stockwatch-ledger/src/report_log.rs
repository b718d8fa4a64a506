//! Report logs: durable (JSON lines) and in-memory implementations of
//! `IReportLog`.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, instrument, warn};

use stockwatch_core::errors::{StockwatchResult, StorageError};
use stockwatch_core::models::Report;
use stockwatch_core::traits::IReportLog;

/// Append-only in-memory log. Lost on restart; used in tests and when no
/// log path is configured.
#[derive(Debug, Default)]
pub struct InMemoryReportLog {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IReportLog for InMemoryReportLog {
    fn append(&self, report: &Report) -> StockwatchResult<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn load_all(&self) -> StockwatchResult<Vec<Report>> {
        Ok(self
            .reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn len(&self) -> StockwatchResult<usize> {
        Ok(self.reports.lock().unwrap_or_else(PoisonError::into_inner).len())
    }
}

/// One JSON-serialized report per line, appended and flushed per report.
///
/// An append either lands as a whole line or leaves the file at its previous
/// length. A torn final line left by a crash is dropped when the log is
/// opened.
pub struct JsonlReportLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlReportLog {
    /// Open (creating if needed) the log at `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> StockwatchResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| io_err(&path, e))?;
        seal_tail(&mut file).map_err(|e| io_err(&path, e))?;
        debug!(path = %path.display(), "opened report log");
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IReportLog for JsonlReportLog {
    #[instrument(skip(self, report), fields(report_id = %report.id))]
    fn append(&self, report: &Report) -> StockwatchResult<()> {
        let mut line = serde_json::to_string(report)?;
        line.push('\n');

        let mut file = self.file.lock().map_err(|e| StorageError::Unavailable {
            reason: format!("report log lock poisoned: {e}"),
        })?;
        append_or_rollback(&mut file, line.as_bytes(), write_durably)
            .map_err(|e| io_err(&self.path, e))?;
        Ok(())
    }

    /// Read every record in append order. Blank lines are skipped. An
    /// unterminated final line that fails to parse is a torn write and is
    /// dropped with a warning; any other unparsable line is a
    /// `CorruptRecord` error.
    fn load_all(&self) -> StockwatchResult<Vec<Report>> {
        let bytes = std::fs::read(&self.path).map_err(|e| io_err(&self.path, e))?;
        let mut reports = Vec::new();
        for (idx, line) in bytes.split_inclusive(|b| *b == b'\n').enumerate() {
            let terminated = line.ends_with(b"\n");
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice::<Report>(line) {
                Ok(report) => reports.push(report),
                Err(e) if !terminated => {
                    warn!(line = idx + 1, error = %e, "ignoring torn final report log record");
                    break;
                }
                Err(e) => {
                    warn!(line = idx + 1, error = %e, "corrupt report log record");
                    return Err(StorageError::CorruptRecord {
                        line: idx + 1,
                        message: e.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(reports)
    }
}

fn write_durably(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_data()
}

/// Run `write`, truncating the file back to its prior length if it fails.
fn append_or_rollback<F>(file: &mut File, bytes: &[u8], write: F) -> io::Result<()>
where
    F: FnOnce(&mut File, &[u8]) -> io::Result<()>,
{
    let before = file.metadata()?.len();
    if let Err(e) = write(file, bytes) {
        if let Err(rollback) = file.set_len(before) {
            warn!(error = %rollback, len = before, "failed to roll back partial report log append");
        }
        return Err(e);
    }
    Ok(())
}

/// Leave the file ending on a record boundary: drop a torn final record, or
/// terminate a complete one that lacks its newline.
fn seal_tail(file: &mut File) -> io::Result<()> {
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    let boundary = bytes.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
    let tail = &bytes[boundary..];
    if tail.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    if serde_json::from_slice::<Report>(tail).is_ok() {
        return write_durably(file, b"\n");
    }
    warn!(dropped_bytes = tail.len(), "truncating torn final report log record");
    file.set_len(boundary as u64)?;
    file.sync_data()
}

fn io_err(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
