/// Report-log errors raised by durable write-through and replay.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("report log I/O failed at {path}: {message}")]
    Io { path: String, message: String },

    #[error("corrupt report log record at line {line}: {message}")]
    CorruptRecord { line: usize, message: String },

    #[error("report log unavailable: {reason}")]
    Unavailable { reason: String },
}
