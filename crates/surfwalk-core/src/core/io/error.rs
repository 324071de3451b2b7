use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid record on line {line}: {message}")]
    Record { line: u64, message: String },
    #[error("Input contains no {0}")]
    Empty(&'static str),
}

impl IoError {
    pub(crate) fn record(line: u64, message: impl Into<String>) -> Self {
        Self::Record {
            line,
            message: message.into(),
        }
    }
}
