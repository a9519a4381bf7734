use std::io::{self, ErrorKind};

use thiserror::Error;

#[derive(Error, Debug)]
/// Generator error
pub enum GeneratorError {
    /// `write` or `flush` was called after `close`.
    #[error("generator is closed")]
    ClosedGenerator,

    /// An entry of the record lacks the configured header or value field.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The underlying sink failed while writing, flushing or releasing.
    #[error("sink error: {0}")]
    Sink(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<csv::Error> for GeneratorError {
    fn from(error: csv::Error) -> Self {
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(error) => GeneratorError::Sink(error),
            _ => GeneratorError::Sink(io::Error::new(ErrorKind::InvalidData, message)),
        }
    }
}

/// Result returned by every generator operation.
pub type GeneratorResult<T = ()> = Result<T, GeneratorError>;
