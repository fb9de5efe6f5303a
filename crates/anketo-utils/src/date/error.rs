use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateError {
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),

    #[error("Date out of range")]
    OutOfRange,

    #[error("Invalid format pattern")]
    InvalidFormat,
}
