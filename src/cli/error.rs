//! CLI-level errors (wraps store errors)

use thiserror::Error;

use crate::errors::StoreError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Io(_) => exitcode::IOERR,
            CliError::Store(e) => match e {
                StoreError::InvalidSpec { .. } => exitcode::DATAERR,
                StoreError::Config { .. } => exitcode::CONFIG,
                StoreError::NotFound(_) | StoreError::Duplicate(_) | StoreError::Cycle { .. } => {
                    exitcode::SOFTWARE
                }
            },
        }
    }
}
