use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Tag not found: {0}")]
    NotFound(String),

    #[error("Tag already exists: {0}")]
    Duplicate(String),

    #[error("Cannot make '{parent}' the parent of '{child}': would create a cycle")]
    Cycle { child: String, parent: String },

    #[error("Invalid tag spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
