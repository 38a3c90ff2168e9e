use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Protocol errors
    #[error("Invalid message format: {0}")]
    InvalidMessageFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Message encoding failed: {0}")]
    Encode(String),

    // Identity errors
    #[error("Invalid door id: {0}")]
    InvalidDoorId(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
