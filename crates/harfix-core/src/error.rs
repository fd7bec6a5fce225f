use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read HAR file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse HAR file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Not a HAR file: {0} (expected a .har extension)")]
    UnsupportedFile(String),

    #[error("Error fixing HAR file: {0}")]
    Transform(String),
}

pub type Result<T> = std::result::Result<T, Error>;
