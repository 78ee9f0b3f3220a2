use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("Time Standard Store Error: {0}")]
    Store(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data Parsing Error: {0}")]
    Parse(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
