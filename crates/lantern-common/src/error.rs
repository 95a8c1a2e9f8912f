use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanternError {
    #[error("Script execution error: {0}")]
    ScriptExecution(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, LanternError>;
