use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrimoireError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid search pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An unexpected error occurred: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GrimoireError>;
