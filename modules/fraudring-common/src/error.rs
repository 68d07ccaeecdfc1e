use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FraudRingError {
    #[error("CSV file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
