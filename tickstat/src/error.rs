use thiserror::Error;
use tickstat_report::StoreError;

#[derive(Debug, Error)]
pub enum TickstatError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Cannot parse column layout: {0}")]
    LayoutParseError(#[from] toml::de::Error),
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Failed to save HTML chart: {0}")]
    CannotSaveChart(String),
    #[error("Invalid input file: {0}")]
    InvalidInputFile(String),
}
