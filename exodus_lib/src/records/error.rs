use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not read export file: {0}")]
    Csv(#[from] csv::Error),
    #[error("Row at line {line} has no field {index}")]
    MissingField { line: u64, index: usize },
}
