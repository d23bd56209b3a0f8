use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Report formatting error: {source}")]
    FormatError {
        #[from]
        source: std::fmt::Error,
    },

    // Only the identifying columns are mandatory; everything else degrades.
    #[error("Required column '{0}' not found in the uploaded file")]
    MissingColumn(String),

    #[error("No dataset loaded: upload a CSV file first")]
    NoDataset,

    #[error("No consultant selected")]
    NoSelection,

    #[error("No data for entity '{0}'")]
    NoDataForEntity(String),
}

impl EngineError {
    /// Conditions the presentation layer answers by showing nothing.
    pub fn is_empty_selection(&self) -> bool {
        matches!(
            self,
            EngineError::NoSelection | EngineError::NoDataForEntity(_)
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
