use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Period {month:02}/{year} is not initialized in the aggregate store")]
    PeriodNotInitialized { month: u32, year: i32 },

    #[error("Year {year} has {found} initialized months, expected 12")]
    IncompleteYear { year: i32, found: usize },

    #[error("Invalid month {0}: must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Rows have already been classified for this session")]
    AlreadyClassified,

    #[error("Rows must be classified before aggregation")]
    NotClassified,

    #[error("Aggregation has already run for this session")]
    AlreadyAggregated,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
