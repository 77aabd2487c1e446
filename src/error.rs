#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Invalid State: {0}")]
    InvalidState(String),
    #[error("Forecast Unavailable: {0}")]
    ForecastUnavailable(#[from] reqwest::Error),
    #[error("Invalid Timestamp: {0}")]
    InvalidTimestamp(i64),
    #[error("Config Error: {0}")]
    Config(#[from] envy::Error),
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
