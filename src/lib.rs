pub mod analytics;
pub mod config;
pub mod conversion;
pub mod error;
pub mod forecast;
pub mod load;
pub mod store;
pub mod structs;

// Re-export public API
pub use analytics::update_weather;
pub use config::Config;
pub use error::{AnalyticsError, Result};
pub use forecast::{ForecastProvider, OpenWeatherClient, update_graphs};
pub use load::{write_csv, write_json};
pub use store::{JsonStationStore, StationStore};
pub use structs::{
    ForecastTrends, LatestReading, Reading, SimpleLogger, Station, StationReport, Trend,
};
