use crate::error::Result;
use serde::Deserialize;

const ENV_PREFIX: &str = "STATION_ANALYTICS_";

fn default_forecast_url() -> String {
    "https://api.openweathermap.org/data/2.5/onecall".to_string()
}

/// Forecast provider settings, read from `STATION_ANALYTICS_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
}

impl Config {
    /// Required: `STATION_ANALYTICS_API_KEY`. Optional: `STATION_ANALYTICS_FORECAST_URL`.
    pub fn from_env() -> Result<Self> {
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Config>()?)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(vars)?)
    }
}
