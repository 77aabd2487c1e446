use crate::config::Config;
use crate::conversion::format_date;
use crate::error::{AnalyticsError, Result};
use crate::structs::{ForecastTrends, LatestReading, Station};
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

/// One day of a provider's daily forecast, metric units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyForecast {
    /// Unix epoch seconds
    pub dt: i64,
    pub temp: DayTemperature,
    pub wind_speed: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayTemperature {
    pub day: f64,
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    daily: Vec<DailyForecast>,
}

/// A source of daily forecasts for a location. Index 0 is today.
#[allow(async_fn_in_trait)]
pub trait ForecastProvider {
    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>>;
}

/// OpenWeatherMap One Call client
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.forecast_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn forecast_request(&self, latitude: f64, longitude: f64) -> RequestBuilder {
        self.client.get(&self.base_url).query(&[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("units", "metric".to_string()),
            ("appid", self.api_key.clone()),
        ])
    }
}

impl ForecastProvider for OpenWeatherClient {
    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>> {
        debug!(
            "Requesting daily forecast from {} for ({}, {})",
            self.base_url, latitude, longitude
        );
        let response: OneCallResponse = self
            .forecast_request(latitude, longitude)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Received {} forecast days", response.daily.len());
        Ok(response.daily)
    }
}

/// Builds forward-looking temperature, wind and pressure series for a station.
///
/// Entry 0 is the station's current reading with its values truncated to
/// whole numbers, since manually entered readings are not part of the
/// provider's data. Every forecast day after the provider's own "today"
/// follows, so the series hold `1 + (days - 1)` entries.
///
/// # Errors
///
/// Returns `AnalyticsError::ForecastUnavailable` if the provider request
/// fails and `AnalyticsError::InvalidTimestamp` for an out of range `dt`.
/// No partial series is produced in either case.
pub async fn update_graphs<P: ForecastProvider>(
    station: &Station,
    latest: &LatestReading,
    provider: &P,
) -> Result<ForecastTrends> {
    let days = provider
        .daily_forecast(station.latitude, station.longitude)
        .await?;

    let current = &latest.reading;
    let mut trends = ForecastTrends::default();
    trends.push(
        current.temp.trunc(),
        current.wind_speed.trunc(),
        current.pressure.trunc(),
        format_date(&current.date),
    );

    for day in days.iter().skip(1) {
        let date: DateTime<Utc> =
            DateTime::from_timestamp(day.dt, 0).ok_or(AnalyticsError::InvalidTimestamp(day.dt))?;
        trends.push(day.temp.day, day.wind_speed, day.pressure, format_date(&date));
    }

    debug!(
        "Built {} forecast entries for station {}",
        trends.len(),
        station.id
    );
    Ok(trends)
}
