use chrono::{DateTime, Utc};
use log::{Log, Metadata, Record as LogRecord};
use serde::{Deserialize, Serialize};

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &LogRecord) {
        if self.enabled(record.metadata()) {
            println!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// A single observation recorded at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub date: DateTime<Utc>,
    pub code: u32,
    /// Degrees Celsius
    pub temp: f64,
    /// km/h
    pub wind_speed: f64,
    /// Degrees from north
    pub wind_dir: f64,
    /// hPa
    pub pressure: f64,
    /// Set when the reading was pulled from the live weather API rather than entered by hand.
    #[serde(default)]
    pub open_weather_api: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_icon: Option<String>,
}

/// A weather station and its reading history, oldest reading first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub readings: Vec<Reading>,
}

/// The most recent reading of a station with its derived display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestReading {
    #[serde(flatten)]
    pub reading: Reading,
    pub temp_far: f64,
    pub beaufort: u8,
    pub wind_compass: &'static str,
    /// Always rendered with exactly two decimal places.
    pub wind_chill: String,
    #[serde(flatten)]
    pub forecast: Option<ForecastTrends>,
}

impl LatestReading {
    /// Attaches forecast series, replacing any previously attached ones.
    pub fn with_forecast(mut self, forecast: ForecastTrends) -> Self {
        self.forecast = Some(forecast);
        self
    }
}

/// Direction of the last three readings of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Trend {
    Falling,
    Flat,
    Rising,
}

impl From<Trend> for i8 {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Falling => -1,
            Trend::Flat => 0,
            Trend::Rising => 1,
        }
    }
}

impl TryFrom<i8> for Trend {
    type Error = String;

    fn try_from(code: i8) -> std::result::Result<Self, Self::Error> {
        match code {
            -1 => Ok(Trend::Falling),
            0 => Ok(Trend::Flat),
            1 => Ok(Trend::Rising),
            other => Err(format!("invalid trend code: {}", other)),
        }
    }
}

/// Derived weather summary for one station
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationReport {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub latest_reading: LatestReading,
    pub max_temp: f64,
    pub min_temp: f64,
    pub max_wind: f64,
    pub min_wind: f64,
    pub max_pressure: f64,
    pub min_pressure: f64,
    pub temp_trend: Trend,
    pub wind_trend: Trend,
    pub pressure_trend: Trend,
}

/// Forward-looking series starting at the current reading, one entry per day.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastTrends {
    pub temp_trend: Vec<f64>,
    pub wind_trend: Vec<f64>,
    pub pressure_trend: Vec<f64>,
    pub trend_labels: Vec<String>,
}

impl ForecastTrends {
    pub fn len(&self) -> usize {
        self.trend_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trend_labels.is_empty()
    }

    pub(crate) fn push(&mut self, temp: f64, wind: f64, pressure: f64, label: String) {
        self.temp_trend.push(temp);
        self.wind_trend.push(wind);
        self.pressure_trend.push(pressure);
        self.trend_labels.push(label);
    }
}
