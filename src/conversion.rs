use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%a %-d %b";

/// Upper bounds (exclusive, km/h) of Beaufort forces 0 through 11.
const BEAUFORT_LIMITS: [f64; 12] = [
    1.0, 6.0, 12.0, 20.0, 29.0, 39.0, 50.0, 62.0, 75.0, 89.0, 103.0, 118.0,
];

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Converts a Celsius temperature to Fahrenheit: °F = (°C × 9/5) + 32
pub fn temp_far(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Maps a wind speed in km/h onto the Beaufort scale (0-12).
pub fn beaufort_scale(wind_speed: f64) -> u8 {
    BEAUFORT_LIMITS
        .iter()
        .position(|&limit| wind_speed < limit)
        .unwrap_or(BEAUFORT_LIMITS.len()) as u8
}

/// Returns the 16-point compass label for a bearing in degrees.
pub fn wind_dir_calc(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Human readable description of a station weather code.
pub fn current_weather(code: u32) -> &'static str {
    match code {
        100 => "Clear",
        200 => "Partial Clouds",
        300 => "Cloudy",
        400 => "Light Showers",
        500 => "Heavy Showers",
        600 => "Rain",
        700 => "Snow",
        800 => "Thunder",
        _ => "Unknown",
    }
}

/// Icon name for a station weather code.
pub fn weather_icon(code: u32) -> &'static str {
    match code {
        100 => "sun",
        200 => "cloud sun",
        300 => "cloud",
        400 => "cloud sun rain",
        500 => "cloud showers heavy",
        600 => "cloud rain",
        700 => "snowflake",
        800 => "bolt",
        _ => "question",
    }
}

/// Short display label for a date, e.g. `Mon 19 Oct`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}
