use crate::conversion::{beaufort_scale, current_weather, temp_far, weather_icon, wind_dir_calc};
use crate::error::{AnalyticsError, Result};
use crate::store::StationStore;
use crate::structs::{LatestReading, Reading, Station, StationReport, Trend};
use log::debug;

/// Derives the weather summary of a station from its reading history.
///
/// The latest reading is refreshed from `store` rather than taken from the
/// station, so a station loaded before a new reading arrived still reports
/// the current conditions. Extrema and trends cover the whole of
/// `station.readings`.
///
/// # Arguments
///
/// * `station` - Station with a chronologically ordered, non-empty history
/// * `store` - Source of the station's most recent reading
///
/// # Returns
///
/// Returns a new `StationReport`; the station itself is left untouched.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidState` if the history is empty or the
/// store has no latest reading for the station.
pub fn update_weather<S: StationStore>(station: &Station, store: &S) -> Result<StationReport> {
    debug!(
        "Updating weather for station {} ({} readings)",
        station.id,
        station.readings.len()
    );
    let latest = store.latest_reading(station)?;
    let latest_reading = derive_latest(latest);
    let readings = &station.readings;

    Ok(StationReport {
        station_id: station.id.clone(),
        name: station.name.clone(),
        latitude: station.latitude,
        longitude: station.longitude,
        latest_reading,
        max_temp: max_temp(readings)?,
        min_temp: min_temp(readings)?,
        max_wind: max_wind(readings)?,
        min_wind: min_wind(readings)?,
        max_pressure: max_pressure(readings)?,
        min_pressure: min_pressure(readings)?,
        temp_trend: temp_trend(readings),
        wind_trend: wind_trend(readings),
        pressure_trend: pressure_trend(readings),
    })
}

/// Attaches the display fields computed from a reading's raw values.
///
/// Manually entered readings get their description and icon from the
/// weather code; readings from the live API keep the ones they came with.
pub fn derive_latest(mut reading: Reading) -> LatestReading {
    if !reading.open_weather_api {
        reading.weather = Some(current_weather(reading.code).to_string());
        reading.weather_icon = Some(weather_icon(reading.code).to_string());
    }

    LatestReading {
        temp_far: temp_far(reading.temp),
        beaufort: beaufort_scale(reading.wind_speed),
        wind_compass: wind_dir_calc(reading.wind_dir),
        wind_chill: wind_chill(&reading),
        reading,
        forecast: None,
    }
}

/// Wind chill index for a reading, formatted with two decimal places.
///
/// `13.12 + 0.6215·t − 11.37·v^0.16 + 0.3965·t·v^0.16` with `t` in °C and
/// `v` in km/h. The formula is applied as is for every wind speed.
/// Exact binary ties round half to even (`0.125` renders as `0.12`).
pub fn wind_chill(reading: &Reading) -> String {
    let t = reading.temp;
    let v = reading.wind_speed.powf(0.16);
    let chill = 13.12 + 0.6215 * t - 11.37 * v + 0.3965 * t * v;
    format!("{:.2}", chill)
}

/// Largest value of a non-empty slice.
pub fn max(values: &[f64]) -> Result<f64> {
    extremum(values, |candidate, current| candidate > current)
}

/// Smallest value of a non-empty slice.
pub fn min(values: &[f64]) -> Result<f64> {
    extremum(values, |candidate, current| candidate < current)
}

fn extremum(values: &[f64], replaces: impl Fn(f64, f64) -> bool) -> Result<f64> {
    match values {
        [] => Err(AnalyticsError::InvalidState(
            "cannot take extremum of an empty reading history".to_string(),
        )),
        [only] => Ok(*only),
        [first, rest @ ..] => Ok(rest
            .iter()
            .fold(*first, |acc, &value| if replaces(value, acc) { value } else { acc })),
    }
}

fn project(readings: &[Reading], field: fn(&Reading) -> f64) -> Vec<f64> {
    readings.iter().map(field).collect()
}

/// Highest `temp` across the readings.
pub fn max_temp(readings: &[Reading]) -> Result<f64> {
    max(&project(readings, |r| r.temp))
}

/// Lowest `temp` across the readings.
pub fn min_temp(readings: &[Reading]) -> Result<f64> {
    min(&project(readings, |r| r.temp))
}

/// Highest `wind_speed` across the readings.
pub fn max_wind(readings: &[Reading]) -> Result<f64> {
    max(&project(readings, |r| r.wind_speed))
}

/// Lowest `wind_speed` across the readings.
pub fn min_wind(readings: &[Reading]) -> Result<f64> {
    min(&project(readings, |r| r.wind_speed))
}

/// Highest `pressure` across the readings.
pub fn max_pressure(readings: &[Reading]) -> Result<f64> {
    max(&project(readings, |r| r.pressure))
}

/// Lowest `pressure` across the readings.
pub fn min_pressure(readings: &[Reading]) -> Result<f64> {
    min(&project(readings, |r| r.pressure))
}

/// Classifies three values given newest first.
///
/// Only a strictly monotonic run counts as a trend; ties and zig-zags are
/// `Trend::Flat`.
pub fn get_trend(values: [f64; 3]) -> Trend {
    let [newest, middle, oldest] = values;
    if newest > middle && middle > oldest {
        Trend::Rising
    } else if newest < middle && middle < oldest {
        Trend::Falling
    } else {
        Trend::Flat
    }
}

fn field_trend(readings: &[Reading], field: fn(&Reading) -> f64) -> Trend {
    match readings {
        [.., oldest, middle, newest] => get_trend([field(newest), field(middle), field(oldest)]),
        _ => Trend::Flat,
    }
}

/// Trend of `temp` over the last three readings.
pub fn temp_trend(readings: &[Reading]) -> Trend {
    field_trend(readings, |r| r.temp)
}

/// Trend of `wind_speed` over the last three readings.
pub fn wind_trend(readings: &[Reading]) -> Trend {
    field_trend(readings, |r| r.wind_speed)
}

/// Trend of `pressure` over the last three readings.
pub fn pressure_trend(readings: &[Reading]) -> Trend {
    field_trend(readings, |r| r.pressure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn reading(temp: f64, wind_speed: f64, pressure: f64) -> Reading {
        Reading {
            date: Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap(),
            code: 300,
            temp,
            wind_speed,
            wind_dir: 180.0,
            pressure,
            open_weather_api: false,
            weather: None,
            weather_icon: None,
        }
    }

    fn history(temps: &[f64]) -> Vec<Reading> {
        temps
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let mut r = reading(t, 10.0, 1010.0);
                r.date += Duration::hours(i as i64);
                r
            })
            .collect()
    }

    struct LastReadingStore;

    impl StationStore for LastReadingStore {
        fn latest_reading(&self, station: &Station) -> Result<Reading> {
            station
                .readings
                .last()
                .cloned()
                .ok_or_else(|| AnalyticsError::InvalidState("no readings".to_string()))
        }
    }

    fn station(readings: Vec<Reading>) -> Station {
        Station {
            id: "tramore".to_string(),
            name: "Tramore".to_string(),
            latitude: 52.16,
            longitude: -7.15,
            readings,
        }
    }

    #[test]
    fn wind_chill_without_wind_reduces_to_linear_term() {
        for t in [-10.0, 0.0, 7.5, 21.0] {
            let expected = format!("{:.2}", 13.12 + 0.6215 * t);
            assert_eq!(wind_chill(&reading(t, 0.0, 1000.0)), expected);
        }
    }

    #[test]
    fn wind_chill_matches_formula() {
        assert_eq!(wind_chill(&reading(-5.0, 20.0, 1000.0)), "-11.55");
        assert_eq!(wind_chill(&reading(0.0, 0.0, 1000.0)), "13.12");
    }

    #[test]
    fn wind_chill_is_not_clamped_for_negative_wind() {
        assert_eq!(wind_chill(&reading(5.0, -3.0, 1000.0)), "NaN");
    }

    #[test]
    fn max_and_min_scan_all_values() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(max(&values).unwrap(), 5.0);
        assert_eq!(min(&values).unwrap(), 1.0);
    }

    #[test]
    fn single_value_is_its_own_extremum() {
        assert_eq!(max(&[-2.5]).unwrap(), -2.5);
        assert_eq!(min(&[-2.5]).unwrap(), -2.5);
    }

    #[test]
    fn empty_history_is_invalid_state() {
        assert!(matches!(max(&[]), Err(AnalyticsError::InvalidState(_))));
        assert!(matches!(min_pressure(&[]), Err(AnalyticsError::InvalidState(_))));
    }

    #[test]
    fn field_extrema_project_the_right_field() {
        let readings = vec![
            reading(12.0, 5.0, 1001.0),
            reading(8.0, 30.0, 1020.0),
            reading(15.0, 12.0, 995.0),
        ];
        assert_eq!(max_temp(&readings).unwrap(), 15.0);
        assert_eq!(min_temp(&readings).unwrap(), 8.0);
        assert_eq!(max_wind(&readings).unwrap(), 30.0);
        assert_eq!(min_wind(&readings).unwrap(), 5.0);
        assert_eq!(max_pressure(&readings).unwrap(), 1020.0);
        assert_eq!(min_pressure(&readings).unwrap(), 995.0);
    }

    #[test]
    fn trend_classification() {
        assert_eq!(get_trend([15.0, 12.0, 10.0]), Trend::Rising);
        assert_eq!(get_trend([10.0, 12.0, 15.0]), Trend::Falling);
        assert_eq!(get_trend([10.0, 10.0, 10.0]), Trend::Flat);
        assert_eq!(get_trend([12.0, 15.0, 10.0]), Trend::Flat);
        assert_eq!(get_trend([15.0, 15.0, 10.0]), Trend::Flat);
    }

    #[test]
    fn trend_reads_last_three_readings() {
        assert_eq!(temp_trend(&history(&[10.0, 12.0, 15.0])), Trend::Rising);
        assert_eq!(temp_trend(&history(&[15.0, 12.0, 10.0])), Trend::Falling);
        assert_eq!(temp_trend(&history(&[10.0, 15.0, 12.0])), Trend::Flat);
        // Older readings do not count
        assert_eq!(temp_trend(&history(&[30.0, 1.0, 10.0, 12.0, 15.0])), Trend::Rising);
    }

    #[test]
    fn short_history_is_flat() {
        assert_eq!(temp_trend(&[]), Trend::Flat);
        assert_eq!(wind_trend(&history(&[1.0])), Trend::Flat);
        assert_eq!(pressure_trend(&history(&[1.0, 2.0])), Trend::Flat);
    }

    #[test]
    fn manual_reading_gets_description_and_icon() {
        let readings = history(&[10.0, 12.0, 15.0]);
        let report = update_weather(&station(readings), &LastReadingStore).unwrap();
        let latest = &report.latest_reading;

        assert_eq!(latest.reading.weather.as_deref(), Some("Cloudy"));
        assert_eq!(latest.reading.weather_icon.as_deref(), Some("cloud"));
        assert_eq!(latest.temp_far, 59.0);
        assert_eq!(latest.beaufort, 2);
        assert_eq!(latest.wind_compass, "S");
        assert_eq!(latest.wind_chill, wind_chill(&latest.reading));
        assert!(latest.forecast.is_none());

        assert_eq!(report.max_temp, 15.0);
        assert_eq!(report.min_temp, 10.0);
        assert_eq!(report.temp_trend, Trend::Rising);
        assert_eq!(report.wind_trend, Trend::Flat);
        assert_eq!(report.pressure_trend, Trend::Flat);
    }

    #[test]
    fn api_reading_keeps_its_own_description() {
        let mut readings = history(&[10.0, 12.0]);
        let last = readings.last_mut().unwrap();
        last.open_weather_api = true;
        last.weather = Some("overcast clouds".to_string());
        last.weather_icon = Some("04d".to_string());

        let report = update_weather(&station(readings), &LastReadingStore).unwrap();
        let latest = &report.latest_reading.reading;
        assert_eq!(latest.weather.as_deref(), Some("overcast clouds"));
        assert_eq!(latest.weather_icon.as_deref(), Some("04d"));
    }

    #[test]
    fn derived_fields_are_recomputed() {
        let mut stale = reading(20.0, 0.0, 1000.0);
        stale.weather = Some("Snow".to_string());
        let latest = derive_latest(stale);
        assert_eq!(latest.reading.weather.as_deref(), Some("Cloudy"));
        assert_eq!(latest.wind_chill, "25.55");
    }

    #[test]
    fn update_weather_rejects_empty_history() {
        let result = update_weather(&station(Vec::new()), &LastReadingStore);
        assert!(matches!(result, Err(AnalyticsError::InvalidState(_))));
    }
}
