use crate::error::Result;
use crate::structs::StationReport;
use csv::Writer;
use std::{fs::File, path::Path};

/// Writes one summary row per station to a CSV file.
///
/// # Arguments
/// * `reports` - Slice of StationReport structs to summarise
/// * `output_path` - Path where the CSV file will be created
///
/// # Returns
/// Returns `Ok(())` on success.
///
/// # Errors
/// Returns error if file cannot be created or written to.
pub fn write_csv(reports: &[StationReport], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "Station",
        "Name",
        "Temp",
        "Wind_Chill",
        "Max_Temp",
        "Min_Temp",
        "Max_Wind",
        "Min_Wind",
        "Max_Pressure",
        "Min_Pressure",
        "Temp_Trend",
        "Wind_Trend",
        "Pressure_Trend",
    ])?;

    for report in reports {
        writer.write_record(&[
            report.station_id.clone(),
            report.name.clone(),
            format!("{:.2}", report.latest_reading.reading.temp),
            report.latest_reading.wind_chill.clone(),
            format!("{:.2}", report.max_temp),
            format!("{:.2}", report.min_temp),
            format!("{:.2}", report.max_wind),
            format!("{:.2}", report.min_wind),
            format!("{:.2}", report.max_pressure),
            format!("{:.2}", report.min_pressure),
            i8::from(report.temp_trend).to_string(),
            i8::from(report.wind_trend).to_string(),
            i8::from(report.pressure_trend).to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes station reports to a pretty-formatted JSON file.
///
/// # Errors
/// Returns error if file cannot be created or serialization fails.
pub fn write_json(reports: &[StationReport], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, reports)?;
    Ok(())
}
