use clap::Parser;
use lib::{
    AnalyticsError, Config, JsonStationStore, OpenWeatherClient, SimpleLogger, Station,
    StationReport, update_graphs, update_weather, write_csv, write_json,
};
use log::{debug, warn};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding the stations and their readings
    #[arg(short, long)]
    input_file: PathBuf,

    /// Output base name (will create dir containing .csv and .json files)
    #[arg(short, long, default_value = "output")]
    output: String,

    /// Station ids to report on (e.g., tramore,dunmore). If not specified, reports all stations.
    #[arg(short, long, value_delimiter = ',')]
    stations: Vec<String>,

    /// Extend each report with forecast trends (needs STATION_ANALYTICS_API_KEY)
    #[arg(long, default_value_t = false)]
    forecast: bool,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AnalyticsError> {
    let total_start = Instant::now();
    dotenvy::dotenv().ok();
    log::set_logger(&LOGGER).unwrap();

    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }

    println!("Station analytics");
    debug!(
        "Input file: {} | Stations: {} | Forecast: {}",
        args.input_file.display(),
        if args.stations.is_empty() {
            "ALL".to_string()
        } else {
            args.stations.join(",")
        },
        args.forecast
    );

    let store = JsonStationStore::open(&args.input_file)?;
    let selected: Vec<&Station> = if args.stations.is_empty() {
        store.stations().iter().collect()
    } else {
        args.stations
            .iter()
            .map(|id| store.get(id))
            .collect::<Result<_, _>>()?
    };

    let processing_start = Instant::now();
    let mut analysed: Vec<(&Station, StationReport)> = Vec::with_capacity(selected.len());
    for station in selected {
        if station.readings.is_empty() {
            warn!("Skipping station {} with no readings", station.id);
            continue;
        }
        analysed.push((station, update_weather(station, &store)?));
    }
    println!(
        "Analysed {} stations in {:.2?}",
        analysed.len(),
        processing_start.elapsed()
    );

    if args.forecast {
        let config = Config::from_env()?;
        let client = OpenWeatherClient::new(&config);
        let forecast_start = Instant::now();
        for (station, report) in analysed.iter_mut() {
            let trends = update_graphs(station, &report.latest_reading, &client).await?;
            debug!("{}: {} forecast entries", station.id, trends.len());
            report.latest_reading = report.latest_reading.clone().with_forecast(trends);
        }
        println!("Forecasts fetched in {:.2?}", forecast_start.elapsed());
    }
    let reports: Vec<StationReport> = analysed.into_iter().map(|(_, report)| report).collect();

    let output_dir = PathBuf::from(format!("./output/{}", args.output));
    fs::create_dir_all(&output_dir)?;

    // Extract just the directory name for the file names (remove path separators)
    let output_name = args
        .output
        .split(['/', '\\'])
        .next_back()
        .unwrap_or(&args.output);
    let csv_path = output_dir.join(format!("{}.csv", output_name));
    let json_path = output_dir.join(format!("{}.json", output_name));

    write_csv(&reports, &csv_path)?;
    write_json(&reports, &json_path)?;
    println!("\nWrote files to directory: {}", output_dir.display());
    debug!("  - {}", csv_path.display());
    debug!("  - {}", json_path.display());

    for report in &reports {
        debug!(
            "{}: {:.1}°C (chill {}) trends t={:?} w={:?} p={:?}",
            report.station_id,
            report.latest_reading.reading.temp,
            report.latest_reading.wind_chill,
            report.temp_trend,
            report.wind_trend,
            report.pressure_trend
        );
    }

    println!("\nTotal runtime: {:.2?}", total_start.elapsed());
    Ok(())
}
