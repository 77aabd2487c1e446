use crate::error::{AnalyticsError, Result};
use crate::structs::{Reading, Station};
use log::debug;
use std::{fs::File, io::BufReader, path::Path};

/// Source of the most current reading for a station.
pub trait StationStore {
    fn latest_reading(&self, station: &Station) -> Result<Reading>;
}

/// Stations loaded from a JSON document holding an array of stations.
#[derive(Debug, Clone, Default)]
pub struct JsonStationStore {
    stations: Vec<Station>,
}

impl JsonStationStore {
    /// Loads all stations from a JSON file.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or is not a valid station list.
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Loading stations from {}", path.display());
        let file = File::open(path)?;
        let stations: Vec<Station> = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded {} stations", stations.len());
        Ok(Self::new(stations))
    }

    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, id: &str) -> Result<&Station> {
        self.stations
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AnalyticsError::InvalidState(format!("Unknown station: {}", id)))
    }
}

impl StationStore for JsonStationStore {
    /// The stored station's chronologically last reading.
    fn latest_reading(&self, station: &Station) -> Result<Reading> {
        self.get(&station.id)?
            .readings
            .iter()
            .max_by_key(|r| r.date)
            .cloned()
            .ok_or_else(|| {
                AnalyticsError::InvalidState(format!("Station {} has no readings", station.id))
            })
    }
}
