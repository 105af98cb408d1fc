use std::collections::HashMap;

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::face::{Event, FaceSender};
use crate::state::WeatherUpdate;

pub const FORECAST_PATH: &str = "/forecast";
pub const WEATHER_ID: &str = "weather_id";
pub const HIGH_TEMP_KEY: &str = "high_temp";
pub const LOW_TEMP_KEY: &str = "low_temp";

/// A data item pushed from the paired phone
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataItem {
    pub path: String,
    #[serde(default)]
    pub values: HashMap<String, f64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum DataItemError {
    #[error("missing key {0}")]
    MissingKey(&'static str),
    #[error("weather id {0} is not a condition code")]
    BadWeatherId(f64),
}

impl DataItem {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            values: HashMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.values.insert(key.to_owned(), value);
        self
    }

    fn get(&self, key: &'static str) -> Result<f64, DataItemError> {
        self.values
            .get(key)
            .copied()
            .ok_or(DataItemError::MissingKey(key))
    }
}

impl TryFrom<&DataItem> for WeatherUpdate {
    type Error = DataItemError;

    fn try_from(item: &DataItem) -> Result<Self, Self::Error> {
        let id = item.get(WEATHER_ID)?;
        if !id.is_finite() || id.fract() != 0.0 || id < i32::MIN as f64 || id > i32::MAX as f64 {
            return Err(DataItemError::BadWeatherId(id));
        }
        let high = item.get(HIGH_TEMP_KEY)?;
        let low = item.get(LOW_TEMP_KEY)?;
        Ok(WeatherUpdate {
            code: id as i32,
            high_temp: sw_weather::format_temperature(high),
            low_temp: sw_weather::format_temperature(low),
        })
    }
}

/// Turns forecast data items into weather events for one face
#[derive(Debug, Clone)]
pub struct ForecastListener {
    face: FaceSender,
}

impl ForecastListener {
    pub fn new(face: FaceSender) -> Self {
        Self { face }
    }

    /// Returns how many updates were queued
    pub fn on_data_changed(&self, items: &[DataItem]) -> usize {
        let mut queued = 0;
        for item in items {
            if item.path != FORECAST_PATH {
                debug!("ignoring data item at {}", item.path);
                continue;
            }
            match WeatherUpdate::try_from(item) {
                Ok(update) => {
                    if self.face.send(Event::WeatherUpdate(update)) {
                        queued += 1;
                    } else {
                        warn!("watch face gone, dropping forecast item");
                    }
                }
                Err(e) => warn!("bad forecast item: {e}"),
            }
        }
        queued
    }
}
