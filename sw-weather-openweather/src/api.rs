use chrono::{DateTime, FixedOffset};
use log::debug;
use memchr::memmem;
use thiserror::Error;

use super::types::DailyForecast;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("malformed forecast json")]
    Json(#[from] serde_json::Error),
    #[error("provider returned code {0}")]
    Provider(String),
    #[error("forecast list is empty")]
    Empty,
    #[error("forecast entry {0} has no weather")]
    MissingWeather(usize),
    #[error("missing header body seperator")]
    MissingBody,
    #[error("bad http status: {0}")]
    Status(String),
}

/// Parses a daily forecast body into the face's forecast.
/// Every entry is visited and the last one is kept, the list is not searched for today.
pub fn parse_forecast(body: &[u8]) -> Result<sw_weather::Forecast, ForecastError> {
    let response: DailyForecast = serde_json::from_slice(body)?;
    response.try_into()
}

impl TryFrom<DailyForecast> for sw_weather::Forecast {
    type Error = ForecastError;

    fn try_from(value: DailyForecast) -> Result<Self, Self::Error> {
        if let Some(cod) = &value.cod {
            if !cod.is_ok() {
                return Err(ForecastError::Provider(cod.to_string()));
            }
        }
        let tz = value
            .city
            .as_ref()
            .and_then(|city| FixedOffset::east_opt(city.timezone))
            .or_else(|| FixedOffset::east_opt(0));
        if let Some(name) = value.city.as_ref().and_then(|city| city.name.as_deref()) {
            debug!("forecast for {name}");
        }

        let mut forecast = None;
        for (i, day) in value.list.iter().enumerate() {
            let Some(weather) = day.weather.first() else {
                return Err(ForecastError::MissingWeather(i));
            };
            let date_time = day
                .dt
                .and_then(|dt| DateTime::from_timestamp(dt, 0))
                .zip(tz)
                .map(|(dt, tz)| dt.with_timezone(&tz));
            debug!(
                "forecast entry {i}: id {} ({}) max {} min {}",
                weather.id,
                weather.main.as_deref().unwrap_or("?"),
                day.temp.max,
                day.temp.min
            );
            forecast = Some(sw_weather::Forecast {
                condition_code: weather.id,
                temperature_max: day.temp.max,
                temperature_min: day.temp.min,
                date_time,
            });
        }
        forecast.ok_or(ForecastError::Empty)
    }
}

/// Splits a raw HTTP response, returning the body when the status is 200
pub fn response_body(res: &[u8]) -> Result<&[u8], ForecastError> {
    //we need to get out the body of the response, so past /r/n/r/n
    let sep_bytes = b"\r\n\r\n";
    let Some(sep_pos) = memmem::find(res, sep_bytes) else {
        return Err(ForecastError::MissingBody);
    };
    let head = &res[..sep_pos];
    let status_line = match memmem::find(head, b"\r\n") {
        Some(end) => &head[..end],
        None => head,
    };
    let status_line = String::from_utf8_lossy(status_line);
    let mut parts = status_line.split_whitespace();
    let (Some(version), Some(status)) = (parts.next(), parts.next()) else {
        return Err(ForecastError::Status(status_line.into_owned()));
    };
    if !version.starts_with("HTTP/") || status != "200" {
        return Err(ForecastError::Status(status_line.into_owned()));
    }
    Ok(&res[sep_pos + sep_bytes.len()..])
}
