mod api;
mod types;

use anyhow::anyhow;
use log::{info, warn};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::thread::{self, JoinHandle};

pub use api::{parse_forecast, response_body, ForecastError};
pub use types::GeoLocationZip;
use url::{Position, Url};

const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org:80";

#[derive(Debug, Clone)]
pub struct OpenWeather {
    api_key: String,
    zip_code: u32,
    country_code: String,
    units: String,
    base_url: String,
}

impl OpenWeather {
    pub fn new(api_key: &str, zip_code: u32, country_code: &str, units: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            zip_code,
            country_code: country_code.to_owned(),
            units: units.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Points the client at another host, must still be plain http
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    pub fn get_forecast(&self) -> anyhow::Result<sw_weather::Forecast> {
        //first get location
        let location = self.get_location()?;
        let url = format!(
            "{}/data/2.5/forecast/daily?lat={}&lon={}&cnt=7&appid={}&units={}",
            self.base_url, location.lat, location.lon, self.api_key, self.units
        );
        let res = get(&url)?;
        let body = response_body(&res)?;
        Ok(parse_forecast(body)?)
    }

    pub fn get_location(&self) -> anyhow::Result<GeoLocationZip> {
        let url = format!(
            "{}/geo/1.0/zip?zip={},{}&appid={}",
            self.base_url, self.zip_code, self.country_code, self.api_key
        );
        let res = get(&url)?;
        let body = response_body(&res)?;
        Ok(serde_json::from_slice(body)?)
    }

    /// Runs the fetch off the caller's thread and hands the result to `deliver` once.
    /// Whoever receives the result decides whether it is still wanted.
    pub fn spawn_fetch<F>(&self, deliver: F) -> std::io::Result<JoinHandle<()>>
    where
        F: FnOnce(anyhow::Result<sw_weather::Forecast>) + Send + 'static,
    {
        let api = self.clone();
        thread::Builder::new()
            .name("weather-fetch".into())
            .spawn(move || {
                info!("fetching forecast for {},{}", api.zip_code, api.country_code);
                let result = api.get_forecast();
                if let Err(e) = &result {
                    warn!("weather fetch failed: {e:#}");
                }
                deliver(result);
            })
    }
}

fn get(url_into: &str) -> anyhow::Result<Vec<u8>> {
    let url = Url::parse(url_into)?;
    if url.scheme() != "http" {
        Err(anyhow!("Only http is allowed"))
    } else {
        let port = url.port().unwrap_or(80);
        let Some(hostname) = url.host() else {
            return Err(anyhow!("Missing hostname"));
        };
        let path = &url[Position::BeforePath..];

        let mut stream = TcpStream::connect(format!("{hostname}:{port}"))?;
        stream.write_all(format!("GET {path} HTTP/1.0\r\nHost: {hostname}\r\n\r\n").as_bytes())?;
        let mut buf = vec![];
        stream.read_to_end(&mut buf)?;
        Ok(buf)
    }
}
