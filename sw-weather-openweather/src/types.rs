use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GeoLocationZip {
    pub lat: f64,
    pub lon: f64,
}

/// Response of the daily forecast endpoint, only what the face reads
#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub cod: Option<ResponseCode>,
    #[serde(default)]
    pub city: Option<City>,
    pub list: Vec<Day>,
}

// OWM sends cod as a number on some endpoints and as a string on others
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseCode {
    Number(i64),
    Text(String),
}

impl ResponseCode {
    pub fn is_ok(&self) -> bool {
        match self {
            ResponseCode::Number(code) => *code == 200,
            ResponseCode::Text(code) => code.trim() == "200",
        }
    }
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseCode::Number(code) => write!(f, "{code}"),
            ResponseCode::Text(code) => f.write_str(code),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub name: Option<String>,
    #[serde(default)]
    pub timezone: i32, //offset from UTC in seconds
}

#[derive(Debug, Clone, Deserialize)]
pub struct Day {
    #[serde(default)]
    pub dt: Option<i64>,
    pub weather: Vec<Weather>,
    pub temp: Temp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Weather {
    pub id: i32,
    #[serde(default)]
    pub main: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Temp {
    pub max: f64,
    pub min: f64,
}
