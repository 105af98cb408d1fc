use chrono::{DateTime, FixedOffset};
use core::ops::RangeInclusive;

/// Coarse weather classification used to pick a face theme.
/// The discriminant is the tag sent between devices, keep it stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WeatherCategory {
    Clear = 0,
    Rainy = 1,
    Stormy = 2,
    Cloudy = 3,
    Foggy = 4,
    Snowing = 5,
    LightCloudy = 6,
}

impl WeatherCategory {
    pub const ALL: [WeatherCategory; 7] = [
        WeatherCategory::Clear,
        WeatherCategory::Rainy,
        WeatherCategory::Stormy,
        WeatherCategory::Cloudy,
        WeatherCategory::Foggy,
        WeatherCategory::Snowing,
        WeatherCategory::LightCloudy,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for WeatherCategory {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(value)
    }
}

impl From<WeatherCategory> for &'static str {
    fn from(value: WeatherCategory) -> Self {
        match value {
            WeatherCategory::Clear => "Clear",
            WeatherCategory::Rainy => "Rainy",
            WeatherCategory::Stormy => "Stormy",
            WeatherCategory::Cloudy => "Cloudy",
            WeatherCategory::Foggy => "Foggy",
            WeatherCategory::Snowing => "Snowing",
            WeatherCategory::LightCloudy => "Light Cloudy",
        }
    }
}

/// Icon picked by the matching condition rule.
/// Drizzle and rain share a category but not an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Storm,
    LightRain,
    Rain,
    Snow,
    Fog,
    Clear,
    LightClouds,
    Cloudy,
}

impl WeatherIcon {
    /// Returns bmp file name to load
    pub fn file_name(self) -> &'static str {
        match self {
            WeatherIcon::Storm => "ic_storm.bmp",
            WeatherIcon::LightRain => "ic_light_rain.bmp",
            WeatherIcon::Rain => "ic_rain.bmp",
            WeatherIcon::Snow => "ic_snow.bmp",
            WeatherIcon::Fog => "ic_fog.bmp",
            WeatherIcon::Clear => "ic_clear.bmp",
            WeatherIcon::LightClouds => "ic_light_clouds.bmp",
            WeatherIcon::Cloudy => "ic_cloudy.bmp",
        }
    }
}

/// Result of classifying a condition code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub category: WeatherCategory,
    pub icon: WeatherIcon,
}

struct Rule {
    codes: RangeInclusive<i32>,
    category: WeatherCategory,
    icon: WeatherIcon,
}

const fn rule(
    codes: RangeInclusive<i32>,
    category: WeatherCategory,
    icon: WeatherIcon,
) -> Rule {
    Rule {
        codes,
        category,
        icon,
    }
}

// Based on the OpenWeatherMap condition codes:
// https://openweathermap.org/weather-conditions
// Evaluated top to bottom, first match wins. 761 is listed twice and lands on Foggy.
const RULES: [Rule; 12] = [
    rule(200..=232, WeatherCategory::Stormy, WeatherIcon::Storm),
    rule(300..=321, WeatherCategory::Rainy, WeatherIcon::LightRain),
    rule(500..=504, WeatherCategory::Rainy, WeatherIcon::Rain),
    rule(511..=511, WeatherCategory::Snowing, WeatherIcon::Snow),
    rule(520..=531, WeatherCategory::Rainy, WeatherIcon::Rain),
    rule(600..=622, WeatherCategory::Snowing, WeatherIcon::Snow),
    rule(701..=761, WeatherCategory::Foggy, WeatherIcon::Fog),
    rule(761..=761, WeatherCategory::Stormy, WeatherIcon::Storm),
    rule(781..=781, WeatherCategory::Stormy, WeatherIcon::Storm),
    rule(800..=800, WeatherCategory::Clear, WeatherIcon::Clear),
    rule(801..=801, WeatherCategory::LightCloudy, WeatherIcon::LightClouds),
    rule(802..=804, WeatherCategory::Cloudy, WeatherIcon::Cloudy),
];

/// Finds the first rule covering `code`, `None` when the code is unclassified
pub fn condition(code: i32) -> Option<Condition> {
    RULES
        .iter()
        .find(|rule| rule.codes.contains(&code))
        .map(|rule| Condition {
            category: rule.category,
            icon: rule.icon,
        })
}

pub fn classify(code: i32) -> Option<WeatherCategory> {
    condition(code).map(|c| c.category)
}

pub fn icon_for(code: i32) -> Option<WeatherIcon> {
    condition(code).map(|c| c.icon)
}

/// Whole degrees, no unit. The degree mark is added when drawing.
pub fn format_temperature(value: f64) -> String {
    let rounded = value.round();
    // avoid "-0"
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        format!("{rounded:.0}")
    }
}

// Represents the forecast picked out of a provider response
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub condition_code: i32,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub date_time: Option<DateTime<FixedOffset>>, //start of the period, when the provider sent one
}

impl Forecast {
    pub fn condition(&self) -> Option<Condition> {
        condition(self.condition_code)
    }

    pub fn high(&self) -> String {
        format_temperature(self.temperature_max)
    }

    pub fn low(&self) -> String {
        format_temperature(self.temperature_min)
    }
}
