use log::{info, warn};
use sw_weather::{Forecast, WeatherIcon};

use crate::theme::{resolve_theme, WeatherTheme};

/// New weather for the face, from the paired phone or a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherUpdate {
    pub code: i32,
    pub high_temp: String,
    pub low_temp: String,
}

impl WeatherUpdate {
    pub fn new(code: i32, high_temp: &str, low_temp: &str) -> Self {
        Self {
            code,
            high_temp: high_temp.to_owned(),
            low_temp: low_temp.to_owned(),
        }
    }
}

impl From<Forecast> for WeatherUpdate {
    fn from(value: Forecast) -> Self {
        Self {
            code: value.condition_code,
            high_temp: value.high(),
            low_temp: value.low(),
        }
    }
}

/// What the draw path reads. Only the update path writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub theme: WeatherTheme,
    pub icon: WeatherIcon,
    pub weather_code: Option<i32>,
    pub high_temp: Option<String>,
    pub low_temp: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        let theme = WeatherTheme::default();
        Self {
            theme,
            icon: theme.icon,
            weather_code: None,
            high_temp: None,
            low_temp: None,
        }
    }
}

impl DisplayState {
    /// Temperatures always take the new values. Theme and icon only change when
    /// the code classifies, otherwise the last good ones stay up.
    pub fn apply(&mut self, update: &WeatherUpdate) {
        self.high_temp = Some(update.high_temp.clone());
        self.low_temp = Some(update.low_temp.clone());
        match sw_weather::condition(update.code) {
            Some(condition) => {
                self.theme = resolve_theme(condition.category);
                self.icon = condition.icon;
                self.weather_code = Some(update.code);
                info!(
                    "weather {} -> {}, H{} L{}",
                    update.code,
                    <&str>::from(condition.category),
                    update.high_temp,
                    update.low_temp
                );
            }
            None => warn!(
                "unclassified weather code {}, keeping {:?}",
                update.code, self.icon
            ),
        }
    }

    /// High and low with the degree mark, `None` until the first update
    pub fn temperature_labels(&self) -> Option<(String, String)> {
        let high = self.high_temp.as_ref()?;
        let low = self.low_temp.as_ref()?;
        Some((format!("{high}\u{00B0}"), format!("{low}\u{00B0}")))
    }
}
