use std::fs;
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use embedded_graphics::{geometry::Size, pixelcolor::Rgb565};
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use log::{info, warn};
use serde::Deserialize;
use sw_ui::dial::WallClockTime;
use sw_ui::face::next_tick_delay;
use sw_ui::sync::{DataItem, ForecastListener};
use sw_ui::{Event, FaceConfig, FaceLoop, FaceSender, WatchFace, WeatherUpdate};
use sw_weather_openweather::OpenWeather;

// how often window events are polled between ticks
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(version, about = "Runs the Sunshine watch face in a window", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// JSON data item (or array of them) replayed as a push from the phone
    #[arg(short, long)]
    data_item: Option<PathBuf>,

    /// Start in ambient mode
    #[arg(long)]
    ambient: bool,

    /// Draw ambient mode as a low bit display
    #[arg(long)]
    low_bit: bool,

    /// Don't fetch the forecast
    #[arg(long)]
    offline: bool,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    weather: Option<ConfigWeather>,
    #[serde(default)]
    display: ConfigDisplay,
    #[serde(default)]
    face: FaceConfig,
}

#[derive(Debug, Deserialize)]
pub struct ConfigWeather {
    api_key: String,
    zip_code: u32,
    country_code: String,
    #[serde(default = "default_units")]
    units: String,
}

fn default_units() -> String {
    "metric".to_owned()
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConfigDisplay {
    width: u32,
    height: u32,
    scale: u32,
}

impl Default for ConfigDisplay {
    fn default() -> Self {
        Self {
            width: 320,
            height: 320,
            scale: 2,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataItems {
    One(DataItem),
    Many(Vec<DataItem>),
}

/// Modes as requested from the keyboard. The face only sees them after the
/// next pump, so toggles are tracked here.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Modes {
    ambient: bool,
    low_bit: bool,
    visible: bool,
}

impl Modes {
    fn toggle(&mut self, keycode: Keycode) -> Option<Event> {
        match keycode {
            Keycode::A => {
                self.ambient = !self.ambient;
                Some(Event::AmbientModeChanged(self.ambient))
            }
            Keycode::V => {
                self.visible = !self.visible;
                Some(Event::VisibilityChanged(self.visible))
            }
            Keycode::L => {
                self.low_bit = !self.low_bit;
                Some(Event::PropertiesChanged {
                    low_bit_ambient: self.low_bit,
                })
            }
            _ => None,
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        warn!("{} not found, using defaults", path.display());
        return Ok(toml::from_str("")?);
    }
    let config_str =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(toml::from_str(&config_str)?)
}

fn load_data_items(path: &Path) -> anyhow::Result<Vec<DataItem>> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(match serde_json::from_str(&json)? {
        DataItems::One(item) => vec![item],
        DataItems::Many(items) => items,
    })
}

fn start_fetch(config: &ConfigWeather, sender: FaceSender) -> anyhow::Result<()> {
    let weather_api = OpenWeather::new(
        &config.api_key,
        config.zip_code,
        &config.country_code,
        &config.units,
    );
    weather_api.spawn_fetch(move |result| {
        if !sender.send(Event::WeatherFetched(result.map(WeatherUpdate::from))) {
            warn!("watch face gone, discarding forecast");
        }
    })?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    //Load Config
    info!("loading config");
    let config = load_config(&args.config)?;
    let ConfigDisplay {
        width,
        height,
        scale,
    } = config.display;

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(width, height));
    let mut face_loop = FaceLoop::new(WatchFace::new(config.face.clone(), width, height));
    let sender = face_loop.sender();

    let mut modes = Modes {
        ambient: args.ambient,
        low_bit: args.low_bit,
        visible: true,
    };
    sender.send(Event::PropertiesChanged {
        low_bit_ambient: modes.low_bit,
    });
    sender.send(Event::AmbientModeChanged(modes.ambient));
    if let Some(path) = &args.data_item {
        let items = load_data_items(path)?;
        let queued = ForecastListener::new(sender.clone()).on_data_changed(&items);
        info!("replayed {queued} forecast item(s) from {}", path.display());
    }
    match (&config.weather, args.offline) {
        (_, true) => info!("offline, not fetching forecast"),
        (Some(weather), false) => start_fetch(weather, sender.clone())?,
        (None, false) => warn!("no [weather] section in config, not fetching forecast"),
    }

    let output_settings = OutputSettingsBuilder::new().scale(scale).build();
    let mut window = Window::new("Sunshine", &output_settings);

    'running: loop {
        sender.send(Event::Tick(WallClockTime::from_timelike(&Local::now())));
        if face_loop.pump() {
            let face = face_loop.face();
            if let Some(frame) = face.frame() {
                sw_ui::pages::watch_face::draw(&mut display, &frame, face.state(), face.config())?;
            }
        }
        window.update(&display);

        let mut quit = false;
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => quit = true,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if let Some(event) = modes.toggle(keycode) {
                        sender.send(event);
                    }
                }
                _ => {}
            }
        }
        if quit {
            sender.send(Event::Destroy);
            face_loop.pump();
            break 'running;
        }

        let now_ms = Local::now().timestamp_millis().max(0) as u64;
        let delay = if face_loop.face().should_timer_be_running() {
            next_tick_delay(now_ms).min(POLL_INTERVAL)
        } else {
            POLL_INTERVAL
        };
        sleep(delay);
    }
    info!("watch face closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            [weather]
            api_key = "abc"
            zip_code = 94043
            country_code = "US"

            [display]
            width = 240
            height = 240
            scale = 1

            [face]
            tick_offset_degrees = 90.0
            "#,
        )
        .unwrap();
        let weather = config.weather.unwrap();
        assert_eq!(weather.units, "metric");
        assert_eq!(weather.zip_code, 94043);
        assert_eq!(config.display.width, 240);
        assert_eq!(config.face.tick_offset_degrees, 90.0);
        assert_eq!(config.face.number_padding, 30.0);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.weather.is_none());
        assert_eq!(config.display.width, 320);
        assert_eq!(config.face, FaceConfig::default());
    }

    #[test]
    fn test_key_toggles_stack_before_pump() {
        let mut face_loop = FaceLoop::new(WatchFace::new(FaceConfig::default(), 320, 320));
        let sender = face_loop.sender();
        let mut modes = Modes {
            ambient: false,
            low_bit: false,
            visible: true,
        };
        for key in [Keycode::A, Keycode::A, Keycode::A, Keycode::L, Keycode::V] {
            sender.send(modes.toggle(key).unwrap());
        }
        assert!(modes.toggle(Keycode::Q).is_none());
        face_loop.pump();

        let face = face_loop.face();
        assert!(face.is_ambient());
        assert!(!face.is_visible());
        face_loop.sender().send(Event::Tick(WallClockTime::new(1, 0, 0)));
        face_loop.pump();
        assert!(face_loop.face().frame().unwrap().low_bit_ambient);
    }

    #[test]
    fn test_data_items_one_or_many() {
        let one: DataItems = serde_json::from_str(
            r#"{"path": "/forecast", "values": {"weather_id": 800, "high_temp": 20, "low_temp": 10}}"#,
        )
        .unwrap();
        assert!(matches!(one, DataItems::One(_)));
        let many: DataItems = serde_json::from_str(r#"[{"path": "/a"}, {"path": "/b"}]"#).unwrap();
        assert!(matches!(many, DataItems::Many(items) if items.len() == 2));
    }
}
