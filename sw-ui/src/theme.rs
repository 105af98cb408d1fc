use embedded_graphics::pixelcolor::Rgb888;
use sw_weather::{WeatherCategory, WeatherIcon};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherTheme {
    pub background: Rgb888,
    /// Hand color at the tip
    pub hand_dark: Rgb888,
    /// Hand color at the center
    pub hand_light: Rgb888,
    pub number: Rgb888,
    pub icon: WeatherIcon,
}

const SUNNY_SKY: Rgb888 = Rgb888::new(0x29, 0xB6, 0xF6);
const RAIN_SLATE: Rgb888 = Rgb888::new(0x45, 0x5A, 0x64);
const STORM_NIGHT: Rgb888 = Rgb888::new(0x26, 0x32, 0x38);
const CLOUD_GREY: Rgb888 = Rgb888::new(0x78, 0x90, 0x9C);
const FOG_GREY: Rgb888 = Rgb888::new(0x9E, 0x9E, 0x9E);
const SNOW_BLUE: Rgb888 = Rgb888::new(0x90, 0xA4, 0xAE);

const CLOUDY_COLORS: (Rgb888, Rgb888, Rgb888, Rgb888) = (
    CLOUD_GREY,
    Rgb888::new(0x61, 0x61, 0x61),
    Rgb888::new(0xEE, 0xEE, 0xEE),
    Rgb888::new(0xFF, 0xFF, 0xFF),
);

const fn theme(colors: (Rgb888, Rgb888, Rgb888, Rgb888), icon: WeatherIcon) -> WeatherTheme {
    WeatherTheme {
        background: colors.0,
        hand_dark: colors.1,
        hand_light: colors.2,
        number: colors.3,
        icon,
    }
}

// Indexed by WeatherCategory tag
const THEMES: [WeatherTheme; 7] = [
    // Clear
    theme(
        (
            SUNNY_SKY,
            Rgb888::new(0xFB, 0xC0, 0x2D),
            Rgb888::new(0xFF, 0xF1, 0x76),
            Rgb888::new(0xFF, 0xFF, 0xFF),
        ),
        WeatherIcon::Clear,
    ),
    // Rainy
    theme(
        (
            RAIN_SLATE,
            Rgb888::new(0x19, 0x76, 0xD2),
            Rgb888::new(0x90, 0xCA, 0xF9),
            Rgb888::new(0xE3, 0xF2, 0xFD),
        ),
        WeatherIcon::Rain,
    ),
    // Stormy
    theme(
        (
            STORM_NIGHT,
            Rgb888::new(0x75, 0x75, 0x75),
            Rgb888::new(0xFA, 0xFA, 0xFA),
            Rgb888::new(0xFF, 0xEB, 0x3B),
        ),
        WeatherIcon::Storm,
    ),
    // Cloudy
    theme(CLOUDY_COLORS, WeatherIcon::Cloudy),
    // Foggy
    theme(
        (
            FOG_GREY,
            Rgb888::new(0xF5, 0xF5, 0xF5),
            Rgb888::new(0xFF, 0xFF, 0xFF),
            Rgb888::new(0xF5, 0xF5, 0xF5),
        ),
        WeatherIcon::Fog,
    ),
    // Snowing
    theme(
        (
            SNOW_BLUE,
            Rgb888::new(0xE0, 0xF7, 0xFA),
            Rgb888::new(0xFF, 0xFF, 0xFF),
            Rgb888::new(0x01, 0x57, 0x9B),
        ),
        WeatherIcon::Snow,
    ),
    // LightCloudy
    theme(CLOUDY_COLORS, WeatherIcon::LightClouds),
];

pub fn resolve_theme(category: WeatherCategory) -> WeatherTheme {
    THEMES[category.tag() as usize]
}

impl Default for WeatherTheme {
    fn default() -> Self {
        resolve_theme(WeatherCategory::Clear)
    }
}
