use rust_embed::RustEmbed;

pub mod config;
pub mod dial;
pub mod face;
pub mod pages;
pub mod state;
pub mod sync;
pub mod theme;

pub use config::FaceConfig;
pub use face::{Event, FaceLoop, FaceSender, Frame, WatchFace};
pub use state::{DisplayState, WeatherUpdate};

#[derive(RustEmbed)]
#[folder = "images/bmp/40/"]
struct Icons40;
