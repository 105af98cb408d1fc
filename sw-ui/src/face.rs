//! Watch face controller and its event loop.
//!
//! Everything that changes the face arrives as an [`Event`] and is handled to
//! completion before the next one, so the draw path never sees a half applied
//! update. Collaborators on other threads only get a [`FaceSender`].

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::FaceConfig;
use crate::dial::{DialGeometry, DialPoint, HandAngles, TickMark, WallClockTime};
use crate::state::{DisplayState, WeatherUpdate};

/// Interactive mode redraws once a second to move the second hand
pub const INTERACTIVE_UPDATE_RATE: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum Event {
    Tick(WallClockTime),
    WeatherUpdate(WeatherUpdate),
    WeatherFetched(anyhow::Result<WeatherUpdate>),
    VisibilityChanged(bool),
    AmbientModeChanged(bool),
    PropertiesChanged { low_bit_ambient: bool },
    Destroy,
}

/// Everything the renderer needs for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub center: DialPoint,
    pub hands: HandAngles,
    pub ticks: [TickMark; 12],
    pub show_second_hand: bool,
    pub ambient: bool,
    pub low_bit_ambient: bool,
}

#[derive(Debug)]
pub struct WatchFace {
    config: FaceConfig,
    geometry: DialGeometry,
    center: DialPoint,
    state: DisplayState,
    time: Option<WallClockTime>,
    visible: bool,
    ambient: bool,
    low_bit_ambient: bool,
    destroyed: bool,
}

impl WatchFace {
    /// `width` and `height` are the drawing surface, the dial is centered on it
    pub fn new(config: FaceConfig, width: u32, height: u32) -> Self {
        Self {
            geometry: (&config).into(),
            config,
            center: DialPoint::new(width as f32 / 2.0, height as f32 / 2.0),
            state: DisplayState::default(),
            time: None,
            visible: true,
            ambient: false,
            low_bit_ambient: false,
            destroyed: false,
        }
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn on_tick(&self, time: WallClockTime) -> Frame {
        Frame {
            center: self.center,
            hands: self.geometry.hand_angles(time),
            ticks: self.geometry.tick_marks(self.center),
            show_second_hand: !self.ambient,
            ambient: self.ambient,
            low_bit_ambient: self.low_bit_ambient && self.ambient,
        }
    }

    /// Frame for the last ticked time, `None` before the first tick
    pub fn frame(&self) -> Option<Frame> {
        self.time.map(|time| self.on_tick(time))
    }

    pub fn on_weather_update(&mut self, code: i32, high_temp: &str, low_temp: &str) {
        self.apply_weather(&WeatherUpdate::new(code, high_temp, low_temp));
    }

    fn apply_weather(&mut self, update: &WeatherUpdate) {
        if self.destroyed {
            warn!("face torn down, dropping weather {}", update.code);
            return;
        }
        self.state.apply(update);
    }

    pub fn on_visibility_changed(&mut self, visible: bool) {
        self.visible = visible;
        debug!("visible: {visible}, timer running: {}", self.should_timer_be_running());
    }

    pub fn on_ambient_mode_changed(&mut self, ambient: bool) {
        self.ambient = ambient;
        debug!("ambient: {ambient}, timer running: {}", self.should_timer_be_running());
    }

    pub fn on_properties_changed(&mut self, low_bit_ambient: bool) {
        self.low_bit_ambient = low_bit_ambient;
    }

    /// The 1 Hz timer only runs while the face is visible and interactive
    pub fn should_timer_be_running(&self) -> bool {
        self.visible && !self.ambient && !self.destroyed
    }

    pub fn destroy(&mut self) {
        info!("watch face destroyed");
        self.destroyed = true;
    }

    /// Applies one event. Returns true when the face needs a redraw.
    pub fn handle(&mut self, event: Event) -> bool {
        if self.destroyed {
            debug!("ignoring {event:?} after destroy");
            return false;
        }
        match event {
            Event::Tick(time) => {
                let changed = match self.time.replace(time) {
                    None => true,
                    // ambient only moves on the minute
                    Some(prev) if self.ambient => {
                        (prev.hour, prev.minute) != (time.hour, time.minute)
                    }
                    Some(prev) => prev != time,
                };
                self.visible && changed
            }
            Event::WeatherUpdate(update) => {
                self.apply_weather(&update);
                true
            }
            Event::WeatherFetched(Ok(update)) => {
                self.apply_weather(&update);
                true
            }
            Event::WeatherFetched(Err(e)) => {
                warn!("discarding weather fetch: {e:#}");
                false
            }
            Event::VisibilityChanged(visible) => {
                self.on_visibility_changed(visible);
                visible
            }
            Event::AmbientModeChanged(ambient) => {
                let changed = self.ambient != ambient;
                self.on_ambient_mode_changed(ambient);
                changed
            }
            Event::PropertiesChanged { low_bit_ambient } => {
                let changed = self.low_bit_ambient != low_bit_ambient;
                self.on_properties_changed(low_bit_ambient);
                changed && self.ambient
            }
            Event::Destroy => {
                self.destroy();
                false
            }
        }
    }
}

/// Time until the next whole second, so ticks line up with the wall clock
pub fn next_tick_delay(now_ms: u64) -> Duration {
    let rate = INTERACTIVE_UPDATE_RATE.as_millis() as u64;
    Duration::from_millis(rate - now_ms % rate)
}

/// Producer side of a face's event queue
#[derive(Debug, Clone)]
pub struct FaceSender {
    tx: Sender<Event>,
}

impl FaceSender {
    /// Queues an event. Returns false when the face is gone and the event was dropped.
    pub fn send(&self, event: Event) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Owns the face and drains its queue on one thread
#[derive(Debug)]
pub struct FaceLoop {
    face: WatchFace,
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl FaceLoop {
    pub fn new(face: WatchFace) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { face, tx, rx }
    }

    pub fn sender(&self) -> FaceSender {
        FaceSender {
            tx: self.tx.clone(),
        }
    }

    pub fn face(&self) -> &WatchFace {
        &self.face
    }

    /// Handles every queued event in order. Returns true if any of them needs a redraw.
    pub fn pump(&mut self) -> bool {
        let mut redraw = false;
        while let Ok(event) = self.rx.try_recv() {
            redraw |= self.face.handle(event);
        }
        redraw
    }
}
