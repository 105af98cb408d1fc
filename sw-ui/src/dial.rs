//! Clock hand and number geometry for a 12 hour analog dial.
//!
//! Angles are radians measured clockwise from 12 o'clock and are not wrapped,
//! anything consuming them goes through sin/cos anyway.

use core::f32::consts::PI;

use chrono::Timelike;

use crate::config::FaceConfig;

/// Labels in tick order, index 0 is the 12
pub const CLOCK_NUMBERS: [u8; 12] = [12, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl WallClockTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub fn from_timelike<T: Timelike>(time: &T) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub second: f32,
    pub minute: f32,
    pub hour: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialPoint {
    pub x: f32,
    pub y: f32,
}

impl DialPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub index: usize,
    pub label: u8,
    pub angle: f32,
    pub position: DialPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub offset_degrees: f32,
    pub number_inset: f32,
    pub number_padding: f32,
    pub second_inset: f32,
    pub minute_inset: f32,
    pub hour_inset: f32,
}

impl From<&FaceConfig> for DialGeometry {
    fn from(value: &FaceConfig) -> Self {
        Self {
            offset_degrees: value.tick_offset_degrees,
            number_inset: value.number_inset,
            number_padding: value.number_padding,
            second_inset: value.second_hand_inset,
            minute_inset: value.minute_hand_inset,
            hour_inset: value.hour_hand_inset,
        }
    }
}

impl Default for DialGeometry {
    fn default() -> Self {
        (&FaceConfig::default()).into()
    }
}

pub fn hand_angles(time: WallClockTime) -> HandAngles {
    let minute = time.minute as f32;
    HandAngles {
        second: time.second as f32 / 30.0 * PI,
        minute: minute / 30.0 * PI,
        hour: ((time.hour as f32 + minute / 60.0) / 6.0) * PI,
    }
}

/// End of a hand of `length` starting at `center`. Screen y grows downward.
pub fn hand_end(center: DialPoint, angle: f32, length: f32) -> DialPoint {
    DialPoint::new(
        center.x + angle.sin() * length,
        center.y - angle.cos() * length,
    )
}

impl DialGeometry {
    pub fn hand_angles(&self, time: WallClockTime) -> HandAngles {
        hand_angles(time)
    }

    /// Number positions around the dial, starting at `offset_degrees` and going
    /// clockwise in 30 degree steps.
    pub fn tick_marks(&self, center: DialPoint) -> [TickMark; 12] {
        let radius_x = center.x - self.number_inset;
        let radius_y = center.y - self.number_padding;
        core::array::from_fn(|index| {
            let angle = (index as f32 * 30.0 + self.offset_degrees).to_radians();
            TickMark {
                index,
                label: CLOCK_NUMBERS[index],
                angle,
                position: DialPoint::new(
                    center.x + angle.cos() * radius_x,
                    center.y + angle.sin() * radius_y,
                ),
            }
        })
    }

    pub fn second_length(&self, center: DialPoint) -> f32 {
        (center.x - self.second_inset).max(0.0)
    }

    pub fn minute_length(&self, center: DialPoint) -> f32 {
        (center.x - self.minute_inset).max(0.0)
    }

    pub fn hour_length(&self, center: DialPoint) -> f32 {
        (center.x - self.hour_inset).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_second_angles() {
        assert_eq!(hand_angles(WallClockTime::new(0, 0, 0)).second, 0.0);
        assert!(close(hand_angles(WallClockTime::new(0, 0, 30)).second, PI));
        assert!(close(
            hand_angles(WallClockTime::new(0, 0, 59)).second,
            59.0 / 30.0 * PI
        ));
    }

    #[test]
    fn test_minute_angles() {
        assert_eq!(hand_angles(WallClockTime::new(0, 0, 0)).minute, 0.0);
        assert!(close(hand_angles(WallClockTime::new(0, 30, 0)).minute, PI));
        assert!(close(
            hand_angles(WallClockTime::new(0, 59, 0)).minute,
            59.0 / 30.0 * PI
        ));
    }

    #[test]
    fn test_hour_angles() {
        assert_eq!(hand_angles(WallClockTime::new(0, 0, 0)).hour, 0.0);
        assert!(close(hand_angles(WallClockTime::new(6, 0, 0)).hour, PI));
        assert!(close(
            hand_angles(WallClockTime::new(11, 0, 0)).hour,
            11.0 / 6.0 * PI
        ));
        assert!(close(hand_angles(WallClockTime::new(12, 0, 0)).hour, 2.0 * PI));
        assert!(close(
            hand_angles(WallClockTime::new(23, 0, 0)).hour,
            23.0 / 6.0 * PI
        ));
        // minutes move the hour hand between numbers
        assert!(close(
            hand_angles(WallClockTime::new(6, 30, 0)).hour,
            6.5 / 6.0 * PI
        ));
    }

    #[test]
    fn test_half_past_two_pm() {
        let angles = hand_angles(WallClockTime::new(14, 30, 0));
        assert!((angles.hour - 7.592).abs() < 1e-3);
        assert!(close(angles.minute, PI));
        assert_eq!(angles.second, 0.0);
    }

    #[test]
    fn test_from_timelike() {
        let time = chrono::NaiveTime::from_hms_opt(23, 59, 58).unwrap();
        assert_eq!(
            WallClockTime::from_timelike(&time),
            WallClockTime::new(23, 59, 58)
        );
    }

    #[test]
    fn test_hand_end_points() {
        let center = DialPoint::new(100.0, 100.0);
        let up = hand_end(center, 0.0, 50.0);
        assert!(close(up.x, 100.0) && close(up.y, 50.0));
        let right = hand_end(center, PI / 2.0, 50.0);
        assert!(close(right.x, 150.0) && close(right.y, 100.0));
        let down = hand_end(center, PI, 50.0);
        assert!(close(down.x, 100.0) && close(down.y, 150.0));
    }

    #[test]
    fn test_twelve_ticks_thirty_degrees_apart() {
        let geometry = DialGeometry::default();
        let ticks = geometry.tick_marks(DialPoint::new(160.0, 160.0));
        assert_eq!(ticks.len(), 12);
        for pair in ticks.windows(2) {
            assert!(close(pair[1].angle - pair[0].angle, 30f32.to_radians()));
        }
        let mut labels: Vec<u8> = ticks.iter().map(|t| t.label).collect();
        assert_eq!(labels, CLOCK_NUMBERS.to_vec());
        labels.sort();
        labels.dedup();
        assert_eq!(labels, (1..=12).collect::<Vec<u8>>());
        for (i, tick) in ticks.iter().enumerate() {
            assert_eq!(tick.index, i);
        }
    }

    #[test]
    fn test_twelve_on_top() {
        let geometry = DialGeometry::default();
        let ticks = geometry.tick_marks(DialPoint::new(160.0, 160.0));
        // 12 straight up, padding 30 from the top edge
        assert!(close(ticks[0].position.x, 160.0));
        assert!(close(ticks[0].position.y, 30.0));
        // 3 to the right, inset 20 from the edge
        assert!(close(ticks[3].position.x, 300.0));
        assert!(close(ticks[3].position.y, 160.0));
        // 6 at the bottom
        assert!(close(ticks[6].position.y, 290.0));
    }

    #[test]
    fn test_offset_is_configurable() {
        let geometry = DialGeometry {
            offset_degrees: 90.0,
            ..DialGeometry::default()
        };
        let ticks = geometry.tick_marks(DialPoint::new(160.0, 160.0));
        assert_eq!(ticks[0].label, 12);
        assert!(close(ticks[0].position.x, 160.0));
        assert!(close(ticks[0].position.y, 290.0));
    }

    #[test]
    fn test_hand_lengths() {
        let geometry = DialGeometry::default();
        let center = DialPoint::new(160.0, 160.0);
        assert_eq!(geometry.second_length(center), 120.0);
        assert_eq!(geometry.minute_length(center), 100.0);
        assert_eq!(geometry.hour_length(center), 60.0);
        // tiny displays don't get negative hands
        assert_eq!(geometry.hour_length(DialPoint::new(32.0, 32.0)), 0.0);
    }
}
