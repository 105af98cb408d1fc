use serde::Deserialize;

/// Layout of the face. Distances are in pixels and measured inward from the
/// center, matching how the hands and numbers are placed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    /// Where the number at index 0 (the 12) sits, in degrees from 3 o'clock.
    /// 270 puts it at the top.
    pub tick_offset_degrees: f32,
    pub number_padding: f32,
    pub number_inset: f32,
    pub second_hand_inset: f32,
    pub minute_hand_inset: f32,
    pub hour_hand_inset: f32,
    pub hand_width: u32,
    pub icon_offset: i32,
    pub temp_offset: i32,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            tick_offset_degrees: 270.0,
            number_padding: 30.0,
            number_inset: 20.0,
            second_hand_inset: 40.0,
            minute_hand_inset: 60.0,
            hour_hand_inset: 100.0,
            hand_width: 4,
            icon_offset: 60,
            temp_offset: 50,
        }
    }
}
