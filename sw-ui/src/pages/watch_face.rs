use core::fmt::Debug;

use crate::config::FaceConfig;
use crate::dial::{hand_end, DialGeometry, DialPoint};
use crate::face::Frame;
use crate::state::DisplayState;
use crate::Icons40;
use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::{Rgb565, Rgb888},
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT};
use sw_weather::WeatherIcon;
use thiserror::Error;
use tinybmp::Bmp;

/// Icon pixels in this color are not drawn
const ICON_KEY: Rgb565 = Rgb565::new(31, 0, 31);
const GRADIENT_STEPS: usize = 6;
const TEMP_TEXT_SHIFT: i32 = 25;

#[derive(Debug, Error)]
pub enum FaceRenderError {
    #[error("Display Error: {0}")]
    Display(String),
    #[error("BMP")]
    BMP(tinybmp::ParseError),
    #[error("Couldn't find icon: {0}")]
    MissingIcon(&'static str),
}

fn display_err<E: Debug>(e: E) -> FaceRenderError {
    FaceRenderError::Display(format!("{e:?}"))
}

pub fn draw<D>(
    display: &mut D,
    frame: &Frame,
    state: &DisplayState,
    config: &FaceConfig,
) -> Result<(), FaceRenderError>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: Debug,
{
    let theme = &state.theme;
    let Size { width, height } = display.bounding_box().size;

    // background fill
    let background = if frame.ambient {
        Rgb565::BLACK
    } else {
        theme.background.into()
    };
    display.clear(background).map_err(display_err)?;

    // ambient text is white on black whatever the theme
    let number_color: Rgb565 = if frame.ambient {
        Rgb565::WHITE
    } else {
        theme.number.into()
    };
    let number_text = MonoTextStyle::new(&PROFONT_14_POINT, number_color);
    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    for tick in &frame.ticks {
        Text::with_text_style(
            &tick.label.to_string(),
            to_point(tick.position),
            number_text,
            centered,
        )
        .draw(display)
        .map_err(display_err)?;
    }

    let center = frame.center;
    let geometry = DialGeometry::from(config);
    let mut hands = vec![];
    if frame.show_second_hand {
        hands.push((frame.hands.second, geometry.second_length(center)));
    }
    hands.push((frame.hands.minute, geometry.minute_length(center)));
    hands.push((frame.hands.hour, geometry.hour_length(center)));
    for (angle, length) in hands {
        let end = hand_end(center, angle, length);
        if frame.low_bit_ambient {
            Line::new(to_point(center), to_point(end))
                .into_styled(PrimitiveStyle::with_stroke(Rgb565::WHITE, 1))
                .draw(display)
                .map_err(display_err)?;
        } else {
            draw_gradient_hand(
                display,
                center,
                end,
                theme.hand_light,
                theme.hand_dark,
                config.hand_width,
            )?;
        }
    }

    if !frame.ambient {
        let origin = Point::new(
            width as i32 - config.icon_offset,
            height as i32 - config.icon_offset,
        );
        draw_icon(display, state.icon, origin)?;
    }

    if let Some((high, low)) = state.temperature_labels() {
        let temp_text = MonoTextStyle::new(&PROFONT_18_POINT, number_color);
        let y = center.y as i32 + config.temp_offset;
        let x = center.x as i32 - TEMP_TEXT_SHIFT;
        Text::new(&high, Point::new(x - config.temp_offset, y), temp_text)
            .draw(display)
            .map_err(display_err)?;
        Text::new(&low, Point::new(x + config.temp_offset, y), temp_text)
            .draw(display)
            .map_err(display_err)?;
    }
    Ok(())
}

/// Draws the hand in short segments fading from `light` at the center to `dark` at the tip
fn draw_gradient_hand<D>(
    display: &mut D,
    from: DialPoint,
    to: DialPoint,
    light: Rgb888,
    dark: Rgb888,
    width: u32,
) -> Result<(), FaceRenderError>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: Debug,
{
    for step in 0..GRADIENT_STEPS {
        let t0 = step as f32 / GRADIENT_STEPS as f32;
        let t1 = (step + 1) as f32 / GRADIENT_STEPS as f32;
        let mid = (step as f32 + 0.5) / GRADIENT_STEPS as f32;
        let color: Rgb565 = lerp_color(light, dark, mid).into();
        Line::new(to_point(lerp(from, to, t0)), to_point(lerp(from, to, t1)))
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(display)
            .map_err(display_err)?;
    }
    Ok(())
}

fn draw_icon<D>(display: &mut D, icon: WeatherIcon, origin: Point) -> Result<(), FaceRenderError>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: Debug,
{
    let icon_path = icon.file_name();
    let Some(file) = Icons40::get(icon_path) else {
        return Err(FaceRenderError::MissingIcon(icon_path));
    };
    let bmp = Bmp::<Rgb565>::from_slice(&file.data).map_err(FaceRenderError::BMP)?;
    let pixels = bmp
        .pixels()
        .filter(|p| p.1 != ICON_KEY)
        .map(|p| Pixel(origin + p.0, p.1));
    display.draw_iter(pixels).map_err(display_err)
}

fn lerp(a: DialPoint, b: DialPoint, t: f32) -> DialPoint {
    DialPoint::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

fn lerp_color(a: Rgb888, b: Rgb888, t: f32) -> Rgb888 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgb888::new(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

fn to_point(p: DialPoint) -> Point {
    Point::new(p.x.round() as i32, p.y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dial::WallClockTime;
    use crate::face::WatchFace;
    use core::convert::Infallible;

    struct Framebuffer {
        size: Size,
        pixels: Vec<Rgb565>,
    }

    impl Framebuffer {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: Size::new(width, height),
                pixels: vec![Rgb565::BLACK; (width * height) as usize],
            }
        }

        fn pixel(&self, x: u32, y: u32) -> Rgb565 {
            self.pixels[(y * self.size.width + x) as usize]
        }
    }

    impl OriginDimensions for Framebuffer {
        fn size(&self) -> Size {
            self.size
        }
    }

    impl DrawTarget for Framebuffer {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, color) in pixels {
                if p.x >= 0
                    && p.y >= 0
                    && (p.x as u32) < self.size.width
                    && (p.y as u32) < self.size.height
                {
                    let i = p.y as u32 * self.size.width + p.x as u32;
                    self.pixels[i as usize] = color;
                }
            }
            Ok(())
        }
    }

    const SUN: Rgb888 = Rgb888::new(255, 193, 7);

    #[test]
    fn test_interactive_frame() {
        let face = WatchFace::new(FaceConfig::default(), 320, 320);
        let frame = face.on_tick(WallClockTime::new(10, 10, 30));
        let mut fb = Framebuffer::new(320, 320);
        draw(&mut fb, &frame, face.state(), face.config()).unwrap();

        let background: Rgb565 = face.state().theme.background.into();
        assert_eq!(fb.pixel(0, 0), background);
        assert_ne!(fb.pixel(160, 160), background);
        // middle of the sun icon
        assert_eq!(fb.pixel(280, 280), Rgb565::from(SUN));
        // keyed corner of the icon shows the background
        assert_eq!(fb.pixel(261, 261), background);
    }

    #[test]
    fn test_ambient_frame() {
        let mut face = WatchFace::new(FaceConfig::default(), 320, 320);
        face.on_properties_changed(true);
        face.on_ambient_mode_changed(true);
        face.on_weather_update(500, "12", "4");
        let frame = face.on_tick(WallClockTime::new(3, 0, 0));
        let mut fb = Framebuffer::new(320, 320);
        draw(&mut fb, &frame, face.state(), face.config()).unwrap();

        assert_eq!(fb.pixel(0, 0), Rgb565::BLACK);
        assert_eq!(fb.pixel(280, 280), Rgb565::BLACK);
        // minute hand points straight up, drawn flat in low bit mode
        assert_eq!(fb.pixel(160, 110), Rgb565::WHITE);
    }

    #[test]
    fn test_ambient_text_is_white() {
        let mut face = WatchFace::new(FaceConfig::default(), 320, 320);
        // snow has a dark number color
        face.on_weather_update(601, "-2", "-8");
        face.on_ambient_mode_changed(true);
        let frame = face.on_tick(WallClockTime::new(3, 15, 0));
        let mut fb = Framebuffer::new(320, 320);
        draw(&mut fb, &frame, face.state(), face.config()).unwrap();

        let twelve = to_point(frame.ticks[0].position);
        let mut lit = 0;
        for y in twelve.y - 10..=twelve.y + 10 {
            for x in twelve.x - 12..=twelve.x + 12 {
                let color = fb.pixel(x as u32, y as u32);
                if color != Rgb565::BLACK {
                    assert_eq!(color, Rgb565::WHITE, "({x}, {y})");
                    lit += 1;
                }
            }
        }
        assert!(lit > 0);

        let mut interactive = WatchFace::new(FaceConfig::default(), 320, 320);
        interactive.on_weather_update(601, "-2", "-8");
        let number: Rgb565 = interactive.state().theme.number.into();
        assert_ne!(number, Rgb565::WHITE);
    }

    #[test]
    fn test_every_icon_is_embedded() {
        for icon in [
            WeatherIcon::Storm,
            WeatherIcon::LightRain,
            WeatherIcon::Rain,
            WeatherIcon::Snow,
            WeatherIcon::Fog,
            WeatherIcon::Clear,
            WeatherIcon::LightClouds,
            WeatherIcon::Cloudy,
        ] {
            let mut fb = Framebuffer::new(40, 40);
            draw_icon(&mut fb, icon, Point::zero()).unwrap();
        }
    }

    #[test]
    fn test_temperatures_drawn() {
        let mut face = WatchFace::new(FaceConfig::default(), 320, 320);
        let frame = face.on_tick(WallClockTime::new(0, 0, 0));
        let mut without = Framebuffer::new(320, 320);
        draw(&mut without, &frame, face.state(), face.config()).unwrap();

        face.on_weather_update(800, "25", "14");
        let mut with = Framebuffer::new(320, 320);
        draw(&mut with, &frame, face.state(), face.config()).unwrap();
        assert_ne!(without.pixels, with.pixels);
    }

    #[test]
    fn test_lerp_color_ends() {
        let a = Rgb888::new(0, 100, 200);
        let b = Rgb888::new(200, 100, 0);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        assert_eq!(lerp_color(a, b, 0.5), Rgb888::new(100, 100, 100));
    }
}
