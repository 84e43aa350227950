use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

const MAX_CHANNEL: f64 = 255.0;

/// An RGB color with real-valued channels in `0.0..=255.0`.
///
/// Channels are not rounded: repeated darkening produces fractional values such
/// as `rgb(174.5, 74.5, 24.5)`, and those compare unequal to their rounded
/// neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised color `{0}`")]
pub struct ColorParseError(pub String);

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(255.0, 255.0, 255.0);
    pub const RED: Color = Color::rgb(255.0, 0.0, 0.0);
    pub const ORANGE: Color = Color::rgb(255.0, 165.0, 0.0);
    pub const YELLOW: Color = Color::rgb(255.0, 255.0, 0.0);
    pub const LIGHT_BLUE: Color = Color::rgb(173.0, 216.0, 230.0);
    pub const INDIGO: Color = Color::rgb(75.0, 0.0, 130.0);
    pub const VIOLET: Color = Color::rgb(238.0, 130.0, 238.0);

    pub const fn rgb(red: f64, green: f64, blue: f64) -> Color {
        Color { red, green, blue }
    }

    /// Subtract `percent` of the full channel range from every channel, flooring at 0.
    pub fn darken(&self, percent: f64) -> Color {
        let amount = percent * MAX_CHANNEL / 100.0;
        let darker = |channel: f64| (channel - amount).max(0.0);
        Color::rgb(darker(self.red), darker(self.green), darker(self.blue))
    }

    /// Channels scaled to `0.0..=1.0`, the form cairo and gdk expect.
    pub fn to_unit_rgb(&self) -> (f64, f64, f64) {
        (
            self.red / MAX_CHANNEL,
            self.green / MAX_CHANNEL,
            self.blue / MAX_CHANNEL,
        )
    }

    pub fn from_unit_rgb(red: f64, green: f64, blue: f64) -> Color {
        let scale = |channel: f64| (channel.clamp(0.0, 1.0) * MAX_CHANNEL).round();
        Color::rgb(scale(red), scale(green), scale(blue))
    }

    pub fn named(name: &str) -> Option<Color> {
        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
    }

    fn parse_rgb_function(body: &str) -> Option<Color> {
        let (red, green, blue) = body
            .split(',')
            .map(|part| part.trim().parse::<f64>().ok())
            .collect_tuple()?;
        let channel = |value: Option<f64>| {
            value.filter(|c| c.is_finite() && (0.0..=MAX_CHANNEL).contains(c))
        };
        Some(Color::rgb(channel(red)?, channel(green)?, channel(blue)?))
    }

    fn parse_hex(digits: &str) -> Option<Color> {
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .ok()
                .map(f64::from)
        };
        Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

const NAMED_COLORS: [(&str, Color); 8] = [
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("red", Color::RED),
    ("orange", Color::ORANGE),
    ("yellow", Color::YELLOW),
    ("lightblue", Color::LIGHT_BLUE),
    ("indigo", Color::INDIGO),
    ("violet", Color::VIOLET),
];

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let lowered = text.to_ascii_lowercase();
        let parsed = if let Some(body) = lowered
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Color::parse_rgb_function(body)
        } else if let Some(digits) = lowered.strip_prefix('#') {
            Color::parse_hex(digits)
        } else {
            Color::named(&lowered)
        };
        parsed.ok_or_else(|| ColorParseError(text.to_string()))
    }
}
