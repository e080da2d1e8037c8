use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a #rrggbb color")]
pub struct InvalidColor(pub String);

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const INDIGO: Rgb = Rgb::new(0x4f, 0x46, 0xe5);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear mix, `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

impl FromStr for Rgb {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl FontSize {
    pub const ALL: [FontSize; 4] = [
        FontSize::Small,
        FontSize::Medium,
        FontSize::Large,
        FontSize::ExtraLarge,
    ];

    pub fn px(self) -> u32 {
        match self {
            FontSize::Small => 12,
            FontSize::Medium => 14,
            FontSize::Large => 16,
            FontSize::ExtraLarge => 18,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
            FontSize::ExtraLarge => "Extra Large",
        }
    }

    pub fn from_px(px: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.px() == px)
    }

    pub fn next(self) -> Self {
        match self {
            FontSize::Small => FontSize::Medium,
            FontSize::Medium => FontSize::Large,
            FontSize::Large => FontSize::ExtraLarge,
            FontSize::ExtraLarge => FontSize::Small,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FontSize::Small => FontSize::ExtraLarge,
            FontSize::Medium => FontSize::Small,
            FontSize::Large => FontSize::Medium,
            FontSize::ExtraLarge => FontSize::Large,
        }
    }
}

/// Presentation of the grid, shared by the terminal view and the PNG export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customization {
    pub background_color: Rgb,
    pub text_color: Rgb,
    pub accent_color: Rgb,
    pub font_size: FontSize,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            background_color: Rgb::WHITE,
            text_color: Rgb::BLACK,
            accent_color: Rgb::INDIGO,
            font_size: FontSize::Medium,
        }
    }
}
