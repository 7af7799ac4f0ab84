use crate::layout::Category;
use palette::encoding;
use palette::{FromColor, Hsl, Srgb};
use ringdraw::Color;
use serde::{Deserialize, Serialize};

const TICK_SATURATION: f64 = 0.55;
const TICK_LIGHTNESS: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorTable {
    pub lifestyle: Color,
    pub mental: Color,
    pub physical: Color,
    pub nutrition: Color,
    pub total: Color,
    pub track: Color,
    pub glow: Color,
    pub glow_opacity: f64,
    pub label: Color,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            lifestyle: Color::rgb(0xf5, 0xa6, 0x23),
            mental: Color::rgb(0x9b, 0x59, 0xb6),
            physical: Color::rgb(0x2e, 0xcc, 0x71),
            nutrition: Color::rgb(0x34, 0x98, 0xdb),
            total: Color::rgb(0xe7, 0x4c, 0x3c),
            track: Color::rgb(0xe6, 0xe6, 0xe6),
            glow: Color::rgb(0x00, 0x00, 0x00),
            glow_opacity: 0.25,
            label: Color::rgb(0x33, 0x33, 0x33),
        }
    }
}

impl ColorTable {
    pub fn category(&self, category: Category) -> Color {
        match category {
            Category::Lifestyle => self.lifestyle,
            Category::Mental => self.mental,
            Category::Physical => self.physical,
            Category::Nutrition => self.nutrition,
            Category::Total => self.total,
        }
    }
}

/// Tick colour for a ring of `radius`: the hue walks once around the
/// colour wheel every 200 units of radius.
pub fn tick_color(radius: f64) -> Color {
    let hue = (radius / 200.0).rem_euclid(1.0) * 360.0;
    let hsl: Hsl<encoding::Srgb, f64> = Hsl::new(hue, TICK_SATURATION, TICK_LIGHTNESS);
    let rgb = Srgb::<f64>::from_color(hsl);
    Color::from(rgb.into_format::<u8>())
}
