//! Artwork for toolbar stickers.
//!
//! Palette stickers carry a generated SVG tile (the emoji on a rounded
//! colored square) as a base64 data URL, so they render without a network
//! fetch. Shape stickers point at a flat placeholder image in the shape's
//! color, requested at twice the on-page size.

#[cfg(test)]
#[path = "sticker_test.rs"]
mod sticker_test;

use std::fmt;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::consts::{CIRCLE_SHAPE_PX, PLACEHOLDER_HOST, RECT_SHAPE_PX};
use crate::error::ParseEnumError;

/// A plain shape from the shapes palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerShape {
    Rectangle,
    Circle,
}

impl StickerShape {
    /// On-page side length in pixels.
    #[must_use]
    pub fn pixels(self) -> u32 {
        match self {
            Self::Rectangle => RECT_SHAPE_PX,
            Self::Circle => CIRCLE_SHAPE_PX,
        }
    }

    /// On-page side length in page-local units.
    #[must_use]
    pub fn size(self) -> f64 {
        f64::from(self.pixels())
    }

    /// Placeholder image in `color` (a `#rrggbb` string), at double resolution.
    #[must_use]
    pub fn placeholder_url(self, color: &str) -> String {
        let px = self.pixels() * 2;
        let hex = color.trim_start_matches('#');
        format!("{PLACEHOLDER_HOST}/{px}x{px}/{hex}/transparent?text=+")
    }
}

impl FromStr for StickerShape {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            other => Err(ParseEnumError::new("shape", other)),
        }
    }
}

impl fmt::Display for StickerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
        })
    }
}

/// SVG source for a palette sticker tile.
#[must_use]
pub fn tile_svg(emoji: &str, background: &str) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="220" height="220">"#,
            r#"<rect x="10" y="10" width="200" height="200" rx="36" fill="{bg}"/>"#,
            r#"<text x="110" y="138" font-size="98" text-anchor="middle">{emoji}</text>"#,
            "</svg>"
        ),
        bg = escape_xml(background),
        emoji = escape_xml(emoji),
    )
}

/// Palette sticker tile as a `data:` URL.
#[must_use]
pub fn tile_data_url(emoji: &str, background: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(tile_svg(emoji, background)))
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
