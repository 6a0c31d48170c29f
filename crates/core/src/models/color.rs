use serde::{Deserialize, Serialize};

use super::expense::Category;

/// An opaque RGB value handed to the rendering layer.
///
/// The core knows nothing about pixels or themes; this is just a
/// stable triple the frontend can map onto whatever color type it
/// draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Hex form for web-based frontends, e.g. "#e91e63".
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The fixed chart palette, one entry per category, in `Category::ALL`
/// order (pink, indigo, purple, amber, green, deep orange, teal,
/// light blue, grey).
pub const PALETTE: [Color; 9] = [
    Color::from_rgb(0xE91E63),
    Color::from_rgb(0x3F51B5),
    Color::from_rgb(0x9C27B0),
    Color::from_rgb(0xFFC107),
    Color::from_rgb(0x4CAF50),
    Color::from_rgb(0xFF5722),
    Color::from_rgb(0x009688),
    Color::from_rgb(0x03A9F4),
    Color::from_rgb(0x9E9E9E),
];

/// Color for a position in a sorted listing: cycles through `PALETTE`.
///
/// Deterministic for a given ordering, but NOT sticky across data
/// changes. If amounts reorder a breakdown, a category can come up in
/// a different color than last time. Callers that need per-category
/// stability use `color_for_category` instead.
pub fn color_for_index(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// The fixed per-category color table. Stable regardless of data.
pub fn color_for_category(category: Category) -> Color {
    match category {
        Category::Food => Color::from_rgb(0xE91E63),      // pink
        Category::Transport => Color::from_rgb(0x3F51B5), // indigo
        Category::Fun => Color::from_rgb(0x9C27B0),       // purple
        Category::Shopping => Color::from_rgb(0xFFC107),  // amber
        Category::Health => Color::from_rgb(0x4CAF50),    // green
        Category::Bills => Color::from_rgb(0xFF5722),     // deep orange
        Category::Education => Color::from_rgb(0x009688), // teal
        Category::Travel => Color::from_rgb(0x03A9F4),    // light blue
        Category::Other => Color::from_rgb(0x9E9E9E),     // grey
    }
}
