//! Terminal color code to HTML color tables
//!
//! Only the eight base colors are addressable:
//! - 30-37 / 40-47 and indexed colors 0-7 use [`STANDARD`]
//! - 90-97 / 100-107 use [`BRIGHT`]

/// Number of entries in each color table
pub const NUM_COLORS: usize = 8;

/// Standard color names, indexed by `code % 10`
pub const STANDARD: [&str; NUM_COLORS] = [
    "black",   // 0
    "red",     // 1
    "green",   // 2
    "#FFBB00", // 3: yellow, darkened for white pages
    "blue",    // 4
    "magenta", // 5
    "cyan",    // 6
    "white",   // 7
];

/// Bright color values, indexed by `code % 10`
pub const BRIGHT: [&str; NUM_COLORS] = [
    "#555555", // 0: Bright Black (Gray)
    "#FF5555", // 1
    "#55FF55", // 2
    "#FFFF55", // 3
    "#5555FF", // 4
    "#FF55FF", // 5
    "#55FFFF", // 6
    "#FFFFFF", // 7
];

/// Which of the two tables a color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Standard,
    Bright,
}

impl Palette {
    /// Look up a color, `None` if `index` is outside the table
    pub fn get(self, index: usize) -> Option<&'static str> {
        let table = match self {
            Palette::Standard => &STANDARD,
            Palette::Bright => &BRIGHT,
        };
        table.get(index).copied()
    }
}
