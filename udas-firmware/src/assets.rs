//! Embedded font tables
//!
//! Binary glyph tables produced by `tools/gen_fonts.py`, one per cell
//! size, laid out as 96 printable ASCII glyph blocks of
//! `height * bytes_per_row` bytes.

use udas_core::font::{Font, FontSet};

static FONT8: &[u8] = include_bytes!("../assets/font8.bin");
static FONT12: &[u8] = include_bytes!("../assets/font12.bin");
static FONT16: &[u8] = include_bytes!("../assets/font16.bin");
static FONT20: &[u8] = include_bytes!("../assets/font20.bin");
static FONT24: &[u8] = include_bytes!("../assets/font24.bin");

/// Build the font set, smallest to largest
pub fn font_set() -> FontSet {
    FontSet::new([
        Font::new(5, 8, FONT8),
        Font::new(7, 12, FONT12),
        Font::new(11, 16, FONT16),
        Font::new(14, 20, FONT20),
        Font::new(17, 24, FONT24),
    ])
}
