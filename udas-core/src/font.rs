//! Fixed-size bitmap fonts
//!
//! Glyph tables are opaque byte blobs with a fixed layout contract: one
//! block of `height * bytes_per_row` bytes per printable ASCII character,
//! starting at code 0x20, bits packed MSB-first with one trailing pad byte
//! per row (even when the width divides evenly into bytes). The tables
//! themselves are supplied by the integrator; this module only does the
//! metrics math and the lookup.

/// Identifier for one of the five built-in font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    Size8,
    Size12,
    Size16,
    Size20,
    Size24,
}

impl FontId {
    /// Map an external selector code to a font
    ///
    /// Unknown codes fall back to the 20-pixel font.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => FontId::Size8,
            1 => FontId::Size12,
            2 => FontId::Size16,
            3 => FontId::Size20,
            4 => FontId::Size24,
            _ => FontId::Size20,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            FontId::Size8 => 0,
            FontId::Size12 => 1,
            FontId::Size16 => 2,
            FontId::Size20 => 3,
            FontId::Size24 => 4,
        }
    }
}

/// First printable character code in a glyph table
pub const FIRST_GLYPH: u8 = 0x20;

/// Fallback glyph for non-printable codes
pub const FALLBACK_GLYPH: u8 = 0x7F;

/// A fixed-width, fixed-height bitmap font
#[derive(Debug, Clone, Copy)]
pub struct Font {
    /// Glyph width in pixels
    pub width: i32,
    /// Glyph height in pixels
    pub height: i32,
    /// Glyph table, `96 * height * bytes_per_row` bytes
    pub table: &'static [u8],
}

impl Font {
    /// Create a font over a glyph table
    pub const fn new(width: i32, height: i32, table: &'static [u8]) -> Self {
        Self {
            width,
            height,
            table,
        }
    }

    /// Bytes per glyph row: `width / 8` plus one trailing pad byte
    pub const fn bytes_per_row(&self) -> usize {
        (self.width / 8 + 1) as usize
    }

    /// Size of one glyph block in bytes
    pub const fn glyph_len(&self) -> usize {
        self.height as usize * self.bytes_per_row()
    }

    /// Substitute the fallback glyph for codes outside printable ASCII
    pub fn printable(code: u8) -> u8 {
        if (FIRST_GLYPH..=FALLBACK_GLYPH).contains(&code) {
            code
        } else {
            FALLBACK_GLYPH
        }
    }

    /// The glyph block for a character code, with fallback substitution
    ///
    /// Returns an empty slice when the table is shorter than the layout
    /// contract requires, so a malformed table renders nothing rather
    /// than panicking mid-stream.
    pub fn glyph(&self, code: u8) -> &'static [u8] {
        let code = Self::printable(code);
        let start = (code - FIRST_GLYPH) as usize * self.glyph_len();
        let end = start + self.glyph_len();
        self.table.get(start..end).unwrap_or(&[])
    }
}

/// The five fonts available to the rendering engine, loaded once at init
#[derive(Debug, Clone, Copy)]
pub struct FontSet {
    fonts: [Font; 5],
}

impl FontSet {
    /// Build a font set ordered smallest to largest
    pub const fn new(fonts: [Font; 5]) -> Self {
        Self { fonts }
    }

    /// Look up a font by identifier
    pub fn get(&self, id: FontId) -> &Font {
        &self.fonts[id.index()]
    }
}
