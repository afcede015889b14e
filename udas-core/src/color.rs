//! RGB565 color handling
//!
//! The SSD1963 is configured for the 16-bit 5/6/5 pixel data format, so a
//! color is a packed `u16`. The pure-hue min/max masks mirror the values
//! callers have always used with this panel; the rendering engine does not
//! validate them.

/// A 16-bit packed RGB565 color. No alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);

    pub const RED_MIN: Rgb565 = Rgb565(0x0800);
    pub const RED_MAX: Rgb565 = Rgb565(0xF800);

    pub const GREEN_MIN: Rgb565 = Rgb565(0x0020);
    pub const GREEN_MAX: Rgb565 = Rgb565(0x07E0);

    pub const BLUE_MIN: Rgb565 = Rgb565(0x0001);
    pub const BLUE_MAX: Rgb565 = Rgb565(0x001F);

    pub const CYAN_MIN: Rgb565 = Rgb565(Self::BLUE_MIN.0 | Self::GREEN_MIN.0);
    pub const CYAN_MAX: Rgb565 = Rgb565(Self::BLUE_MAX.0 | Self::GREEN_MAX.0);

    pub const MAGENTA_MIN: Rgb565 = Rgb565(Self::BLUE_MIN.0 | Self::RED_MIN.0);
    pub const MAGENTA_MAX: Rgb565 = Rgb565(Self::BLUE_MAX.0 | Self::RED_MAX.0);

    pub const YELLOW_MIN: Rgb565 = Rgb565(Self::GREEN_MIN.0 | Self::RED_MIN.0);
    pub const YELLOW_MAX: Rgb565 = Rgb565(Self::GREEN_MAX.0 | Self::RED_MAX.0);

    pub const WHITE_MIN: Rgb565 = Rgb565(Self::BLUE_MIN.0 | Self::GREEN_MIN.0 | Self::RED_MIN.0);
    pub const WHITE_MAX: Rgb565 = Rgb565(Self::BLUE_MAX.0 | Self::GREEN_MAX.0 | Self::RED_MAX.0);

    /// Pack 8-bit channels into 5/6/5, truncating the low bits
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 >> 3) << 11;
        let g = (g as u16 >> 2) << 5;
        let b = b as u16 >> 3;
        Rgb565(r | g | b)
    }

    /// Little-endian byte pair, the layout blit sources use
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// Build a color from a little-endian byte pair
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Rgb565(u16::from_le_bytes(bytes))
    }
}
