//! Built-in test patterns
//!
//! The original bring-up images (clock test, color bands, gradient,
//! sharpness and two sample screens) were full-panel static arrays; a
//! 480x272x2 table per image does not fit a small MCU flash budget, so
//! they are generated procedurally one row at a time instead. Each
//! pattern is a pure function of (column, row), which also makes the
//! generators testable without any hardware.

use crate::color::Rgb565;
use crate::geometry::{RES_HOR, RES_VER};

/// Pixels in one panel row
pub const ROW_PIXELS: usize = RES_HOR as usize;

/// Bytes in one panel row of little-endian RGB565
pub const ROW_BYTES: usize = ROW_PIXELS * 2;

/// Pitch of the checkerboard samples in pixels
const CHECKER: i32 = 16;

/// Grid pitch of the clock-test crosshatch in pixels
const GRID: i32 = 40;

/// A built-in full-panel image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// Generic splash screen
    Splash,
    /// First sample screen: checkerboard
    Sample,
    /// Second sample screen: inverted checkerboard in red/green
    Sample2,
    /// Crosshatch grid for pixel-clock verification
    ClockTest,
    /// Eight full-saturation vertical bands
    ColorBands,
    /// Horizontal black-to-white ramp
    Gradient,
    /// Single-pixel alternation for sharpness checks
    Sharpness,
}

impl Pattern {
    /// The pattern's color at one panel coordinate
    pub fn pixel(self, col: i32, row: i32) -> Rgb565 {
        match self {
            Pattern::Splash => splash_pixel(col, row),
            Pattern::Sample => {
                if (col / CHECKER + row / CHECKER) % 2 == 0 {
                    Rgb565::WHITE_MAX
                } else {
                    Rgb565::BLACK
                }
            }
            Pattern::Sample2 => {
                if (col / CHECKER + row / CHECKER) % 2 == 0 {
                    Rgb565::RED_MAX
                } else {
                    Rgb565::GREEN_MAX
                }
            }
            Pattern::ClockTest => {
                if col % GRID == 0 || row % GRID == 0 || col == RES_HOR - 1 || row == RES_VER - 1 {
                    Rgb565::WHITE_MAX
                } else {
                    Rgb565::BLACK
                }
            }
            Pattern::ColorBands => color_band(col),
            Pattern::Gradient => {
                let level = (col * 255 / (RES_HOR - 1)) as u8;
                Rgb565::from_rgb(level, level, level)
            }
            Pattern::Sharpness => {
                if (col ^ row) & 1 == 0 {
                    Rgb565::WHITE_MAX
                } else {
                    Rgb565::BLACK
                }
            }
        }
    }

    /// Fill one row of little-endian RGB565 bytes
    pub fn render_row(self, row: i32, out: &mut [u8; ROW_BYTES]) {
        for col in 0..RES_HOR {
            let bytes = self.pixel(col, row).to_le_bytes();
            let off = col as usize * 2;
            out[off] = bytes[0];
            out[off + 1] = bytes[1];
        }
    }
}

fn color_band(col: i32) -> Rgb565 {
    const BANDS: [Rgb565; 8] = [
        Rgb565::WHITE_MAX,
        Rgb565::RED_MAX,
        Rgb565::GREEN_MAX,
        Rgb565::BLUE_MAX,
        Rgb565::CYAN_MAX,
        Rgb565::MAGENTA_MAX,
        Rgb565::YELLOW_MAX,
        Rgb565::BLACK,
    ];
    let band = (col * BANDS.len() as i32 / RES_HOR) as usize;
    BANDS[band.min(BANDS.len() - 1)]
}

fn splash_pixel(col: i32, row: i32) -> Rgb565 {
    // Blue vertical fade with a white title band across the middle third
    let band_top = RES_VER / 3;
    let band_bottom = 2 * RES_VER / 3;
    if row >= band_top && row < band_bottom {
        Rgb565::WHITE_MAX
    } else {
        let level = (row * 255 / (RES_VER - 1)) as u8;
        Rgb565::from_rgb(0, 0, 255 - level)
    }
}
