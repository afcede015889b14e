//! Display state
//!
//! Current colors and font selection, read by the rendering engine on every
//! draw. This is an explicit context object owned by the driver; nothing is
//! global, which keeps the rendering engine testable without a live bus.

use crate::color::Rgb565;
use crate::font::FontId;

/// Foreground/background colors and active font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    fore: Rgb565,
    back: Rgb565,
    font: FontId,
}

impl Default for DisplayState {
    /// Black background, full white foreground, largest font
    fn default() -> Self {
        Self {
            fore: Rgb565::WHITE_MAX,
            back: Rgb565::BLACK,
            font: FontId::Size24,
        }
    }
}

impl DisplayState {
    pub fn fore_color(&self) -> Rgb565 {
        self.fore
    }

    pub fn set_fore_color(&mut self, color: Rgb565) {
        self.fore = color;
    }

    pub fn back_color(&self) -> Rgb565 {
        self.back
    }

    pub fn set_back_color(&mut self, color: Rgb565) {
        self.back = color;
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn set_font(&mut self, font: FontId) {
        self.font = font;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bring_up() {
        let state = DisplayState::default();
        assert_eq!(state.fore_color(), Rgb565::WHITE_MAX);
        assert_eq!(state.back_color(), Rgb565::BLACK);
        assert_eq!(state.font(), FontId::Size24);
    }

    #[test]
    fn setters_are_independent() {
        let mut state = DisplayState::default();
        state.set_fore_color(Rgb565::RED_MAX);
        assert_eq!(state.fore_color(), Rgb565::RED_MAX);
        assert_eq!(state.back_color(), Rgb565::BLACK);

        state.set_back_color(Rgb565::BLUE_MAX);
        state.set_font(FontId::Size8);
        assert_eq!(state.fore_color(), Rgb565::RED_MAX);
        assert_eq!(state.back_color(), Rgb565::BLUE_MAX);
        assert_eq!(state.font(), FontId::Size8);
    }
}
