//! Refresh content selection
//!
//! The refresh scheduler reads an external selector code on every tick and
//! resets it to idle. The code space is stable for host tooling: 0 is idle,
//! 2 is the shared frame buffer, 3..=8 pick a built-in test pattern, and
//! any other non-zero code paints the generic splash.

use crate::pattern::Pattern;

/// Selector code meaning "nothing to paint this tick"
pub const IDLE_CODE: u8 = 0;

/// What the refresh scheduler should paint on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshSource {
    /// Paint nothing
    Idle,
    /// Blit the shared frame buffer into the target rectangle
    FrameBuffer,
    /// Paint a built-in pattern over the full panel
    Pattern(Pattern),
}

impl RefreshSource {
    /// Decode an external selector code
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => RefreshSource::Idle,
            2 => RefreshSource::FrameBuffer,
            3 => RefreshSource::Pattern(Pattern::Sample),
            4 => RefreshSource::Pattern(Pattern::Sample2),
            5 => RefreshSource::Pattern(Pattern::ClockTest),
            6 => RefreshSource::Pattern(Pattern::ColorBands),
            7 => RefreshSource::Pattern(Pattern::Gradient),
            8 => RefreshSource::Pattern(Pattern::Sharpness),
            // Anything else non-zero falls back to the splash
            _ => RefreshSource::Pattern(Pattern::Splash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_idle() {
        assert_eq!(RefreshSource::from_code(0), RefreshSource::Idle);
    }

    #[test]
    fn known_codes_decode() {
        assert_eq!(RefreshSource::from_code(2), RefreshSource::FrameBuffer);
        assert_eq!(
            RefreshSource::from_code(5),
            RefreshSource::Pattern(Pattern::ClockTest)
        );
        assert_eq!(
            RefreshSource::from_code(8),
            RefreshSource::Pattern(Pattern::Sharpness)
        );
    }

    #[test]
    fn unknown_non_zero_codes_paint_splash() {
        for code in [1u8, 9, 42, 255] {
            assert_eq!(
                RefreshSource::from_code(code),
                RefreshSource::Pattern(Pattern::Splash)
            );
        }
    }
}
