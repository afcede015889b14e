//! Refresh dispatch
//!
//! One refresh tick resolves a selected source into rendering engine
//! calls: nothing for idle, a blit of the shared frame region into the
//! externally supplied target rectangle, or a full-panel procedural
//! pattern painted row by row. The self-rearming loop that drives this
//! lives in the firmware task; keeping the dispatch pure makes every
//! branch host-testable against the recording bus.

use udas_core::geometry::{Rect, RenderOutcome, RES_HOR, RES_VER};
use udas_core::pattern::{Pattern, ROW_BYTES};
use udas_core::selector::RefreshSource;

use super::bus::ParallelBus;
use super::driver::Ssd1963;

/// Refresh loop tuning
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshConfig {
    /// Tick period in milliseconds
    pub period_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { period_ms: 100 }
    }
}

/// Perform the work of one refresh tick
///
/// Returns `None` when no rendering was attempted: an idle selector, or a
/// frame source with no open buffer behind it. In both cases the bus is
/// not touched at all.
pub fn run_refresh<B: ParallelBus>(
    disp: &mut Ssd1963<B>,
    source: RefreshSource,
    frame: Option<&[u8]>,
    target: Rect,
) -> Option<RenderOutcome> {
    match source {
        RefreshSource::Idle => None,
        RefreshSource::FrameBuffer => match frame {
            Some(pixels) => Some(disp.copy_rect(target, pixels)),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("frame refresh with no open buffer, skipping tick");
                None
            }
        },
        RefreshSource::Pattern(pattern) => Some(paint_pattern(disp, pattern)),
    }
}

fn paint_pattern<B: ParallelBus>(disp: &mut Ssd1963<B>, pattern: Pattern) -> RenderOutcome {
    let mut row_buf = [0u8; ROW_BYTES];
    let mut outcome = RenderOutcome::Full;
    for row in 0..RES_VER {
        pattern.render_row(row, &mut row_buf);
        if disp.copy_rect(Rect::new(0, row, RES_HOR, 1), &row_buf) != RenderOutcome::Full {
            outcome = RenderOutcome::Partial;
        }
    }
    outcome
}
