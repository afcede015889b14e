//! Panel geometry and rectangle clipping
//!
//! The panel is a fixed 480x272 TFT. Every rendering operation clips its
//! requested rectangle against these bounds before touching the bus; the
//! clip result carries the exact pixel count the controller will expect
//! after the addressing window is programmed.

/// First addressable column
pub const COL_MIN: i32 = 0;

/// Last addressable column
pub const COL_MAX: i32 = 479;

/// First addressable row
pub const ROW_MIN: i32 = 0;

/// Last addressable row
pub const ROW_MAX: i32 = 271;

/// Horizontal resolution in pixels
pub const RES_HOR: i32 = COL_MAX + 1;

/// Vertical resolution in pixels
pub const RES_VER: i32 = ROW_MAX + 1;

/// Total pixel count of the panel
pub const PIXEL_TOTAL: u32 = (RES_HOR * RES_VER) as u32;

/// How much of a requested rectangle ended up on the panel
///
/// Never an error: callers decide whether `None` matters to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOutcome {
    /// The whole requested rectangle was rendered
    Full,
    /// The rectangle overlapped a panel edge; the intersection was rendered
    Partial,
    /// The rectangle was entirely off-panel; nothing was rendered
    None,
}

/// A requested rectangle in panel coordinates
///
/// Origins may be negative and extents may run past the panel edge;
/// clipping sorts that out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    /// Leftmost requested column
    pub x: i32,
    /// Topmost requested row
    pub y: i32,
    /// Requested width in pixels
    pub width: i32,
    /// Requested height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a rectangle from origin and extent
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The full panel
    pub const fn full_panel() -> Self {
        Self::new(COL_MIN, ROW_MIN, RES_HOR, RES_VER)
    }

    /// Number of pixels the caller asked for
    pub fn requested_pixels(&self) -> u32 {
        let w = self.width.max(0) as u32;
        let h = self.height.max(0) as u32;
        w.saturating_mul(h)
    }

    /// Intersect this rectangle with the panel bounds
    ///
    /// Returns `None` when the rectangle lies entirely off-panel or has a
    /// non-positive extent, in which case the caller must not touch the
    /// hardware at all. A degenerate rectangle would otherwise produce an
    /// inverted addressing window.
    pub fn clip(&self) -> Option<ClipRect> {
        if self.width <= 0 || self.height <= 0 {
            return None;
        }
        let start_col = self.x.max(COL_MIN);
        let end_col = (self.x + self.width - 1).min(COL_MAX);
        let start_row = self.y.max(ROW_MIN);
        let end_row = (self.y + self.height - 1).min(ROW_MAX);

        if end_col < COL_MIN || start_col > COL_MAX || end_row < ROW_MIN || start_row > ROW_MAX {
            return None;
        }

        Some(ClipRect {
            start_col,
            end_col,
            start_row,
            end_row,
        })
    }
}

/// A rectangle already clipped to panel bounds
///
/// All bounds are inclusive, matching the controller's column/row address
/// set commands. Transient: computed per rendering call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClipRect {
    /// First column to paint (inclusive)
    pub start_col: i32,
    /// Last column to paint (inclusive)
    pub end_col: i32,
    /// First row to paint (inclusive)
    pub start_row: i32,
    /// Last row to paint (inclusive)
    pub end_row: i32,
}

impl ClipRect {
    /// Number of columns in the clipped region
    pub fn cols(&self) -> u32 {
        (self.end_col - self.start_col + 1).max(0) as u32
    }

    /// Number of rows in the clipped region
    pub fn rows(&self) -> u32 {
        (self.end_row - self.start_row + 1).max(0) as u32
    }

    /// Exact number of pixels the controller expects after the window
    /// for this region is programmed
    pub fn pixel_count(&self) -> u32 {
        self.cols() * self.rows()
    }

    /// Classify this clip against the originally requested rectangle
    pub fn outcome_for(&self, requested: &Rect) -> RenderOutcome {
        if self.pixel_count() < requested.requested_pixels() {
            RenderOutcome::Partial
        } else {
            RenderOutcome::Full
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fully_inside_is_full() {
        let rect = Rect::new(10, 20, 100, 50);
        let clip = rect.clip().unwrap();
        assert_eq!(clip.pixel_count(), 100 * 50);
        assert_eq!(clip.outcome_for(&rect), RenderOutcome::Full);
    }

    #[test]
    fn full_panel_is_full() {
        let rect = Rect::full_panel();
        let clip = rect.clip().unwrap();
        assert_eq!(clip.pixel_count(), PIXEL_TOTAL);
        assert_eq!(clip.outcome_for(&rect), RenderOutcome::Full);
    }

    #[test]
    fn entirely_off_panel_right_is_none() {
        assert!(Rect::new(500, 0, 10, 10).clip().is_none());
    }

    #[test]
    fn entirely_off_panel_left_is_none() {
        assert!(Rect::new(-20, 0, 10, 10).clip().is_none());
    }

    #[test]
    fn entirely_off_panel_below_is_none() {
        assert!(Rect::new(0, 272, 480, 4).clip().is_none());
    }

    #[test]
    fn non_positive_extents_clip_to_none() {
        assert!(Rect::new(100, 0, -5, 10).clip().is_none());
        assert!(Rect::new(0, 100, 10, -1).clip().is_none());
        assert!(Rect::new(10, 10, 0, 4).clip().is_none());
        assert!(Rect::new(10, 10, 4, 0).clip().is_none());
    }

    #[test]
    fn right_edge_overlap_is_partial() {
        // x = 475, width = 10 on a 480-wide panel leaves 5 columns
        let rect = Rect::new(475, 0, 10, 20);
        let clip = rect.clip().unwrap();
        assert_eq!(clip.pixel_count(), 5 * 20);
        assert_eq!(clip.outcome_for(&rect), RenderOutcome::Partial);
    }

    #[test]
    fn negative_origin_is_partial() {
        let rect = Rect::new(-5, -5, 10, 10);
        let clip = rect.clip().unwrap();
        assert_eq!(clip.start_col, 0);
        assert_eq!(clip.start_row, 0);
        assert_eq!(clip.pixel_count(), 5 * 5);
        assert_eq!(clip.outcome_for(&rect), RenderOutcome::Partial);
    }

    #[test]
    fn corner_overlap_clips_both_axes() {
        let rect = Rect::new(470, 260, 100, 100);
        let clip = rect.clip().unwrap();
        assert_eq!(clip.cols(), 10);
        assert_eq!(clip.rows(), 12);
        assert_eq!(clip.outcome_for(&rect), RenderOutcome::Partial);
    }

    proptest! {
        #[test]
        fn inside_rects_are_always_full(
            x in 0i32..400,
            y in 0i32..200,
            w in 1i32..80,
            h in 1i32..72,
        ) {
            let rect = Rect::new(x, y, w, h);
            let clip = rect.clip().unwrap();
            prop_assert_eq!(clip.pixel_count(), (w * h) as u32);
            prop_assert_eq!(clip.outcome_for(&rect), RenderOutcome::Full);
        }

        #[test]
        fn clip_never_exceeds_panel_bounds(
            x in -600i32..600,
            y in -400i32..400,
            w in 1i32..700,
            h in 1i32..400,
        ) {
            let rect = Rect::new(x, y, w, h);
            if let Some(clip) = rect.clip() {
                prop_assert!(clip.start_col >= COL_MIN);
                prop_assert!(clip.end_col <= COL_MAX);
                prop_assert!(clip.start_row >= ROW_MIN);
                prop_assert!(clip.end_row <= ROW_MAX);
                prop_assert!(clip.pixel_count() <= rect.requested_pixels());
            }
        }

        #[test]
        fn off_panel_rects_clip_to_none(
            x in 480i32..1000,
            y in -300i32..300,
            w in 1i32..100,
            h in 1i32..100,
        ) {
            prop_assert!(Rect::new(x, y, w, h).clip().is_none());
        }
    }
}
