//! Rendering engine
//!
//! Every draw operation follows the same shape: clip the requested
//! rectangle against the panel, program the controller's address window to
//! the clipped bounds, issue the memory-write command, then stream exactly
//! `pixel_count` words row-major. The controller advances its own write
//! pointer inside the window, so there is no per-pixel addressing.

use embedded_hal::delay::DelayNs;
use udas_core::color::Rgb565;
use udas_core::font::FontSet;
use udas_core::geometry::{ClipRect, Rect, RenderOutcome};
use udas_core::state::DisplayState;

use super::bus::ParallelBus;
use super::command::{op, CommandChannel};
use super::init::{run_steps, InitPhase, InitSequence};

/// SSD1963 driver: bus, display state and font tables
pub struct Ssd1963<B> {
    channel: CommandChannel<B>,
    state: DisplayState,
    fonts: FontSet,
}

impl<B: ParallelBus> Ssd1963<B> {
    pub fn new(bus: B, fonts: FontSet) -> Self {
        Self {
            channel: CommandChannel::new(bus),
            state: DisplayState::default(),
            fonts,
        }
    }

    /// Run the default bring-up sequence
    pub fn initialize(&mut self, delay: &mut impl DelayNs) {
        self.initialize_with(&InitSequence::default(), delay);
    }

    /// Run the bring-up sequence with custom PLL and timing constants
    pub fn initialize_with(&mut self, seq: &InitSequence, delay: &mut impl DelayNs) {
        self.channel.attach();
        let mut phase = Some(InitPhase::Reset);
        while let Some(p) = phase {
            #[cfg(feature = "defmt")]
            defmt::debug!("ssd1963 bring-up: {}", p);
            match p {
                InitPhase::Ready => self.enter_ready(),
                _ => run_steps(&mut self.channel, delay, &seq.steps(p)),
            }
            phase = p.next();
        }
    }

    /// Clear the panel to black, restore default state, enable output
    fn enter_ready(&mut self) {
        self.state = DisplayState::default();
        if let Some(clip) = Rect::full_panel().clip() {
            self.stream_fill(&clip, Rgb565::BLACK);
        }
        self.channel.command(op::SET_DISPLAY_ON);
        self.channel.set_display_enable(true);
    }

    /// Program the address window and open the pixel stream
    fn set_window(&mut self, clip: &ClipRect) {
        self.channel.command(op::SET_COLUMN_ADDRESS);
        self.channel.data((clip.start_col >> 8) as u16 & 0xFF);
        self.channel.data(clip.start_col as u16 & 0xFF);
        self.channel.data((clip.end_col >> 8) as u16 & 0xFF);
        self.channel.data(clip.end_col as u16 & 0xFF);
        self.channel.command(op::SET_PAGE_ADDRESS);
        self.channel.data((clip.start_row >> 8) as u16 & 0xFF);
        self.channel.data(clip.start_row as u16 & 0xFF);
        self.channel.data((clip.end_row >> 8) as u16 & 0xFF);
        self.channel.data(clip.end_row as u16 & 0xFF);
        self.channel.command(op::WRITE_MEMORY_START);
    }

    fn stream_fill(&mut self, clip: &ClipRect, color: Rgb565) {
        self.set_window(clip);
        for _ in 0..clip.pixel_count() {
            self.channel.data(color.0);
        }
    }

    /// Fill a rectangle with the foreground color
    pub fn fill_rect(&mut self, rect: Rect) -> RenderOutcome {
        let Some(clip) = rect.clip() else {
            return RenderOutcome::None;
        };
        self.stream_fill(&clip, self.state.fore_color());
        clip.outcome_for(&rect)
    }

    /// Fill the whole panel with the background color
    pub fn clear(&mut self) -> RenderOutcome {
        let Some(clip) = Rect::full_panel().clip() else {
            return RenderOutcome::None;
        };
        self.stream_fill(&clip, self.state.back_color());
        RenderOutcome::Full
    }

    /// Blit little-endian RGB565 pixels into a rectangle
    ///
    /// The source must cover the full unclipped rectangle; rows are walked
    /// with the requested width as the stride so clipped columns are
    /// skipped without desynchronizing subsequent rows.
    pub fn copy_rect(&mut self, rect: Rect, pixels: &[u8]) -> RenderOutcome {
        let Some(clip) = rect.clip() else {
            return RenderOutcome::None;
        };
        let needed = rect.requested_pixels() as usize * 2;
        if pixels.len() < needed {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "copy_rect source too small: {} bytes for {} pixels",
                pixels.len(),
                rect.requested_pixels()
            );
            return RenderOutcome::None;
        }
        self.set_window(&clip);
        let stride = rect.width as usize;
        let col_off = (clip.start_col - rect.x) as usize;
        for row in clip.start_row..=clip.end_row {
            let base = ((row - rect.y) as usize * stride + col_off) * 2;
            for col in 0..clip.cols() as usize {
                let at = base + col * 2;
                let px = Rgb565::from_le_bytes([pixels[at], pixels[at + 1]]);
                self.channel.data(px.0);
            }
        }
        clip.outcome_for(&rect)
    }

    /// Draw one character cell at a panel position
    ///
    /// The cell is the current font's full bounding box; set bits paint the
    /// foreground, clear bits the background. Codes outside printable ASCII
    /// are substituted with the fallback glyph before lookup.
    pub fn draw_char(&mut self, x: i32, y: i32, code: u8) -> RenderOutcome {
        let font = *self.fonts.get(self.state.font());
        let rect = Rect::new(x, y, font.width, font.height);
        let Some(clip) = rect.clip() else {
            return RenderOutcome::None;
        };
        let glyph = font.glyph(code);
        if glyph.is_empty() {
            return RenderOutcome::None;
        }
        let bpr = font.bytes_per_row();
        let fore = self.state.fore_color();
        let back = self.state.back_color();
        self.set_window(&clip);
        for row in clip.start_row..=clip.end_row {
            let row_base = (row - y) as usize * bpr;
            for col in clip.start_col..=clip.end_col {
                let bit = (col - x) as usize;
                let on = glyph[row_base + bit / 8] & (0x80 >> (bit % 8)) != 0;
                self.channel.data(if on { fore.0 } else { back.0 });
            }
        }
        clip.outcome_for(&rect)
    }

    /// Enable the controller output and the panel DISP line
    pub fn display_on(&mut self) {
        self.channel.command(op::SET_DISPLAY_ON);
        self.channel.set_display_enable(true);
    }

    /// Disable the controller output and the panel DISP line
    pub fn display_off(&mut self) {
        self.channel.command(op::SET_DISPLAY_OFF);
        self.channel.set_display_enable(false);
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn set_fore_color(&mut self, color: Rgb565) {
        self.state.set_fore_color(color);
    }

    pub fn set_back_color(&mut self, color: Rgb565) {
        self.state.set_back_color(color);
    }

    pub fn set_font(&mut self, font: udas_core::font::FontId) {
        self.state.set_font(font);
    }

    /// Direct bus access, used by tests and board teardown
    pub fn bus_mut(&mut self) -> &mut B {
        self.channel.bus_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::super::bus::ControlLine;
    use super::super::sim::{RecordingBus, SimDelay};
    use super::*;
    use udas_core::font::Font;
    use udas_core::geometry::{RES_HOR, RES_VER};

    // 3x4 test font: bytes_per_row = 1, glyph block = 4 bytes
    static TABLE: [u8; 96 * 4] = {
        let mut t = [0u8; 96 * 4];
        let a = (0x41 - 0x20) * 4;
        t[a] = 0b1010_0000;
        t[a + 1] = 0b0100_0000;
        t[a + 2] = 0b1010_0000;
        let f = (0x7F - 0x20) * 4;
        t[f] = 0xE0;
        t[f + 1] = 0xE0;
        t[f + 2] = 0xE0;
        t[f + 3] = 0xE0;
        t
    };

    fn fonts() -> FontSet {
        FontSet::new([Font::new(3, 4, &TABLE); 5])
    }

    fn display<const CAP: usize>() -> Ssd1963<RecordingBus<CAP>> {
        Ssd1963::new(RecordingBus::<CAP>::new(), fonts())
    }

    #[test]
    fn fill_programs_window_then_streams_pixels() {
        let mut disp = display::<64>();
        let outcome = disp.fill_rect(Rect::new(10, 20, 2, 2));
        assert_eq!(outcome, RenderOutcome::Full);

        let bus = disp.bus_mut();
        let ops: heapless::Vec<u8, 8> = bus.opcodes().collect();
        assert_eq!(&ops[..], &[0x2A, 0x2B, 0x2C]);

        let words: heapless::Vec<u16, 16> = bus.data_words().collect();
        // column bounds 10..11, row bounds 20..21, then 4 foreground pixels
        assert_eq!(
            &words[..],
            &[0, 10, 0, 11, 0, 20, 0, 21, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF]
        );
    }

    #[test]
    fn off_panel_fill_touches_nothing() {
        let mut disp = display::<16>();
        assert_eq!(disp.fill_rect(Rect::new(500, 0, 10, 10)), RenderOutcome::None);
        assert_eq!(disp.fill_rect(Rect::new(0, -20, 10, 10)), RenderOutcome::None);
        let bus = disp.bus_mut();
        assert_eq!(bus.command_count, 0);
        assert_eq!(bus.data_count, 0);
    }

    #[test]
    fn clipped_fill_reports_partial_and_streams_clipped_count() {
        let mut disp = display::<64>();
        let outcome = disp.fill_rect(Rect::new(475, 0, 10, 2));
        assert_eq!(outcome, RenderOutcome::Partial);
        // 8 window operands plus 5 columns x 2 rows
        assert_eq!(disp.bus_mut().data_count, 8 + 10);
    }

    #[test]
    fn blit_walks_source_with_unclipped_stride() {
        let mut disp = display::<64>();
        // 4x2 source, columns -2..1; only columns 0..1 land on the panel
        let mut src = [0u8; 16];
        for (i, px) in src.chunks_exact_mut(2).enumerate() {
            px.copy_from_slice(&(i as u16).to_le_bytes());
        }
        let outcome = disp.copy_rect(Rect::new(-2, 0, 4, 2), &src);
        assert_eq!(outcome, RenderOutcome::Partial);

        let words: heapless::Vec<u16, 16> = disp.bus_mut().data_words().collect();
        // source pixels 2,3 from row 0 and 6,7 from row 1, not 2,3,4,5
        assert_eq!(&words[8..], &[2, 3, 6, 7]);
    }

    #[test]
    fn negative_extent_blit_touches_nothing() {
        // A hostile target rect must never reach the bus or the source
        let mut disp = display::<16>();
        assert_eq!(
            disp.copy_rect(Rect::new(100, 0, -5, 10), &[]),
            RenderOutcome::None
        );
        assert_eq!(disp.fill_rect(Rect::new(10, 10, 0, 4)), RenderOutcome::None);
        assert_eq!(disp.bus_mut().command_count, 0);
        assert_eq!(disp.bus_mut().data_count, 0);
    }

    #[test]
    fn undersized_blit_source_touches_nothing() {
        let mut disp = display::<16>();
        let src = [0u8; 6];
        assert_eq!(
            disp.copy_rect(Rect::new(0, 0, 2, 2), &src),
            RenderOutcome::None
        );
        assert_eq!(disp.bus_mut().command_count, 0);
    }

    #[test]
    fn glyph_streams_fore_and_back_per_bit() {
        let mut disp = display::<64>();
        disp.set_back_color(Rgb565(0x0001));
        let outcome = disp.draw_char(0, 0, b'A');
        assert_eq!(outcome, RenderOutcome::Full);

        let words: heapless::Vec<u16, 32> = disp.bus_mut().data_words().collect();
        let px = &words[8..];
        assert_eq!(px.len(), 12);
        // row 0 of 'A' is 101
        assert_eq!(&px[..3], &[0xFFFF, 0x0001, 0xFFFF]);
        // row 1 is 010
        assert_eq!(&px[3..6], &[0x0001, 0xFFFF, 0x0001]);
        // row 3 is empty
        assert_eq!(&px[9..], &[0x0001, 0x0001, 0x0001]);
    }

    #[test]
    fn glyph_clips_at_the_panel_edge() {
        let mut disp = display::<64>();
        let outcome = disp.draw_char(RES_HOR - 2, 0, b'A');
        assert_eq!(outcome, RenderOutcome::Partial);
        // 2 visible columns x 4 rows
        assert_eq!(disp.bus_mut().data_count, 8 + 8);
    }

    #[test]
    fn off_panel_glyph_touches_nothing() {
        let mut disp = display::<16>();
        assert_eq!(disp.draw_char(0, RES_VER + 10, b'A'), RenderOutcome::None);
        assert_eq!(disp.bus_mut().command_count, 0);
    }

    #[test]
    fn non_printable_code_draws_the_fallback_glyph() {
        let mut a = display::<64>();
        let mut b = display::<64>();
        a.draw_char(0, 0, 0x05);
        b.draw_char(0, 0, 0x7F);
        assert_eq!(a.bus_mut().transfers(), b.bus_mut().transfers());
    }

    #[test]
    fn bring_up_issues_the_full_sequence() {
        let mut disp = display::<64>();
        let mut delay = SimDelay::new();
        disp.initialize(&mut delay);

        let bus = disp.bus_mut();
        // reset pulse: deassert, assert, deassert (after the 6 attach lines)
        assert_eq!(
            &bus.line_events()[6..9],
            &[
                (ControlLine::Reset, true),
                (ControlLine::Reset, false),
                (ControlLine::Reset, true),
            ]
        );

        let ops: heapless::Vec<u8, 16> = bus.opcodes().collect();
        // display-on lands after the clearing fill, past the log capacity
        assert_eq!(
            &ops[..],
            &[0xE2, 0xE0, 0xE0, 0x01, 0xE6, 0xB0, 0xB4, 0xB6, 0x36, 0xF0, 0x2A, 0x2B, 0x2C]
        );
        assert_eq!(bus.command_count, 14);
        // 32 timing operands, 8 window operands, 480 x 272 black pixels
        assert_eq!(bus.data_count, 32 + 8 + (RES_HOR * RES_VER) as u32);
        assert_eq!(bus.line_level(ControlLine::DisplayEnable), Some(true));

        assert_eq!(delay.total_ms(), 50 + 30 + 100 + 1 + 5 + 5 + 5);
        assert_eq!(*disp.state(), DisplayState::default());
    }
}
