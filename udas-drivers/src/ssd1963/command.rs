//! Command channel
//!
//! Write discipline over the parallel bus: a command is an opcode on the
//! lower data byte with RegisterSelect held low, a data word is a full
//! 16-bit write with RegisterSelect high. The controller latches on the
//! rising edge of the write strobe, so every transfer is a strobe-low,
//! drive-lines, strobe-high cycle. RegisterSelect rests high between
//! commands so data can be streamed without per-word toggling.

use super::bus::{ControlLine, ParallelBus};

/// SSD1963 command opcodes
pub mod op {
    /// Software reset; the PLL registers survive it
    pub const SOFT_RESET: u8 = 0x01;
    /// Turn the panel output off
    pub const SET_DISPLAY_OFF: u8 = 0x28;
    /// Turn the panel output on
    pub const SET_DISPLAY_ON: u8 = 0x29;
    /// Column address window, two big-endian bounds
    pub const SET_COLUMN_ADDRESS: u8 = 0x2A;
    /// Row address window, two big-endian bounds
    pub const SET_PAGE_ADDRESS: u8 = 0x2B;
    /// Start streaming pixel data into the window
    pub const WRITE_MEMORY_START: u8 = 0x2C;
    /// Pixel address mode (scan direction)
    pub const SET_ADDRESS_MODE: u8 = 0x36;
    /// LCD panel mode and resolution
    pub const SET_LCD_MODE: u8 = 0xB0;
    /// Horizontal total/porch/pulse timing
    pub const SET_HORI_PERIOD: u8 = 0xB4;
    /// Vertical total/porch/pulse timing
    pub const SET_VERT_PERIOD: u8 = 0xB6;
    /// Start or stop the PLL
    pub const SET_PLL: u8 = 0xE0;
    /// PLL multiplier/divider configuration
    pub const SET_PLL_MN: u8 = 0xE2;
    /// Pixel clock frequency ratio
    pub const SET_LSHIFT_FREQ: u8 = 0xE6;
    /// Pixel data interface width
    pub const SET_PIXEL_DATA_INTERFACE: u8 = 0xF0;
}

/// The command/data write discipline over a parallel bus
pub struct CommandChannel<B> {
    bus: B,
}

impl<B: ParallelBus> CommandChannel<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Direct access to the bus, for line control outside transfers
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Send a command opcode
    pub fn command(&mut self, opcode: u8) {
        self.bus.set_line(ControlLine::RegisterSelect, false);
        self.bus.set_line(ControlLine::WriteStrobe, false);
        self.bus.write_lower(opcode);
        self.bus.set_line(ControlLine::WriteStrobe, true);
        self.bus.set_line(ControlLine::RegisterSelect, true);
    }

    /// Send one 16-bit data word
    pub fn data(&mut self, word: u16) {
        self.bus.set_line(ControlLine::WriteStrobe, false);
        self.bus.write_word(word);
        self.bus.set_line(ControlLine::WriteStrobe, true);
    }

    /// Drive the bus to its idle levels and claim the controller
    ///
    /// Strobes and RegisterSelect rest high, chip select and power enable
    /// are asserted (low) for the whole session, the panel DISP line stays
    /// off until bring-up completes.
    pub fn attach(&mut self) {
        self.bus.set_line(ControlLine::WriteStrobe, true);
        self.bus.set_line(ControlLine::ReadStrobe, true);
        self.bus.set_line(ControlLine::RegisterSelect, true);
        self.bus.set_line(ControlLine::DisplayEnable, false);
        self.bus.set_line(ControlLine::ChipSelect, false);
        self.bus.set_line(ControlLine::PowerEnable, false);
    }

    /// Drive the reset line; `asserted` means reset active (line low)
    pub fn set_reset(&mut self, asserted: bool) {
        self.bus.set_line(ControlLine::Reset, !asserted);
    }

    /// Drive the panel DISP line
    pub fn set_display_enable(&mut self, on: bool) {
        self.bus.set_line(ControlLine::DisplayEnable, on);
    }
}

#[cfg(test)]
mod tests {
    use super::super::sim::{RecordingBus, Transfer};
    use super::*;

    #[test]
    fn command_is_latched_with_register_select_low() {
        let mut chan = CommandChannel::new(RecordingBus::<64>::new());
        chan.attach();
        chan.command(op::SOFT_RESET);

        let bus = chan.bus_mut();
        assert_eq!(bus.transfers(), &[Transfer::Command(0x01)]);
        // RegisterSelect rests high afterwards
        assert_eq!(bus.line_level(ControlLine::RegisterSelect), Some(true));
    }

    #[test]
    fn data_is_latched_as_a_full_word() {
        let mut chan = CommandChannel::new(RecordingBus::<64>::new());
        chan.attach();
        chan.data(0xBEEF);
        chan.data(0x0001);

        assert_eq!(
            chan.bus_mut().transfers(),
            &[Transfer::Data(0xBEEF), Transfer::Data(0x0001)]
        );
    }

    #[test]
    fn attach_asserts_the_session_lines() {
        let mut chan = CommandChannel::new(RecordingBus::<64>::new());
        chan.attach();

        let bus = chan.bus_mut();
        assert_eq!(bus.line_level(ControlLine::ChipSelect), Some(false));
        assert_eq!(bus.line_level(ControlLine::PowerEnable), Some(false));
        assert_eq!(bus.line_level(ControlLine::WriteStrobe), Some(true));
        assert_eq!(bus.line_level(ControlLine::DisplayEnable), Some(false));
    }

    #[test]
    fn reset_is_active_low() {
        let mut chan = CommandChannel::new(RecordingBus::<64>::new());
        chan.set_reset(true);
        assert_eq!(chan.bus_mut().line_level(ControlLine::Reset), Some(false));
        chan.set_reset(false);
        assert_eq!(chan.bus_mut().line_level(ControlLine::Reset), Some(true));
    }
}
