//! Parallel bus primitive
//!
//! The controller's 8080-style interface is driven entirely through GPIO:
//! seven control lines plus sixteen data lines split into a lower and an
//! upper byte group. `ParallelBus` is the capability seam; `GpioBus` is the
//! bit-banged implementation over udas-hal pins. Line operations are
//! fire-and-forget, mirroring the pin traits underneath.

use udas_hal::{IoPin, OutputPin};

/// Control lines of the parallel interface
///
/// `ChipSelect`, `Reset`, the strobes and `PowerEnable` are active low on
/// the wire; callers pass the electrical level, not the logical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLine {
    /// Panel power rail enable, active low
    PowerEnable,
    /// Controller hardware reset, active low
    Reset,
    /// Panel DISP line, active high
    DisplayEnable,
    /// Bus chip select, active low
    ChipSelect,
    /// Low selects the command register, high the data register
    RegisterSelect,
    /// Write strobe, data latched on the rising edge
    WriteStrobe,
    /// Read strobe, active low
    ReadStrobe,
}

/// A 16-bit parallel bus with discrete control lines
pub trait ParallelBus {
    /// Drive one control line to a level
    fn set_line(&mut self, line: ControlLine, high: bool);

    /// Put a byte on the lower eight data lines
    fn write_lower(&mut self, byte: u8);

    /// Put a byte on the upper eight data lines
    fn write_upper(&mut self, byte: u8);

    /// Put a full word on the data lines, upper byte first
    fn write_word(&mut self, word: u16) {
        self.write_upper((word >> 8) as u8);
        self.write_lower(word as u8);
    }

    /// Sample all sixteen data lines
    fn read_word(&mut self) -> u16;
}

/// Bit-banged bus over GPIO pins
///
/// Data pins are ordered LSB first within each group, so `lo[0]` is D0 and
/// `hi[0]` is D8.
pub struct GpioBus<C, D> {
    power_enable: C,
    reset: C,
    display_enable: C,
    chip_select: C,
    register_select: C,
    write_strobe: C,
    read_strobe: C,
    lo: [D; 8],
    hi: [D; 8],
}

impl<C: OutputPin, D: IoPin> GpioBus<C, D> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        power_enable: C,
        reset: C,
        display_enable: C,
        chip_select: C,
        register_select: C,
        write_strobe: C,
        read_strobe: C,
        lo: [D; 8],
        hi: [D; 8],
    ) -> Self {
        Self {
            power_enable,
            reset,
            display_enable,
            chip_select,
            register_select,
            write_strobe,
            read_strobe,
            lo,
            hi,
        }
    }

    fn write_group(group: &mut [D; 8], byte: u8) {
        for (bit, pin) in group.iter_mut().enumerate() {
            pin.set_state(byte & (1 << bit) != 0);
        }
    }

    fn read_group(group: &[D; 8]) -> u8 {
        let mut byte = 0u8;
        for (bit, pin) in group.iter().enumerate() {
            if pin.is_high() {
                byte |= 1 << bit;
            }
        }
        byte
    }
}

impl<C: OutputPin, D: IoPin> ParallelBus for GpioBus<C, D> {
    fn set_line(&mut self, line: ControlLine, high: bool) {
        let pin = match line {
            ControlLine::PowerEnable => &mut self.power_enable,
            ControlLine::Reset => &mut self.reset,
            ControlLine::DisplayEnable => &mut self.display_enable,
            ControlLine::ChipSelect => &mut self.chip_select,
            ControlLine::RegisterSelect => &mut self.register_select,
            ControlLine::WriteStrobe => &mut self.write_strobe,
            ControlLine::ReadStrobe => &mut self.read_strobe,
        };
        pin.set_state(high);
    }

    fn write_lower(&mut self, byte: u8) {
        Self::write_group(&mut self.lo, byte);
    }

    fn write_upper(&mut self, byte: u8) {
        Self::write_group(&mut self.hi, byte);
    }

    fn read_word(&mut self) -> u16 {
        let lo = Self::read_group(&self.lo) as u16;
        let hi = Self::read_group(&self.hi) as u16;
        hi << 8 | lo
    }
}
