//! Simulated bus for host tests
//!
//! `RecordingBus` implements `ParallelBus` and reconstructs what the
//! controller would observe: it tracks line levels, latches the data lines
//! into a `Transfer` on each write strobe rising edge, and classifies the
//! transfer by the RegisterSelect level at latch time. Small operations can
//! assert the exact transfer sequence; full-panel operations overflow the
//! fixed-capacity log, so running counters are kept alongside it.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use super::bus::{ControlLine, ParallelBus};

/// One latched bus transfer, as the controller would decode it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Opcode latched with RegisterSelect low
    Command(u8),
    /// Word latched with RegisterSelect high
    Data(u16),
}

/// A `ParallelBus` that records instead of driving pins
pub struct RecordingBus<const CAP: usize> {
    transfers: Vec<Transfer, CAP>,
    lines: Vec<(ControlLine, bool), CAP>,
    levels: [Option<bool>; 7],
    word: u16,
    /// Total commands latched, including ones dropped from the log
    pub command_count: u32,
    /// Total data words latched, including ones dropped from the log
    pub data_count: u32,
    /// Transfers that no longer fit in the log
    pub dropped: u32,
}

fn line_index(line: ControlLine) -> usize {
    match line {
        ControlLine::PowerEnable => 0,
        ControlLine::Reset => 1,
        ControlLine::DisplayEnable => 2,
        ControlLine::ChipSelect => 3,
        ControlLine::RegisterSelect => 4,
        ControlLine::WriteStrobe => 5,
        ControlLine::ReadStrobe => 6,
    }
}

impl<const CAP: usize> RecordingBus<CAP> {
    pub fn new() -> Self {
        Self {
            transfers: Vec::new(),
            lines: Vec::new(),
            levels: [None; 7],
            word: 0,
            command_count: 0,
            data_count: 0,
            dropped: 0,
        }
    }

    /// Latched transfers, oldest first, truncated at capacity
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Line transitions in order, truncated at capacity
    pub fn line_events(&self) -> &[(ControlLine, bool)] {
        &self.lines
    }

    /// Current level of a line, `None` if it was never driven
    pub fn line_level(&self, line: ControlLine) -> Option<bool> {
        self.levels[line_index(line)]
    }

    /// Opcodes of all logged command transfers, in order
    pub fn opcodes(&self) -> impl Iterator<Item = u8> + '_ {
        self.transfers.iter().filter_map(|t| match t {
            Transfer::Command(op) => Some(*op),
            Transfer::Data(_) => None,
        })
    }

    /// Data words of all logged data transfers, in order
    pub fn data_words(&self) -> impl Iterator<Item = u16> + '_ {
        self.transfers.iter().filter_map(|t| match t {
            Transfer::Data(w) => Some(*w),
            Transfer::Command(_) => None,
        })
    }

    fn latch(&mut self) {
        let transfer = if self.line_level(ControlLine::RegisterSelect) == Some(false) {
            self.command_count += 1;
            Transfer::Command(self.word as u8)
        } else {
            self.data_count += 1;
            Transfer::Data(self.word)
        };
        if self.transfers.push(transfer).is_err() {
            self.dropped += 1;
        }
    }
}

impl<const CAP: usize> Default for RecordingBus<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> ParallelBus for RecordingBus<CAP> {
    fn set_line(&mut self, line: ControlLine, high: bool) {
        let rising_strobe = line == ControlLine::WriteStrobe
            && high
            && self.line_level(ControlLine::WriteStrobe) == Some(false);
        self.levels[line_index(line)] = Some(high);
        let _ = self.lines.push((line, high));
        if rising_strobe {
            self.latch();
        }
    }

    fn write_lower(&mut self, byte: u8) {
        self.word = (self.word & 0xFF00) | byte as u16;
    }

    fn write_upper(&mut self, byte: u8) {
        self.word = (self.word & 0x00FF) | ((byte as u16) << 8);
    }

    fn read_word(&mut self) -> u16 {
        self.word
    }
}

/// A `DelayNs` that only accumulates the requested time
pub struct SimDelay {
    total_ns: u64,
}

impl SimDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl Default for SimDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strobe_rising_edge_latches_by_register_select() {
        let mut bus = RecordingBus::<16>::new();
        bus.set_line(ControlLine::RegisterSelect, false);
        bus.set_line(ControlLine::WriteStrobe, false);
        bus.write_lower(0x2C);
        bus.set_line(ControlLine::WriteStrobe, true);

        bus.set_line(ControlLine::RegisterSelect, true);
        bus.set_line(ControlLine::WriteStrobe, false);
        bus.write_word(0x1234);
        bus.set_line(ControlLine::WriteStrobe, true);

        assert_eq!(
            bus.transfers(),
            &[Transfer::Command(0x2C), Transfer::Data(0x1234)]
        );
        assert_eq!(bus.command_count, 1);
        assert_eq!(bus.data_count, 1);
    }

    #[test]
    fn holding_the_strobe_high_does_not_relatch() {
        let mut bus = RecordingBus::<16>::new();
        bus.set_line(ControlLine::RegisterSelect, true);
        bus.set_line(ControlLine::WriteStrobe, false);
        bus.set_line(ControlLine::WriteStrobe, true);
        bus.set_line(ControlLine::WriteStrobe, true);
        assert_eq!(bus.data_count, 1);
    }

    #[test]
    fn counters_survive_log_overflow() {
        let mut bus = RecordingBus::<2>::new();
        bus.set_line(ControlLine::RegisterSelect, true);
        for word in 0..5u16 {
            bus.set_line(ControlLine::WriteStrobe, false);
            bus.write_word(word);
            bus.set_line(ControlLine::WriteStrobe, true);
        }
        assert_eq!(bus.data_count, 5);
        assert_eq!(bus.dropped, 3);
        assert_eq!(bus.transfers().len(), 2);
    }

    #[test]
    fn read_word_returns_the_driven_lines() {
        let mut bus = RecordingBus::<4>::new();
        bus.write_upper(0xAB);
        bus.write_lower(0xCD);
        assert_eq!(bus.read_word(), 0xABCD);
    }

    #[test]
    fn sim_delay_accumulates() {
        let mut delay = SimDelay::new();
        delay.delay_ms(50);
        delay.delay_ms(30);
        delay.delay_us(500);
        assert_eq!(delay.total_ms(), 80);
    }
}
