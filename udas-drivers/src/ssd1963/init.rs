//! Bring-up sequence
//!
//! The controller comes up through a fixed series of phases: hardware
//! reset pulse, PLL configuration, PLL start, software reset (which keeps
//! the PLL registers), panel timing programming, then ready. Each phase is
//! a list of `InitStep`s built from the config structs, so tests can
//! assert the exact wire traffic and boards can tweak the constants
//! without touching the executor. One-shot, no retries; a step has no
//! observable failure path on this bus.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use super::bus::ParallelBus;
use super::command::{op, CommandChannel};

/// Upper bound on steps in any single phase
pub const PHASE_STEPS: usize = 40;

/// PLL multiplier/divider configuration
///
/// Defaults give 120 MHz from a 10 MHz crystal: M = 0x23 (x36),
/// N = 0x02 (/3), with the effectuate bit in the control word.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllConfig {
    pub multiplier: u8,
    pub divider: u8,
    pub control: u8,
}

impl Default for PllConfig {
    fn default() -> Self {
        Self {
            multiplier: 0x23,
            divider: 0x02,
            control: 0x04,
        }
    }
}

/// Panel timing constants
///
/// Defaults describe the 480x272 panel: display period, total period,
/// pulse start/width for both axes, and the pixel clock ratio fed to the
/// LSHIFT divider.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelTiming {
    /// Horizontal display period, pixels minus one
    pub hdp: u16,
    /// Vertical display period, lines minus one
    pub vdp: u16,
    /// Horizontal total period
    pub ht: u16,
    /// Horizontal sync pulse start
    pub hps: u16,
    /// Horizontal sync pulse width
    pub hpw: u8,
    /// Horizontal sync pulse subpixel start
    pub lps: u16,
    /// Subpixel start position
    pub lpspp: u8,
    /// Vertical total period
    pub vt: u16,
    /// Vertical sync pulse start
    pub vps: u16,
    /// Vertical sync pulse width
    pub vpw: u8,
    /// Vertical sync pulse start line
    pub fps: u16,
    /// 20-bit pixel clock ratio for the LSHIFT divider
    pub pixel_clock: u32,
    /// Pixel address scan direction
    pub address_mode: u8,
    /// Data interface width select
    pub pixel_interface: u8,
}

impl Default for PanelTiming {
    fn default() -> Self {
        Self {
            hdp: 479,
            vdp: 271,
            ht: 525,
            hps: 43,
            hpw: 41,
            lps: 2,
            lpspp: 0,
            vt: 286,
            vps: 12,
            vpw: 10,
            fps: 2,
            pixel_clock: 0x01FFFF,
            address_mode: 0x03,
            pixel_interface: 0x03,
        }
    }
}

/// Phases of the bring-up state machine, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitPhase {
    /// Hardware reset pulse on the RST line
    Reset,
    /// Program the PLL multiplier and divider
    PllConfig,
    /// Enable the PLL, wait for lock, switch the system clock to it
    PllStart,
    /// Software reset; PLL registers are preserved
    SoftReset,
    /// Program pixel clock, panel mode and sync timing
    TimingConfig,
    /// Clear the panel and enable output
    Ready,
}

impl InitPhase {
    /// The phase after this one, `None` past `Ready`
    pub fn next(self) -> Option<Self> {
        match self {
            InitPhase::Reset => Some(InitPhase::PllConfig),
            InitPhase::PllConfig => Some(InitPhase::PllStart),
            InitPhase::PllStart => Some(InitPhase::SoftReset),
            InitPhase::SoftReset => Some(InitPhase::TimingConfig),
            InitPhase::TimingConfig => Some(InitPhase::Ready),
            InitPhase::Ready => None,
        }
    }
}

/// One step of a bring-up phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    /// Send a command opcode
    Cmd(u8),
    /// Send a data word
    Data(u16),
    /// Block for a number of milliseconds
    DelayMs(u32),
    /// Drive the reset line; `true` asserts reset
    Reset(bool),
}

/// The full bring-up sequence as data
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitSequence {
    pub pll: PllConfig,
    pub timing: PanelTiming,
}

impl InitSequence {
    /// Build the step list for one phase
    ///
    /// `Ready` has no raw steps; the driver performs the clearing fill and
    /// output enable itself since they go through the rendering engine.
    pub fn steps(&self, phase: InitPhase) -> Vec<InitStep, PHASE_STEPS> {
        use InitStep::*;

        let mut steps = Vec::new();
        let push = |steps: &mut Vec<InitStep, PHASE_STEPS>, list: &[InitStep]| {
            for step in list {
                // PHASE_STEPS bounds every phase below
                let _ = steps.push(*step);
            }
        };

        match phase {
            InitPhase::Reset => push(
                &mut steps,
                &[
                    Reset(false),
                    DelayMs(50),
                    Reset(true),
                    DelayMs(30),
                    Reset(false),
                    DelayMs(100),
                ],
            ),
            InitPhase::PllConfig => push(
                &mut steps,
                &[
                    Cmd(op::SET_PLL_MN),
                    Data(self.pll.multiplier as u16),
                    Data(self.pll.divider as u16),
                    Data(self.pll.control as u16),
                ],
            ),
            InitPhase::PllStart => push(
                &mut steps,
                &[
                    Cmd(op::SET_PLL),
                    Data(0x01),
                    DelayMs(1),
                    Cmd(op::SET_PLL),
                    Data(0x03),
                    DelayMs(5),
                ],
            ),
            InitPhase::SoftReset => push(&mut steps, &[Cmd(op::SOFT_RESET), DelayMs(5)]),
            InitPhase::TimingConfig => {
                let t = &self.timing;
                push(
                    &mut steps,
                    &[
                        Cmd(op::SET_LSHIFT_FREQ),
                        Data((t.pixel_clock >> 16) as u16 & 0xFF),
                        Data((t.pixel_clock >> 8) as u16 & 0xFF),
                        Data(t.pixel_clock as u16 & 0xFF),
                        Cmd(op::SET_LCD_MODE),
                        Data(0x20),
                        Data(0x00),
                        Data(t.hdp >> 8),
                        Data(t.hdp & 0xFF),
                        Data(t.vdp >> 8),
                        Data(t.vdp & 0xFF),
                        Data(0x00),
                        Cmd(op::SET_HORI_PERIOD),
                        Data(t.ht >> 8),
                        Data(t.ht & 0xFF),
                        Data(t.hps >> 8),
                        Data(t.hps & 0xFF),
                        Data(t.hpw as u16),
                        Data(t.lps >> 8),
                        Data(t.lps & 0xFF),
                        Data(t.lpspp as u16),
                        Cmd(op::SET_VERT_PERIOD),
                        Data(t.vt >> 8),
                        Data(t.vt & 0xFF),
                        Data(t.vps >> 8),
                        Data(t.vps & 0xFF),
                        Data(t.vpw as u16),
                        Data(t.fps >> 8),
                        Data(t.fps & 0xFF),
                        Cmd(op::SET_ADDRESS_MODE),
                        Data(t.address_mode as u16),
                        Cmd(op::SET_PIXEL_DATA_INTERFACE),
                        Data(t.pixel_interface as u16),
                        DelayMs(5),
                    ],
                );
            }
            InitPhase::Ready => {}
        }
        steps
    }
}

/// Execute one phase's steps over the command channel
pub fn run_steps<B: ParallelBus>(
    chan: &mut CommandChannel<B>,
    delay: &mut impl DelayNs,
    steps: &[InitStep],
) {
    for step in steps {
        match *step {
            InitStep::Cmd(opcode) => chan.command(opcode),
            InitStep::Data(word) => chan.data(word),
            InitStep::DelayMs(ms) => delay.delay_ms(ms),
            InitStep::Reset(asserted) => chan.set_reset(asserted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_run_in_order_and_terminate() {
        let mut order = [InitPhase::Reset; 6];
        let mut phase = Some(InitPhase::Reset);
        let mut i = 0;
        while let Some(p) = phase {
            order[i] = p;
            phase = p.next();
            i += 1;
        }
        assert_eq!(i, 6);
        assert_eq!(order[3], InitPhase::SoftReset);
        assert_eq!(order[5], InitPhase::Ready);
    }

    #[test]
    fn reset_phase_pulses_the_line() {
        let steps = InitSequence::default().steps(InitPhase::Reset);
        assert_eq!(
            &steps[..],
            &[
                InitStep::Reset(false),
                InitStep::DelayMs(50),
                InitStep::Reset(true),
                InitStep::DelayMs(30),
                InitStep::Reset(false),
                InitStep::DelayMs(100),
            ]
        );
    }

    #[test]
    fn pll_phase_carries_the_default_constants() {
        let steps = InitSequence::default().steps(InitPhase::PllConfig);
        assert_eq!(
            &steps[..],
            &[
                InitStep::Cmd(op::SET_PLL_MN),
                InitStep::Data(0x23),
                InitStep::Data(0x02),
                InitStep::Data(0x04),
            ]
        );
    }

    #[test]
    fn timing_phase_splits_operands_big_endian() {
        let steps = InitSequence::default().steps(InitPhase::TimingConfig);
        // HT = 525 = 0x020D right after the SET_HORI_PERIOD opcode
        let at = steps
            .iter()
            .position(|s| *s == InitStep::Cmd(op::SET_HORI_PERIOD))
            .unwrap();
        assert_eq!(steps[at + 1], InitStep::Data(0x02));
        assert_eq!(steps[at + 2], InitStep::Data(0x0D));
    }

    #[test]
    fn ready_phase_has_no_raw_steps() {
        assert!(InitSequence::default().steps(InitPhase::Ready).is_empty());
    }
}
