//! Board pin adapters
//!
//! Implements the udas-hal pin traits over embassy-rp GPIO so the driver
//! crate stays chip-agnostic. Signal roles on this board:
//!
//! | Signal      | GPIO      |
//! |-------------|-----------|
//! | D0..D15     | 0..15     |
//! | RS          | 16        |
//! | WRn         | 17        |
//! | RDn         | 18        |
//! | CSn         | 19        |
//! | PWR_EN      | 22        |
//! | RSTn        | 26        |
//! | DISP        | 27        |
//! | UART1 TX/RX | 20 / 21   |

use embassy_rp::gpio::{Flex, Output};

use udas_hal::{InputPin, OutputPin};

/// A dedicated control line
pub struct ControlPin {
    pin: Output<'static>,
}

impl ControlPin {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl OutputPin for ControlPin {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// One bidirectional data line, driven as output by default
pub struct DataPin {
    pin: Flex<'static>,
}

impl DataPin {
    pub fn new(mut pin: Flex<'static>) -> Self {
        pin.set_as_output();
        pin.set_low();
        Self { pin }
    }
}

impl OutputPin for DataPin {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl InputPin for DataPin {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
