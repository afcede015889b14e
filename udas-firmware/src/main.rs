//! UDAS display subsystem firmware
//!
//! Drives the SSD1963 TFT controller of the operator panel over a
//! bit-banged 16-bit parallel bus, refreshes the panel on a 100 ms tick,
//! and lets a host-side producer fill the shared frame region over UART.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use portable_atomic::Ordering;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use udas_core::framebuf::{FrameTransport, BUFFER_SIZE};
use udas_drivers::ssd1963::{GpioBus, Ssd1963};

use crate::board::{ControlPin, DataPin};
use crate::channels::{DRIVER_READY, FRAME};

mod assets;
mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Backing memory for the shared frame region
static FRAME_REGION: StaticCell<[u8; BUFFER_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("UDAS display firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Control UART to the frame producer, 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART1, p.PIN_20, p.PIN_21, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    // Parallel bus: D0..D15 on GPIO 0..15, control lines per board.rs.
    // Everything idles deasserted until the driver attaches.
    let lo = [
        DataPin::new(Flex::new(p.PIN_0)),
        DataPin::new(Flex::new(p.PIN_1)),
        DataPin::new(Flex::new(p.PIN_2)),
        DataPin::new(Flex::new(p.PIN_3)),
        DataPin::new(Flex::new(p.PIN_4)),
        DataPin::new(Flex::new(p.PIN_5)),
        DataPin::new(Flex::new(p.PIN_6)),
        DataPin::new(Flex::new(p.PIN_7)),
    ];
    let hi = [
        DataPin::new(Flex::new(p.PIN_8)),
        DataPin::new(Flex::new(p.PIN_9)),
        DataPin::new(Flex::new(p.PIN_10)),
        DataPin::new(Flex::new(p.PIN_11)),
        DataPin::new(Flex::new(p.PIN_12)),
        DataPin::new(Flex::new(p.PIN_13)),
        DataPin::new(Flex::new(p.PIN_14)),
        DataPin::new(Flex::new(p.PIN_15)),
    ];
    let bus = GpioBus::new(
        ControlPin::new(Output::new(p.PIN_22, Level::High)), // PWR_EN
        ControlPin::new(Output::new(p.PIN_26, Level::High)), // RSTn
        ControlPin::new(Output::new(p.PIN_27, Level::Low)),  // DISP
        ControlPin::new(Output::new(p.PIN_19, Level::High)), // CSn
        ControlPin::new(Output::new(p.PIN_16, Level::High)), // RS
        ControlPin::new(Output::new(p.PIN_17, Level::High)), // WRn
        ControlPin::new(Output::new(p.PIN_18, Level::High)), // RDn
        lo,
        hi,
    );

    // One-shot controller bring-up
    let mut display = Ssd1963::new(bus, assets::font_set());
    display.initialize(&mut Delay);
    DRIVER_READY.store(true, Ordering::Release);
    info!("SSD1963 bring-up complete");

    // Install the shared frame region; the session starts closed and is
    // opened by the producer over the wire
    let region = FRAME_REGION.init([0u8; BUFFER_SIZE]);
    *FRAME.lock().await = Some(FrameTransport::new(region));

    unwrap!(spawner.spawn(tasks::refresh_task(display)));
    unwrap!(spawner.spawn(tasks::frame_rx_task(rx)));
    unwrap!(spawner.spawn(tasks::status_tx_task(tx)));

    info!("All tasks started");
}
