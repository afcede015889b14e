//! Status UART transmit task
//!
//! Reports driver readiness and the refresh tick counter to the frame
//! producer once a second.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;
use portable_atomic::Ordering;

use udas_protocol::DeviceStatus;

use crate::channels::{DRIVER_READY, UPDATE_COUNT};

/// Status report interval
const STATUS_INTERVAL_MS: u64 = 1000;

/// Status TX task - sends periodic status frames to the producer
#[embassy_executor::task]
pub async fn status_tx_task(mut tx: BufferedUartTx) {
    info!("Status TX task started");

    let mut ticker = Ticker::every(Duration::from_millis(STATUS_INTERVAL_MS));

    loop {
        ticker.next().await;

        let status = DeviceStatus {
            ready: DRIVER_READY.load(Ordering::Acquire),
            updates: UPDATE_COUNT.load(Ordering::Relaxed),
        };

        if let Ok(frame) = status.to_frame() {
            let mut buf = [0u8; 16];
            if let Ok(len) = frame.encode(&mut buf) {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("Failed to send status: {:?}", e);
                }
            }
        }
    }
}
