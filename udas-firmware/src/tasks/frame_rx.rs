//! Producer UART receive task
//!
//! Receives frames from the host-side frame producer and applies them:
//! session control and pixel data go to the shared frame region, selector
//! and target rectangle updates go to the parameter cells.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;
use portable_atomic::Ordering;

use udas_core::geometry::Rect;
use udas_protocol::{FrameParser, HostMessage};

use crate::channels::{self, FRAME, SOURCE_CODE};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Frame RX task - receives and applies producer messages
#[embassy_executor::task]
pub async fn frame_rx_task(mut rx: BufferedUartRx) {
    info!("Frame RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match HostMessage::from_frame(&frame) {
                            Ok(msg) => handle_host_message(msg).await,
                            Err(e) => warn!("Bad producer message: {:?}", e),
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Apply one parsed producer message
async fn handle_host_message(msg: HostMessage<'_>) {
    match msg {
        HostMessage::OpenBuffer => {
            let mut guard = FRAME.lock().await;
            match guard.as_mut() {
                Some(transport) => {
                    if let Err(e) = transport.open() {
                        warn!("Buffer open rejected: {:?}", e);
                    } else {
                        debug!("Frame buffer session opened");
                    }
                }
                None => warn!("No frame region installed"),
            }
        }
        HostMessage::CloseBuffer => {
            let mut guard = FRAME.lock().await;
            match guard.as_mut() {
                Some(transport) => {
                    if let Err(e) = transport.release() {
                        warn!("Buffer release rejected: {:?}", e);
                    } else {
                        debug!("Frame buffer session released");
                    }
                }
                None => warn!("No frame region installed"),
            }
        }
        HostMessage::WriteSeq { data } => {
            let mut guard = FRAME.lock().await;
            match guard.as_mut() {
                Some(transport) => match transport.write(data) {
                    Ok(n) => trace!("Sequential write: {} bytes", n),
                    Err(e) => warn!("Sequential write rejected: {:?}", e),
                },
                None => warn!("No frame region installed"),
            }
        }
        HostMessage::WritePage { page, offset, data } => {
            let mut guard = FRAME.lock().await;
            let Some(transport) = guard.as_mut() else {
                warn!("No frame region installed");
                return;
            };
            match transport.page_mut(page as usize) {
                Some(slot) => {
                    let off = offset as usize;
                    if off >= slot.len() {
                        warn!("Page {} write offset {} out of range", page, off);
                        return;
                    }
                    let n = data.len().min(slot.len() - off);
                    slot[off..off + n].copy_from_slice(&data[..n]);
                    trace!("Page {} write: {} bytes at {}", page, n, off);
                }
                None => warn!("Page {} write rejected", page),
            }
        }
        HostMessage::SetSource { code } => {
            trace!("Selector set to {}", code);
            SOURCE_CODE.store(code, Ordering::Release);
        }
        HostMessage::SetRect {
            x,
            y,
            width,
            height,
        } => {
            channels::set_target_rect(Rect::new(x as i32, y as i32, width as i32, height as i32));
        }
    }
}
