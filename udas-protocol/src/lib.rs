//! Frame producer protocol
//!
//! This crate defines the UART-based protocol between the host that
//! produces frame content and the display controller board. The host
//! fills the shared frame region page by page, then selects what the
//! refresh scheduler should paint.
//!
//! All messages use a simple binary frame format:
//! ```text
//! START (1B) | LENGTH (1B) | TYPE (1B) | PAYLOAD (0-240B) | CHECKSUM (1B)
//! ```
//! The checksum is the XOR of every preceding frame byte, START included.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{DeviceStatus, HostMessage};
