//! Message types for the producer protocol
//!
//! Message types are divided into two categories:
//! - Host → Device: frame region session control, pixel data, refresh
//!   source selection and target rectangle updates
//! - Device → Host: status reports

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::Vec;

// Message type IDs: Host → Device
pub const MSG_OPEN_BUFFER: u8 = 0x10;
pub const MSG_CLOSE_BUFFER: u8 = 0x11;
pub const MSG_WRITE_SEQ: u8 = 0x12;
pub const MSG_WRITE_PAGE: u8 = 0x13;
pub const MSG_SET_SOURCE: u8 = 0x14;
pub const MSG_SET_RECT: u8 = 0x15;

// Message type IDs: Device → Host
pub const MSG_STATUS: u8 = 0x30;

/// Messages from the frame producer to the device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage<'a> {
    /// Open the frame region session, zeroing its contents
    OpenBuffer,
    /// Release the frame region session
    CloseBuffer,
    /// Write pixel bytes sequentially from the start of the region
    WriteSeq { data: &'a [u8] },
    /// Write pixel bytes at an offset inside one page
    WritePage { page: u8, offset: u16, data: &'a [u8] },
    /// Set the refresh source selector code
    SetSource { code: u8 },
    /// Set the target rectangle for frame blits
    SetRect { x: i16, y: i16, width: i16, height: i16 },
}

impl<'a> HostMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            HostMessage::OpenBuffer => Ok(Frame::empty(MSG_OPEN_BUFFER)),
            HostMessage::CloseBuffer => Ok(Frame::empty(MSG_CLOSE_BUFFER)),
            HostMessage::WriteSeq { data } => Frame::new(MSG_WRITE_SEQ, data),
            HostMessage::WritePage { page, offset, data } => {
                // Payload: [page][offset_hi][offset_lo][bytes...]
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload.push(*page).map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(&offset.to_be_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(data)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_WRITE_PAGE, &payload)
            }
            HostMessage::SetSource { code } => Frame::new(MSG_SET_SOURCE, &[*code]),
            HostMessage::SetRect {
                x,
                y,
                width,
                height,
            } => {
                let mut payload = [0u8; 8];
                payload[0..2].copy_from_slice(&x.to_be_bytes());
                payload[2..4].copy_from_slice(&y.to_be_bytes());
                payload[4..6].copy_from_slice(&width.to_be_bytes());
                payload[6..8].copy_from_slice(&height.to_be_bytes());
                Frame::new(MSG_SET_RECT, &payload)
            }
        }
    }

    /// Parse a message from a frame, borrowing payload data in place
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let payload = &frame.payload;
        match frame.msg_type {
            MSG_OPEN_BUFFER => Ok(HostMessage::OpenBuffer),
            MSG_CLOSE_BUFFER => Ok(HostMessage::CloseBuffer),
            MSG_WRITE_SEQ => Ok(HostMessage::WriteSeq { data: payload }),
            MSG_WRITE_PAGE => {
                if payload.len() < 3 {
                    return Err(FrameError::Malformed);
                }
                Ok(HostMessage::WritePage {
                    page: payload[0],
                    offset: u16::from_be_bytes([payload[1], payload[2]]),
                    data: &payload[3..],
                })
            }
            MSG_SET_SOURCE => {
                if payload.is_empty() {
                    return Err(FrameError::Malformed);
                }
                Ok(HostMessage::SetSource { code: payload[0] })
            }
            MSG_SET_RECT => {
                if payload.len() != 8 {
                    return Err(FrameError::Malformed);
                }
                Ok(HostMessage::SetRect {
                    x: i16::from_be_bytes([payload[0], payload[1]]),
                    y: i16::from_be_bytes([payload[2], payload[3]]),
                    width: i16::from_be_bytes([payload[4], payload[5]]),
                    height: i16::from_be_bytes([payload[6], payload[7]]),
                })
            }
            _ => Err(FrameError::Malformed),
        }
    }
}

/// Periodic status report from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStatus {
    /// Whether the controller finished bring-up
    pub ready: bool,
    /// Refresh ticks since boot, idle ticks included
    pub updates: u32,
}

impl DeviceStatus {
    /// Encode this status into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut payload = [0u8; 5];
        payload[0] = self.ready as u8;
        payload[1..5].copy_from_slice(&self.updates.to_be_bytes());
        Frame::new(MSG_STATUS, &payload)
    }

    /// Parse a status report from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        if frame.msg_type != MSG_STATUS || frame.payload.len() != 5 {
            return Err(FrameError::Malformed);
        }
        Ok(Self {
            ready: frame.payload[0] != 0,
            updates: u32::from_be_bytes([
                frame.payload[1],
                frame.payload[2],
                frame.payload[3],
                frame.payload[4],
            ]),
        })
    }
}
