//! Producer link framing
//!
//! Wire layout, in order:
//! - START: the 0xA5 synchronization byte
//! - LENGTH: payload byte count, at most `MAX_PAYLOAD_SIZE`
//! - TYPE: message type identifier
//! - PAYLOAD: LENGTH bytes of type-specific data
//! - CHECKSUM: XOR of every preceding byte of the frame, START included
//!
//! The parser carries the XOR as a running value while bytes arrive, so a
//! frame is verified the moment its checksum byte lands, without a second
//! pass over the payload.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 240;

/// Bytes preceding the payload: START, LENGTH, TYPE
const HEADER_LEN: usize = 3;

/// Maximum complete frame size on the wire
pub const MAX_FRAME_SIZE: usize = HEADER_LEN + MAX_PAYLOAD_SIZE + 1;

/// Errors from frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds `MAX_PAYLOAD_SIZE`
    PayloadTooLarge,
    /// Received checksum does not match the frame contents
    BadChecksum,
    /// Structurally invalid frame or payload
    Malformed,
    /// Destination buffer cannot hold the encoded frame
    BufferTooSmall,
}

/// One complete protocol frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Build a frame around a payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Build a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Encode this frame into `buf`, returning the bytes written
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let total = HEADER_LEN + self.payload.len() + 1;
        if buf.len() < total {
            return Err(FrameError::BufferTooSmall);
        }

        buf[0] = FRAME_START;
        buf[1] = self.payload.len() as u8;
        buf[2] = self.msg_type;
        buf[HEADER_LEN..total - 1].copy_from_slice(&self.payload);
        buf[total - 1] = buf[..total - 1].iter().fold(0, |acc, &b| acc ^ b);

        Ok(total)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buf)?;
        Vec::from_slice(&buf[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Where the parser is inside the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Discarding bytes until a start byte appears
    Hunt,
    /// Start byte seen, next byte is the payload length
    Length,
    /// Next byte is the message type
    Type { remaining: u8 },
    /// Collecting `remaining` payload bytes
    Payload { msg_type: u8, remaining: u8 },
    /// Next byte is the checksum
    Checksum { msg_type: u8 },
}

/// Incremental frame parser
///
/// Bytes go in one at a time; a complete, checksum-verified frame comes
/// out. Garbage before a start byte is discarded silently, and after any
/// error the parser resets and hunts for the next start byte.
#[derive(Debug)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    running: u8,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Hunt,
            payload: Vec::new(),
            running: 0,
        }
    }

    /// Drop any partial frame and hunt for the next start byte
    pub fn reset(&mut self) {
        self.state = ParseState::Hunt;
        self.payload.clear();
        self.running = 0;
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(frame))` when this byte completes a valid frame,
    /// `Ok(None)` when more bytes are needed, `Err` on a structural or
    /// checksum failure.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Hunt => {
                if byte == FRAME_START {
                    self.running = byte;
                    self.state = ParseState::Length;
                }
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::Malformed);
                }
                self.running ^= byte;
                self.state = ParseState::Type { remaining: byte };
                Ok(None)
            }
            ParseState::Type { remaining } => {
                self.running ^= byte;
                self.payload.clear();
                self.state = if remaining == 0 {
                    ParseState::Checksum { msg_type: byte }
                } else {
                    ParseState::Payload {
                        msg_type: byte,
                        remaining,
                    }
                };
                Ok(None)
            }
            ParseState::Payload {
                msg_type,
                remaining,
            } => {
                self.running ^= byte;
                // Bounded by the length check above
                let _ = self.payload.push(byte);
                self.state = if remaining == 1 {
                    ParseState::Checksum { msg_type }
                } else {
                    ParseState::Payload {
                        msg_type,
                        remaining: remaining - 1,
                    }
                };
                Ok(None)
            }
            ParseState::Checksum { msg_type } => {
                if byte != self.running {
                    self.reset();
                    return Err(FrameError::BadChecksum);
                }
                let frame = Frame {
                    msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed a run of bytes, stopping at the first complete frame
    ///
    /// Bytes after a completed frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encoded_checksum_covers_the_start_byte() {
        let frame = Frame::empty(0x10);
        let mut buf = [0u8; 8];
        let len = frame.encode(&mut buf).unwrap();

        assert_eq!(len, 4);
        assert_eq!(buf[0], FRAME_START);
        assert_eq!(buf[1], 0);
        assert_eq!(buf[2], 0x10);
        assert_eq!(buf[3], FRAME_START ^ 0x10);
    }

    #[test]
    fn encode_with_payload() {
        let frame = Frame::new(0x13, &[2, 0, 16, 0xAB]).unwrap();
        let mut buf = [0u8; 16];
        let len = frame.encode(&mut buf).unwrap();

        assert_eq!(len, 8);
        assert_eq!(buf[1], 4);
        assert_eq!(buf[2], 0x13);
        assert_eq!(&buf[3..7], &[2, 0, 16, 0xAB]);
        assert_eq!(buf[7], FRAME_START ^ 4 ^ 0x13 ^ 2 ^ 16 ^ 0xAB);
    }

    #[test]
    fn encode_rejects_a_short_buffer() {
        let frame = Frame::new(0x12, &[1, 2, 3]).unwrap();
        let mut buf = [0u8; 6];
        assert_eq!(frame.encode(&mut buf), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn roundtrip() {
        let original = Frame::new(0x12, &[1, 2, 3, 4, 5]).unwrap();
        let encoded = original.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();

        assert_eq!(parsed, original);
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let frame = Frame::empty(0x10);
        let mut encoded = frame.encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::BadChecksum));
    }

    #[test]
    fn corrupted_payload_byte_is_rejected() {
        let frame = Frame::new(0x12, &[9, 9, 9]).unwrap();
        let mut encoded = frame.encode_to_vec().unwrap();
        encoded[4] ^= 0x01;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::BadChecksum));
    }

    #[test]
    fn parser_resyncs_after_garbage() {
        let frame = Frame::new(0x14, &[2]).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let mut data = Vec::<u8, 32>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x5A]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x14);
        assert_eq!(&parsed.payload[..], &[2]);
    }

    #[test]
    fn parser_recovers_after_an_error() {
        let mut parser = FrameParser::new();
        // Oversized length byte aborts the frame
        assert_eq!(
            parser.feed_bytes(&[FRAME_START, 0xFF]),
            Err(FrameError::Malformed)
        );

        let frame = Frame::empty(0x11);
        let encoded = frame.encode_to_vec().unwrap();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x11);
    }

    #[test]
    fn back_to_back_frames_parse_separately() {
        let first = Frame::new(0x12, &[7]).unwrap();
        let second = Frame::empty(0x11);
        let mut wire = Vec::<u8, 16>::new();
        wire.extend_from_slice(&first.encode_to_vec().unwrap())
            .unwrap();
        wire.extend_from_slice(&second.encode_to_vec().unwrap())
            .unwrap();

        let mut parser = FrameParser::new();
        let split = first.encode_to_vec().unwrap().len();
        assert_eq!(parser.feed_bytes(&wire[..split]).unwrap().unwrap(), first);
        assert_eq!(parser.feed_bytes(&wire[split..]).unwrap().unwrap(), second);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x12, &payload), Err(FrameError::PayloadTooLarge));
    }

    proptest! {
        #[test]
        fn any_payload_roundtrips(
            msg_type in 0u8..=0xFF,
            payload in proptest::collection::vec(0u8..=0xFF, 0..MAX_PAYLOAD_SIZE),
        ) {
            let original = Frame::new(msg_type, &payload).unwrap();
            let encoded = original.encode_to_vec().unwrap();

            let mut parser = FrameParser::new();
            let parsed = parser.feed_bytes(&encoded).unwrap();
            prop_assert_eq!(parsed, Some(original));
        }
    }
}
