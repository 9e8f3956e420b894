//! Stream framing for transports that do not delimit frames.
//!
//! The BLE characteristic normally hands over one whole frame per
//! notification, in which case [`Message::decode`] is all that is needed.
//! Serial bridges and captured logs deliver a plain byte stream instead;
//! [`FrameCodec`] buffers that stream and splits it on the length field of
//! each header.
//!
//! Frames carry no sync marker. An invalid header costs one byte. A stray
//! byte that still parses as a header is caught when the frame it implies is
//! not followed by another header, but the frame starting one byte later is.
//! When both readings line up, the earlier one wins and the real frame is
//! lost.
//! A corrupt header declaring a long payload cannot be told apart from a real
//! one and holds the stream until that many bytes arrive; callers recover
//! from that with [`FrameCodec::clear`] or [`Session::reset`].

use bytes::{Buf, BytesMut};

use crate::constants::*;
use crate::error::ProtocolError;
use crate::message::{Header, Message};

/// A codec for splitting a byte stream into messages.
#[derive(Debug, Default)]
pub struct FrameCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl FrameCodec {
    /// Create a new frame codec.
    pub fn new() -> Self {
        FrameCodec {
            buffer: BytesMut::with_capacity(MAX_FRAME_SIZE),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode a complete message from the buffer.
    ///
    /// Returns `Ok(None)` while the header or payload is incomplete. If the
    /// buffered header is invalid, one byte is dropped so the next call can
    /// resynchronise, and the error is returned for the caller to report.
    /// A complete frame that is followed by something other than a header is
    /// treated as misaligned when the frame starting one byte later lines up
    /// with what follows it; the leading byte is then dropped.
    pub fn decode(&mut self) -> Result<Option<Message>, ProtocolError> {
        loop {
            if self.buffer.len() < HEADER_SIZE {
                return Ok(None);
            }

            let header = match Header::decode(&self.buffer) {
                Ok(header) => header,
                Err(err) => {
                    log::debug!("dropping byte 0x{:02X}: {}", self.buffer[0], err);
                    self.buffer.advance(1);
                    return Err(err);
                }
            };

            let frame_len = header.frame_len();
            if self.buffer.len() < frame_len {
                log::trace!(
                    "waiting for payload: have {} of {} bytes",
                    self.buffer.len(),
                    frame_len
                );
                return Ok(None);
            }

            if !self.followed_by_header(0, frame_len) && self.aligned_frame_at(1) {
                log::debug!(
                    "dropping byte 0x{:02X}: frame is misaligned",
                    self.buffer[0]
                );
                self.buffer.advance(1);
                continue;
            }

            let frame = self.buffer.split_to(frame_len);
            let message = Message::decode_exact(&frame)?;
            log::trace!("decoded {}", message);
            return Ok(Some(message));
        }
    }

    /// Whether the bytes after a frame at `offset` could start another frame.
    ///
    /// The end of the buffer counts, as does a partial header that starts
    /// with the reserved byte.
    fn followed_by_header(&self, offset: usize, frame_len: usize) -> bool {
        let next = &self.buffer[offset + frame_len..];
        if next.is_empty() {
            return true;
        }
        if next.len() < HEADER_SIZE {
            return next[0] == RESERVED_BYTE;
        }
        Header::decode(next).is_ok()
    }

    /// Whether a complete frame starts at `offset` and is followed by a header.
    fn aligned_frame_at(&self, offset: usize) -> bool {
        let Some(rest) = self.buffer.get(offset..) else {
            return false;
        };
        match Header::decode(rest) {
            Ok(header) => {
                header.frame_len() <= rest.len()
                    && self.followed_by_header(offset, header.frame_len())
            }
            Err(_) => false,
        }
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// A simple synchronous interface for sending commands and receiving replies.
///
/// This can be used with any byte stream (serial bridge, TCP socket, capture
/// file, ...).
#[derive(Debug, Default)]
pub struct Session {
    codec: FrameCodec,
}

impl Session {
    /// Create a new protocol session.
    pub fn new() -> Self {
        Session {
            codec: FrameCodec::new(),
        }
    }

    /// Encode a message for transmission.
    pub fn encode_message(&self, message: &Message) -> Vec<u8> {
        message.encode()
    }

    /// Feed received data into the decoder.
    pub fn feed(&mut self, data: &[u8]) {
        self.codec.push(data);
    }

    /// Try to decode the next message.
    ///
    /// Returns `Ok(Some(message))` if a complete message was decoded,
    /// `Ok(None)` if more data is needed, or `Err` if a malformed header was
    /// skipped.
    pub fn try_decode(&mut self) -> Result<Option<Message>, ProtocolError> {
        self.codec.decode()
    }

    /// Decode every complete message currently buffered.
    ///
    /// Malformed headers are skipped and logged.
    pub fn drain(&mut self) -> Vec<Message> {
        let mut messages = Vec::new();
        loop {
            match self.codec.decode() {
                Ok(Some(message)) => messages.push(message),
                Ok(None) => break,
                Err(err) => log::warn!("skipping malformed frame data: {}", err),
            }
        }
        messages
    }

    /// Get the number of bytes buffered but not yet decoded.
    pub fn buffered_len(&self) -> usize {
        self.codec.buffered_len()
    }

    /// Reset the session state.
    pub fn reset(&mut self) {
        self.codec.clear();
    }
}
