//! Message encoding and decoding.
//!
//! ## Frame Format
//!
//! | Field          | Size (bytes) | Description                                  |
//! |----------------|--------------|----------------------------------------------|
//! | reserved       | 1            | Always `0x00`.                               |
//! | function_block | 1            | [`FunctionBlock`] code.                      |
//! | function       | 1            | [`Function`] code.                           |
//! | operator       | 1            | [`Operator`] code.                           |
//! | data_length    | 1            | Payload length, 0..=255.                     |
//! | payload        | data_length  | Function-specific data.                      |

use std::fmt;

use bytes::BufMut;

use crate::constants::*;
use crate::error::ProtocolError;
use crate::types::{Function, FunctionBlock, Operator};

/// The fixed five-byte header at the start of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Addressed subsystem.
    pub function_block: FunctionBlock,
    /// Operation within the block.
    pub function: Function,
    /// Message verb.
    pub operator: Operator,
    /// Number of payload bytes that follow.
    pub data_length: u8,
}

impl Header {
    /// Parse and validate a header from the start of `frame`.
    ///
    /// Only the first [`HEADER_SIZE`] bytes are inspected; the payload is not
    /// required to be present.
    pub fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        if frame.len() < HEADER_SIZE {
            return Err(ProtocolError::FrameTooShort {
                expected: HEADER_SIZE,
                actual: frame.len(),
            });
        }

        let reserved = frame[OFFSET_RESERVED];
        if reserved != RESERVED_BYTE {
            return Err(ProtocolError::InvalidReservedByte(reserved));
        }

        Ok(Header {
            function_block: FunctionBlock::try_from(frame[OFFSET_FUNCTION_BLOCK])?,
            function: Function::try_from(frame[OFFSET_FUNCTION])?,
            operator: Operator::try_from(frame[OFFSET_OPERATOR])?,
            data_length: frame[OFFSET_DATA_LENGTH],
        })
    }

    /// Total frame length described by this header.
    pub fn frame_len(&self) -> usize {
        HEADER_SIZE + self.data_length as usize
    }
}

/// A single protocol message.
///
/// Messages are immutable once built; the payload length always matches the
/// header's `data_length`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    function_block: FunctionBlock,
    function: Function,
    operator: Operator,
    payload: Vec<u8>,
}

impl Message {
    /// Create a message with an empty payload.
    pub fn new(function_block: FunctionBlock, function: Function, operator: Operator) -> Self {
        Message {
            function_block,
            function,
            operator,
            payload: Vec::new(),
        }
    }

    /// Create a message carrying `payload`.
    ///
    /// Fails with [`ProtocolError::PayloadTooLarge`] if the payload is longer
    /// than 255 bytes.
    pub fn with_payload(
        function_block: FunctionBlock,
        function: Function,
        operator: Operator,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Self, ProtocolError> {
        let payload = payload.into();
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::PayloadTooLarge { len: payload.len() });
        }
        Ok(Message {
            function_block,
            function,
            operator,
            payload,
        })
    }

    /// Addressed subsystem.
    pub fn function_block(&self) -> FunctionBlock {
        self.function_block
    }

    /// Operation within the block.
    pub fn function(&self) -> Function {
        self.function
    }

    /// Message verb.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Value of the header's length field.
    pub fn data_length(&self) -> u8 {
        // Bounded by the constructors.
        self.payload.len() as u8
    }

    /// The header of this message.
    pub fn header(&self) -> Header {
        Header {
            function_block: self.function_block,
            function: self.function,
            operator: self.operator,
            data_length: self.data_length(),
        }
    }

    /// Encoded length in bytes.
    pub fn size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Whether the device reported an error.
    pub fn is_error(&self) -> bool {
        self.operator == Operator::Error
    }

    /// Whether this is a device reply rather than a request.
    pub fn is_reply(&self) -> bool {
        self.operator.is_reply()
    }

    /// Encode the message to bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.size());
        self.encode_into(&mut buf);
        buf
    }

    /// Append the encoded message to `buf`.
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(RESERVED_BYTE);
        buf.put_u8(self.function_block.code());
        buf.put_u8(self.function.code());
        buf.put_u8(self.operator.code());
        buf.put_u8(self.data_length());
        buf.put_slice(&self.payload);
    }

    /// Decode a message from a delimited frame.
    ///
    /// Bytes past the declared payload are ignored. Use
    /// [`Message::decode_exact`] when they should be rejected instead.
    pub fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        Self::decode_prefix(frame).map(|(message, _)| message)
    }

    /// Decode a message from the start of `data`.
    ///
    /// Returns the message and the number of bytes it occupied.
    pub fn decode_prefix(data: &[u8]) -> Result<(Self, usize), ProtocolError> {
        let header = Header::decode(data)?;
        let len = header.data_length as usize;
        let available = data.len() - HEADER_SIZE;
        if available < len {
            return Err(ProtocolError::TruncatedPayload {
                expected: len,
                actual: available,
            });
        }

        let message = Message {
            function_block: header.function_block,
            function: header.function,
            operator: header.operator,
            payload: data[HEADER_SIZE..HEADER_SIZE + len].to_vec(),
        };
        Ok((message, header.frame_len()))
    }

    /// Decode a message that must occupy all of `frame`.
    ///
    /// Fails with [`ProtocolError::TrailingBytes`] if anything follows the
    /// declared payload.
    pub fn decode_exact(frame: &[u8]) -> Result<Self, ProtocolError> {
        let (message, consumed) = Self::decode_prefix(frame)?;
        if consumed < frame.len() {
            return Err(ProtocolError::TrailingBytes {
                extra: frame.len() - consumed,
            });
        }
        Ok(message)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {} [",
            self.function_block, self.function, self.operator
        )?;
        for (i, byte) in self.payload.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        f.write_str("]")
    }
}
