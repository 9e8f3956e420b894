//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when working with the BOSEbuild protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload does not fit in the one-byte length field.
    #[error("payload too large: maximum 255 bytes, got {len}")]
    PayloadTooLarge {
        /// Offending payload length.
        len: usize,
    },

    /// Frame is too short to hold a header.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Leading reserved byte was not 0x00.
    #[error("invalid reserved byte: 0x{0:02X}")]
    InvalidReservedByte(u8),

    /// Unknown function block code.
    #[error("unknown function block code: 0x{0:02X}")]
    UnknownFunctionBlock(u8),

    /// Unknown function code.
    #[error("unknown function code: 0x{0:02X}")]
    UnknownFunction(u8),

    /// Unknown operator code.
    #[error("unknown operator code: 0x{0:02X}")]
    UnknownOperator(u8),

    /// Unknown LED mode code.
    #[error("unknown LED mode code: 0x{0:02X}")]
    UnknownLedMode(u8),

    /// Fewer payload bytes than the header declared.
    #[error("truncated payload: header declares {expected} bytes, got {actual}")]
    TruncatedPayload {
        /// Declared payload length.
        expected: usize,
        /// Payload bytes actually present.
        actual: usize,
    },

    /// Bytes remain after the declared payload.
    #[error("{extra} trailing bytes after frame")]
    TrailingBytes {
        /// Number of bytes past the end of the frame.
        extra: usize,
    },

    /// Payload is shorter than the function requires.
    #[error("payload too short: expected at least {expected} bytes, got {actual}")]
    MissingPayload {
        /// Bytes the function needs.
        expected: usize,
        /// Bytes present.
        actual: usize,
    },

    /// Payload is longer than the function allows.
    #[error("unexpected payload length: expected {expected} bytes, got {actual}")]
    UnexpectedPayloadLength {
        /// Bytes the function takes.
        expected: usize,
        /// Bytes present.
        actual: usize,
    },

    /// Message does not correspond to any known LED command.
    #[error("unexpected message: block 0x{function_block:02X}, function 0x{function:02X}, operator 0x{operator:02X}")]
    UnexpectedMessage {
        /// Function block code.
        function_block: u8,
        /// Function code.
        function: u8,
        /// Operator code.
        operator: u8,
    },

    /// Name does not match any entry of a catalog.
    #[error("unknown {catalog} name: {name:?}")]
    UnknownName {
        /// Catalog being searched (e.g. "operator").
        catalog: &'static str,
        /// Name that failed to match.
        name: String,
    },
}
