//! BOSEbuild Accessory Control Protocol
//!
//! This crate provides types and utilities for talking to a BOSEbuild
//! accessory over its BLE control characteristic. Every message on the wire
//! uses the same fixed five-byte header followed by a variable-length payload.
//!
//! # Protocol Overview
//!
//! ```text
//! +----------+-------+----------+----------+-------------+------------------+
//! | reserved | block | function | operator | data_length | payload[0..len]  |
//! |   0x00   |  u8   |    u8    |    u8    |     u8      |                  |
//! +----------+-------+----------+----------+-------------+------------------+
//! ```
//!
//! - **Function block**: the device subsystem being addressed (settings,
//!   firmware update, BOSEbuild, ...)
//! - **Function**: the operation within that block
//! - **Operator**: the verb (`Set`, `Get`, `Status`, `Error`, ...)
//!
//! # Example
//!
//! ```rust,ignore
//! use bosebuild_protocol::{Function, FunctionBlock, Message, Operator};
//!
//! // Build a command
//! let msg = Message::with_payload(FunctionBlock::BoseBuild, Function::LedMode, Operator::Set, [0x00])?;
//! let frame = msg.encode();
//!
//! // Parse a reply
//! let reply = Message::decode(&received_data)?;
//! ```

mod constants;
mod error;
mod frame;
mod led;
mod message;
mod types;

pub use constants::*;
pub use error::*;
pub use frame::*;
pub use led::*;
pub use message::*;
pub use types::*;
