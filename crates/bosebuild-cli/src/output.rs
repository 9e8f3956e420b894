//! Rendering decoded messages for the terminal.

use bosebuild_protocol::{Function, FunctionBlock, Message, Operator};
use clap::ValueEnum;
use serde::Serialize;

use crate::error::CliError;

/// Output format for printed messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One human-readable line per message.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Serializable view of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    /// Function block.
    pub function_block: FunctionBlock,
    /// Function.
    pub function: Function,
    /// Operator.
    pub operator: Operator,
    /// Declared payload length.
    pub data_length: u8,
    /// Payload as lowercase hex.
    pub payload: String,
    /// Complete encoded frame as lowercase hex.
    pub frame: String,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        MessageView {
            function_block: message.function_block(),
            function: message.function(),
            operator: message.operator(),
            data_length: message.data_length(),
            payload: hex::encode(message.payload()),
            frame: hex::encode(message.encode()),
        }
    }
}

/// Render one message in the given format.
pub fn render(message: &Message, format: Format) -> Result<String, CliError> {
    match format {
        Format::Text => Ok(format!("{}  {}", hex::encode(message.encode()), message)),
        Format::Json => Ok(serde_json::to_string(&MessageView::from(message))?),
    }
}
