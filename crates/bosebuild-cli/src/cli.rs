//! Command-line interface.

use std::path::PathBuf;

use bosebuild_protocol::{
    Function, FunctionBlock, LedMode, Message, Operator, Session,
};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::error::CliError;
use crate::output::{render, Format};
use crate::script::Script;

/// Encode and decode BOSEbuild protocol frames.
#[derive(Debug, Parser)]
#[command(name = "bbctl", version, about)]
pub struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    pub format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a frame from header fields and a hex payload.
    Encode {
        /// Function block name or code.
        #[arg(long)]
        block: FunctionBlock,
        /// Function name or code.
        #[arg(long)]
        function: Function,
        /// Operator name or code.
        #[arg(long)]
        operator: Operator,
        /// Payload as hex.
        #[arg(long, default_value = "")]
        payload: String,
    },

    /// Decode a single frame given as hex.
    Decode {
        /// Frame bytes as hex.
        frame: String,
        /// Reject bytes after the declared payload.
        #[arg(long)]
        exact: bool,
    },

    /// Split a captured byte stream into frames.
    Stream {
        /// Stream bytes as hex.
        data: String,
    },

    /// Render a YAML command script into frames.
    Script {
        /// Path to the script.
        path: PathBuf,
    },

    /// List every function block, function, operator and LED mode code.
    Catalog,
}

/// Run a parsed command line, returning the lines to print.
pub fn run(cli: &Cli) -> Result<Vec<String>, CliError> {
    match &cli.command {
        Command::Encode {
            block,
            function,
            operator,
            payload,
        } => {
            let payload = crate::parse_hex(payload)?;
            let message = Message::with_payload(*block, *function, *operator, payload)?;
            debug!(size = message.size(), "encoded {}", message);
            Ok(vec![render(&message, cli.format)?])
        }

        Command::Decode { frame, exact } => {
            let bytes = crate::parse_hex(frame)?;
            let message = if *exact {
                Message::decode_exact(&bytes)?
            } else {
                let (message, consumed) = Message::decode_prefix(&bytes)?;
                if consumed < bytes.len() {
                    info!(
                        extra = bytes.len() - consumed,
                        "ignoring bytes after declared payload"
                    );
                }
                message
            };
            Ok(vec![render(&message, cli.format)?])
        }

        Command::Stream { data } => {
            let bytes = crate::parse_hex(data)?;
            let mut session = Session::new();
            session.feed(&bytes);

            let messages = session.drain();
            if session.buffered_len() > 0 {
                warn!(
                    bytes = session.buffered_len(),
                    "stream ends with an incomplete frame"
                );
            }
            info!(frames = messages.len(), "stream decoded");
            messages
                .iter()
                .map(|message| render(message, cli.format))
                .collect()
        }

        Command::Script { path } => {
            let script = Script::load(path)?;
            info!(
                name = script.name.as_deref().unwrap_or("<unnamed>"),
                entries = script.commands.len(),
                "rendering script"
            );
            script
                .render()?
                .iter()
                .map(|message| render(message, cli.format))
                .collect()
        }

        Command::Catalog => Ok(catalog_lines()),
    }
}

fn catalog_lines() -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("function blocks:".to_string());
    lines.extend(
        FunctionBlock::ALL
            .iter()
            .map(|v| format!("  {:>3}  {}", v.code(), v)),
    );
    lines.push("functions:".to_string());
    lines.extend(Function::ALL.iter().map(|v| format!("  {:>3}  {}", v.code(), v)));
    lines.push("operators:".to_string());
    lines.extend(Operator::ALL.iter().map(|v| format!("  {:>3}  {}", v.code(), v)));
    lines.push("LED modes:".to_string());
    lines.extend(LedMode::ALL.iter().map(|v| format!("  {:>3}  {}", v.code(), v)));
    lines
}
