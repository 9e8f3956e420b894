//! Host tool for the BOSEbuild control protocol.
//!
//! `bbctl` encodes commands into the exact bytes the accessory expects and
//! decodes captured frames, so protocol traffic can be built and inspected
//! without a radio in the loop.

pub mod cli;
pub mod error;
pub mod logging;
pub mod output;
pub mod script;

pub use cli::{run, Cli, Command};
pub use error::CliError;
pub use output::{Format, MessageView};
pub use script::{Script, ScriptEntry};

/// Parse a hex string, ignoring whitespace, `:` and `-` separators and an
/// optional `0x` prefix.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, CliError> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    Ok(hex::decode(digits)?)
}
