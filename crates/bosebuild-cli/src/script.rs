//! YAML command scripts.
//!
//! A script lists the messages to send, either as a typed LED command or as a
//! raw header plus hex payload:
//!
//! ```yaml
//! name: red-glow
//! commands:
//!   - led:
//!       command: set-mode
//!       mode: rgb
//!   - led:
//!       command: set-user-control-value
//!       mode: rgb
//!       control_id: 1
//!       value: [255, 0, 0]
//!   - block: bosebuild
//!     function: save-led-setting
//!     operator: set
//! ```

use std::path::Path;

use bosebuild_protocol::{Function, FunctionBlock, LedCommand, Message, Operator, ProtocolError};
use serde::{Deserialize, Deserializer};

use crate::error::CliError;

/// A list of messages loaded from YAML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    /// Optional script name, used in logs.
    #[serde(default)]
    pub name: Option<String>,
    /// Entries in send order.
    pub commands: Vec<ScriptEntry>,
}

/// One entry of a [`Script`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptEntry {
    /// A typed BOSEbuild LED command.
    Led {
        /// The command.
        led: LedCommand,
    },
    /// A message given field by field.
    Raw {
        /// Function block name or code.
        block: FunctionBlock,
        /// Function name or code.
        function: Function,
        /// Operator name or code.
        operator: Operator,
        /// Payload as a hex string.
        #[serde(default, deserialize_with = "hex_payload")]
        payload: Vec<u8>,
    },
}

impl ScriptEntry {
    /// Build the message for this entry.
    pub fn to_message(&self) -> Result<Message, ProtocolError> {
        match self {
            ScriptEntry::Led { led } => led.to_message(),
            ScriptEntry::Raw {
                block,
                function,
                operator,
                payload,
            } => Message::with_payload(*block, *function, *operator, payload.as_slice()),
        }
    }
}

impl Script {
    /// Parse a script from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a script from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Build every message in the script, stopping at the first bad entry.
    pub fn render(&self) -> Result<Vec<Message>, CliError> {
        self.commands
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .to_message()
                    .map_err(|source| CliError::ScriptEntry { index, source })
            })
            .collect()
    }
}

fn hex_payload<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let text = String::deserialize(deserializer)?;
    crate::parse_hex(&text).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bosebuild_protocol::LedMode;

    const RED_GLOW: &str = r#"
name: red-glow
commands:
  - led:
      command: set-mode
      mode: rgb
  - led:
      command: set-user-control-value
      mode: rgb
      control_id: 1
      value: [255, 0, 0]
  - block: bosebuild
    function: save-led-setting
    operator: set
  - block: 11
    function: 0x08
    operator: set
    payload: "00 01 ff 00 00"
"#;

    #[test]
    fn test_parse_script() {
        let script = Script::from_yaml_str(RED_GLOW).unwrap();
        assert_eq!(script.name.as_deref(), Some("red-glow"));
        assert_eq!(script.commands.len(), 4);
        assert_eq!(
            script.commands[0],
            ScriptEntry::Led {
                led: LedCommand::SetMode { mode: LedMode::Rgb }
            }
        );
        assert_eq!(
            script.commands[2],
            ScriptEntry::Raw {
                block: FunctionBlock::BoseBuild,
                function: Function::SaveLedSetting,
                operator: Operator::Set,
                payload: Vec::new(),
            }
        );
    }

    #[test]
    fn test_render_script() {
        let messages = Script::from_yaml_str(RED_GLOW).unwrap().render().unwrap();
        let frames: Vec<String> = messages.iter().map(|m| hex::encode(m.encode())).collect();
        assert_eq!(
            frames,
            vec![
                "000b04000100",
                "000b0800050001ff0000",
                "000b0a0000",
                "000b0800050001ff0000",
            ]
        );
    }

    #[test]
    fn test_render_reports_entry_index() {
        let yaml = format!(
            "commands:\n  - block: debug\n    function: analytics\n    operator: set\n  - block: debug\n    function: analytics\n    operator: set\n    payload: \"{}\"\n",
            "00".repeat(256)
        );
        let err = Script::from_yaml_str(&yaml).unwrap().render().unwrap_err();
        match err {
            CliError::ScriptEntry { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source, ProtocolError::PayloadTooLarge { len: 256 });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let yaml = "commands:\n  - block: toaster\n    function: get-all\n    operator: get\n";
        assert!(matches!(Script::from_yaml_str(yaml), Err(CliError::Yaml(_))));
    }
}
