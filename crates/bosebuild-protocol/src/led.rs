//! Typed commands for the BOSEbuild LED functions.
//!
//! [`LedCommand`] covers the requests a host sends to the accessory's
//! BOSEbuild block. Each command converts to a [`Message`] and back, so the
//! same type serves a host driving real hardware and a simulator answering it.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::message::Message;
use crate::types::{Function, FunctionBlock, LedMode, Operator};

/// Requests that can be sent to the BOSEbuild block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum LedCommand {
    /// Query function block info.
    GetFunctionBlockInfo,

    /// Query every value in the block.
    GetAll,

    /// Query connected accessories.
    GetConnectedAccessories,

    /// Query the LED modes the accessory supports.
    GetSupportedModes,

    /// Query the active LED mode.
    GetMode,

    /// Switch LED mode.
    SetMode {
        /// Mode to activate.
        mode: LedMode,
    },

    /// Query info about an LED mode.
    GetModeInfo {
        /// Mode to describe.
        mode: LedMode,
    },

    /// Query how many user controls a mode has.
    GetUserControlListSize {
        /// Mode to query.
        mode: LedMode,
    },

    /// Query a user control's description.
    GetUserControlInfo {
        /// Mode the control belongs to.
        mode: LedMode,
        /// Control index within the mode.
        control_id: u8,
    },

    /// Set a user control's value (e.g. the colour in RGB mode).
    SetUserControlValue {
        /// Mode the control belongs to.
        mode: LedMode,
        /// Control index within the mode.
        control_id: u8,
        /// Raw control value.
        #[serde(default)]
        value: Vec<u8>,
    },

    /// Persist the current LED setting on the accessory.
    SaveLedSetting,

    /// Tell the accessory the host is disconnecting.
    Disconnecting,
}

impl LedCommand {
    /// Get the function this command addresses.
    pub fn function(&self) -> Function {
        match self {
            LedCommand::GetFunctionBlockInfo => Function::FBlockInfo,
            LedCommand::GetAll => Function::GetAll,
            LedCommand::GetConnectedAccessories => Function::ConnectedAccessories,
            LedCommand::GetSupportedModes => Function::LedSupportedModes,
            LedCommand::GetMode | LedCommand::SetMode { .. } => Function::LedMode,
            LedCommand::GetModeInfo { .. } => Function::LedModeInfo,
            LedCommand::GetUserControlListSize { .. } => Function::LedUserControlListSize,
            LedCommand::GetUserControlInfo { .. } => Function::LedUserControlInfo,
            LedCommand::SetUserControlValue { .. } => Function::LedUserControlValue,
            LedCommand::SaveLedSetting => Function::SaveLedSetting,
            LedCommand::Disconnecting => Function::Disconnecting,
        }
    }

    /// Get the operator this command is sent with.
    pub fn operator(&self) -> Operator {
        match self {
            LedCommand::SetMode { .. }
            | LedCommand::SetUserControlValue { .. }
            | LedCommand::SaveLedSetting
            | LedCommand::Disconnecting => Operator::Set,
            _ => Operator::Get,
        }
    }

    /// Encode the command's payload.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            LedCommand::SetMode { mode }
            | LedCommand::GetModeInfo { mode }
            | LedCommand::GetUserControlListSize { mode } => vec![mode.code()],

            LedCommand::GetUserControlInfo { mode, control_id } => {
                vec![mode.code(), *control_id]
            }

            LedCommand::SetUserControlValue {
                mode,
                control_id,
                value,
            } => {
                let mut buf = Vec::with_capacity(2 + value.len());
                buf.push(mode.code());
                buf.push(*control_id);
                buf.extend_from_slice(value);
                buf
            }

            _ => Vec::new(),
        }
    }

    /// Build the message for this command.
    ///
    /// Only fails when a user control value pushes the payload past 255
    /// bytes.
    pub fn to_message(&self) -> Result<Message, ProtocolError> {
        Message::with_payload(
            FunctionBlock::BoseBuild,
            self.function(),
            self.operator(),
            self.payload(),
        )
    }

    /// Recover the command carried by a request message.
    pub fn from_message(message: &Message) -> Result<Self, ProtocolError> {
        let unexpected = || ProtocolError::UnexpectedMessage {
            function_block: message.function_block().code(),
            function: message.function().code(),
            operator: message.operator().code(),
        };

        if message.function_block() != FunctionBlock::BoseBuild {
            return Err(unexpected());
        }

        let payload = message.payload();
        let command = match (message.function(), message.operator()) {
            (Function::FBlockInfo, Operator::Get) => LedCommand::GetFunctionBlockInfo,
            (Function::GetAll, Operator::Get) => LedCommand::GetAll,
            (Function::ConnectedAccessories, Operator::Get) => {
                LedCommand::GetConnectedAccessories
            }
            (Function::LedSupportedModes, Operator::Get) => LedCommand::GetSupportedModes,
            (Function::LedMode, Operator::Get) => LedCommand::GetMode,
            (Function::LedMode, Operator::Set) => LedCommand::SetMode {
                mode: LedMode::from_payload(payload)?,
            },
            (Function::LedModeInfo, Operator::Get) => LedCommand::GetModeInfo {
                mode: LedMode::from_payload(payload)?,
            },
            (Function::LedUserControlListSize, Operator::Get) => {
                LedCommand::GetUserControlListSize {
                    mode: LedMode::from_payload(payload)?,
                }
            }
            (Function::LedUserControlInfo, Operator::Get) => {
                require_len(payload, 2)?;
                LedCommand::GetUserControlInfo {
                    mode: LedMode::try_from(payload[0])?,
                    control_id: payload[1],
                }
            }
            (Function::LedUserControlValue, Operator::Set) => {
                require_len(payload, 2)?;
                LedCommand::SetUserControlValue {
                    mode: LedMode::try_from(payload[0])?,
                    control_id: payload[1],
                    value: payload[2..].to_vec(),
                }
            }
            (Function::SaveLedSetting, Operator::Set) => LedCommand::SaveLedSetting,
            (Function::Disconnecting, Operator::Set) => LedCommand::Disconnecting,
            _ => return Err(unexpected()),
        };

        // Every payload byte must belong to the command.
        let expected = command.payload().len();
        if payload.len() != expected {
            return Err(ProtocolError::UnexpectedPayloadLength {
                expected,
                actual: payload.len(),
            });
        }
        Ok(command)
    }
}

impl LedMode {
    /// Read the mode from a one-byte LED payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        require_len(payload, 1)?;
        if payload.len() > 1 {
            return Err(ProtocolError::UnexpectedPayloadLength {
                expected: 1,
                actual: payload.len(),
            });
        }
        LedMode::try_from(payload[0])
    }
}

fn require_len(payload: &[u8], expected: usize) -> Result<(), ProtocolError> {
    if payload.len() < expected {
        return Err(ProtocolError::MissingPayload {
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rgb_colour() {
        let cmd = LedCommand::SetUserControlValue {
            mode: LedMode::Rgb,
            control_id: 1,
            value: vec![0xFF, 0x00, 0x00],
        };
        let msg = cmd.to_message().expect("fits");
        assert_eq!(
            msg.encode(),
            vec![0x00, 0x0B, 0x08, 0x00, 0x05, 0x00, 0x01, 0xFF, 0x00, 0x00]
        );
        assert_eq!(LedCommand::from_message(&msg), Ok(cmd));
    }

    #[test]
    fn test_set_mode() {
        let msg = LedCommand::SetMode { mode: LedMode::Rgb }
            .to_message()
            .expect("fits");
        assert_eq!(msg.encode(), vec![0x00, 0x0B, 0x04, 0x00, 0x01, 0x00]);

        let msg = LedCommand::SetMode {
            mode: LedMode::Dancing,
        }
        .to_message()
        .expect("fits");
        assert_eq!(msg.payload(), &[0x01]);
    }

    #[test]
    fn test_queries_use_get() {
        for cmd in [
            LedCommand::GetAll,
            LedCommand::GetMode,
            LedCommand::GetSupportedModes,
            LedCommand::GetUserControlInfo {
                mode: LedMode::Initial,
                control_id: 4,
            },
        ] {
            let msg = cmd.to_message().expect("fits");
            assert_eq!(msg.operator(), Operator::Get);
            assert_eq!(msg.function_block(), FunctionBlock::BoseBuild);
            assert_eq!(LedCommand::from_message(&msg), Ok(cmd));
        }
    }

    #[test]
    fn test_user_control_value_too_large() {
        let cmd = LedCommand::SetUserControlValue {
            mode: LedMode::Rgb,
            control_id: 0,
            value: vec![0; 254],
        };
        assert_eq!(
            cmd.to_message(),
            Err(ProtocolError::PayloadTooLarge { len: 256 })
        );
    }

    #[test]
    fn test_from_message_rejects_other_blocks() {
        let msg = Message::new(FunctionBlock::Settings, Function::LedMode, Operator::Get);
        assert_eq!(
            LedCommand::from_message(&msg),
            Err(ProtocolError::UnexpectedMessage {
                function_block: 1,
                function: 4,
                operator: 1,
            })
        );
    }

    #[test]
    fn test_from_message_short_payload() {
        let msg = Message::new(FunctionBlock::BoseBuild, Function::LedMode, Operator::Set);
        assert_eq!(
            LedCommand::from_message(&msg),
            Err(ProtocolError::MissingPayload {
                expected: 1,
                actual: 0
            })
        );

        let msg = Message::with_payload(
            FunctionBlock::BoseBuild,
            Function::LedMode,
            Operator::Set,
            [0x07],
        )
        .expect("fits");
        assert_eq!(
            LedCommand::from_message(&msg),
            Err(ProtocolError::UnknownLedMode(0x07))
        );
    }

    fn all_commands() -> Vec<LedCommand> {
        vec![
            LedCommand::GetFunctionBlockInfo,
            LedCommand::GetAll,
            LedCommand::GetConnectedAccessories,
            LedCommand::GetSupportedModes,
            LedCommand::GetMode,
            LedCommand::SetMode {
                mode: LedMode::Initial,
            },
            LedCommand::GetModeInfo {
                mode: LedMode::Dancing,
            },
            LedCommand::GetUserControlListSize { mode: LedMode::Rgb },
            LedCommand::GetUserControlInfo {
                mode: LedMode::Rgb,
                control_id: 2,
            },
            LedCommand::SetUserControlValue {
                mode: LedMode::Rgb,
                control_id: 1,
                value: vec![0x10, 0x20, 0x30],
            },
            LedCommand::SetUserControlValue {
                mode: LedMode::Dancing,
                control_id: 0,
                value: Vec::new(),
            },
            LedCommand::SaveLedSetting,
            LedCommand::Disconnecting,
        ]
    }

    #[test]
    fn test_accepted_requests_reencode_identically() {
        for cmd in all_commands() {
            let msg = cmd.to_message().expect("fits");
            let parsed = LedCommand::from_message(&msg).expect("known command");
            assert_eq!(parsed, cmd);
            assert_eq!(parsed.to_message(), Ok(msg.clone()));
            assert_eq!(parsed.to_message().expect("fits").encode(), msg.encode());
        }
    }

    #[test]
    fn test_from_message_rejects_extra_payload() {
        let cases: [(Function, Operator, &[u8], usize); 5] = [
            (Function::LedMode, Operator::Set, &[0x00, 0x05], 1),
            (Function::LedModeInfo, Operator::Get, &[0x01, 0x00, 0x00], 1),
            (Function::LedUserControlInfo, Operator::Get, &[0x00, 0x01, 0x02], 2),
            (Function::GetAll, Operator::Get, &[0x00], 0),
            (Function::SaveLedSetting, Operator::Set, &[0x01, 0x02], 0),
        ];

        for (function, operator, payload, expected) in cases {
            let msg = Message::with_payload(FunctionBlock::BoseBuild, function, operator, payload)
                .expect("fits");
            assert_eq!(
                LedCommand::from_message(&msg),
                Err(ProtocolError::UnexpectedPayloadLength {
                    expected,
                    actual: payload.len(),
                }),
                "{function} {operator}"
            );
        }
    }

    #[test]
    fn test_mode_from_payload_length() {
        assert_eq!(LedMode::from_payload(&[0x01]), Ok(LedMode::Dancing));
        assert_eq!(
            LedMode::from_payload(&[]),
            Err(ProtocolError::MissingPayload {
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            LedMode::from_payload(&[0x01, 0x00]),
            Err(ProtocolError::UnexpectedPayloadLength {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let cmd: LedCommand = serde_yaml::from_str(
            "command: set-user-control-value\nmode: rgb\ncontrol_id: 1\nvalue: [255, 0, 0]\n",
        )
        .expect("valid yaml");
        assert_eq!(
            cmd,
            LedCommand::SetUserControlValue {
                mode: LedMode::Rgb,
                control_id: 1,
                value: vec![255, 0, 0],
            }
        );

        let cmd: LedCommand = serde_yaml::from_str("command: set-mode\nmode: 1\n").expect("valid yaml");
        assert_eq!(
            cmd,
            LedCommand::SetMode {
                mode: LedMode::Dancing
            }
        );
    }
}
