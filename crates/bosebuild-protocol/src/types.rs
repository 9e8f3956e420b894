//! Enumerated catalogs used in the message header and LED payloads.
//!
//! Each catalog maps a closed set of variants onto the exact numeric code the
//! firmware expects. Conversions from raw codes go through `TryFrom<u8>` and
//! fail with the matching `Unknown*` error. Names parse case-insensitively and
//! ignore `-`/`_`, so `led-mode`, `LED_MODE` and `LedMode` are equivalent;
//! a decimal or `0x` code is accepted as well.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::*;
use crate::error::ProtocolError;

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal, $unknown:ident) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:path => $text:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Wire code for this variant.
            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Protocol name for this variant.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = ProtocolError;

            fn try_from(code: u8) -> Result<Self, ProtocolError> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err(ProtocolError::$unknown(code)),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ProtocolError;

            fn from_str(s: &str) -> Result<Self, ProtocolError> {
                if let Some(code) = parse_code(s) {
                    return $name::try_from(code);
                }
                let wanted = normalize(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| normalize(v.name()) == wanted)
                    .ok_or_else(|| ProtocolError::UnknownName {
                        catalog: $kind,
                        name: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let parsed = match CatalogValue::deserialize(deserializer)? {
                    CatalogValue::Code(code) => $name::try_from(code),
                    CatalogValue::Name(name) => name.parse(),
                };
                parsed.map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A catalog entry as written in a config file: either its code or its name.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogValue {
    Code(u8),
    Name(String),
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn parse_code(s: &str) -> Option<u8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).ok();
    }
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }
    None
}

catalog! {
    /// Device subsystem addressed by a message.
    pub enum FunctionBlock("function block", UnknownFunctionBlock) {
        /// Product information.
        ProductInfo = FBLOCK_PRODUCT_INFO => "product-info",
        /// Device settings.
        Settings = FBLOCK_SETTINGS => "settings",
        /// Device status.
        Status = FBLOCK_STATUS => "status",
        /// Firmware update.
        FirmwareUpdate = FBLOCK_FIRMWARE_UPDATE => "firmware-update",
        /// Device management.
        DeviceManagement = FBLOCK_DEVICE_MANAGEMENT => "device-management",
        /// Audio management.
        AudioManagement = FBLOCK_AUDIO_MANAGEMENT => "audio-management",
        /// Call management.
        CallManagement = FBLOCK_CALL_MANAGEMENT => "call-management",
        /// Session management.
        SessionManagement = FBLOCK_SESSION_MANAGEMENT => "session-management",
        /// Debug.
        Debug = FBLOCK_DEBUG => "debug",
        /// Reserved slot.
        Unused = FBLOCK_UNUSED => "unused",
        /// Digital signal processing.
        Dsp = FBLOCK_DSP => "dsp",
        /// BOSEbuild accessory.
        BoseBuild = FBLOCK_BOSEBUILD => "bosebuild",
        /// Hearing assistance.
        HearingAssistance = FBLOCK_HEARING_ASSISTANCE => "hearing-assistance",
        /// Data collection.
        DataCollection = FBLOCK_DATA_COLLECTION => "data-collection",
    }
}

catalog! {
    /// Operation within a function block.
    ///
    /// The codes are those of the BOSEbuild block. Whether a function makes
    /// sense for a given block is left to the application.
    pub enum Function("function", UnknownFunction) {
        /// Function block info.
        FBlockInfo = FUNC_FBLOCK_INFO => "fblock-info",
        /// Get every value in the block.
        GetAll = FUNC_GET_ALL => "get-all",
        /// Connected accessories.
        ConnectedAccessories = FUNC_CONNECTED_ACCESSORIES => "connected-accessories",
        /// Supported LED modes.
        LedSupportedModes = FUNC_LED_SUPPORTED_MODES => "led-supported-modes",
        /// Active LED mode.
        LedMode = FUNC_LED_MODE => "led-mode",
        /// LED mode info.
        LedModeInfo = FUNC_LED_MODE_INFO => "led-mode-info",
        /// Number of user controls for a mode.
        LedUserControlListSize = FUNC_LED_USER_CONTROL_LIST_SIZE => "led-user-control-list-size",
        /// User control info.
        LedUserControlInfo = FUNC_LED_USER_CONTROL_INFO => "led-user-control-info",
        /// User control value.
        LedUserControlValue = FUNC_LED_USER_CONTROL_VALUE => "led-user-control-value",
        /// Host disconnecting.
        Disconnecting = FUNC_DISCONNECTING => "disconnecting",
        /// Persist LED setting.
        SaveLedSetting = FUNC_SAVE_LED_SETTING => "save-led-setting",
        /// Analytics.
        Analytics = FUNC_ANALYTICS => "analytics",
    }
}

catalog! {
    /// Verb describing the intent of a message.
    pub enum Operator("operator", UnknownOperator) {
        /// Set a value.
        Set = OP_SET => "set",
        /// Get a value.
        Get = OP_GET => "get",
        /// Set and return the new value.
        SetGet = OP_SET_GET => "set-get",
        /// Status reply.
        Status = OP_STATUS => "status",
        /// Error reply.
        Error = OP_ERROR => "error",
        /// Start an operation.
        Start = OP_START => "start",
        /// Operation result.
        Result = OP_RESULT => "result",
        /// Operation in progress.
        Processing = OP_PROCESSING => "processing",
    }
}

catalog! {
    /// LED animation mode, carried in the payload of LED functions.
    pub enum LedMode("LED mode", UnknownLedMode) {
        /// Static RGB colour.
        Rgb = LED_MODE_RGB => "rgb",
        /// Dancing pattern.
        Dancing = LED_MODE_DANCING => "dancing",
        /// Initial pattern.
        Initial = LED_MODE_INITIAL => "initial",
    }
}

impl Operator {
    /// Whether the device sends this operator in reply to a request.
    pub fn is_reply(self) -> bool {
        matches!(
            self,
            Operator::Status | Operator::Error | Operator::Result | Operator::Processing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_block_codes_match_firmware() {
        let expected = [
            (FunctionBlock::ProductInfo, 0),
            (FunctionBlock::Settings, 1),
            (FunctionBlock::Status, 2),
            (FunctionBlock::FirmwareUpdate, 3),
            (FunctionBlock::DeviceManagement, 4),
            (FunctionBlock::AudioManagement, 5),
            (FunctionBlock::CallManagement, 6),
            (FunctionBlock::SessionManagement, 7),
            (FunctionBlock::Debug, 8),
            (FunctionBlock::Unused, 9),
            (FunctionBlock::Dsp, 10),
            (FunctionBlock::BoseBuild, 11),
            (FunctionBlock::HearingAssistance, 12),
            (FunctionBlock::DataCollection, 13),
        ];
        assert_eq!(FunctionBlock::ALL.len(), expected.len());
        for (block, code) in expected {
            assert_eq!(block.code(), code);
            assert_eq!(FunctionBlock::try_from(code), Ok(block));
        }
        assert_eq!(
            FunctionBlock::try_from(14),
            Err(ProtocolError::UnknownFunctionBlock(14))
        );
    }

    #[test]
    fn test_function_and_operator_codes() {
        assert_eq!(Function::LedUserControlValue.code(), 8);
        assert_eq!(Function::Analytics.code(), 11);
        assert_eq!(Function::ALL.len(), 12);
        assert_eq!(Function::try_from(12), Err(ProtocolError::UnknownFunction(12)));

        assert_eq!(Operator::SetGet.code(), 2);
        assert_eq!(Operator::Processing.code(), 7);
        assert_eq!(Operator::try_from(8), Err(ProtocolError::UnknownOperator(8)));

        assert_eq!(LedMode::Initial.code(), 2);
        assert_eq!(LedMode::try_from(3), Err(ProtocolError::UnknownLedMode(3)));
    }

    #[test]
    fn test_codes_are_listed_in_order() {
        for (i, func) in Function::ALL.iter().enumerate() {
            assert_eq!(func.code() as usize, i);
        }
        for (i, op) in Operator::ALL.iter().enumerate() {
            assert_eq!(op.code() as usize, i);
        }
    }

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!("bosebuild".parse::<FunctionBlock>(), Ok(FunctionBlock::BoseBuild));
        assert_eq!("BoseBuild".parse::<FunctionBlock>(), Ok(FunctionBlock::BoseBuild));
        assert_eq!("0x0B".parse::<FunctionBlock>(), Ok(FunctionBlock::BoseBuild));
        assert_eq!("11".parse::<FunctionBlock>(), Ok(FunctionBlock::BoseBuild));
        assert_eq!("LED_USER_CONTROL_VALUE".parse::<Function>(), Ok(Function::LedUserControlValue));
        assert_eq!("led-mode".parse::<Function>(), Ok(Function::LedMode));
        assert_eq!("SetGet".parse::<Operator>(), Ok(Operator::SetGet));
        assert_eq!("Dancing".parse::<LedMode>(), Ok(LedMode::Dancing));

        assert_eq!(
            "99".parse::<Operator>(),
            Err(ProtocolError::UnknownOperator(99))
        );
        assert_eq!(
            "blink".parse::<LedMode>(),
            Err(ProtocolError::UnknownName {
                catalog: "LED mode",
                name: "blink".to_string(),
            })
        );
    }

    #[test]
    fn test_display_uses_protocol_name() {
        assert_eq!(FunctionBlock::HearingAssistance.to_string(), "hearing-assistance");
        assert_eq!(Function::SaveLedSetting.to_string(), "save-led-setting");
        assert_eq!(Operator::Error.to_string(), "error");
    }

    #[test]
    fn test_reply_operators() {
        assert!(Operator::Status.is_reply());
        assert!(Operator::Error.is_reply());
        assert!(!Operator::Set.is_reply());
        assert!(!Operator::Start.is_reply());
    }
}
