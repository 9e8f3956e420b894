//! Protocol constants
//!
//! These constants define the header layout and the numeric codes used by the
//! BOSEbuild control protocol. The codes must match the accessory firmware
//! exactly.

// ============================================================================
// Header Layout
// ============================================================================

/// Value of the leading reserved byte.
pub const RESERVED_BYTE: u8 = 0x00;
/// Header length: reserved + block + function + operator + data_length.
pub const HEADER_SIZE: usize = 5;
/// Largest payload that fits in the one-byte length field.
pub const MAX_PAYLOAD_SIZE: usize = u8::MAX as usize;
/// Largest possible frame.
pub const MAX_FRAME_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE;

/// Offset of the reserved byte.
pub const OFFSET_RESERVED: usize = 0;
/// Offset of the function block code.
pub const OFFSET_FUNCTION_BLOCK: usize = 1;
/// Offset of the function code.
pub const OFFSET_FUNCTION: usize = 2;
/// Offset of the operator code.
pub const OFFSET_OPERATOR: usize = 3;
/// Offset of the payload length.
pub const OFFSET_DATA_LENGTH: usize = 4;

// ============================================================================
// Function Blocks
// ============================================================================

/// Product information.
pub const FBLOCK_PRODUCT_INFO: u8 = 0;
/// Device settings.
pub const FBLOCK_SETTINGS: u8 = 1;
/// Device status.
pub const FBLOCK_STATUS: u8 = 2;
/// Firmware update.
pub const FBLOCK_FIRMWARE_UPDATE: u8 = 3;
/// Device management.
pub const FBLOCK_DEVICE_MANAGEMENT: u8 = 4;
/// Audio management.
pub const FBLOCK_AUDIO_MANAGEMENT: u8 = 5;
/// Call management.
pub const FBLOCK_CALL_MANAGEMENT: u8 = 6;
/// Session management.
pub const FBLOCK_SESSION_MANAGEMENT: u8 = 7;
/// Debug.
pub const FBLOCK_DEBUG: u8 = 8;
/// Unused slot, kept so the codes line up with the firmware.
pub const FBLOCK_UNUSED: u8 = 9;
/// Digital signal processing.
pub const FBLOCK_DSP: u8 = 10;
/// BOSEbuild accessory (LEDs, accessory connections).
pub const FBLOCK_BOSEBUILD: u8 = 11;
/// Hearing assistance.
pub const FBLOCK_HEARING_ASSISTANCE: u8 = 12;
/// Data collection.
pub const FBLOCK_DATA_COLLECTION: u8 = 13;

// ============================================================================
// Functions (BOSEbuild block)
// ============================================================================

/// Function block info.
pub const FUNC_FBLOCK_INFO: u8 = 0;
/// Get every value in the block.
pub const FUNC_GET_ALL: u8 = 1;
/// Connected accessories.
pub const FUNC_CONNECTED_ACCESSORIES: u8 = 2;
/// LED modes supported by the accessory.
pub const FUNC_LED_SUPPORTED_MODES: u8 = 3;
/// Active LED mode.
pub const FUNC_LED_MODE: u8 = 4;
/// Information about an LED mode.
pub const FUNC_LED_MODE_INFO: u8 = 5;
/// Number of user controls for an LED mode.
pub const FUNC_LED_USER_CONTROL_LIST_SIZE: u8 = 6;
/// Information about a user control.
pub const FUNC_LED_USER_CONTROL_INFO: u8 = 7;
/// Value of a user control.
pub const FUNC_LED_USER_CONTROL_VALUE: u8 = 8;
/// Host is disconnecting.
pub const FUNC_DISCONNECTING: u8 = 9;
/// Persist the current LED setting.
pub const FUNC_SAVE_LED_SETTING: u8 = 10;
/// Analytics.
pub const FUNC_ANALYTICS: u8 = 11;

// ============================================================================
// Operators
// ============================================================================

/// Set a value.
pub const OP_SET: u8 = 0;
/// Get a value.
pub const OP_GET: u8 = 1;
/// Set a value and return the result.
pub const OP_SET_GET: u8 = 2;
/// Status (reply to Get/SetGet, or unsolicited).
pub const OP_STATUS: u8 = 3;
/// Error reply.
pub const OP_ERROR: u8 = 4;
/// Start an operation.
pub const OP_START: u8 = 5;
/// Result of a started operation.
pub const OP_RESULT: u8 = 6;
/// Operation still in progress.
pub const OP_PROCESSING: u8 = 7;

// ============================================================================
// LED Modes (payload of FUNC_LED_MODE)
// ============================================================================

/// Static RGB colour.
pub const LED_MODE_RGB: u8 = 0;
/// Animated "dancing" pattern.
pub const LED_MODE_DANCING: u8 = 1;
/// Factory initial pattern.
pub const LED_MODE_INITIAL: u8 = 2;
