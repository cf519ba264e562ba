//! Common types and constants for the VoiceAttack profile format
//!
//! This module defines the error type, the decode options and the binary
//! layout constants shared by the decoder, the renderers and the generator.
//! The window sizes and offsets below were recovered from real profiles;
//! changing any of them is a compatibility break, not a tuning decision.

use thiserror::Error;

/// Error type for profile operations
#[derive(Debug, Error)]
pub enum VapError {
    /// The compressed stream is empty, truncated or structurally invalid
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    /// A fixed-width read ran past the end of the buffer
    #[error("Read of {needed} bytes at offset {offset} is out of bounds (buffer is {len} bytes)")]
    OutOfBounds {
        /// Offset the read started at
        offset: usize,
        /// Number of bytes the read needed
        needed: usize,
        /// Length of the buffer
        len: usize,
    },

    /// A length-prefixed string had an implausible length or invalid UTF-8
    #[error("Malformed string at offset {offset}")]
    MalformedString {
        /// Offset of the length prefix
        offset: usize,
    },

    /// The inflated profile exceeds the configured size limit
    #[error("Inflated profile exceeds the {limit} byte limit")]
    BufferTooLarge {
        /// Configured limit in bytes
        limit: usize,
    },

    /// JSON parse or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parse error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for profile operations
pub type Result<T> = std::result::Result<T, VapError>;

// Binary layout constants

/// Upper bound accepted by the strict length-prefixed string reader
pub const MAX_STRING_LENGTH: u32 = 10_000;

/// Upper bound for strings found by the brute-force scanner
pub const MAX_SCANNED_STRING_LENGTH: u32 = 500;

/// Minimum string length used for the command string table
pub const MIN_TABLE_STRING_LENGTH: usize = 2;

/// Minimum length of a command phrase candidate
pub const MIN_PHRASE_LENGTH: usize = 4;

/// Minimum length of a fallback profile name
pub const MIN_PROFILE_NAME_LENGTH: usize = 5;

/// Bytes after a phrase searched for a category anchor and for actions
pub const ACTION_WINDOW: usize = 800;

/// Bytes after a phrase searched when resolving the category label
pub const CATEGORY_WINDOW: usize = 2000;

/// Distance from a phrase's length prefix back to its command GUID
pub const GUID_BACK_OFFSET: usize = 20;

/// Distance from a scroll action's length prefix back to its click count
pub const SCROLL_VALUE_BACK_OFFSET: usize = 20;

/// Size of a serialized GUID
pub const GUID_SIZE: usize = 16;

/// Size of a key-press action record
pub const KEY_RECORD_SIZE: usize = 16;

/// Leading bytes of a key-press action record (zero field, action kind 1)
pub const KEY_SIGNATURE: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];

/// Sentinel that must follow a mouse context code
pub const MOUSE_SENTINEL: [u8; 4] = [0xFF; 4];

/// Exclusive upper bound of accepted virtual key codes
pub const MAX_VIRTUAL_KEY_CODE: u16 = 0x200;

/// Exclusive upper bound of plausible scroll click counts
pub const MAX_SCROLL_CLICKS: f64 = 1000.0;

/// Profile name used when none can be resolved
pub const UNKNOWN_PROFILE_NAME: &str = "Unknown Profile";

/// Category used when no anchor follows a phrase
pub const UNCATEGORIZED: &str = "uncategorized";

/// Default ceiling for the inflated buffer (64 MiB)
pub const DEFAULT_MAX_INFLATED_SIZE: usize = 64 * 1024 * 1024;

/// Options controlling a decode pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Largest inflated buffer accepted before decoding is aborted
    pub max_inflated_size: usize,
}

impl DecodeOptions {
    /// Create options with a custom inflated size limit
    pub fn with_max_inflated_size(max_inflated_size: usize) -> Self {
        Self { max_inflated_size }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_inflated_size: DEFAULT_MAX_INFLATED_SIZE,
        }
    }
}

/// Statistics gathered during a decode pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodeStats {
    /// Size of the inflated buffer
    pub inflated_bytes: usize,
    /// Number of entries in the string table
    pub scanned_strings: usize,
    /// Number of category anchors found
    pub category_anchors: usize,
    /// Number of commands emitted
    pub commands: usize,
    /// Number of actions emitted across all commands
    pub actions: usize,
}
