//! Profile decoding
//!
//! A binary profile is a raw deflate stream. After inflating, the buffer is
//! scanned once for length-prefixed strings, and commands are rebuilt from
//! that table plus fixed-byte action signatures found near each phrase.
//!
//! Uncompressed XML profiles are recognized by their leading `<?xml` or
//! `<Profile` and read directly.

mod inflate;
mod matcher;
mod primitives;
mod reconstruct;
mod scanner;
mod textual;

pub use inflate::inflate;
pub use matcher::{find_actions, find_key_actions, find_mouse_actions, ActionMatch};
pub use primitives::{
    encode_length_prefixed, read_f64_le, read_guid, read_length_prefixed_string,
    read_required_string, read_u16_le, read_u32_le,
};
pub use reconstruct::{read_header, ProfileHeader, Reconstructor};
pub use scanner::{scan_at, ScannedString, StringTable};
pub use textual::{looks_like_xml, read_profile as read_textual_profile};

use crate::common::{DecodeOptions, DecodeStats};
use crate::model::Profile;
use crate::Result;

/// Decode a profile with default options
pub fn decode_bytes(data: &[u8]) -> Result<Profile> {
    decode_bytes_with_options(data, &DecodeOptions::default())
}

/// Decode a profile, binary or textual
pub fn decode_bytes_with_options(data: &[u8], options: &DecodeOptions) -> Result<Profile> {
    decode_with_stats(data, options).map(|(profile, _)| profile)
}

/// Decode a profile and report scan statistics
///
/// Textual profiles report only the command and action counts.
pub fn decode_with_stats(data: &[u8], options: &DecodeOptions) -> Result<(Profile, DecodeStats)> {
    if looks_like_xml(data) {
        let profile = textual::read_profile(data)?;
        let stats = DecodeStats {
            commands: profile.commands.len(),
            actions: profile.action_count(),
            ..DecodeStats::default()
        };
        return Ok((profile, stats));
    }

    let buffer = inflate(data, options.max_inflated_size)?;
    Reconstructor::new(&buffer).reconstruct_with_stats()
}
