//! vapkit - VoiceAttack profile decoder and generator
//!
//! Binary `.vap` profiles are raw deflate streams around an undocumented
//! object graph. Rather than parsing that graph, this crate recovers the
//! useful parts heuristically: a brute-force string table, fixed-byte
//! action signatures, and category keywords that anchor command phrases.
//! The result is a simplified model of commands and their key, mouse and
//! launch actions.
//!
//! # Features
//!
//! - Decode binary profiles into [`Profile`] (best effort, never panics)
//! - Decode uncompressed XML profiles into the same model
//! - Render decoded profiles as indented XML or simplified JSON
//! - Generate a host-importable XML profile from simplified JSON
//!
//! # Example - Decoding
//!
//! ```no_run
//! use vapkit::{decode_bytes, to_json};
//!
//! let data = std::fs::read("profile.vap")?;
//! let profile = decode_bytes(&data)?;
//! for command in &profile.commands {
//!     println!("{} [{}]: {} actions", command.phrase, command.category, command.actions.len());
//! }
//! println!("{}", to_json(&profile)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Generation
//!
//! ```
//! use vapkit::generate_from_json;
//!
//! let generated = generate_from_json(
//!     r#"{"name": "Demo", "commands": [{"trigger": "fire", "key": "space"}]}"#,
//! )?;
//! assert_eq!(generated.command_count, 1);
//! assert!(generated.diagnostics.is_empty());
//! # Ok::<(), vapkit::VapError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod decode;
pub mod error;
pub mod generate;
pub mod model;
pub mod render;
pub mod tables;

// Re-export commonly used types
pub use common::{DecodeOptions, DecodeStats, Result, VapError, DEFAULT_MAX_INFLATED_SIZE};
pub use decode::{decode_bytes_with_options, decode_with_stats, Reconstructor, StringTable};
pub use generate::{generate_from_json, generate_profile, Diagnostic, Generated, ProfileInput};
pub use model::{Action, Command, Profile};
pub use render::{simplify, SimplifiedProfile};

// Convenience functions

/// Decode a binary or XML profile with default options
///
/// # Arguments
/// * `data` - Raw file contents
///
/// # Returns
/// The reconstructed profile. Fails only when the input cannot be
/// inflated or its header is truncated.
pub fn decode_bytes(data: &[u8]) -> Result<Profile> {
    decode::decode_bytes(data)
}

/// Render a profile as indented XML
pub fn to_xml(profile: &Profile) -> Result<String> {
    render::to_xml(profile)
}

/// Render a profile as simplified JSON
pub fn to_json(profile: &Profile) -> Result<String> {
    render::to_json(profile)
}
