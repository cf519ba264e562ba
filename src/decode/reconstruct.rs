//! Command reconstruction
//!
//! Correlates the string table with action matches to rebuild commands.
//! A string becomes a command phrase when a category anchor follows it
//! within [`ACTION_WINDOW`] bytes and a plausible GUID sits
//! [`GUID_BACK_OFFSET`] bytes before its length prefix. The [`ACTION_WINDOW`]
//! bytes after the phrase are searched for actions. Windows are exclusive of
//! their start offset, so a string must begin after the phrase ends.
//!
//! Only the profile header is read strictly. Per-command misses simply
//! produce fewer commands or actions.

use super::matcher::find_actions;
use super::primitives::{read_guid, read_required_string, read_u32_le};
use super::scanner::{ScannedString, StringTable};
use crate::common::{
    DecodeStats, ACTION_WINDOW, CATEGORY_WINDOW, GUID_BACK_OFFSET, GUID_SIZE,
    MAX_SCANNED_STRING_LENGTH, MIN_PHRASE_LENGTH, MIN_PROFILE_NAME_LENGTH,
    MIN_TABLE_STRING_LENGTH, UNCATEGORIZED, UNKNOWN_PROFILE_NAME,
};
use crate::model::{Action, Command, Profile};
use crate::tables;
use crate::{Result, VapError};
use uuid::Uuid;

/// Smallest buffer that holds the size and item count fields
const MIN_HEADER_SIZE: usize = 8;

/// Fixed fields at the head of an inflated profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileHeader {
    /// Declared total size (informational)
    pub total_size: u32,
    /// Number of entries in the offset table (contents unused)
    pub item_count: u32,
    /// Profile GUID
    pub id: Uuid,
    /// Profile name, when the length-prefixed string is valid
    pub name: Option<String>,
}

/// Read the profile header
///
/// A header that runs past the end of the buffer means the archive is
/// unusable and is reported as [`VapError::CorruptArchive`]. An invalid name
/// is not an error; the caller falls back to a scanned string.
pub fn read_header(buffer: &[u8]) -> Result<ProfileHeader> {
    let truncated =
        |e: VapError| VapError::CorruptArchive(format!("truncated profile header: {e}"));

    let (total_size, pos) = read_u32_le(buffer, 0).map_err(truncated)?;
    let (item_count, pos) = read_u32_le(buffer, pos).map_err(truncated)?;
    let pos = pos.saturating_add((item_count as usize).saturating_mul(4));
    let (id, pos) = read_guid(buffer, pos).map_err(truncated)?;

    let name = match read_required_string(buffer, pos) {
        Ok((name, _)) if !name.trim().is_empty() => Some(name),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Profile name not at expected position: {e}");
            None
        }
    };

    Ok(ProfileHeader {
        total_size,
        item_count,
        id,
        name,
    })
}

/// Rebuilds a [`Profile`] from an inflated buffer
#[derive(Debug)]
pub struct Reconstructor<'a> {
    buffer: &'a [u8],
    strings: StringTable,
}

impl<'a> Reconstructor<'a> {
    /// Scan the buffer and prepare for reconstruction
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            strings: StringTable::scan(buffer, MIN_TABLE_STRING_LENGTH),
        }
    }

    /// The string table shared by every reconstruction step
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Reconstruct the profile
    pub fn reconstruct(&self) -> Result<Profile> {
        self.reconstruct_with_stats().map(|(profile, _)| profile)
    }

    /// Reconstruct the profile and report what the scan found
    pub fn reconstruct_with_stats(&self) -> Result<(Profile, DecodeStats)> {
        let mut stats = DecodeStats {
            inflated_bytes: self.buffer.len(),
            scanned_strings: self.strings.len(),
            ..DecodeStats::default()
        };

        if self.buffer.len() < MIN_HEADER_SIZE {
            log::debug!(
                "Buffer of {} bytes has no header, returning empty profile",
                self.buffer.len()
            );
            let profile = Profile {
                id: Uuid::nil(),
                name: UNKNOWN_PROFILE_NAME.to_string(),
                commands: Vec::new(),
            };
            return Ok((profile, stats));
        }

        let header = read_header(self.buffer)?;
        let name = header
            .name
            .or_else(|| self.fallback_name())
            .unwrap_or_else(|| UNKNOWN_PROFILE_NAME.to_string());

        let anchors: Vec<&ScannedString> = self
            .strings
            .iter()
            .filter(|s| tables::is_category_keyword(&s.text))
            .collect();
        stats.category_anchors = anchors.len();

        let phrases = self.find_phrases(&name, &anchors);
        let commands: Vec<Command> = phrases
            .iter()
            .filter_map(|phrase| self.build_command(phrase, &anchors))
            .collect();

        stats.commands = commands.len();
        stats.actions = commands.iter().map(|c| c.actions.len()).sum();
        log::info!(
            "Reconstructed profile '{}' with {} commands and {} actions",
            name,
            stats.commands,
            stats.actions
        );

        let profile = Profile {
            id: header.id,
            name,
            commands,
        };
        Ok((profile, stats))
    }

    /// First scanned string that can stand in for the profile name
    fn fallback_name(&self) -> Option<String> {
        self.strings
            .iter()
            .find(|s| {
                s.char_len() >= MIN_PROFILE_NAME_LENGTH
                    && !tables::is_category_keyword(&s.text)
                    && !tables::is_mouse_code(&s.text)
            })
            .map(|s| {
                log::debug!("Using scanned string at {} as profile name", s.offset);
                s.text.clone()
            })
    }

    /// Strings accepted as command phrases, in ascending offset order
    fn find_phrases(&self, profile_name: &str, anchors: &[&ScannedString]) -> Vec<&ScannedString> {
        // Strings already explained by context; a GUID cannot overlap them
        let landmarks: Vec<&ScannedString> = self
            .strings
            .iter()
            .filter(|s| s.text == profile_name || tables::is_category_keyword(&s.text))
            .collect();

        self.strings
            .iter()
            .filter(|s| {
                s.char_len() >= MIN_PHRASE_LENGTH
                    && !tables::is_mouse_code(&s.text)
                    && !tables::is_category_keyword(&s.text)
                    && !tables::is_launch_target(&s.text)
                    && s.text != profile_name
            })
            .filter(|s| {
                let start = s.span_end();
                first_anchor_in(anchors, start, start + ACTION_WINDOW).is_some()
            })
            .filter(|s| {
                let plausible = self.plausible_guid_before(s.offset, &landmarks);
                if !plausible {
                    log::trace!("Rejecting '{}' at {}: no GUID before it", s.text, s.offset);
                }
                plausible
            })
            .collect()
    }

    /// Whether the 16 bytes at `offset - 20` look like a command GUID
    ///
    /// The region must be inside the buffer, must not be all `00` or all
    /// `FF`, and must not overlap the profile name or a category anchor.
    fn plausible_guid_before(&self, offset: usize, landmarks: &[&ScannedString]) -> bool {
        let Some(start) = offset.checked_sub(GUID_BACK_OFFSET) else {
            return false;
        };
        let Some(bytes) = self.buffer.get(start..start + GUID_SIZE) else {
            return false;
        };
        if bytes.iter().all(|&b| b == 0x00) || bytes.iter().all(|&b| b == 0xFF) {
            return false;
        }
        !overlaps_any(landmarks, start, start + GUID_SIZE)
    }

    /// Build the command for an accepted phrase
    fn build_command(&self, phrase: &ScannedString, anchors: &[&ScannedString]) -> Option<Command> {
        let guid_at = phrase.offset.checked_sub(GUID_BACK_OFFSET)?;
        let (id, _) = read_guid(self.buffer, guid_at).ok()?;

        let window_start = phrase.span_end();
        let category = first_anchor_in(anchors, window_start, window_start + CATEGORY_WINDOW)
            .map(|anchor| anchor.text.clone())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        let window_end = (window_start + ACTION_WINDOW).min(self.buffer.len());

        let mut found: Vec<(usize, Action)> = find_actions(self.buffer, window_start, window_end)
            .into_iter()
            .map(|m| (m.offset, m.action))
            .collect();

        if let Some(target) = self
            .strings
            .in_range(window_start + 1, window_end)
            .iter()
            .find(|s| tables::is_launch_target(&s.text))
        {
            found.push((
                target.offset,
                Action::RunApplication {
                    path: target.text.clone(),
                },
            ));
            found.sort_by_key(|(offset, _)| *offset);
        }

        log::debug!(
            "Command '{}' at {} ({}) with {} actions",
            phrase.text,
            phrase.offset,
            category,
            found.len()
        );

        Some(Command {
            id,
            phrase: phrase.text.clone(),
            category,
            actions: found.into_iter().map(|(_, action)| action).collect(),
        })
    }
}

/// First anchor whose offset lies in `(start, end)`
fn first_anchor_in<'s>(
    anchors: &[&'s ScannedString],
    start: usize,
    end: usize,
) -> Option<&'s ScannedString> {
    let idx = anchors.partition_point(|a| a.offset <= start);
    anchors
        .get(idx)
        .copied()
        .filter(|anchor| anchor.offset < end)
}

/// Whether any of the offset-sorted `spans` intersects `[start, end)`
fn overlaps_any(spans: &[&ScannedString], start: usize, end: usize) -> bool {
    let reach = 4 + MAX_SCANNED_STRING_LENGTH as usize;
    let lo = spans.partition_point(|s| s.offset < start.saturating_sub(reach));
    spans[lo..]
        .iter()
        .take_while(|s| s.offset < end)
        .any(|s| s.span_end() > start)
}
