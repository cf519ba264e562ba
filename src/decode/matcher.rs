//! Fixed-byte action signatures
//!
//! Actions inside a command window are recognized by two byte patterns:
//!
//! - Key press: `00 00 00 00 01 00 00 00` followed by a u16 virtual key code,
//!   in a 16-byte record.
//! - Mouse action: a length-prefixed context code (`02 00 00 00 'L' 'C'`)
//!   followed by the sentinel `FF FF FF FF`. Scroll codes carry an f64 click
//!   count 20 bytes before the match.
//!
//! Both matchers only look inside `[start, end)` and never fail; a window
//! without matches yields an empty list.

use super::primitives::{encode_length_prefixed, read_f64_le, read_u16_le};
use crate::common::{
    KEY_RECORD_SIZE, KEY_SIGNATURE, MAX_SCROLL_CLICKS, MAX_VIRTUAL_KEY_CODE, MOUSE_SENTINEL,
    SCROLL_VALUE_BACK_OFFSET,
};
use crate::model::Action;
use crate::tables::{self, MOUSE_ACTIONS};

/// An action recognized at a byte range of the buffer
#[derive(Debug, Clone, PartialEq)]
pub struct ActionMatch {
    /// Offset of the first matched byte
    pub offset: usize,
    /// Number of bytes consumed by the match
    pub len: usize,
    /// The reconstructed action
    pub action: Action,
}

impl ActionMatch {
    /// Offset just past the consumed bytes
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Find key-press records in `[start, end)`
///
/// A match consumes its whole 16-byte record. A signature whose code falls
/// outside 1..=511 is skipped one byte at a time to tolerate misalignment.
pub fn find_key_actions(buffer: &[u8], start: usize, end: usize) -> Vec<ActionMatch> {
    let end = end.min(buffer.len());
    let mut matches = Vec::new();

    let mut pos = start;
    while pos + KEY_RECORD_SIZE <= end {
        if buffer[pos..pos + KEY_SIGNATURE.len()] == KEY_SIGNATURE {
            if let Ok((code, _)) = read_u16_le(buffer, pos + KEY_SIGNATURE.len()) {
                if code > 0 && code < MAX_VIRTUAL_KEY_CODE {
                    matches.push(ActionMatch {
                        offset: pos,
                        len: KEY_RECORD_SIZE,
                        action: Action::key_press(code),
                    });
                    pos += KEY_RECORD_SIZE;
                    continue;
                }
                log::trace!("Ignoring key signature at {pos} with code {code:#x}");
            }
        }
        pos += 1;
    }

    matches
}

/// Find mouse actions in `[start, end)`, one pass per known context code
///
/// Results are grouped by code, not by offset.
pub fn find_mouse_actions(buffer: &[u8], start: usize, end: usize) -> Vec<ActionMatch> {
    let end = end.min(buffer.len());
    let mut matches = Vec::new();

    for (code, _) in MOUSE_ACTIONS {
        let pattern = encode_length_prefixed(code);
        let needed = pattern.len() + MOUSE_SENTINEL.len();

        let mut pos = start;
        while pos + needed <= end {
            let Some(found) = buffer[pos..end]
                .windows(pattern.len())
                .position(|window| window == pattern.as_slice())
            else {
                break;
            };

            let at = pos + found;
            if at + needed > end {
                break;
            }

            let sentinel = &buffer[at + pattern.len()..at + needed];
            if sentinel != MOUSE_SENTINEL {
                pos = at + 1;
                continue;
            }

            let scroll_clicks = if tables::is_scroll_code(code) {
                scroll_clicks_before(buffer, at)
            } else {
                None
            };

            matches.push(ActionMatch {
                offset: at,
                len: needed,
                action: Action::mouse(code, scroll_clicks),
            });
            pos = at + needed;
        }
    }

    matches
}

/// Find all actions in `[start, end)` ordered by offset
///
/// A byte range is never counted twice: a match that starts inside an
/// earlier accepted match is dropped.
pub fn find_actions(buffer: &[u8], start: usize, end: usize) -> Vec<ActionMatch> {
    let mut candidates = find_key_actions(buffer, start, end);
    candidates.extend(find_mouse_actions(buffer, start, end));
    candidates.sort_by_key(|m| m.offset);

    let mut accepted: Vec<ActionMatch> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if let Some(last) = accepted.last() {
            if candidate.offset < last.end() {
                log::trace!(
                    "Dropping overlapping {} at {}",
                    candidate.action.type_name(),
                    candidate.offset
                );
                continue;
            }
        }
        accepted.push(candidate);
    }
    accepted
}

/// Read the scroll click count stored before a scroll context code
///
/// Only values in the open interval (0, 1000) are accepted; anything else
/// leaves the count absent rather than defaulting it.
fn scroll_clicks_before(buffer: &[u8], at: usize) -> Option<u32> {
    let value_at = at.checked_sub(SCROLL_VALUE_BACK_OFFSET)?;
    let (value, _) = read_f64_le(buffer, value_at).ok()?;
    if value > 0.0 && value < MAX_SCROLL_CLICKS {
        Some((value.round() as u32).max(1))
    } else {
        None
    }
}
