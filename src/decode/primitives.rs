//! Fixed-width readers over the inflated buffer
//!
//! Every reader takes the buffer and an offset and returns the value with
//! the offset just past it. Integer and GUID reads fail with
//! [`VapError::OutOfBounds`]; the length-prefixed string reader reports a
//! malformed string as `None` so scans can treat it as "no string here".

use crate::common::{GUID_SIZE, MAX_STRING_LENGTH};
use crate::{Result, VapError};
use uuid::Uuid;

/// Borrow `needed` bytes at `offset`, or fail with `OutOfBounds`
fn take(buffer: &[u8], offset: usize, needed: usize) -> Result<&[u8]> {
    offset
        .checked_add(needed)
        .and_then(|end| buffer.get(offset..end))
        .ok_or(VapError::OutOfBounds {
            offset,
            needed,
            len: buffer.len(),
        })
}

/// Read a little-endian u16
pub fn read_u16_le(buffer: &[u8], offset: usize) -> Result<(u16, usize)> {
    let bytes = take(buffer, offset, 2)?;
    Ok((u16::from_le_bytes([bytes[0], bytes[1]]), offset + 2))
}

/// Read a little-endian u32
pub fn read_u32_le(buffer: &[u8], offset: usize) -> Result<(u32, usize)> {
    let bytes = take(buffer, offset, 4)?;
    Ok((
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        offset + 4,
    ))
}

/// Read a little-endian IEEE 754 double
pub fn read_f64_le(buffer: &[u8], offset: usize) -> Result<(f64, usize)> {
    let bytes = take(buffer, offset, 8)?;
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    Ok((f64::from_le_bytes(raw), offset + 8))
}

/// Read a 16-byte mixed-endian GUID
///
/// The first three fields (4, 2 and 2 bytes) are little-endian and the last
/// eight bytes are taken verbatim. Version and variant bits are not checked.
pub fn read_guid(buffer: &[u8], offset: usize) -> Result<(Uuid, usize)> {
    let bytes = take(buffer, offset, GUID_SIZE)?;
    let mut raw = [0u8; GUID_SIZE];
    raw.copy_from_slice(bytes);
    Ok((Uuid::from_bytes_le(raw), offset + GUID_SIZE))
}

/// Read a u32 length followed by that many UTF-8 bytes
///
/// Returns `None` when the length is zero, above the sanity ceiling, runs
/// past the buffer, or the bytes are not valid UTF-8. A rejected length
/// advances past the prefix only; invalid UTF-8 advances past the payload.
pub fn read_length_prefixed_string(
    buffer: &[u8],
    offset: usize,
) -> Result<(Option<String>, usize)> {
    let (length, pos) = read_u32_le(buffer, offset)?;
    if length == 0 || length > MAX_STRING_LENGTH {
        return Ok((None, pos));
    }

    let length = length as usize;
    let Some(bytes) = buffer.get(pos..pos + length) else {
        return Ok((None, pos));
    };

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((Some(text.to_string()), pos + length)),
        Err(_) => Ok((None, pos + length)),
    }
}

/// Strict variant of [`read_length_prefixed_string`] for header fields
pub fn read_required_string(buffer: &[u8], offset: usize) -> Result<(String, usize)> {
    match read_length_prefixed_string(buffer, offset)? {
        (Some(text), next) => Ok((text, next)),
        (None, _) => Err(VapError::MalformedString { offset }),
    }
}

/// Encode a string the way the profile stores it (u32 length + UTF-8)
pub fn encode_length_prefixed(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + text.len());
    out.extend_from_slice(&(text.len() as u32).to_le_bytes());
    out.extend_from_slice(text.as_bytes());
    out
}
