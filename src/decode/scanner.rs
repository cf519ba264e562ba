//! Brute-force string table
//!
//! The command region has no record boundaries, so every byte offset is
//! treated as a possible length prefix. An offset is kept when the next four
//! bytes give a plausible length and the bytes after them decode to a fully
//! printable UTF-8 string. False positives are expected here and are
//! filtered later by context.
//!
//! The table is built once per buffer and shared by every consumer.

use crate::common::MAX_SCANNED_STRING_LENGTH;
use unicode_general_category::{get_general_category, GeneralCategory};

/// A string found at a byte offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedString {
    /// Offset of the u32 length prefix
    pub offset: usize,
    /// Decoded text
    pub text: String,
}

impl ScannedString {
    /// Offset just past the encoded string (prefix + payload)
    pub fn span_end(&self) -> usize {
        self.offset + 4 + self.text.len()
    }

    /// Number of characters in the text
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Offset-sorted table of every plausible string in a buffer
#[derive(Debug, Default, Clone)]
pub struct StringTable {
    entries: Vec<ScannedString>,
}

impl StringTable {
    /// Scan every offset of `buffer` for strings of at least `min_len`
    pub fn scan(buffer: &[u8], min_len: usize) -> Self {
        let mut entries = Vec::new();
        let mut offset = 0;
        while offset + 4 <= buffer.len() {
            if let Some(found) = scan_at(buffer, offset, min_len) {
                entries.push(found);
            }
            offset += 1;
        }

        log::debug!(
            "String scan found {} candidates in {} bytes (min length {})",
            entries.len(),
            buffer.len(),
            min_len
        );

        Self { entries }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in ascending offset order
    pub fn entries(&self) -> &[ScannedString] {
        &self.entries
    }

    /// Iterate over entries in ascending offset order
    pub fn iter(&self) -> std::slice::Iter<'_, ScannedString> {
        self.entries.iter()
    }

    /// Entries whose offset lies in `[start, end)`
    pub fn in_range(&self, start: usize, end: usize) -> &[ScannedString] {
        let lo = self.entries.partition_point(|e| e.offset < start);
        let hi = self.entries.partition_point(|e| e.offset < end);
        if lo >= hi {
            return &[];
        }
        &self.entries[lo..hi]
    }
}

impl<'a> IntoIterator for &'a StringTable {
    type Item = &'a ScannedString;
    type IntoIter = std::slice::Iter<'a, ScannedString>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Attempt to read a printable string at a single offset
pub fn scan_at(buffer: &[u8], offset: usize, min_len: usize) -> Option<ScannedString> {
    let prefix = buffer.get(offset..offset + 4)?;
    let length = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
    if (length as usize) < min_len || length > MAX_SCANNED_STRING_LENGTH {
        return None;
    }

    let start = offset + 4;
    let bytes = buffer.get(start..start + length as usize)?;
    let text = std::str::from_utf8(bytes).ok()?;
    if text.chars().count() < min_len || !is_printable(text) {
        return None;
    }

    Some(ScannedString {
        offset,
        text: text.to_string(),
    })
}

/// Printable means no control, format, private-use, surrogate or
/// unassigned characters, and no separators other than the ASCII space
fn is_printable(text: &str) -> bool {
    text.chars().all(|c| {
        c == ' '
            || !matches!(
                get_general_category(c),
                GeneralCategory::Control
                    | GeneralCategory::Format
                    | GeneralCategory::Surrogate
                    | GeneralCategory::PrivateUse
                    | GeneralCategory::Unassigned
                    | GeneralCategory::LineSeparator
                    | GeneralCategory::ParagraphSeparator
                    | GeneralCategory::SpaceSeparator
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::primitives::encode_length_prefixed;

    #[test]
    fn test_scan_finds_strings_in_order() {
        let mut data = vec![0xEE; 7];
        data.extend(encode_length_prefixed("keyboard"));
        data.extend([0xEE; 3]);
        data.extend(encode_length_prefixed("LC"));
        data.extend([0xEE; 5]);

        let table = StringTable::scan(&data, 2);
        let found: Vec<_> = table.iter().map(|e| (e.offset, e.text.as_str())).collect();
        assert_eq!(found, vec![(7, "keyboard"), (22, "LC")]);
        assert_eq!(table.entries()[0].span_end(), 19);
    }

    #[test]
    fn test_min_length_filter() {
        let data = encode_length_prefixed("LC");
        assert_eq!(StringTable::scan(&data, 2).len(), 1);
        assert!(StringTable::scan(&data, 4).is_empty());
    }

    #[test]
    fn test_rejects_unprintable_and_oversized() {
        assert!(scan_at(&encode_length_prefixed("tab\there"), 0, 2).is_none());
        assert!(scan_at(&encode_length_prefixed("new\nline"), 0, 2).is_none());
        assert!(scan_at(&[3, 0, 0, 0, 0xC3, 0x28, 0x41], 0, 2).is_none());

        let long = "x".repeat(501);
        assert!(scan_at(&encode_length_prefixed(&long), 0, 2).is_none());
        let limit = "x".repeat(500);
        assert!(scan_at(&encode_length_prefixed(&limit), 0, 2).is_some());
    }

    #[test]
    fn test_rejects_invisible_characters() {
        // soft hyphen, zero width space, private use, no-break space
        for text in ["soft\u{AD}hyphen", "zero\u{200B}width", "icon \u{E000}", "no\u{A0}break"] {
            assert!(scan_at(&encode_length_prefixed(text), 0, 2).is_none(), "{text:?}");
        }
        assert!(scan_at(&encode_length_prefixed("unassigned \u{0378}"), 0, 2).is_none());
        assert!(scan_at(&encode_length_prefixed("line\u{2028}break"), 0, 2).is_none());
        assert!(scan_at(&encode_length_prefixed("Größe über 9000"), 0, 2).is_some());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // three bytes, one character
        let data = encode_length_prefixed("€");
        assert!(scan_at(&data, 0, 2).is_none());
        assert_eq!(scan_at(&data, 0, 1).unwrap().text, "€");
    }

    #[test]
    fn test_truncated_candidate_ignored() {
        let data = [8, 0, 0, 0, b'k', b'e', b'y'];
        assert!(StringTable::scan(&data, 2).is_empty());
        assert!(StringTable::scan(&[], 2).is_empty());
    }

    #[test]
    fn test_range_queries() {
        let mut data = Vec::new();
        for word in ["alpha", "bravo", "charlie"] {
            data.extend([0xEE; 6]);
            data.extend(encode_length_prefixed(word));
        }
        let table = StringTable::scan(&data, 4);
        assert_eq!(table.len(), 3);

        let offsets: Vec<_> = table.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![6, 21, 36]);

        assert_eq!(table.in_range(0, 21).len(), 1);
        assert_eq!(table.in_range(6, 37).len(), 3);
        assert!(table.in_range(37, 1000).is_empty());
        assert!(table.in_range(30, 10).is_empty());
    }
}
