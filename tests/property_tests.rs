//! Property-based tests for the decoder
//!
//! These tests use randomized inputs to check that decoding degrades
//! gracefully and that the scanners report exactly what is in the buffer.

use proptest::prelude::*;
use vapkit::decode::{encode_length_prefixed, find_key_actions, inflate, StringTable};
use vapkit::{decode_bytes, Action, VapError};

fn deflate(data: &[u8]) -> Vec<u8> {
    use flate2::write::DeflateEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn is_canonical_guid(text: &str) -> bool {
    text.len() == 36
        && text.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit() && !c.is_ascii_uppercase(),
        })
}

proptest! {
    #[test]
    fn test_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..1000)) {
        // Random bytes are rarely a valid stream, but must only fail gracefully
        let _ = decode_bytes(&data);
    }
}

proptest! {
    #[test]
    fn test_decode_is_corrupt_or_profile(data in prop::collection::vec(any::<u8>(), 0..2000)) {
        match decode_bytes(&deflate(&data)) {
            Ok(profile) => {
                prop_assert!(is_canonical_guid(&profile.id.to_string()));
                for command in &profile.commands {
                    prop_assert!(!command.phrase.is_empty());
                    prop_assert!(is_canonical_guid(&command.id.to_string()));
                }
            }
            Err(VapError::CorruptArchive(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}

proptest! {
    #[test]
    fn test_inflate_round_trip(data in prop::collection::vec(any::<u8>(), 1..4000)) {
        let inflated = inflate(&deflate(&data), 1 << 20).unwrap();
        prop_assert_eq!(inflated, data);
    }
}

proptest! {
    #[test]
    fn test_scanned_entries_match_source(data in prop::collection::vec(any::<u8>(), 0..2000)) {
        let table = StringTable::scan(&data, 2);
        for entry in &table {
            prop_assert_eq!(
                encode_length_prefixed(&entry.text),
                data[entry.offset..entry.span_end()].to_vec()
            );
        }
    }
}

proptest! {
    #[test]
    fn test_embedded_string_is_found(
        prefix in prop::collection::vec(0x80u8..=0xFF, 0..64),
        text in "[ -~]{2,120}",
        suffix in prop::collection::vec(0x80u8..=0xFF, 0..64),
    ) {
        let mut data = prefix.clone();
        data.extend(encode_length_prefixed(&text));
        data.extend(suffix);

        let table = StringTable::scan(&data, 2);
        prop_assert!(table
            .iter()
            .any(|e| e.offset == prefix.len() && e.text == text));
    }
}

proptest! {
    #[test]
    fn test_key_record_is_recognized(code in 1u16..0x200, lead in 0usize..32) {
        let mut data = vec![0xEE; lead];
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&code.to_le_bytes());
        data.extend_from_slice(&[0x00; 6]);

        let matches = find_key_actions(&data, 0, data.len());
        prop_assert_eq!(matches.len(), 1);
        prop_assert_eq!(matches[0].offset, lead);
        prop_assert_eq!(&matches[0].action, &Action::key_press(code));
    }
}
