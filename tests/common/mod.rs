//! Synthetic profile images for integration tests
//!
//! Filler bytes are all at or above 0x80 so no accidental length prefix
//! between them can pass the string scanner.

#![allow(dead_code)]

use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;
use vapkit::decode::encode_length_prefixed;

pub const KEY_SIGNATURE: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
pub const MOUSE_SENTINEL: [u8; 4] = [0xFF; 4];

pub const PROFILE_GUID: [u8; 16] = [
    0x33, 0x22, 0x11, 0xF0, 0x55, 0x44, 0x77, 0x66, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF,
];

/// Filler after each command so its action window ends before the next one
pub const COMMAND_GAP: usize = 800;

/// Builder for an inflated profile buffer
pub struct ImageBuilder {
    data: Vec<u8>,
    commands: u8,
    gap: usize,
}

impl ImageBuilder {
    pub fn new(name: &str) -> Self {
        let mut data = Vec::new();
        data.extend_from_slice(&0x1000u32.to_le_bytes());
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&0xF0F0_F0F0u32.to_le_bytes());
        data.extend_from_slice(&0xF1F1_F1F1u32.to_le_bytes());
        data.extend_from_slice(&PROFILE_GUID);
        data.extend(encode_length_prefixed(name));
        Self {
            data,
            commands: 0,
            gap: COMMAND_GAP,
        }
    }

    /// Filler written after each following command
    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    /// Append a command: GUID, phrase, action body, category anchor
    pub fn command(mut self, phrase: &str, body: &[u8], category: &str) -> Self {
        let seed = self.commands & 0x07;
        self.commands = self.commands.wrapping_add(1);

        self.data.extend_from_slice(&[0xE0; 8]);
        self.data.extend((0..16u8).map(|i| 0x80 | (seed << 4) | i));
        self.data.extend_from_slice(&[0xE1; 4]);
        self.data.extend(encode_length_prefixed(phrase));
        self.data.extend_from_slice(&[0xE2; 6]);
        self.data.extend_from_slice(body);
        self.data.extend_from_slice(&[0xE3; 6]);
        self.data.extend(encode_length_prefixed(category));
        self.data.extend(vec![0xE4; 6 + self.gap]);
        self
    }

    /// Append raw bytes
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn inflated(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn compressed(&self) -> Vec<u8> {
        deflate(&self.data)
    }
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn key_record(code: u16) -> Vec<u8> {
    let mut record = KEY_SIGNATURE.to_vec();
    record.extend_from_slice(&code.to_le_bytes());
    record.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF]);
    record
}

/// Mouse context code with its f64 value 20 bytes before it
pub fn mouse_record(code: &str, value: f64) -> Vec<u8> {
    let mut record = value.to_le_bytes().to_vec();
    record.extend_from_slice(&[0xF0; 12]);
    record.extend(encode_length_prefixed(code));
    record.extend_from_slice(&MOUSE_SENTINEL);
    record
}

pub fn launch_record(path: &str) -> Vec<u8> {
    let mut record = encode_length_prefixed(path);
    record.extend_from_slice(&[0xE5; 4]);
    record
}

/// A profile with one command of each primary action kind
pub fn sample_profile() -> ImageBuilder {
    let mut combo = key_record(0x11);
    combo.extend(key_record(0x43));

    ImageBuilder::new("Flight Deck")
        .command("[press;] alpha", &key_record(0x41), "keyboard")
        .command("scroll up", &mouse_record("SF", 3.0), "mouse")
        .command("open the map", &launch_record("C:\\Games\\map.exe"), "applications")
        .command("copy that", &combo, "keyboard")
        .command("right click", &mouse_record("RC", 0.0), "mouse")
}
