//! Static vocabularies shared by the decoder and the generator
//!
//! Virtual key codes, mouse context codes and category keywords. The decoder
//! maps codes to names, the generator maps names back to codes, and both
//! directions read from the same tables so a decoded name is always accepted
//! by the generator.

/// Virtual key code to symbolic name, as reported by the decoder
pub const VK_NAMES: &[(u16, &str)] = &[
    // Letters
    (0x41, "A"),
    (0x42, "B"),
    (0x43, "C"),
    (0x44, "D"),
    (0x45, "E"),
    (0x46, "F"),
    (0x47, "G"),
    (0x48, "H"),
    (0x49, "I"),
    (0x4A, "J"),
    (0x4B, "K"),
    (0x4C, "L"),
    (0x4D, "M"),
    (0x4E, "N"),
    (0x4F, "O"),
    (0x50, "P"),
    (0x51, "Q"),
    (0x52, "R"),
    (0x53, "S"),
    (0x54, "T"),
    (0x55, "U"),
    (0x56, "V"),
    (0x57, "W"),
    (0x58, "X"),
    (0x59, "Y"),
    (0x5A, "Z"),
    // Digits
    (0x30, "0"),
    (0x31, "1"),
    (0x32, "2"),
    (0x33, "3"),
    (0x34, "4"),
    (0x35, "5"),
    (0x36, "6"),
    (0x37, "7"),
    (0x38, "8"),
    (0x39, "9"),
    // Function keys
    (0x70, "F1"),
    (0x71, "F2"),
    (0x72, "F3"),
    (0x73, "F4"),
    (0x74, "F5"),
    (0x75, "F6"),
    (0x76, "F7"),
    (0x77, "F8"),
    (0x78, "F9"),
    (0x79, "F10"),
    (0x7A, "F11"),
    (0x7B, "F12"),
    // Modifiers
    (0xA0, "LSHIFT"),
    (0xA1, "RSHIFT"),
    (0xA2, "LCTRL"),
    (0xA3, "RCTRL"),
    (0xA4, "LALT"),
    (0xA5, "RALT"),
    (0x5B, "LWIN"),
    (0x5C, "RWIN"),
    (0x10, "SHIFT"),
    (0x11, "CTRL"),
    (0x12, "ALT"),
    // Navigation
    (0x25, "LEFT"),
    (0x26, "UP"),
    (0x27, "RIGHT"),
    (0x28, "DOWN"),
    (0x21, "PAGEUP"),
    (0x22, "PAGEDOWN"),
    (0x23, "END"),
    (0x24, "HOME"),
    (0x2D, "INSERT"),
    (0x2E, "DELETE"),
    // Editing and locks
    (0x08, "BACKSPACE"),
    (0x09, "TAB"),
    (0x0D, "ENTER"),
    (0x1B, "ESCAPE"),
    (0x20, "SPACE"),
    (0x14, "CAPSLOCK"),
    (0x90, "NUMLOCK"),
    (0x91, "SCROLLLOCK"),
    (0x2C, "PRINTSCREEN"),
    (0x13, "PAUSE"),
    // Punctuation
    (0xBA, "SEMICOLON"),
    (0xBB, "EQUALS"),
    (0xBC, "COMMA"),
    (0xBD, "MINUS"),
    (0xBE, "PERIOD"),
    (0xBF, "SLASH"),
    (0xC0, "BACKTICK"),
    (0xDB, "LBRACKET"),
    (0xDC, "BACKSLASH"),
    (0xDD, "RBRACKET"),
    (0xDE, "QUOTE"),
    // Numpad
    (0x60, "NUMPAD0"),
    (0x61, "NUMPAD1"),
    (0x62, "NUMPAD2"),
    (0x63, "NUMPAD3"),
    (0x64, "NUMPAD4"),
    (0x65, "NUMPAD5"),
    (0x66, "NUMPAD6"),
    (0x67, "NUMPAD7"),
    (0x68, "NUMPAD8"),
    (0x69, "NUMPAD9"),
    (0x6A, "MULTIPLY"),
    (0x6B, "ADD"),
    (0x6C, "SEPARATOR"),
    (0x6D, "SUBTRACT"),
    (0x6E, "DECIMAL"),
    (0x6F, "DIVIDE"),
    // Media
    (0xAD, "MUTE"),
    (0xAE, "VOLUMEDOWN"),
    (0xAF, "VOLUMEUP"),
    (0xB0, "NEXTTRACK"),
    (0xB1, "PREVTRACK"),
    (0xB2, "STOP"),
    (0xB3, "PLAYPAUSE"),
];

/// Extra key names accepted by the generator (lowercase)
pub const KEY_ALIASES: &[(&str, u16)] = &[
    ("return", 0x0D),
    ("esc", 0x1B),
    ("control", 0x11),
    ("win", 0x5B),
    ("windows", 0x5B),
    ("lcontrol", 0xA2),
    ("rcontrol", 0xA3),
    ("bracket_left", 0xDB),
    ("bracket_right", 0xDD),
    ("grave", 0xC0),
    ("caps", 0x14),
];

/// Mouse context codes and their generator names
///
/// Buttons are left, middle, right, back (4) and forward (5); gestures are
/// click, double click, triple click, down, up and toggle. The four scroll
/// directions close the vocabulary.
pub const MOUSE_ACTIONS: &[(&str, &str)] = &[
    ("LC", "left_click"),
    ("LDC", "left_double_click"),
    ("LTC", "left_triple_click"),
    ("LD", "left_down"),
    ("LU", "left_up"),
    ("LT", "left_toggle"),
    ("MC", "middle_click"),
    ("MDC", "middle_double_click"),
    ("MTC", "middle_triple_click"),
    ("MD", "middle_down"),
    ("MU", "middle_up"),
    ("MT", "middle_toggle"),
    ("RC", "right_click"),
    ("RDC", "right_double_click"),
    ("RTC", "right_triple_click"),
    ("RD", "right_down"),
    ("RU", "right_up"),
    ("RT", "right_toggle"),
    ("4C", "back_click"),
    ("4DC", "back_double_click"),
    ("4TC", "back_triple_click"),
    ("4D", "back_down"),
    ("4U", "back_up"),
    ("4T", "back_toggle"),
    ("5C", "forward_click"),
    ("5DC", "forward_double_click"),
    ("5TC", "forward_triple_click"),
    ("5D", "forward_down"),
    ("5U", "forward_up"),
    ("5T", "forward_toggle"),
    ("SF", "scroll_up"),
    ("SB", "scroll_down"),
    ("SL", "scroll_left"),
    ("SR", "scroll_right"),
];

/// Short mouse action names accepted by the generator
pub const MOUSE_ALIASES: &[(&str, &str)] = &[
    ("lc", "LC"),
    ("rc", "RC"),
    ("mc", "MC"),
    ("double_click", "LDC"),
    ("triple_click", "LTC"),
];

/// Context codes that carry a scroll click count
pub const SCROLL_CODES: [&str; 4] = ["SF", "SB", "SL", "SR"];

/// Context code used when a mouse action name is not recognized
pub const DEFAULT_MOUSE_CODE: &str = "LC";

/// Category labels that anchor a command phrase (lowercase)
pub const CATEGORY_KEYWORDS: [&str; 6] = [
    "keyboard",
    "applications",
    "interface",
    "system",
    "navigation",
    "mouse",
];

/// File suffixes that mark a string as an application launch target
pub const EXECUTABLE_SUFFIXES: [&str; 4] = [".exe", ".bat", ".cmd", ".lnk"];

/// Leading character the host uses for launch targets resolved at runtime
pub const LAUNCH_SENTINEL: char = '*';

/// Look up the symbolic name of a virtual key code
pub fn key_name(code: u16) -> Option<&'static str> {
    VK_NAMES
        .iter()
        .find(|(vk, _)| *vk == code)
        .map(|(_, name)| *name)
}

/// Symbolic name of a virtual key code, or a hex placeholder if unknown
pub fn symbolic_key_name(code: u16) -> String {
    match key_name(code) {
        Some(name) => name.to_string(),
        None => format!("VK_0x{code:02X}"),
    }
}

/// Resolve a key name to its virtual key code
///
/// Accepts decoder names and generator aliases (case-insensitive), decimal
/// codes, and the `VK_0x..` placeholders produced for unknown codes.
pub fn key_code(name: &str) -> Option<u16> {
    let lower = name.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return None;
    }

    if let Some((_, code)) = KEY_ALIASES.iter().find(|(alias, _)| *alias == lower) {
        return Some(*code);
    }

    if let Some((code, _)) = VK_NAMES
        .iter()
        .find(|(_, vk_name)| vk_name.eq_ignore_ascii_case(&lower))
    {
        return Some(*code);
    }

    if let Some(hex) = lower.strip_prefix("vk_0x") {
        return u16::from_str_radix(hex, 16).ok();
    }

    if lower.bytes().all(|b| b.is_ascii_digit()) {
        return lower.parse().ok();
    }

    None
}

/// Look up the generator name of a mouse context code
pub fn mouse_action_name(code: &str) -> Option<&'static str> {
    MOUSE_ACTIONS
        .iter()
        .find(|(ctx, _)| *ctx == code)
        .map(|(_, name)| *name)
}

/// Resolve a mouse action name (or alias) to its context code
pub fn mouse_code(name: &str) -> Option<&'static str> {
    let lower = name.trim().to_ascii_lowercase();
    MOUSE_ACTIONS
        .iter()
        .find(|(_, action)| *action == lower)
        .map(|(code, _)| *code)
        .or_else(|| {
            MOUSE_ALIASES
                .iter()
                .find(|(alias, _)| *alias == lower)
                .map(|(_, code)| *code)
        })
}

/// Check whether a string is one of the mouse context codes
pub fn is_mouse_code(text: &str) -> bool {
    MOUSE_ACTIONS.iter().any(|(code, _)| *code == text)
}

/// Check whether a context code carries a scroll click count
pub fn is_scroll_code(code: &str) -> bool {
    SCROLL_CODES.contains(&code)
}

/// Check whether a string is a category anchor keyword
pub fn is_category_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    CATEGORY_KEYWORDS.contains(&lower.as_str())
}

/// Check whether a string looks like an application launch target
pub fn is_launch_target(text: &str) -> bool {
    if text.starts_with(LAUNCH_SENTINEL) {
        return true;
    }
    let lower = text.to_lowercase();
    EXECUTABLE_SUFFIXES
        .iter()
        .any(|suffix| lower.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(0x41), Some("A"));
        assert_eq!(key_name(0x7B), Some("F12"));
        assert_eq!(key_name(0x07), None);
        assert_eq!(symbolic_key_name(0x41), "A");
        assert_eq!(symbolic_key_name(0x07), "VK_0x07");
        assert_eq!(symbolic_key_name(0x1FF), "VK_0x1FF");
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(key_code("a"), Some(65));
        assert_eq!(key_code("A"), Some(65));
        assert_eq!(key_code("esc"), Some(27));
        assert_eq!(key_code("escape"), Some(27));
        assert_eq!(key_code("grave"), Some(0xC0));
        assert_eq!(key_code("backtick"), Some(0xC0));
        assert_eq!(key_code("numpad5"), Some(0x65));
        assert_eq!(key_code("65"), Some(65));
        assert_eq!(key_code("vk_0x07"), Some(7));
        assert_eq!(key_code("VK_0x1FF"), Some(0x1FF));
        assert_eq!(key_code("hyper"), None);
        assert_eq!(key_code(""), None);
    }

    #[test]
    fn test_every_decoded_name_is_accepted() {
        for (code, name) in VK_NAMES {
            assert_eq!(key_code(&name.to_lowercase()), Some(*code), "{name}");
        }
    }

    #[test]
    fn test_mouse_vocabulary() {
        assert_eq!(MOUSE_ACTIONS.len(), 34);
        assert_eq!(mouse_code("left_click"), Some("LC"));
        assert_eq!(mouse_code("Scroll_Up"), Some("SF"));
        assert_eq!(mouse_code("double_click"), Some("LDC"));
        assert_eq!(mouse_code("wiggle"), None);
        assert_eq!(mouse_action_name("RDC"), Some("right_double_click"));
        assert_eq!(mouse_action_name("XX"), None);
        assert!(is_mouse_code("4TC"));
        assert!(!is_mouse_code("lc"));
        assert!(is_scroll_code("SB"));
        assert!(!is_scroll_code("LC"));

        for (code, name) in MOUSE_ACTIONS {
            assert_eq!(mouse_code(name), Some(*code));
        }
    }

    #[test]
    fn test_categories_and_launch_targets() {
        assert!(is_category_keyword("Keyboard"));
        assert!(is_category_keyword("interface"));
        assert!(!is_category_keyword("keyboards"));

        assert!(is_launch_target("C:\\Windows\\notepad.EXE"));
        assert!(is_launch_target("*steam"));
        assert!(is_launch_target("start.bat"));
        assert!(!is_launch_target("notepad.exe.txt"));
        assert!(!is_launch_target("[press;] alpha"));
    }
}
