//! Generator input schema
//!
//! This is a superset of the simplified JSON the decoder writes, so decoded
//! output can be fed straight back in. Every field is optional; the
//! generator fills in defaults and reports what it could not resolve.

use serde::Deserialize;

/// Profile described by the generator input
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileInput {
    /// Profile id; a fresh one is generated when absent or unparseable
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Commands in output order
    #[serde(default)]
    pub commands: Vec<CommandInput>,
}

/// One command with shorthand or explicit actions
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommandInput {
    /// Spoken trigger phrase
    #[serde(default)]
    pub trigger: Option<String>,
    /// Category label
    #[serde(default)]
    pub category: Option<String>,
    /// Single key shorthand
    #[serde(default)]
    pub key: Option<String>,
    /// Single mouse action shorthand
    #[serde(default)]
    pub mouse: Option<String>,
    /// Click count for a scroll `mouse` shorthand
    #[serde(default)]
    pub scroll_clicks: Option<u32>,
    /// Key press duration for the `key` shorthand, in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// Explicit action list; takes precedence over the shorthands
    #[serde(default)]
    pub actions: Option<Vec<ActionInput>>,
    /// Present on section markers, which produce no command
    #[serde(default, rename = "_section")]
    pub section: Option<serde_json::Value>,
}

impl CommandInput {
    /// Whether this entry is a section marker rather than a command
    pub fn is_section(&self) -> bool {
        self.section.is_some()
    }
}

/// A key name or a list of key names
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KeyList {
    /// A single key
    One(String),
    /// Several keys pressed together
    Many(Vec<String>),
}

impl Default for KeyList {
    fn default() -> Self {
        KeyList::Many(Vec::new())
    }
}

impl KeyList {
    /// Key names in input order
    pub fn names(&self) -> Vec<&str> {
        match self {
            KeyList::One(name) => vec![name.as_str()],
            KeyList::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

fn default_action_type() -> String {
    "PressKey".to_string()
}

/// One explicit action
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionInput {
    /// Action type name, `PressKey` when absent
    #[serde(rename = "type", default = "default_action_type")]
    pub kind: String,
    /// Keys for key actions
    #[serde(default)]
    pub keys: KeyList,
    /// Mouse action name
    #[serde(default)]
    pub action: Option<String>,
    /// Click count for scroll actions
    #[serde(default)]
    pub scroll_clicks: Option<u32>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// Delay before the action in seconds
    #[serde(default)]
    pub delay: Option<f64>,
    /// Text for `Say`
    #[serde(default)]
    pub text: Option<String>,
    /// Speech volume for `Say`
    #[serde(default)]
    pub volume: Option<u32>,
    /// Speech rate for `Say`
    #[serde(default)]
    pub rate: Option<i32>,
    /// Executable path for `Launch`
    #[serde(default)]
    pub path: Option<String>,
}

/// Action types the template can express
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Press and release keys
    PressKey,
    /// Hold keys down
    KeyDown,
    /// Release held keys
    KeyUp,
    /// Toggle key state
    KeyToggle,
    /// Mouse button or scroll
    MouseAction,
    /// Wait
    Pause,
    /// Text to speech
    Say,
    /// Start an application
    Launch,
}

impl ActionKind {
    /// Parse a type name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        const KINDS: [(&str, ActionKind); 8] = [
            ("PressKey", ActionKind::PressKey),
            ("KeyDown", ActionKind::KeyDown),
            ("KeyUp", ActionKind::KeyUp),
            ("KeyToggle", ActionKind::KeyToggle),
            ("MouseAction", ActionKind::MouseAction),
            ("Pause", ActionKind::Pause),
            ("Say", ActionKind::Say),
            ("Launch", ActionKind::Launch),
        ];
        KINDS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, kind)| *kind)
    }

    /// Type tag written to the template
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::PressKey => "PressKey",
            ActionKind::KeyDown => "KeyDown",
            ActionKind::KeyUp => "KeyUp",
            ActionKind::KeyToggle => "KeyToggle",
            ActionKind::MouseAction => "MouseAction",
            ActionKind::Pause => "Pause",
            ActionKind::Say => "Say",
            ActionKind::Launch => "Launch",
        }
    }

    /// Whether the action carries key codes
    pub fn uses_keys(self) -> bool {
        matches!(
            self,
            ActionKind::PressKey | ActionKind::KeyDown | ActionKind::KeyUp | ActionKind::KeyToggle
        )
    }
}
