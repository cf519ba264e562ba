//! Simplified JSON rendering
//!
//! The simplified form is what the generator reads back, so every decoded
//! profile can be regenerated. A command with one key press collapses to
//! `"key"`, one mouse action to `"mouse"`; anything longer, or a launch,
//! becomes an explicit `"actions"` list.

use crate::model::{Action, Command, Profile};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Top-level simplified profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedProfile {
    /// Profile display name
    pub name: String,
    /// Commands in decode order
    pub commands: Vec<SimplifiedCommand>,
}

/// A command with at most one of the payload fields set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedCommand {
    /// Spoken trigger phrase
    pub trigger: String,
    /// Category label
    pub category: String,
    /// Lowercase key name for a single key press
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Generator name for a single mouse action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse: Option<String>,
    /// Click count accompanying `mouse`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_clicks: Option<u32>,
    /// Explicit action list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<SimplifiedAction>>,
}

/// One entry of an explicit action list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimplifiedAction {
    /// Key press by lowercase name
    PressKey {
        /// Key names
        keys: Vec<String>,
    },
    /// Mouse action by generator name
    MouseAction {
        /// Generator name, e.g. `scroll_up`
        action: String,
        /// Click count for scroll actions
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scroll_clicks: Option<u32>,
    },
    /// Application launch
    Launch {
        /// Executable path
        path: String,
    },
}

impl From<&Action> for SimplifiedAction {
    fn from(action: &Action) -> Self {
        match action {
            Action::KeyPress { symbolic_name, .. } => SimplifiedAction::PressKey {
                keys: vec![symbolic_name.to_lowercase()],
            },
            Action::MouseAction {
                generator_name,
                scroll_clicks,
                ..
            } => SimplifiedAction::MouseAction {
                action: generator_name.clone(),
                scroll_clicks: *scroll_clicks,
            },
            Action::RunApplication { path } => SimplifiedAction::Launch { path: path.clone() },
        }
    }
}

impl From<&Command> for SimplifiedCommand {
    fn from(command: &Command) -> Self {
        let mut simplified = SimplifiedCommand {
            trigger: command.phrase.clone(),
            category: command.category.clone(),
            ..SimplifiedCommand::default()
        };

        match command.actions.as_slice() {
            [] => {}
            [Action::KeyPress { symbolic_name, .. }] => {
                simplified.key = Some(symbolic_name.to_lowercase());
            }
            [Action::MouseAction {
                generator_name,
                scroll_clicks,
                ..
            }] => {
                simplified.mouse = Some(generator_name.clone());
                simplified.scroll_clicks = *scroll_clicks;
            }
            actions => {
                simplified.actions = Some(actions.iter().map(SimplifiedAction::from).collect());
            }
        }
        simplified
    }
}

/// Convert a decoded profile into the simplified schema
pub fn simplify(profile: &Profile) -> SimplifiedProfile {
    SimplifiedProfile {
        name: profile.name.clone(),
        commands: profile.commands.iter().map(SimplifiedCommand::from).collect(),
    }
}

/// Render a profile as pretty-printed simplified JSON
pub fn to_json(profile: &Profile) -> Result<String> {
    Ok(serde_json::to_string_pretty(&simplify(profile))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn command(actions: Vec<Action>) -> Command {
        Command {
            id: Uuid::nil(),
            phrase: "[press;] alpha".to_string(),
            category: "keyboard".to_string(),
            actions,
        }
    }

    fn value(command: &Command) -> serde_json::Value {
        serde_json::to_value(SimplifiedCommand::from(command)).unwrap()
    }

    #[test]
    fn test_single_key_collapses() {
        assert_eq!(
            value(&command(vec![Action::key_press(0x41)])),
            json!({"trigger": "[press;] alpha", "category": "keyboard", "key": "a"})
        );
    }

    #[test]
    fn test_single_mouse_collapses() {
        assert_eq!(
            value(&command(vec![Action::mouse("SF", Some(3))])),
            json!({
                "trigger": "[press;] alpha",
                "category": "keyboard",
                "mouse": "scroll_up",
                "scroll_clicks": 3
            })
        );
        assert_eq!(
            value(&command(vec![Action::mouse("RC", None)]))["mouse"],
            json!("right_click")
        );
    }

    #[test]
    fn test_sequence_becomes_action_list() {
        let cmd = command(vec![
            Action::key_press(0x11),
            Action::mouse("LC", None),
            Action::RunApplication {
                path: "notepad.exe".to_string(),
            },
        ]);
        assert_eq!(
            value(&cmd)["actions"],
            json!([
                {"type": "PressKey", "keys": ["ctrl"]},
                {"type": "MouseAction", "action": "left_click"},
                {"type": "Launch", "path": "notepad.exe"}
            ])
        );
    }

    #[test]
    fn test_lone_launch_uses_action_list() {
        let cmd = command(vec![Action::RunApplication {
            path: "*Steam".to_string(),
        }]);
        let v = value(&cmd);
        assert!(v.get("key").is_none());
        assert_eq!(v["actions"][0]["type"], json!("Launch"));
    }

    #[test]
    fn test_no_actions_no_payload() {
        assert_eq!(
            value(&command(Vec::new())),
            json!({"trigger": "[press;] alpha", "category": "keyboard"})
        );
    }

    #[test]
    fn test_to_json_profile() {
        let profile = Profile {
            id: Uuid::nil(),
            name: "Demo".to_string(),
            commands: vec![command(vec![Action::key_press(0x41)])],
        };
        let parsed: SimplifiedProfile = serde_json::from_str(&to_json(&profile).unwrap()).unwrap();
        assert_eq!(parsed, simplify(&profile));
        assert_eq!(parsed.commands[0].key.as_deref(), Some("a"));
    }
}
