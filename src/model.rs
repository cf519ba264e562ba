//! Decoded profile model
//!
//! A [`Profile`] is built in a single decode pass, rendered, and dropped.
//! Nothing mutates it after construction.

use crate::tables;
use uuid::Uuid;

/// A decoded voice-command profile
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Profile identifier
    pub id: Uuid,
    /// Profile display name
    pub name: String,
    /// Commands in discovery order
    pub commands: Vec<Command>,
}

/// A voice trigger phrase bound to a category and an action sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Command identifier
    pub id: Uuid,
    /// Spoken trigger phrase, never empty
    pub phrase: String,
    /// Category label, or `"uncategorized"`
    pub category: String,
    /// Actions in execution order
    pub actions: Vec<Action>,
}

/// A single reconstructed action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Press and release a single key
    KeyPress {
        /// Platform virtual key code
        virtual_key_code: u16,
        /// Name from the key table, or a `VK_0x..` placeholder
        symbolic_name: String,
    },
    /// Mouse button gesture or scroll
    MouseAction {
        /// Two or three letter context code, e.g. `LC` or `SF`
        context_code: String,
        /// Generator-facing name, e.g. `left_click`
        generator_name: String,
        /// Click count for scroll actions, when a plausible one was found
        scroll_clicks: Option<u32>,
    },
    /// Launch an application
    RunApplication {
        /// Executable path, or a `*`-prefixed launcher reference
        path: String,
    },
}

impl Action {
    /// Build a key press, resolving the symbolic name from the key table
    pub fn key_press(virtual_key_code: u16) -> Self {
        Action::KeyPress {
            virtual_key_code,
            symbolic_name: tables::symbolic_key_name(virtual_key_code),
        }
    }

    /// Build a mouse action from a context code
    pub fn mouse(context_code: &str, scroll_clicks: Option<u32>) -> Self {
        let generator_name = tables::mouse_action_name(context_code)
            .unwrap_or(context_code)
            .to_string();
        Action::MouseAction {
            context_code: context_code.to_string(),
            generator_name,
            scroll_clicks,
        }
    }

    /// Type tag used by both renderers
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::KeyPress { .. } => "PressKey",
            Action::MouseAction { .. } => "MouseAction",
            Action::RunApplication { .. } => "Launch",
        }
    }
}

impl Profile {
    /// Total number of actions across all commands
    pub fn action_count(&self) -> usize {
        self.commands.iter().map(|c| c.actions.len()).sum()
    }
}
