//! Profile generation
//!
//! Turns a [`ProfileInput`] into the host's XML profile form. Resolution
//! problems never abort generation: each one is recorded as a
//! [`Diagnostic`], logged, and the affected key, action or command falls
//! back to a documented default.

mod input;
mod template;

pub use input::{ActionInput, ActionKind, CommandInput, KeyList, ProfileInput};

use crate::tables;
use crate::Result;
use template::{ActionFields, CommandFields};
use thiserror::Error;
use uuid::Uuid;

/// Name used when the input has none
pub const DEFAULT_PROFILE_NAME: &str = "Generated Profile";

/// Trigger used when a command has none
pub const DEFAULT_TRIGGER: &str = "unnamed command";

/// Category used when a command has none
pub const DEFAULT_CATEGORY: &str = "general";

/// Default key press duration in seconds
pub const DEFAULT_KEY_DURATION: f64 = 0.1;

/// Default pause length in seconds
pub const DEFAULT_PAUSE_DURATION: f64 = 0.5;

/// Default speech volume
pub const DEFAULT_SAY_VOLUME: u32 = 100;

/// Non-fatal problem found while generating
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A key name could not be resolved; its code is dropped
    #[error("Unknown key '{key}' in command '{trigger}'")]
    UnknownKey {
        /// Command trigger
        trigger: String,
        /// Unresolved key name
        key: String,
    },

    /// A mouse action name could not be resolved; `left_click` is used
    #[error("Unknown mouse action '{action}' in command '{trigger}', using left_click")]
    UnknownMouseAction {
        /// Command trigger
        trigger: String,
        /// Unresolved action name
        action: String,
    },

    /// A command has no key, mouse or actions; it is written without actions
    #[error("Command '{trigger}' has no key, mouse or actions")]
    MissingAction {
        /// Command trigger
        trigger: String,
    },

    /// An explicit action has an unsupported type; it is skipped
    #[error("Unknown action type '{kind}' in command '{trigger}'")]
    UnknownActionType {
        /// Command trigger
        trigger: String,
        /// Unsupported type name
        kind: String,
    },

    /// The profile id is not a GUID; a fresh one is used
    #[error("Invalid profile id '{id}', generating a new one")]
    InvalidProfileId {
        /// Rejected id
        id: String,
    },
}

/// Output of a generation pass
#[derive(Debug, Clone)]
pub struct Generated {
    /// Profile XML
    pub xml: String,
    /// Problems encountered, in input order
    pub diagnostics: Vec<Diagnostic>,
    /// Number of commands written
    pub command_count: usize,
}

#[derive(Debug, Default)]
struct Generator {
    diagnostics: Vec<Diagnostic>,
}

impl Generator {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn profile_id(&mut self, id: Option<&str>) -> Uuid {
        match id {
            None => Uuid::new_v4(),
            Some(text) => Uuid::parse_str(text.trim()).unwrap_or_else(|_| {
                self.report(Diagnostic::InvalidProfileId {
                    id: text.to_string(),
                });
                Uuid::new_v4()
            }),
        }
    }

    fn command(&mut self, input: &CommandInput) -> CommandFields {
        let trigger = input
            .trigger
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TRIGGER)
            .to_string();
        let category = input
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        let actions = match (&input.actions, &input.key, &input.mouse) {
            (Some(actions), _, _) if !actions.is_empty() => actions
                .iter()
                .filter_map(|action| self.explicit_action(&trigger, action))
                .collect(),
            (_, Some(key), _) => {
                let mut press = ActionFields::new(ActionKind::PressKey);
                press.duration = input.duration.unwrap_or(DEFAULT_KEY_DURATION);
                press.key_codes = self.key_codes(&trigger, &[key.as_str()]);
                vec![press]
            }
            (_, None, Some(mouse)) => {
                vec![self.mouse_action(&trigger, mouse, input.scroll_clicks, input.duration)]
            }
            _ => {
                self.report(Diagnostic::MissingAction {
                    trigger: trigger.clone(),
                });
                Vec::new()
            }
        };

        log::debug!("Command '{trigger}' resolved to {} actions", actions.len());
        CommandFields {
            phrase: trigger,
            category,
            actions,
        }
    }

    fn explicit_action(&mut self, trigger: &str, input: &ActionInput) -> Option<ActionFields> {
        let Some(kind) = ActionKind::from_name(&input.kind) else {
            self.report(Diagnostic::UnknownActionType {
                trigger: trigger.to_string(),
                kind: input.kind.clone(),
            });
            return None;
        };

        let mut fields = match kind {
            ActionKind::MouseAction => {
                let name = input.action.as_deref().unwrap_or_default();
                self.mouse_action(trigger, name, input.scroll_clicks, input.duration)
            }
            _ => {
                let mut fields = ActionFields::new(kind);
                fields.duration = input.duration.unwrap_or_else(|| default_duration(kind));
                if kind.uses_keys() {
                    fields.key_codes = self.key_codes(trigger, &input.keys.names());
                }
                match kind {
                    ActionKind::Say => {
                        fields.context = input.text.clone().unwrap_or_default();
                        fields.x = i64::from(input.volume.unwrap_or(DEFAULT_SAY_VOLUME));
                        fields.y = i64::from(input.rate.unwrap_or(0));
                    }
                    ActionKind::Launch => {
                        fields.context = input.path.clone().unwrap_or_default();
                    }
                    _ => {}
                }
                fields
            }
        };

        fields.delay = input.delay.unwrap_or(0.0);
        Some(fields)
    }

    fn key_codes(&mut self, trigger: &str, names: &[&str]) -> Vec<u16> {
        let mut codes = Vec::with_capacity(names.len());
        for name in names {
            match tables::key_code(name) {
                Some(code) => codes.push(code),
                None => self.report(Diagnostic::UnknownKey {
                    trigger: trigger.to_string(),
                    key: name.to_string(),
                }),
            }
        }
        codes
    }

    /// Scroll actions carry their click count in `Duration`, `X` and
    /// `DecimalContext1`; other mouse actions take an explicit click duration
    fn mouse_action(
        &mut self,
        trigger: &str,
        name: &str,
        clicks: Option<u32>,
        duration: Option<f64>,
    ) -> ActionFields {
        let code = tables::mouse_code(name).unwrap_or_else(|| {
            self.report(Diagnostic::UnknownMouseAction {
                trigger: trigger.to_string(),
                action: name.to_string(),
            });
            tables::DEFAULT_MOUSE_CODE
        });

        let scroll = tables::is_scroll_code(code);
        let clicks = clicks.unwrap_or(if scroll { 1 } else { 0 });

        let mut fields = ActionFields::new(ActionKind::MouseAction);
        fields.context = code.to_string();
        fields.x = i64::from(clicks);
        fields.decimal_context = f64::from(clicks);
        fields.duration = if scroll {
            f64::from(clicks)
        } else {
            duration.unwrap_or(0.0)
        };
        fields
    }
}

/// Duration written when an action gives none
fn default_duration(kind: ActionKind) -> f64 {
    match kind {
        ActionKind::PressKey => DEFAULT_KEY_DURATION,
        ActionKind::Pause => DEFAULT_PAUSE_DURATION,
        _ => 0.0,
    }
}

/// Generate a profile from parsed input
pub fn generate_profile(input: &ProfileInput) -> Result<Generated> {
    let mut generator = Generator::default();

    let id = generator.profile_id(input.id.as_deref());
    let name = input
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(DEFAULT_PROFILE_NAME);

    let mut commands = Vec::with_capacity(input.commands.len());
    for command in &input.commands {
        if command.is_section() {
            log::debug!("Skipping section marker");
            continue;
        }
        commands.push(generator.command(command));
    }

    let xml = template::write_profile(id, name, &commands)?;
    log::info!(
        "Generated profile '{name}' with {} commands and {} warnings",
        commands.len(),
        generator.diagnostics.len()
    );

    Ok(Generated {
        xml,
        diagnostics: generator.diagnostics,
        command_count: commands.len(),
    })
}

/// Parse generator input from JSON and generate a profile
pub fn generate_from_json(json: &str) -> Result<Generated> {
    let input: ProfileInput = serde_json::from_str(json)?;
    generate_profile(&input)
}
