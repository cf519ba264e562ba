//! Uncompressed XML profiles
//!
//! The host also stores profiles as plain XML, which is the form the
//! generator writes. Reading that form back into the same simplified model
//! lets a generated profile be decoded like a binary one. Only the action
//! kinds the binary decoder can produce are kept: key presses, mouse
//! actions and launches.

use crate::common::{UNCATEGORIZED, UNKNOWN_PROFILE_NAME};
use crate::model::{Action, Command, Profile};
use crate::tables;
use crate::{Result, VapError};
use quick_xml::events::Event;
use quick_xml::Reader;
use uuid::Uuid;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Whether `data` is an XML profile rather than a deflate stream
pub fn looks_like_xml(data: &[u8]) -> bool {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let data = &data[start..];
    data.starts_with(b"<?xml") || data.starts_with(b"<Profile")
}

#[derive(Debug, Default)]
struct ActionFields {
    kind: String,
    context: String,
    decimal_context: String,
    key_codes: Vec<u16>,
}

impl ActionFields {
    fn into_actions(self) -> Vec<Action> {
        match self.kind.as_str() {
            "PressKey" => self.key_codes.into_iter().map(Action::key_press).collect(),
            "MouseAction" if !self.context.is_empty() => {
                let clicks = if tables::is_scroll_code(&self.context) {
                    self.decimal_context
                        .parse::<f64>()
                        .ok()
                        .filter(|v| *v > 0.0)
                        .map(|v| (v.round() as u32).max(1))
                } else {
                    None
                };
                vec![Action::mouse(&self.context, clicks)]
            }
            "Launch" if !self.context.is_empty() => vec![Action::RunApplication {
                path: self.context,
            }],
            other => {
                log::trace!("Dropping '{other}' action from textual profile");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Default)]
struct CommandFields {
    id: Uuid,
    phrase: String,
    category: String,
    actions: Vec<Action>,
}

fn parse_id(text: &str) -> Uuid {
    Uuid::parse_str(text.trim()).unwrap_or_else(|e| {
        log::debug!("Unparseable id '{text}': {e}");
        Uuid::nil()
    })
}

/// Read an XML profile into the simplified model
pub fn read_profile(data: &[u8]) -> Result<Profile> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let text = std::str::from_utf8(data)
        .map_err(|e| VapError::CorruptArchive(format!("textual profile is not UTF-8: {e}")))?;

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut profile = Profile {
        id: Uuid::nil(),
        name: String::new(),
        commands: Vec::new(),
    };
    let mut command: Option<CommandFields> = None;
    let mut action: Option<ActionFields> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                match name.as_str() {
                    "Command" => command = Some(CommandFields::default()),
                    "CommandAction" => action = Some(ActionFields::default()),
                    _ => {}
                }
                path.push(name);
            }
            Event::End(_) => {
                let Some(name) = path.pop() else {
                    continue;
                };
                match name.as_str() {
                    "CommandAction" => {
                        if let (Some(fields), Some(cmd)) = (action.take(), command.as_mut()) {
                            cmd.actions.extend(fields.into_actions());
                        }
                    }
                    "Command" => {
                        if let Some(cmd) = command.take().filter(|c| !c.phrase.is_empty()) {
                            profile.commands.push(Command {
                                id: cmd.id,
                                phrase: cmd.phrase,
                                category: if cmd.category.is_empty() {
                                    UNCATEGORIZED.to_string()
                                } else {
                                    cmd.category
                                },
                                actions: cmd.actions,
                            });
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                let value = t.unescape()?.into_owned();
                let depth = path.len();
                if depth < 2 {
                    continue;
                }
                let leaf = path[depth - 1].as_str();
                let parent = path[depth - 2].as_str();
                match (parent, leaf) {
                    ("Profile", "Id") => profile.id = parse_id(&value),
                    ("Profile", "Name") => profile.name = value,
                    ("Command", field) => {
                        if let Some(cmd) = command.as_mut() {
                            match field {
                                "Id" => cmd.id = parse_id(&value),
                                "CommandString" => cmd.phrase = value,
                                "Category" => cmd.category = value,
                                _ => {}
                            }
                        }
                    }
                    ("CommandAction", field) => {
                        if let Some(fields) = action.as_mut() {
                            match field {
                                "ActionType" => fields.kind = value,
                                "Context" => fields.context = value,
                                "DecimalContext1" => fields.decimal_context = value,
                                _ => {}
                            }
                        }
                    }
                    ("KeyCodes", "unsignedShort") => {
                        let code = value.trim().parse::<u16>();
                        if let (Some(fields), Ok(code)) = (action.as_mut(), code) {
                            fields.key_codes.push(code);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if profile.name.is_empty() {
        profile.name = UNKNOWN_PROFILE_NAME.to_string();
    }
    log::debug!(
        "Read textual profile '{}' with {} commands",
        profile.name,
        profile.commands.len()
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Profile xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Id>0f8fad5b-d9cb-469f-a165-70867728950e</Id>
  <Name>Flight &amp; Combat</Name>
  <Commands>
    <Command>
      <Referrer xsi:nil="true"/>
      <Id>7c9e6679-7425-40de-944b-e07fc1f90ae7</Id>
      <CommandString>[press;] alpha</CommandString>
      <ActionSequence>
        <CommandAction>
          <Id>11111111-2222-3333-4444-555555555555</Id>
          <ActionType>PressKey</ActionType>
          <KeyCodes>
            <unsignedShort>65</unsignedShort>
          </KeyCodes>
          <Context/>
        </CommandAction>
        <CommandAction>
          <ActionType>Pause</ActionType>
          <KeyCodes/>
        </CommandAction>
      </ActionSequence>
      <Category>keyboard</Category>
    </Command>
    <Command>
      <Id>not-a-guid</Id>
      <CommandString>scroll up</CommandString>
      <ActionSequence>
        <CommandAction>
          <ActionType>MouseAction</ActionType>
          <KeyCodes/>
          <Context>SF</Context>
          <DecimalContext1>3</DecimalContext1>
        </CommandAction>
      </ActionSequence>
      <Category>mouse</Category>
    </Command>
    <Command>
      <CommandString>open notes</CommandString>
      <ActionSequence>
        <CommandAction>
          <ActionType>Launch</ActionType>
          <Context>notepad.exe</Context>
        </CommandAction>
      </ActionSequence>
    </Command>
  </Commands>
</Profile>"#;

    #[test]
    fn test_detection() {
        assert!(looks_like_xml(SAMPLE.as_bytes()));
        assert!(looks_like_xml(b"\xEF\xBB\xBF  \n<Profile>"));
        assert!(!looks_like_xml(b"<html>"));
        assert!(!looks_like_xml(&[0x3C, 0x8B, 0x12]));
        assert!(!looks_like_xml(b""));
    }

    #[test]
    fn test_read_profile() {
        let profile = read_profile(SAMPLE.as_bytes()).unwrap();
        assert_eq!(profile.name, "Flight & Combat");
        assert_eq!(
            profile.id.to_string(),
            "0f8fad5b-d9cb-469f-a165-70867728950e"
        );
        assert_eq!(profile.commands.len(), 3);

        let alpha = &profile.commands[0];
        assert_eq!(alpha.phrase, "[press;] alpha");
        assert_eq!(alpha.category, "keyboard");
        assert_eq!(
            alpha.id.to_string(),
            "7c9e6679-7425-40de-944b-e07fc1f90ae7"
        );
        assert_eq!(alpha.actions, vec![Action::key_press(65)]);

        let scroll = &profile.commands[1];
        assert_eq!(scroll.id, Uuid::nil());
        assert_eq!(scroll.actions, vec![Action::mouse("SF", Some(3))]);

        let launch = &profile.commands[2];
        assert_eq!(launch.category, UNCATEGORIZED);
        assert_eq!(
            launch.actions,
            vec![Action::RunApplication {
                path: "notepad.exe".to_string()
            }]
        );
    }

    #[test]
    fn test_malformed_xml() {
        assert!(read_profile(b"<Profile><Name>x</Nope></Profile>").is_err());
        assert!(read_profile(b"<Profile>\xFF</Profile>").is_err());
    }
}
