//! Fixed profile template
//!
//! The host expects every field of its profile schema to be present even
//! when unused, so each command and action is written with the same
//! boilerplate and only the resolved values differ.

use super::input::ActionKind;
use crate::render::xml::{close, finish, new_writer, open, text_element, XmlWriter};
use crate::Result;
use quick_xml::events::{BytesStart, Event};
use uuid::Uuid;

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
const EMPTY_DATE: &str = "0001-01-01T00:00:00";
const EXPORT_VA_VERSION: &str = "1.10.0";

/// Fully resolved action ready to be written
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ActionFields {
    pub kind: ActionKind,
    pub duration: f64,
    pub delay: f64,
    pub key_codes: Vec<u16>,
    pub context: String,
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub decimal_context: f64,
}

impl ActionFields {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            duration: 0.0,
            delay: 0.0,
            key_codes: Vec::new(),
            context: String::new(),
            x: 0,
            y: 0,
            z: 0,
            decimal_context: 0.0,
        }
    }
}

/// Fully resolved command ready to be written
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CommandFields {
    pub phrase: String,
    pub category: String,
    pub actions: Vec<ActionFields>,
}

fn nil_element(writer: &mut XmlWriter, name: &str) -> Result<()> {
    let element = BytesStart::new(name).with_attributes([("xsi:nil", "true")]);
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn flag(writer: &mut XmlWriter, name: &str, value: bool) -> Result<()> {
    text_element(writer, name, if value { "true" } else { "false" })
}

fn number<T: ToString>(writer: &mut XmlWriter, name: &str, value: T) -> Result<()> {
    text_element(writer, name, &value.to_string())
}

/// Write a complete profile document
pub(crate) fn write_profile(id: Uuid, name: &str, commands: &[CommandFields]) -> Result<String> {
    let mut writer = new_writer()?;

    let root = BytesStart::new("Profile")
        .with_attributes([("xmlns:xsi", XSI_NAMESPACE), ("xmlns:xsd", XSD_NAMESPACE)]);
    writer.write_event(Event::Start(root))?;

    text_element(&mut writer, "Id", &id.to_string())?;
    text_element(&mut writer, "Name", name)?;

    open(&mut writer, "Commands")?;
    for command in commands {
        write_command(&mut writer, command)?;
    }
    close(&mut writer, "Commands")?;

    flag(&mut writer, "OverrideGlobal", false)?;
    number(&mut writer, "GlobalHotkeyIndex", 0)?;
    flag(&mut writer, "GlobalHotkeyEnabled", false)?;
    for field in ["Value", "Shift", "Alt", "Ctrl", "Win"] {
        number(&mut writer, &format!("GlobalHotkey{field}"), 0)?;
    }
    flag(&mut writer, "GlobalHotkeyPassThru", false)?;
    flag(&mut writer, "OverrideMouse", false)?;
    number(&mut writer, "MouseIndex", 0)?;
    flag(&mut writer, "OverrideStop", false)?;
    flag(&mut writer, "StopCommandHotkeyEnabled", false)?;
    for field in ["Value", "Shift", "Alt", "Ctrl", "Win"] {
        number(&mut writer, &format!("StopCommandHotkey{field}"), 0)?;
    }
    flag(&mut writer, "StopCommandHotkeyPassThru", false)?;
    flag(&mut writer, "DisableShortcuts", false)?;
    flag(&mut writer, "UseOverrideListening", false)?;
    flag(&mut writer, "OverrideJoystickGlobal", false)?;
    for field in ["Index", "Button", "Number", "Button2", "Number2"] {
        number(&mut writer, &format!("GlobalJoystick{field}"), 0)?;
    }
    nil_element(&mut writer, "ReferencedProfile")?;
    text_element(&mut writer, "ExportVAVersion", EXPORT_VA_VERSION)?;
    number(&mut writer, "ExportOSVersionMajor", 10)?;
    number(&mut writer, "ExportOSVersionMinor", 0)?;
    flag(&mut writer, "OverrideConfidence", false)?;
    number(&mut writer, "Confidence", 0)?;
    flag(&mut writer, "CatchAllEnabled", false)?;
    nil_element(&mut writer, "CatchAllId")?;
    flag(&mut writer, "InitializeCommandEnabled", false)?;
    nil_element(&mut writer, "InitializeCommandId")?;
    flag(&mut writer, "UseProcessOverride", false)?;
    flag(&mut writer, "HasMB", false)?;

    close(&mut writer, "Profile")?;
    finish(writer)
}

fn write_command(writer: &mut XmlWriter, command: &CommandFields) -> Result<()> {
    open(writer, "Command")?;

    nil_element(writer, "Referrer")?;
    number(writer, "ExecType", 3)?;
    number(writer, "Confidence", 0)?;
    number(writer, "PrefixActionCount", 0)?;
    flag(writer, "IsDynamicallyCreated", false)?;
    flag(writer, "TargetProcessSet", false)?;
    number(writer, "TargetProcessType", 0)?;
    number(writer, "TargetProcessLevel", 0)?;
    number(writer, "CompareType", 0)?;
    flag(writer, "ExecFromWildcard", false)?;
    flag(writer, "IsSubCommand", false)?;
    flag(writer, "IsOverride", false)?;
    text_element(writer, "BaseId", &Uuid::new_v4().to_string())?;
    text_element(writer, "OriginId", &Uuid::nil().to_string())?;
    flag(writer, "SessionEnabled", true)?;
    text_element(writer, "Id", &Uuid::new_v4().to_string())?;
    text_element(writer, "CommandString", &command.phrase)?;

    if command.actions.is_empty() {
        text_element(writer, "ActionSequence", "")?;
    } else {
        open(writer, "ActionSequence")?;
        for (ordinal, action) in command.actions.iter().enumerate() {
            write_action(writer, action, ordinal)?;
        }
        close(writer, "ActionSequence")?;
    }

    flag(writer, "Async", true)?;
    flag(writer, "Enabled", true)?;
    text_element(writer, "Category", &command.category)?;
    flag(writer, "UseShortcut", false)?;
    for field in ["keyValue", "keyShift", "keyAlt", "keyCtrl", "keyWin"] {
        number(writer, field, 0)?;
    }
    flag(writer, "keyPassthru", true)?;
    flag(writer, "UseSpokenPhrase", true)?;
    flag(writer, "onlyKeyUp", false)?;
    number(writer, "RepeatNumber", 2)?;
    number(writer, "RepeatType", 0)?;
    number(writer, "CommandType", 0)?;
    text_element(writer, "SourceProfile", &Uuid::nil().to_string())?;
    flag(writer, "UseConfidence", false)?;
    number(writer, "minimumConfidenceLevel", 0)?;
    flag(writer, "UseJoystick", false)?;
    for field in ["joystickNumber", "joystickButton", "joystickNumber2", "joystickButton2"] {
        number(writer, field, 0)?;
    }
    flag(writer, "joystickUp", false)?;
    flag(writer, "KeepRepeating", false)?;
    flag(writer, "UseProcessOverride", false)?;
    flag(writer, "ProcessOverrideActiveWindow", true)?;
    flag(writer, "LostFocusStop", false)?;
    flag(writer, "PauseLostFocus", false)?;
    flag(writer, "LostFocusBackCompat", true)?;
    flag(writer, "UseMouse", false)?;
    for button in 1..=9 {
        flag(writer, &format!("Mouse{button}"), false)?;
    }
    flag(writer, "MouseUpOnly", false)?;
    flag(writer, "MousePassThru", true)?;
    flag(writer, "joystickExclusive", false)?;
    flag(writer, "UseProfileProcessOverride", false)?;
    flag(writer, "ProfileProcessOverrideActiveWindow", false)?;
    flag(writer, "RepeatIfKeysDown", false)?;
    flag(writer, "RepeatIfMouseDown", false)?;
    flag(writer, "RepeatIfJoystickDown", false)?;
    number(writer, "AH", 0)?;
    number(writer, "CL", 0)?;
    flag(writer, "HasMB", false)?;
    flag(writer, "UseVariableHotkey", false)?;
    number(writer, "CLE", 0)?;
    flag(writer, "EX1", false)?;
    flag(writer, "EX2", false)?;
    nil_element(writer, "InternalId")?;
    flag(writer, "HasInput", true)?;

    close(writer, "Command")
}

fn write_action(writer: &mut XmlWriter, action: &ActionFields, ordinal: usize) -> Result<()> {
    open(writer, "CommandAction")?;

    flag(writer, "PairingSet", false)?;
    flag(writer, "PairingSetElse", false)?;
    number(writer, "Ordinal", ordinal)?;
    nil_element(writer, "ConditionMet")?;
    number(writer, "IndentLevel", 0)?;
    flag(writer, "ConditionSkip", false)?;
    flag(writer, "IsSuffixAction", false)?;
    number(writer, "DecimalTransient1", 0)?;
    text_element(writer, "Id", &Uuid::new_v4().to_string())?;
    text_element(writer, "ActionType", action.kind.as_str())?;
    number(writer, "Duration", action.duration)?;
    number(writer, "Delay", action.delay)?;

    if action.key_codes.is_empty() {
        text_element(writer, "KeyCodes", "")?;
    } else {
        open(writer, "KeyCodes")?;
        for code in &action.key_codes {
            number(writer, "unsignedShort", code)?;
        }
        close(writer, "KeyCodes")?;
    }

    text_element(writer, "Context", &action.context)?;
    number(writer, "X", action.x)?;
    number(writer, "Y", action.y)?;
    number(writer, "Z", action.z)?;
    number(writer, "InputMode", 0)?;
    number(writer, "ConditionPairing", 0)?;
    number(writer, "ConditionGroup", 0)?;
    number(writer, "ConditionStartOperator", 0)?;
    number(writer, "ConditionStartValue", 0)?;
    number(writer, "ConditionStartValueType", 0)?;
    number(writer, "ConditionStartType", 0)?;
    number(writer, "DecimalContext1", action.decimal_context)?;
    number(writer, "DecimalContext2", 0)?;
    text_element(writer, "DateContext1", EMPTY_DATE)?;
    text_element(writer, "DateContext2", EMPTY_DATE)?;
    flag(writer, "Disabled", false)?;
    text_element(writer, "RandomSounds", "")?;
    text_element(writer, "ConditionExpressions", "")?;

    close(writer, "CommandAction")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_fields() {
        let mut press = ActionFields::new(ActionKind::PressKey);
        press.duration = 0.1;
        press.key_codes = vec![0x11, 0x41];
        let command = CommandFields {
            phrase: "copy".to_string(),
            category: "keyboard".to_string(),
            actions: vec![press],
        };

        let xml = write_profile(Uuid::nil(), "Demo", &[command]).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<Profile xmlns:xsi="));
        assert!(xml.contains("<Referrer xsi:nil=\"true\"/>"));
        assert!(xml.contains("<CommandString>copy</CommandString>"));
        assert!(xml.contains("<ActionType>PressKey</ActionType>"));
        assert!(xml.contains("<Duration>0.1</Duration>"));
        assert!(xml.contains("<unsignedShort>17</unsignedShort>"));
        assert!(xml.contains("<unsignedShort>65</unsignedShort>"));
        assert!(xml.contains("<Category>keyboard</Category>"));
        assert!(xml.contains("<Ordinal>0</Ordinal>"));
    }

    #[test]
    fn test_command_without_actions() {
        let command = CommandFields {
            phrase: "nothing".to_string(),
            category: "general".to_string(),
            actions: Vec::new(),
        };
        let xml = write_profile(Uuid::nil(), "Demo", &[command]).unwrap();
        assert!(xml.contains("<ActionSequence/>"));
        assert!(!xml.contains("<CommandAction>"));
    }

    #[test]
    fn test_fresh_ids_per_command() {
        let command = CommandFields {
            phrase: "a".to_string(),
            category: "general".to_string(),
            actions: Vec::new(),
        };
        let xml = write_profile(Uuid::nil(), "Demo", &[command.clone(), command]).unwrap();
        let ids: Vec<_> = xml
            .lines()
            .filter(|l| l.trim_start().starts_with("<Id>"))
            .collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[1], ids[2]);
    }

    #[test]
    fn test_host_fields() {
        let xml = write_profile(Uuid::nil(), "Demo", &[]).unwrap();
        for field in [
            "<CatchAllEnabled>false</CatchAllEnabled>",
            "<InitializeCommandEnabled>false</InitializeCommandEnabled>",
            "<ExportVAVersion>1.10.0</ExportVAVersion>",
            "<OverrideStop>false</OverrideStop>",
            "<StopCommandHotkeyPassThru>false</StopCommandHotkeyPassThru>",
            "<GlobalJoystickNumber2>0</GlobalJoystickNumber2>",
            "<ReferencedProfile xsi:nil=\"true\"/>",
            "<ExportOSVersionMajor>10</ExportOSVersionMajor>",
            "<CatchAllId xsi:nil=\"true\"/>",
        ] {
            assert!(xml.contains(field), "missing {field}");
        }
        for field in ["<OverrideHotkey>", "<AuthorID", "<ProductID", "<CR>", "<PE>"] {
            assert!(!xml.contains(field), "unexpected {field}");
        }
        assert!(xml.trim_end().ends_with("<HasMB>false</HasMB>\n</Profile>"));
    }

    #[test]
    fn test_command_host_fields() {
        let mut click = ActionFields::new(ActionKind::MouseAction);
        click.context = "LC".to_string();
        let command = CommandFields {
            phrase: "click".to_string(),
            category: "mouse".to_string(),
            actions: vec![click],
        };
        let xml = write_profile(Uuid::nil(), "Demo", &[command]).unwrap();
        for field in [
            "<SourceProfile>00000000-0000-0000-0000-000000000000</SourceProfile>",
            "<Mouse9>false</Mouse9>",
            "<MousePassThru>true</MousePassThru>",
            "<joystickNumber2>0</joystickNumber2>",
            "<KeepRepeating>false</KeepRepeating>",
            "<LostFocusBackCompat>true</LostFocusBackCompat>",
            "<InternalId xsi:nil=\"true\"/>",
            "<HasInput>true</HasInput>",
            "<ConditionExpressions/>",
        ] {
            assert!(xml.contains(field), "missing {field}");
        }
        for field in ["<Caption", "<EndingPhrase>", "<Mouse>"] {
            assert!(!xml.contains(field), "unexpected {field}");
        }
    }
}
