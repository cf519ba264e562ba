//! XML rendering of a decoded profile
//!
//! ```text
//! Profile
//!   Id, Name
//!   Commands
//!     Command
//!       Id, Phrase, Category
//!       Actions
//!         Action
//!           Type, <variant fields>
//! ```

use crate::model::{Action, Profile};
use crate::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub(crate) type XmlWriter = Writer<Vec<u8>>;

pub(crate) fn new_writer() -> Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    Ok(writer)
}

pub(crate) fn finish(writer: XmlWriter) -> Result<String> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

pub(crate) fn open(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

pub(crate) fn close(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write `<name>text</name>`, or `<name/>` when `text` is empty
pub(crate) fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    open(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    close(writer, name)
}

/// Render a profile as indented XML
pub fn to_xml(profile: &Profile) -> Result<String> {
    let mut writer = new_writer()?;

    open(&mut writer, "Profile")?;
    text_element(&mut writer, "Id", &profile.id.to_string())?;
    text_element(&mut writer, "Name", &profile.name)?;

    open(&mut writer, "Commands")?;
    for command in &profile.commands {
        open(&mut writer, "Command")?;
        text_element(&mut writer, "Id", &command.id.to_string())?;
        text_element(&mut writer, "Phrase", &command.phrase)?;
        text_element(&mut writer, "Category", &command.category)?;

        if !command.actions.is_empty() {
            open(&mut writer, "Actions")?;
            for action in &command.actions {
                write_action(&mut writer, action)?;
            }
            close(&mut writer, "Actions")?;
        }
        close(&mut writer, "Command")?;
    }
    close(&mut writer, "Commands")?;
    close(&mut writer, "Profile")?;

    finish(writer)
}

fn write_action(writer: &mut XmlWriter, action: &Action) -> Result<()> {
    open(writer, "Action")?;
    text_element(writer, "Type", action.type_name())?;
    match action {
        Action::KeyPress {
            virtual_key_code,
            symbolic_name,
        } => {
            text_element(writer, "Key", symbolic_name)?;
            text_element(writer, "VKCode", &format!("0x{virtual_key_code:02X}"))?;
        }
        Action::MouseAction {
            context_code,
            generator_name,
            scroll_clicks,
        } => {
            text_element(writer, "Context", context_code)?;
            text_element(writer, "Action", generator_name)?;
            if let Some(clicks) = scroll_clicks {
                text_element(writer, "ScrollClicks", &clicks.to_string())?;
            }
        }
        Action::RunApplication { path } => {
            text_element(writer, "Path", path)?;
        }
    }
    close(writer, "Action")
}
