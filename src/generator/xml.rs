//! XML renderer for a finished Output Document (quick-xml writer).

use super::core::{Element, ElementKind, GeneratorError};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;
use std::io::Cursor;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn render_err<E: std::fmt::Display>(e: E) -> GeneratorError {
    GeneratorError::Render(e.to_string())
}

pub(super) fn render(root: &Element) -> Result<String, GeneratorError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(render_err)?;
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner().into_inner()).map_err(render_err)
}

fn write_element(writer: &mut XmlWriter, element: &Element) -> Result<(), GeneratorError> {
    // Lists have no wrapper element of their own in XML.
    if element.kind == ElementKind::List {
        for child in &element.children {
            write_element(writer, child)?;
        }
        return Ok(());
    }

    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }
    writer.write_event(Event::Start(start)).map_err(render_err)?;

    match element.kind {
        ElementKind::Value => {
            if let Some(value) = &element.value {
                write_text(writer, value)?;
            }
        }
        ElementKind::FieldHash => {
            if let Some(value) = &element.value {
                write_hash_value(writer, value)?;
            }
        }
        _ => {
            for child in &element.children {
                write_element(writer, child)?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(render_err)
}

/// Field hashes nest as `<value key="...">` for maps and keyless `<value>` for arrays.
fn write_hash_value(writer: &mut XmlWriter, value: &Value) -> Result<(), GeneratorError> {
    match value {
        Value::Object(map) => {
            for (key, item) in map {
                let mut start = BytesStart::new("value");
                start.push_attribute(("key", key.as_str()));
                writer.write_event(Event::Start(start)).map_err(render_err)?;
                write_hash_value(writer, item)?;
                writer
                    .write_event(Event::End(BytesEnd::new("value")))
                    .map_err(render_err)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                writer
                    .write_event(Event::Start(BytesStart::new("value")))
                    .map_err(render_err)?;
                write_hash_value(writer, item)?;
                writer
                    .write_event(Event::End(BytesEnd::new("value")))
                    .map_err(render_err)?;
            }
            Ok(())
        }
        scalar => write_text(writer, scalar),
    }
}

fn write_text(writer: &mut XmlWriter, value: &Value) -> Result<(), GeneratorError> {
    let text = match value {
        Value::Null => return Ok(()),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Composite values in a value element are written as compact JSON.
        other => other.to_string(),
    };
    if text.is_empty() {
        return Ok(());
    }
    writer
        .write_event(Event::Text(BytesText::new(&text)))
        .map_err(render_err)
}
