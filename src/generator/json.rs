//! JSON renderer for a finished Output Document.
//!
//! Attributes become `_<name>` keys, a value element with attributes keeps its scalar under
//! `#text`, and list elements collapse into arrays under the list's name. Repeated
//! element names inside one object become an array in document order, matching the
//! sibling elements the XML renderer writes.

use super::core::{Element, ElementKind, GeneratorError};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub(super) fn render(root: &Element) -> Result<String, GeneratorError> {
    let mut doc = Map::new();
    doc.insert(root.name.clone(), body(root));
    serde_json::to_string(&Value::Object(doc)).map_err(|e| GeneratorError::Render(e.to_string()))
}

fn body(element: &Element) -> Value {
    match element.kind {
        ElementKind::FieldHash => element.value.clone().unwrap_or(Value::Null),
        ElementKind::List => Value::Array(element.children.iter().map(body).collect()),
        ElementKind::Value => {
            let scalar = element.value.clone().unwrap_or(Value::Null);
            if element.attributes.is_empty() {
                scalar
            } else {
                let mut map = attributes(element);
                map.insert("#text".to_string(), scalar);
                Value::Object(map)
            }
        }
        ElementKind::Object | ElementKind::Hash => {
            let mut map = attributes(element);
            let mut repeated: HashSet<&str> = HashSet::new();
            for child in &element.children {
                let value = body(child);
                match map.get_mut(&child.name) {
                    None => {
                        map.insert(child.name.clone(), value);
                    }
                    Some(Value::Array(items)) if repeated.contains(child.name.as_str()) => {
                        items.push(value);
                    }
                    Some(existing) => {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                        repeated.insert(child.name.as_str());
                    }
                }
            }
            Value::Object(map)
        }
    }
}

fn attributes(element: &Element) -> Map<String, Value> {
    element
        .attributes
        .iter()
        .map(|(k, v)| (format!("_{k}"), Value::String(v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::core::{Format, Generator};
    use serde_json::json;

    #[test]
    fn test_repeated_names_collect_into_array() {
        let mut gen = Generator::new(Format::Json, "cms");
        gen.start_document().unwrap();
        gen.start_object_element("Section", None).unwrap();
        gen.value_element("tag", "a").unwrap();
        gen.value_element("name", "Media").unwrap();
        gen.value_element("tag", "b").unwrap();
        gen.value_element("tag", "c").unwrap();
        gen.end_object_element("Section").unwrap();
        gen.end_document().unwrap();

        let doc: serde_json::Value = serde_json::from_str(&gen.render().unwrap()).unwrap();
        assert_eq!(doc["Section"]["tag"], json!(["a", "b", "c"]));
        assert_eq!(doc["Section"]["name"], "Media");
    }

    #[test]
    fn test_repeated_lists_stay_separate_items() {
        let mut gen = Generator::new(Format::Json, "cms");
        gen.start_document().unwrap();
        gen.start_object_element("Root", None).unwrap();
        gen.start_list("item").unwrap();
        gen.value_element("item", 1).unwrap();
        gen.end_list("item").unwrap();
        gen.start_list("item").unwrap();
        gen.value_element("item", 2).unwrap();
        gen.end_list("item").unwrap();
        gen.end_object_element("Root").unwrap();
        gen.end_document().unwrap();

        let doc: serde_json::Value = serde_json::from_str(&gen.render().unwrap()).unwrap();
        assert_eq!(doc["Root"]["item"], json!([[1], [2]]));
    }
}
