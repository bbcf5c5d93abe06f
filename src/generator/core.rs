//! Generator core - the document tree and its LIFO builder.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Wire format of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    /// Suffix used in vendor media types (`+json` / `+xml`).
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    /// Content type used when the document root carries no media type of its own.
    #[must_use]
    pub fn default_content_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            other => Err(format!("unknown output format '{other}' (expected json or xml)")),
        }
    }
}

/// Kind of an element in the Output Document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Object,
    Hash,
    List,
    Value,
    FieldHash,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementKind::Object => "object",
            ElementKind::Hash => "hash",
            ElementKind::List => "list",
            ElementKind::Value => "value",
            ElementKind::FieldHash => "field hash",
        };
        f.write_str(s)
    }
}

/// One node of the Output Document.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    /// Attributes in insertion order; setting an existing name replaces its value.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Scalar for value elements, the raw hash for field hash elements.
    pub value: Option<Value>,
}

impl Element {
    fn new(kind: ElementKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            value: None,
        }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.attribute("media-type")
    }

    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.attribute("href")
    }

    /// First direct child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn scalar(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name.to_string(), value));
        }
    }
}

/// Errors raised by a malformed sequence of generator calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// `start_document` called twice without `reset`
    DocumentAlreadyStarted,
    /// Element operation outside `start_document` / `end_document`
    DocumentNotStarted,
    /// Closing call does not match the innermost open element
    UnbalancedElement {
        expected_kind: ElementKind,
        expected: String,
        found_kind: ElementKind,
        found: String,
    },
    /// Closing call with no element open
    NothingOpen { kind: ElementKind, name: String },
    /// `end_document` or `render` with elements still open
    UnclosedElements { open: Vec<String> },
    /// A second top-level element
    MultipleRoots { name: String },
    /// Attribute started while another attribute is open
    AttributeAlreadyOpen { open: String, name: String },
    /// `end_attribute` does not match the open attribute
    AttributeMismatch { expected: Option<String>, found: String },
    /// Attribute with no element to attach to
    NoElementForAttribute { name: String },
    /// Child element inside a value or field hash element
    LeafHasChildren { parent: String, child: String },
    /// The renderer failed to serialise the finished tree
    Render(String),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::DocumentAlreadyStarted => write!(f, "document already started"),
            GeneratorError::DocumentNotStarted => write!(f, "document not started"),
            GeneratorError::UnbalancedElement {
                expected_kind,
                expected,
                found_kind,
                found,
            } => write!(
                f,
                "unbalanced element: innermost open element is {expected_kind} '{expected}', \
                 attempted to close {found_kind} '{found}'"
            ),
            GeneratorError::NothingOpen { kind, name } => {
                write!(f, "cannot close {kind} '{name}': no element is open")
            }
            GeneratorError::UnclosedElements { open } => {
                write!(f, "document has unclosed elements: {}", open.join(" > "))
            }
            GeneratorError::MultipleRoots { name } => {
                write!(f, "document already has a root element, cannot start '{name}'")
            }
            GeneratorError::AttributeAlreadyOpen { open, name } => {
                write!(f, "cannot start attribute '{name}' while '{open}' is open")
            }
            GeneratorError::AttributeMismatch { expected, found } => match expected {
                Some(expected) => write!(
                    f,
                    "attribute mismatch: open attribute is '{expected}', attempted to close '{found}'"
                ),
                None => write!(f, "cannot close attribute '{found}': no attribute is open"),
            },
            GeneratorError::NoElementForAttribute { name } => {
                write!(f, "attribute '{name}' has no element to attach to")
            }
            GeneratorError::LeafHasChildren { parent, child } => {
                write!(f, "leaf element '{parent}' cannot contain '{child}'")
            }
            GeneratorError::Render(msg) => write!(f, "render failed: {msg}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Builder for the Output Document of one render pass.
///
/// The generator is exclusively owned by a single render call. [`Generator::reset`]
/// returns it to the pristine state so no tree survives between requests.
#[derive(Debug, Clone)]
pub struct Generator {
    format: Format,
    vendor: String,
    started: bool,
    ended: bool,
    stack: Vec<Element>,
    open_attribute: Option<String>,
    root: Option<Element>,
}

impl Generator {
    #[must_use]
    pub fn new(format: Format, vendor: &str) -> Self {
        Self {
            format,
            vendor: vendor.to_string(),
            started: false,
            ended: false,
            stack: Vec::new(),
            open_attribute: None,
            root: None,
        }
    }

    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// Vendor media type for a resource name, e.g.
    /// `application/vnd.cms.api.Content+json`.
    #[must_use]
    pub fn media_type(&self, name: &str) -> String {
        format!(
            "application/vnd.{}.api.{}+{}",
            self.vendor,
            name,
            self.format.suffix()
        )
    }

    pub fn start_document(&mut self) -> Result<(), GeneratorError> {
        if self.started {
            return Err(GeneratorError::DocumentAlreadyStarted);
        }
        self.started = true;
        Ok(())
    }

    pub fn end_document(&mut self) -> Result<(), GeneratorError> {
        self.ensure_open()?;
        if let Some(open) = &self.open_attribute {
            return Err(GeneratorError::UnclosedElements {
                open: vec![format!("@{open}")],
            });
        }
        if !self.stack.is_empty() {
            return Err(GeneratorError::UnclosedElements {
                open: self.stack.iter().map(|e| e.name.clone()).collect(),
            });
        }
        self.ended = true;
        debug!(
            root = self.root.as_ref().map(|r| r.name.as_str()).unwrap_or(""),
            format = %self.format,
            "Document complete"
        );
        Ok(())
    }

    /// True while no root element has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.stack.is_empty()
    }

    /// The finished root element, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Discard the tree and any open state.
    pub fn reset(&mut self) {
        self.started = false;
        self.ended = false;
        self.stack.clear();
        self.open_attribute = None;
        self.root = None;
    }

    /// Open a typed resource element. `media_type_name` defaults to `name`.
    pub fn start_object_element(
        &mut self,
        name: &str,
        media_type_name: Option<&str>,
    ) -> Result<(), GeneratorError> {
        let mut element = Element::new(ElementKind::Object, name);
        element.set_attribute("media-type", self.media_type(media_type_name.unwrap_or(name)));
        self.push(element)
    }

    pub fn end_object_element(&mut self, name: &str) -> Result<(), GeneratorError> {
        self.pop(ElementKind::Object, name)
    }

    pub fn start_hash_element(&mut self, name: &str) -> Result<(), GeneratorError> {
        self.push(Element::new(ElementKind::Hash, name))
    }

    pub fn end_hash_element(&mut self, name: &str) -> Result<(), GeneratorError> {
        self.pop(ElementKind::Hash, name)
    }

    pub fn start_list(&mut self, name: &str) -> Result<(), GeneratorError> {
        self.push(Element::new(ElementKind::List, name))
    }

    pub fn end_list(&mut self, name: &str) -> Result<(), GeneratorError> {
        self.pop(ElementKind::List, name)
    }

    pub fn start_value_element(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), GeneratorError> {
        let mut element = Element::new(ElementKind::Value, name);
        element.value = Some(value.into());
        self.push(element)
    }

    pub fn end_value_element(&mut self, name: &str) -> Result<(), GeneratorError> {
        self.pop(ElementKind::Value, name)
    }

    /// `start_value_element` + `end_value_element`.
    pub fn value_element(&mut self, name: &str, value: impl Into<Value>) -> Result<(), GeneratorError> {
        self.start_value_element(name, value)?;
        self.end_value_element(name)
    }

    /// Attach an attribute to the innermost open element.
    pub fn start_attribute(&mut self, name: &str, value: impl Into<String>) -> Result<(), GeneratorError> {
        self.ensure_open()?;
        if let Some(open) = &self.open_attribute {
            return Err(GeneratorError::AttributeAlreadyOpen {
                open: open.clone(),
                name: name.to_string(),
            });
        }
        let top = self
            .stack
            .last_mut()
            .ok_or_else(|| GeneratorError::NoElementForAttribute {
                name: name.to_string(),
            })?;
        top.set_attribute(name, value.into());
        self.open_attribute = Some(name.to_string());
        Ok(())
    }

    pub fn end_attribute(&mut self, name: &str) -> Result<(), GeneratorError> {
        match self.open_attribute.take() {
            Some(open) if open == name => Ok(()),
            other => {
                self.open_attribute = other.clone();
                Err(GeneratorError::AttributeMismatch {
                    expected: other,
                    found: name.to_string(),
                })
            }
        }
    }

    /// `start_attribute` + `end_attribute`.
    pub fn attribute(&mut self, name: &str, value: impl Into<String>) -> Result<(), GeneratorError> {
        self.start_attribute(name, value)?;
        self.end_attribute(name)
    }

    /// Embed a field type hash (value, settings or validator configuration) verbatim.
    pub fn field_type_hash(&mut self, name: &str, hash: &Value) -> Result<(), GeneratorError> {
        let mut element = Element::new(ElementKind::FieldHash, name);
        element.value = Some(hash.clone());
        self.push(element)?;
        self.pop(ElementKind::FieldHash, name)
    }

    /// Render the finished document. An empty document renders as an empty string.
    pub fn render(&self) -> Result<String, GeneratorError> {
        if !self.started {
            return Err(GeneratorError::DocumentNotStarted);
        }
        if !self.stack.is_empty() {
            return Err(GeneratorError::UnclosedElements {
                open: self.stack.iter().map(|e| e.name.clone()).collect(),
            });
        }
        match &self.root {
            None => Ok(String::new()),
            Some(root) => match self.format {
                Format::Json => super::json::render(root),
                Format::Xml => super::xml::render(root),
            },
        }
    }

    fn ensure_open(&self) -> Result<(), GeneratorError> {
        if !self.started || self.ended {
            return Err(GeneratorError::DocumentNotStarted);
        }
        Ok(())
    }

    fn push(&mut self, element: Element) -> Result<(), GeneratorError> {
        self.ensure_open()?;
        if let Some(open) = &self.open_attribute {
            return Err(GeneratorError::AttributeAlreadyOpen {
                open: open.clone(),
                name: element.name,
            });
        }
        match self.stack.last() {
            Some(parent) if matches!(parent.kind, ElementKind::Value | ElementKind::FieldHash) => {
                return Err(GeneratorError::LeafHasChildren {
                    parent: parent.name.clone(),
                    child: element.name,
                });
            }
            None if self.root.is_some() => {
                return Err(GeneratorError::MultipleRoots { name: element.name });
            }
            _ => {}
        }
        self.stack.push(element);
        Ok(())
    }

    fn pop(&mut self, kind: ElementKind, name: &str) -> Result<(), GeneratorError> {
        self.ensure_open()?;
        if let Some(open) = &self.open_attribute {
            return Err(GeneratorError::AttributeAlreadyOpen {
                open: open.clone(),
                name: name.to_string(),
            });
        }
        let top = match self.stack.last() {
            Some(top) => top,
            None => {
                return Err(GeneratorError::NothingOpen {
                    kind,
                    name: name.to_string(),
                })
            }
        };
        if top.kind != kind || top.name != name {
            return Err(GeneratorError::UnbalancedElement {
                expected_kind: top.kind,
                expected: top.name.clone(),
                found_kind: kind,
                found: name.to_string(),
            });
        }
        let element = match self.stack.pop() {
            Some(element) => element,
            None => {
                return Err(GeneratorError::NothingOpen {
                    kind,
                    name: name.to_string(),
                })
            }
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => self.root = Some(element),
        }
        Ok(())
    }
}
