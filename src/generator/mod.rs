//! # Generator Module
//!
//! The generator builds the Output Document for one render pass. Visitors never write
//! bytes directly; they describe the document through a small set of hierarchical
//! operations and the generator renders the finished tree as JSON or XML.
//!
//! ## Element Kinds
//!
//! - **object** - a typed resource; always carries a `media-type` attribute and usually
//!   an `href`
//! - **hash** - an untyped nested structure
//! - **list** - repeated children sharing one name
//! - **value** - a scalar leaf
//! - **field hash** - a field type value/settings hash embedded verbatim
//!
//! ## Invariants
//!
//! Elements are closed in strict LIFO order. The tree is append-only during a pass and
//! exactly one root element may exist. Any violation is a [`GeneratorError`]; the
//! generator never repairs a malformed sequence of calls.
//!
//! ## Example
//!
//! ```rust
//! use rest_visitors::generator::{Format, Generator};
//!
//! let mut gen = Generator::new(Format::Json, "cms");
//! gen.start_document().unwrap();
//! gen.start_object_element("Section", None).unwrap();
//! gen.attribute("href", "/api/rest/v2/content/sections/1").unwrap();
//! gen.value_element("identifier", "standard").unwrap();
//! gen.end_object_element("Section").unwrap();
//! gen.end_document().unwrap();
//!
//! let body = gen.render().unwrap();
//! assert!(body.contains("\"_media-type\":\"application/vnd.cms.api.Section+json\""));
//! ```

mod core;
mod json;
mod xml;

pub use core::{Element, ElementKind, Format, Generator, GeneratorError};
