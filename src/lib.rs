//! # rest-visitors
//!
//! **rest-visitors** is the output layer of a content repository's REST API. It turns
//! repository value objects (content, locations, content types, roles, users, ...) into
//! hypermedia documents in JSON or XML, together with the HTTP status and headers that
//! go with them.
//!
//! ## Overview
//!
//! A hosting framework resolves a value, hands it to the [`Dispatcher`](dispatcher::Dispatcher)
//! and sends back the [`RenderedResponse`](dispatcher::RenderedResponse). The dispatcher
//! picks the visitor registered for the value's kind; the visitor writes elements into
//! the [`Generator`](generator::Generator), computes links through the
//! [`Router`](router::Router) and may dispatch nested values.
//!
//! Field values and field settings are stored in each field type's internal shape. The
//! [`field_type`] processors translate them to the public vocabulary on the way out and
//! back on the way in.
//!
//! ## Architecture
//!
//! - **[`values`]** - Every value object the layer renders, as one tagged enum
//! - **[`dispatcher`]** - Visitor registry, kind resolution and the per-render context
//! - **[`visitors`]** - The built-in visitors
//! - **[`generator`]** - Output Document builder with JSON and XML renderers
//! - **[`field_type`]** - Field type processors, serializer, parser and upload files
//! - **[`route_table`]** / **[`router`]** - Named routes and link generation
//! - **[`lookup`]** - Repository lookups needed to resolve relation links
//! - **[`config`]** / **[`runtime_config`]** - YAML configuration and env overrides
//! - **[`logging`]** - tracing subscriber setup
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Hosting framework
//!     participant Dispatcher
//!     participant Visitor as Value visitor
//!     participant Generator
//!     participant Router
//!     participant Fields as Field type serializer
//!
//!     Host->>Dispatcher: render(Content, json)
//!     Dispatcher->>Visitor: visit(Content)
//!     Visitor->>Router: generate("load_content", contentId)
//!     Visitor->>Generator: start_object_element("Content")
//!     Visitor->>Dispatcher: dispatch(Version)
//!     Dispatcher->>Visitor: visit(Version)
//!     Visitor->>Fields: serialize_field_value(field)
//!     Fields->>Generator: fieldValue hash
//!     Visitor->>Generator: end_object_element("Content")
//!     Dispatcher-->>Host: RenderedResponse (status, headers, body)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rest_visitors::config::ServiceConfig;
//! use rest_visitors::generator::Format;
//! use rest_visitors::layer::OutputLayer;
//! use rest_visitors::lookup::InMemoryLookup;
//! use rest_visitors::values::{DomainValue, Section};
//! use std::sync::Arc;
//!
//! let layer = OutputLayer::new(ServiceConfig::default(), Arc::new(InMemoryLookup::new())).unwrap();
//! let section = Section { id: 3, identifier: "media".into(), name: "Media".into() };
//!
//! let response = layer.render(&DomainValue::Section(section), Format::Json).unwrap();
//! assert_eq!(response.status, 200);
//! assert_eq!(response.content_type(), Some("application/vnd.cms.api.Section+json"));
//! ```

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod field_type;
pub mod generator;
pub mod layer;
pub mod logging;
pub mod lookup;
pub mod route_table;
pub mod router;
pub mod runtime_config;
pub mod values;
pub mod visitors;

pub use dispatcher::{Dispatcher, RenderError, RenderedResponse};
pub use generator::Format;
pub use layer::OutputLayer;
pub use values::{DomainValue, ValueKind};
