//! # Dispatcher Module
//!
//! The dispatcher renders a [`DomainValue`](crate::values::DomainValue) by handing it to
//! the visitor registered for the value's kind. Visitors write into the Output Document
//! and may dispatch nested values, so a whole response is built by recursive composition.
//!
//! ## Overview
//!
//! - Visitors are registered per [`ValueKind`](crate::values::ValueKind) on a
//!   [`DispatcherBuilder`]; registering a kind twice is an error
//! - [`DispatcherBuilder::build`] checks that every kind resolves to a visitor
//! - Resolution walks the kind's lineage, so the most specific visitor wins regardless
//!   of registration order
//! - Each [`Dispatcher::render`] call owns a fresh generator and a fresh
//!   [`ResponseContext`]; nothing survives between renders
//!
//! ## Response Side-Channel
//!
//! Visitors set the HTTP status and headers through the [`Visit`] they receive. Writes
//! are tagged with the visitor's nesting depth: the outermost visitor that sets a status
//! owns it, and a nested visitor never overrides a header an outer one set. A `Created`
//! wrapper therefore keeps its 201 while the wrapped value's visitor still supplies the
//! `Content-Type`.
//!
//! ## Example
//!
//! ```rust
//! use rest_visitors::dispatcher::Dispatcher;
//! use rest_visitors::generator::Format;
//! use rest_visitors::values::DomainValue;
//! # use rest_visitors::config::ServiceConfig;
//! # use rest_visitors::field_type::{FieldTypeProcessorRegistry, FieldTypeSerializer};
//! # use rest_visitors::route_table::RouteTable;
//! # use rest_visitors::router::Router;
//! # use std::sync::Arc;
//! # let router = Arc::new(Router::new(RouteTable::builtin().unwrap()).unwrap());
//! # let fields = Arc::new(FieldTypeSerializer::new(Arc::new(FieldTypeProcessorRegistry::new())));
//! # let config = Arc::new(ServiceConfig::default());
//!
//! let dispatcher = Dispatcher::with_default_visitors(router, fields, config).unwrap();
//! let response = dispatcher.render(&DomainValue::NoContent, Format::Json).unwrap();
//! assert_eq!(response.status, 204);
//! assert!(response.body.is_empty());
//! ```

mod core;
mod error;
mod response;

pub use core::{Dispatcher, DispatcherBuilder, ValueObjectVisitor, Visit};
pub use error::{DispatchError, RenderError};
pub use response::{
    status_reason, HeaderVec, RenderedResponse, ResponseContext, MAX_INLINE_HEADERS,
};
