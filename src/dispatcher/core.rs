//! Dispatcher core - visitor registry, resolution and the render pass.

use super::error::{DispatchError, RenderError};
use super::response::{RenderedResponse, ResponseContext};
use crate::config::ServiceConfig;
use crate::field_type::FieldTypeSerializer;
use crate::generator::{Format, Generator};
use crate::router::Router;
use crate::values::{DomainValue, ValueKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Renders one kind of value into the document under construction.
///
/// A visitor may set the response status and headers through the [`Visit`] and may
/// dispatch nested values back through it.
pub trait ValueObjectVisitor: Send + Sync {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError>;
}

/// Immutable visitor table plus the collaborators visitors share.
pub struct Dispatcher {
    visitors: HashMap<ValueKind, Arc<dyn ValueObjectVisitor>>,
    router: Arc<Router>,
    fields: Arc<FieldTypeSerializer>,
    config: Arc<ServiceConfig>,
}

/// Collects visitor registrations before freezing them into a [`Dispatcher`].
pub struct DispatcherBuilder {
    visitors: HashMap<ValueKind, Arc<dyn ValueObjectVisitor>>,
    router: Arc<Router>,
    fields: Arc<FieldTypeSerializer>,
    config: Arc<ServiceConfig>,
}

impl DispatcherBuilder {
    #[must_use]
    pub fn new(
        router: Arc<Router>,
        fields: Arc<FieldTypeSerializer>,
        config: Arc<ServiceConfig>,
    ) -> Self {
        Self {
            visitors: HashMap::new(),
            router,
            fields,
            config,
        }
    }

    /// Register the visitor for one kind. A second registration for the same kind fails.
    pub fn register(
        &mut self,
        kind: ValueKind,
        visitor: Arc<dyn ValueObjectVisitor>,
    ) -> Result<&mut Self, DispatchError> {
        if self.visitors.contains_key(&kind) {
            return Err(DispatchError::DuplicateVisitor(kind));
        }
        debug!(kind = %kind, "Registered visitor");
        self.visitors.insert(kind, visitor);
        Ok(self)
    }

    /// Freeze the table after checking that every kind in [`ValueKind::ALL`] resolves.
    pub fn build(self) -> Result<Dispatcher, DispatchError> {
        let missing: Vec<ValueKind> = ValueKind::ALL
            .iter()
            .copied()
            .filter(|kind| !kind.lineage().any(|k| self.visitors.contains_key(&k)))
            .collect();
        if !missing.is_empty() {
            return Err(DispatchError::MissingVisitors(missing));
        }
        Ok(self.build_partial())
    }

    /// Freeze the table without the coverage check.
    #[must_use]
    pub fn build_partial(self) -> Dispatcher {
        info!(
            visitors_count = self.visitors.len(),
            vendor = %self.config.vendor,
            max_depth = self.config.max_depth,
            "Visitor dispatcher ready"
        );
        Dispatcher {
            visitors: self.visitors,
            router: self.router,
            fields: self.fields,
            config: self.config,
        }
    }
}

impl Dispatcher {
    #[must_use]
    pub fn builder(
        router: Arc<Router>,
        fields: Arc<FieldTypeSerializer>,
        config: Arc<ServiceConfig>,
    ) -> DispatcherBuilder {
        DispatcherBuilder::new(router, fields, config)
    }

    /// A complete dispatcher with the built-in visitor for every kind.
    pub fn with_default_visitors(
        router: Arc<Router>,
        fields: Arc<FieldTypeSerializer>,
        config: Arc<ServiceConfig>,
    ) -> Result<Self, DispatchError> {
        let mut builder = DispatcherBuilder::new(router, fields, config);
        crate::visitors::register_all(&mut builder)?;
        builder.build()
    }

    /// The most specific registered visitor for `kind`, walking up its lineage.
    pub fn resolve(&self, kind: ValueKind) -> Result<&Arc<dyn ValueObjectVisitor>, DispatchError> {
        kind.lineage()
            .find_map(|k| self.visitors.get(&k))
            .ok_or(DispatchError::NoVisitor(kind))
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    #[must_use]
    pub fn fields(&self) -> &FieldTypeSerializer {
        &self.fields
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Render in the configured format.
    pub fn render_default(&self, value: &DomainValue) -> Result<RenderedResponse, RenderError> {
        self.render(value, self.config.format)
    }

    /// Run one render pass with a fresh document and response context.
    ///
    /// The status defaults to 200. `Content-Type` falls back to the root element's media
    /// type when no visitor set one; an empty document yields an empty body and no
    /// content type.
    pub fn render(
        &self,
        value: &DomainValue,
        format: Format,
    ) -> Result<RenderedResponse, RenderError> {
        let mut visit = Visit::new(self, Generator::new(format, &self.config.vendor));
        visit.generator.start_document()?;
        visit.dispatch(value)?;
        visit.generator.end_document()?;
        let body = visit.generator.render()?;

        let Visit {
            generator,
            mut response,
            ..
        } = visit;

        if body.is_empty() {
            response.remove_header("Content-Type");
        } else if response.header("Content-Type").is_none() {
            let content_type = generator
                .root()
                .and_then(|root| root.media_type())
                .unwrap_or(format.default_content_type())
                .to_string();
            response.set_header("Content-Type", content_type, 0);
        }

        let status = response.status().unwrap_or(200);
        info!(
            kind = %value.kind(),
            status,
            format = %format,
            body_bytes = body.len(),
            "Rendered response"
        );

        Ok(RenderedResponse {
            status,
            headers: response.into_headers(),
            body,
        })
    }
}

/// Per-render context threaded through every visitor call.
pub struct Visit<'a> {
    dispatcher: &'a Dispatcher,
    generator: Generator,
    response: ResponseContext,
    /// Number of visitor frames currently running
    depth: usize,
}

impl<'a> Visit<'a> {
    fn new(dispatcher: &'a Dispatcher, generator: Generator) -> Self {
        Self {
            dispatcher,
            generator,
            response: ResponseContext::new(),
            depth: 0,
        }
    }

    /// Render a nested value with its own visitor.
    pub fn dispatch(&mut self, value: &DomainValue) -> Result<(), RenderError> {
        let kind = value.kind();
        let max_depth = self.dispatcher.config.max_depth;
        if self.depth >= max_depth {
            return Err(DispatchError::DepthExceeded { max_depth, kind }.into());
        }
        let dispatcher = self.dispatcher;
        let visitor = dispatcher.resolve(kind)?;
        debug!(kind = %kind, depth = self.depth, "Dispatching value");

        self.depth += 1;
        let result = visitor.visit(self, value);
        self.depth -= 1;
        result
    }

    #[must_use]
    pub fn generator(&mut self) -> &mut Generator {
        &mut self.generator
    }

    #[must_use]
    pub fn router(&self) -> &'a Router {
        &self.dispatcher.router
    }

    #[must_use]
    pub fn fields(&self) -> &'a FieldTypeSerializer {
        &self.dispatcher.fields
    }

    #[must_use]
    pub fn config(&self) -> &'a ServiceConfig {
        &self.dispatcher.config
    }

    /// Nesting level of the running visitor; 0 for the outermost one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth.saturating_sub(1)
    }

    #[must_use]
    pub fn is_outermost(&self) -> bool {
        self.depth() == 0
    }

    /// Generate a link from a route name.
    pub fn href(&self, route: &str, params: &[(&str, String)]) -> Result<String, RenderError> {
        Ok(self.router().generate(route, params)?)
    }

    /// Vendor media type for a resource name in the current format.
    #[must_use]
    pub fn media_type(&self, name: &str) -> String {
        self.generator.media_type(name)
    }

    pub fn set_status(&mut self, status: u16) {
        let depth = self.depth();
        self.response.set_status(status, depth);
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let depth = self.depth();
        self.response.set_header(name, value.into(), depth);
    }

    /// `Content-Type` for the named resource.
    pub fn set_content_type(&mut self, name: &str) {
        let media_type = self.media_type(name);
        self.set_header("Content-Type", media_type);
    }

    /// `Accept-Patch` naming the update media type of a mutable resource.
    pub fn set_accept_patch(&mut self, update_name: &str) {
        let media_type = self.media_type(update_name);
        self.set_header("Accept-Patch", media_type);
    }

    #[must_use]
    pub fn response(&self) -> &ResponseContext {
        &self.response
    }
}
