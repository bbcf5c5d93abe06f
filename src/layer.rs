//! Assembly of the whole output layer from one [`ServiceConfig`].
//!
//! Builds the router from the configured route table, the field type processors around a
//! repository lookup, and a dispatcher with every built-in visitor.
//!
//! Uploads decoded through [`OutputLayer::parser`] stay on disk until
//! [`UploadRegistry::cleanup`] runs or the layer is dropped. Long-lived layers parse each
//! request through [`OutputLayer::request_parser`] instead, whose uploads are removed
//! when the returned [`RequestParser`] goes out of scope.

use crate::config::ServiceConfig;
use crate::dispatcher::{Dispatcher, RenderError, RenderedResponse};
use crate::field_type::{
    FieldTypeParser, FieldTypeProcessorRegistry, FieldTypeSerializer, ProcessorContext,
    UploadRegistry,
};
use crate::generator::Format;
use crate::lookup::RepositoryLookup;
use crate::route_table::names;
use crate::router::Router;
use crate::values::DomainValue;
use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, info};

pub struct OutputLayer {
    dispatcher: Dispatcher,
    parser: FieldTypeParser,
    registry: Arc<FieldTypeProcessorRegistry>,
    uploads: Arc<UploadRegistry>,
    router: Arc<Router>,
    lookup: Arc<dyn RepositoryLookup>,
    config: Arc<ServiceConfig>,
}

/// Field type parser for one request, owning the uploads it decodes.
pub struct RequestParser {
    parser: FieldTypeParser,
    uploads: Arc<UploadRegistry>,
}

impl RequestParser {
    #[must_use]
    pub fn parser(&self) -> &FieldTypeParser {
        &self.parser
    }

    #[must_use]
    pub fn uploads(&self) -> &UploadRegistry {
        &self.uploads
    }
}

impl Drop for RequestParser {
    fn drop(&mut self) {
        let removed = self.uploads.cleanup();
        if removed > 0 {
            debug!(removed, "Request uploads removed");
        }
    }
}

impl OutputLayer {
    pub fn new(config: ServiceConfig, lookup: Arc<dyn RepositoryLookup>) -> anyhow::Result<Self> {
        let table = config.route_table()?;
        let router = Arc::new(Router::new(table).context("Failed to compile route table")?);
        router
            .require_routes(names::LINKED)
            .context("Route table cannot back the output layer")?;
        let uploads = Arc::new(UploadRegistry::new(
            config.uploads.resolved_temp_dir(),
            &config.uploads.prefix,
        ));
        let config = Arc::new(config);

        let ctx = ProcessorContext {
            router: Arc::clone(&router),
            lookup: Arc::clone(&lookup),
            uploads: Arc::clone(&uploads),
            config: Arc::clone(&config),
        };
        let registry = Arc::new(FieldTypeProcessorRegistry::with_default_processors(&ctx));
        let serializer = Arc::new(FieldTypeSerializer::new(Arc::clone(&registry)));
        let parser = FieldTypeParser::new(Arc::clone(&registry));
        let dispatcher =
            Dispatcher::with_default_visitors(Arc::clone(&router), serializer, Arc::clone(&config))
                .context("Failed to register visitors")?;

        info!(
            routes_count = router.routes().count(),
            field_types = registry.field_types().len(),
            upload_dir = %uploads.dir().display(),
            "Output layer ready"
        );

        Ok(Self {
            dispatcher,
            parser,
            registry,
            uploads,
            router,
            lookup,
            config,
        })
    }

    /// Parser with its own upload registry; dropping it deletes that request's uploads.
    #[must_use]
    pub fn request_parser(&self) -> RequestParser {
        let uploads = Arc::new(UploadRegistry::new(
            self.uploads.dir(),
            &self.config.uploads.prefix,
        ));
        let ctx = ProcessorContext {
            router: Arc::clone(&self.router),
            lookup: Arc::clone(&self.lookup),
            uploads: Arc::clone(&uploads),
            config: Arc::clone(&self.config),
        };
        let registry = Arc::new(FieldTypeProcessorRegistry::with_default_processors(&ctx));
        RequestParser {
            parser: FieldTypeParser::new(registry),
            uploads,
        }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Input side of the field type processors.
    #[must_use]
    pub fn parser(&self) -> &FieldTypeParser {
        &self.parser
    }

    #[must_use]
    pub fn registry(&self) -> &FieldTypeProcessorRegistry {
        &self.registry
    }

    #[must_use]
    pub fn uploads(&self) -> &UploadRegistry {
        &self.uploads
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn render(
        &self,
        value: &DomainValue,
        format: Format,
    ) -> Result<RenderedResponse, RenderError> {
        self.dispatcher.render(value, format)
    }

    pub fn render_default(&self, value: &DomainValue) -> Result<RenderedResponse, RenderError> {
        self.dispatcher.render_default(value)
    }
}
