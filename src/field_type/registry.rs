use super::processor::{apply, Direction, FieldTypeProcessor, HashTarget, ProcessorError};
use super::processors::{
    AuthorProcessor, BinaryFileProcessor, DateAndTimeProcessor, DateProcessor, ImageProcessor,
    MediaProcessor, RelationListProcessor, RelationProcessor, TimeProcessor,
};
use super::uploads::UploadRegistry;
use crate::config::ServiceConfig;
use crate::lookup::RepositoryLookup;
use crate::router::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Collaborators the built-in processors need.
#[derive(Clone)]
pub struct ProcessorContext {
    pub router: Arc<Router>,
    pub lookup: Arc<dyn RepositoryLookup>,
    pub uploads: Arc<UploadRegistry>,
    pub config: Arc<ServiceConfig>,
}

/// Field type identifier → processor.
///
/// Field types without a processor pass through unchanged in both directions.
#[derive(Default)]
pub struct FieldTypeProcessorRegistry {
    processors: HashMap<String, Arc<dyn FieldTypeProcessor>>,
}

impl FieldTypeProcessorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a processor for every built-in field type.
    #[must_use]
    pub fn with_default_processors(ctx: &ProcessorContext) -> Self {
        let host_prefix = ctx.config.binary.host_prefix.as_str();
        let mut registry = Self::new();
        registry.register("author", Arc::new(AuthorProcessor));
        registry.register("date", Arc::new(DateProcessor));
        registry.register("time", Arc::new(TimeProcessor));
        registry.register("datetime", Arc::new(DateAndTimeProcessor));
        registry.register(
            "media",
            Arc::new(MediaProcessor::new(Arc::clone(&ctx.uploads), host_prefix)),
        );
        registry.register(
            "binaryfile",
            Arc::new(BinaryFileProcessor::new(Arc::clone(&ctx.uploads), host_prefix)),
        );
        registry.register(
            "image",
            Arc::new(ImageProcessor::new(
                Arc::clone(&ctx.uploads),
                Arc::clone(&ctx.router),
                host_prefix,
                &ctx.config.image.variations,
            )),
        );
        registry.register(
            "relation",
            Arc::new(RelationProcessor::new(
                Arc::clone(&ctx.router),
                Arc::clone(&ctx.lookup),
            )),
        );
        registry.register(
            "relationlist",
            Arc::new(RelationListProcessor::new(
                Arc::clone(&ctx.router),
                Arc::clone(&ctx.lookup),
            )),
        );
        debug!(
            processors_count = registry.processors.len(),
            "Field type processors registered"
        );
        registry
    }

    /// Register a processor, replacing any previous one for the same field type.
    pub fn register(&mut self, field_type: &str, processor: Arc<dyn FieldTypeProcessor>) {
        if self
            .processors
            .insert(field_type.to_string(), processor)
            .is_some()
        {
            warn!(field_type = %field_type, "Replaced field type processor");
        }
    }

    #[must_use]
    pub fn has_processor(&self, field_type: &str) -> bool {
        self.processors.contains_key(field_type)
    }

    #[must_use]
    pub fn processor(&self, field_type: &str) -> Option<&Arc<dyn FieldTypeProcessor>> {
        self.processors.get(field_type)
    }

    /// Field type identifiers with a processor, sorted.
    #[must_use]
    pub fn field_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.processors.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Run one processor operation; identity for field types without a processor.
    pub fn process(
        &self,
        field_type: &str,
        target: HashTarget,
        direction: Direction,
        hash: Value,
    ) -> Result<Value, ProcessorError> {
        match self.processors.get(field_type) {
            Some(processor) => {
                debug!(
                    field_type = %field_type,
                    target = ?target,
                    direction = ?direction,
                    "Processing field type hash"
                );
                apply(processor.as_ref(), target, direction, hash)
            }
            None => Ok(hash),
        }
    }
}
