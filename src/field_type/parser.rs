use super::processor::{Direction, HashTarget, ProcessorError};
use super::registry::FieldTypeProcessorRegistry;
use serde_json::Value;
use std::sync::Arc;

/// Converts client-supplied field hashes to their internal shape.
pub struct FieldTypeParser {
    registry: Arc<FieldTypeProcessorRegistry>,
}

impl FieldTypeParser {
    #[must_use]
    pub fn new(registry: Arc<FieldTypeProcessorRegistry>) -> Self {
        Self { registry }
    }

    pub fn parse_value(&self, field_type: &str, hash: Value) -> Result<Value, ProcessorError> {
        self.registry
            .process(field_type, HashTarget::Value, Direction::In, hash)
    }

    pub fn parse_field_settings(
        &self,
        field_type: &str,
        hash: Value,
    ) -> Result<Value, ProcessorError> {
        self.registry
            .process(field_type, HashTarget::FieldSettings, Direction::In, hash)
    }

    pub fn parse_validator_configuration(
        &self,
        field_type: &str,
        hash: Value,
    ) -> Result<Value, ProcessorError> {
        self.registry.process(
            field_type,
            HashTarget::ValidatorConfiguration,
            Direction::In,
            hash,
        )
    }
}
