use super::processor::{Direction, HashTarget};
use super::registry::FieldTypeProcessorRegistry;
use crate::dispatcher::RenderError;
use crate::generator::Generator;
use serde_json::Value;
use std::sync::Arc;

/// Writes field hashes into the Output Document after post-processing them.
pub struct FieldTypeSerializer {
    registry: Arc<FieldTypeProcessorRegistry>,
}

impl FieldTypeSerializer {
    #[must_use]
    pub fn new(registry: Arc<FieldTypeProcessorRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &FieldTypeProcessorRegistry {
        &self.registry
    }

    /// `fieldValue` of a content field.
    pub fn serialize_field_value(
        &self,
        generator: &mut Generator,
        field_type: &str,
        value: &Value,
    ) -> Result<(), RenderError> {
        self.write(generator, "fieldValue", field_type, HashTarget::Value, value)
    }

    /// `defaultValue` of a field definition; processed like a field value.
    pub fn serialize_field_default_value(
        &self,
        generator: &mut Generator,
        field_type: &str,
        value: &Value,
    ) -> Result<(), RenderError> {
        self.write(generator, "defaultValue", field_type, HashTarget::Value, value)
    }

    pub fn serialize_field_settings(
        &self,
        generator: &mut Generator,
        field_type: &str,
        settings: &Value,
    ) -> Result<(), RenderError> {
        self.write(
            generator,
            "fieldSettings",
            field_type,
            HashTarget::FieldSettings,
            settings,
        )
    }

    pub fn serialize_validator_configuration(
        &self,
        generator: &mut Generator,
        field_type: &str,
        configuration: &Value,
    ) -> Result<(), RenderError> {
        self.write(
            generator,
            "validatorConfiguration",
            field_type,
            HashTarget::ValidatorConfiguration,
            configuration,
        )
    }

    fn write(
        &self,
        generator: &mut Generator,
        element: &str,
        field_type: &str,
        target: HashTarget,
        hash: &Value,
    ) -> Result<(), RenderError> {
        let processed = self
            .registry
            .process(field_type, target, Direction::Out, hash.clone())?;
        generator.field_type_hash(element, &processed)?;
        Ok(())
    }
}
