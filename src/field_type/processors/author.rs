use crate::field_type::processor::{FieldTypeProcessor, ProcessorError};
use crate::field_type::vocabulary::AUTHOR_DEFAULT;
use serde_json::Value;

/// `author`: `defaultAuthor` setting.
///
/// An unknown stored value renders as `DEFAULT_VALUE_EMPTY`.
#[derive(Debug, Default)]
pub struct AuthorProcessor;

impl FieldTypeProcessor for AuthorProcessor {
    fn pre_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        AUTHOR_DEFAULT.to_internal(&mut hash);
        Ok(hash)
    }

    fn post_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        AUTHOR_DEFAULT.to_token(&mut hash);
        Ok(hash)
    }
}
