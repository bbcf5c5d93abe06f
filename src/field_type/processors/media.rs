use super::binary::{add_url, decode_upload};
use crate::field_type::processor::{FieldTypeProcessor, ProcessorError};
use crate::field_type::uploads::UploadRegistry;
use crate::field_type::vocabulary::MEDIA_TYPE;
use serde_json::Value;
use std::sync::Arc;

/// `media`: player type setting, base64 uploads in, public URL out.
#[derive(Debug)]
pub struct MediaProcessor {
    uploads: Arc<UploadRegistry>,
    host_prefix: String,
}

impl MediaProcessor {
    #[must_use]
    pub fn new(uploads: Arc<UploadRegistry>, host_prefix: &str) -> Self {
        Self {
            uploads,
            host_prefix: host_prefix.to_string(),
        }
    }
}

impl FieldTypeProcessor for MediaProcessor {
    fn pre_process_value_hash(&self, hash: Value) -> Result<Value, ProcessorError> {
        decode_upload("media", &self.uploads, hash)
    }

    fn post_process_value_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        add_url(&self.host_prefix, &mut hash);
        Ok(hash)
    }

    fn pre_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        MEDIA_TYPE.to_internal(&mut hash);
        Ok(hash)
    }

    fn post_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        MEDIA_TYPE.to_token(&mut hash);
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_type_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let processor = MediaProcessor::new(Arc::new(UploadRegistry::new(dir.path(), "x_")), "");
        assert_eq!(
            processor
                .post_process_field_settings_hash(json!({"mediaType": "html5_video"}))
                .unwrap(),
            json!({"mediaType": "TYPE_HTML5_VIDEO"})
        );
        assert_eq!(
            processor
                .pre_process_field_settings_hash(json!({"mediaType": "TYPE_WINDOWSMEDIA"}))
                .unwrap(),
            json!({"mediaType": "windows_media_player"})
        );
    }
}
