use super::binary::{add_url, decode_upload};
use crate::field_type::processor::{FieldTypeProcessor, ProcessorError};
use crate::field_type::uploads::UploadRegistry;
use crate::route_table::names;
use crate::router::Router;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// `image`: base64 uploads in; public URL and variation links out.
///
/// When the value carries an `imageId`, the output gains
/// `"variations": {"<identifier>": {"href": "..."}}` for every configured variation.
#[derive(Debug)]
pub struct ImageProcessor {
    uploads: Arc<UploadRegistry>,
    router: Arc<Router>,
    host_prefix: String,
    variations: Vec<String>,
}

impl ImageProcessor {
    #[must_use]
    pub fn new(
        uploads: Arc<UploadRegistry>,
        router: Arc<Router>,
        host_prefix: &str,
        variations: &[String],
    ) -> Self {
        Self {
            uploads,
            router,
            host_prefix: host_prefix.to_string(),
            variations: variations.to_vec(),
        }
    }
}

impl FieldTypeProcessor for ImageProcessor {
    fn pre_process_value_hash(&self, hash: Value) -> Result<Value, ProcessorError> {
        decode_upload("image", &self.uploads, hash)
    }

    fn post_process_value_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        add_url(&self.host_prefix, &mut hash);

        let Some(map) = hash.as_object_mut() else {
            return Ok(hash);
        };
        let image_id = match map.get("imageId") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Ok(hash),
        };

        let mut variations = Map::new();
        for identifier in &self.variations {
            let href = self.router.generate(
                names::LOAD_IMAGE_VARIATION,
                &[
                    ("imageId", image_id.clone()),
                    ("variationIdentifier", identifier.clone()),
                ],
            )?;
            variations.insert(identifier.clone(), json!({ "href": href }));
        }
        map.insert("variations".to_string(), Value::Object(variations));
        Ok(hash)
    }
}
