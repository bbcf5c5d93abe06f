//! `binaryfile` processor and the upload/URL helpers shared with `media` and `image`.

use crate::field_type::processor::{FieldTypeProcessor, ProcessorError};
use crate::field_type::uploads::UploadRegistry;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use std::sync::Arc;

/// Decode a base64 `data` key into an upload file.
///
/// `data` is removed and `inputUri` points at the written file. Hashes without `data`
/// pass through unchanged.
pub(crate) fn decode_upload(
    field_type: &str,
    uploads: &UploadRegistry,
    mut hash: Value,
) -> Result<Value, ProcessorError> {
    let Some(map) = hash.as_object_mut() else {
        return Ok(hash);
    };
    let Some(data) = map.remove("data") else {
        return Ok(hash);
    };
    let encoded = data.as_str().ok_or_else(|| ProcessorError::InvalidHash {
        field_type: field_type.to_string(),
        reason: "data must be a base64 string".to_string(),
    })?;
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| ProcessorError::InvalidBase64 {
            field_type: field_type.to_string(),
            error: e.to_string(),
        })?;
    let path = uploads.store(&bytes)?;
    map.insert(
        "inputUri".to_string(),
        Value::String(path.to_string_lossy().into_owned()),
    );
    Ok(hash)
}

/// Public URL of a stored file: `host_prefix` joined to `uri` with exactly one `/`.
pub(crate) fn public_url(host_prefix: &str, uri: &str) -> String {
    if host_prefix.is_empty() {
        return uri.to_string();
    }
    format!(
        "{}/{}",
        host_prefix.trim_end_matches('/'),
        uri.trim_start_matches('/')
    )
}

/// Add `url` next to `uri` when the hash carries one.
pub(crate) fn add_url(host_prefix: &str, hash: &mut Value) {
    let Some(map) = hash.as_object_mut() else {
        return;
    };
    if let Some(uri) = map.get("uri").and_then(Value::as_str) {
        let url = public_url(host_prefix, uri);
        map.insert("url".to_string(), Value::String(url));
    }
}

/// `binaryfile`: base64 uploads in, public URL out.
#[derive(Debug)]
pub struct BinaryFileProcessor {
    uploads: Arc<UploadRegistry>,
    host_prefix: String,
}

impl BinaryFileProcessor {
    #[must_use]
    pub fn new(uploads: Arc<UploadRegistry>, host_prefix: &str) -> Self {
        Self {
            uploads,
            host_prefix: host_prefix.to_string(),
        }
    }
}

impl FieldTypeProcessor for BinaryFileProcessor {
    fn pre_process_value_hash(&self, hash: Value) -> Result<Value, ProcessorError> {
        decode_upload("binaryfile", &self.uploads, hash)
    }

    fn post_process_value_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        add_url(&self.host_prefix, &mut hash);
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_public_url() {
        assert_eq!(public_url("", "var/file.pdf"), "var/file.pdf");
        assert_eq!(public_url("https://cdn", "var/file.pdf"), "https://cdn/var/file.pdf");
        assert_eq!(public_url("https://cdn/", "/var/file.pdf"), "https://cdn/var/file.pdf");
    }

    #[test]
    fn test_upload_decoded_to_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = Arc::new(UploadRegistry::new(dir.path(), "restv_upload_"));
        let processor = BinaryFileProcessor::new(Arc::clone(&uploads), "");

        let out = processor
            .pre_process_value_hash(json!({"fileName": "a.txt", "data": "aGVsbG8="}))
            .unwrap();
        assert!(out.get("data").is_none());
        let path = std::path::PathBuf::from(out["inputUri"].as_str().unwrap());
        assert!(path.starts_with(dir.path()));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        assert_eq!(out["fileName"], "a.txt");

        uploads.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_base64() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = Arc::new(UploadRegistry::new(dir.path(), "restv_upload_"));
        let processor = BinaryFileProcessor::new(Arc::clone(&uploads), "");
        let err = processor
            .pre_process_value_hash(json!({"data": "not base64!"}))
            .unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidBase64 { .. }));
        assert!(uploads.is_empty());
    }

    #[test]
    fn test_hash_without_data_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let processor =
            BinaryFileProcessor::new(Arc::new(UploadRegistry::new(dir.path(), "x_")), "");
        let hash = json!({"inputUri": "/tmp/existing"});
        assert_eq!(processor.pre_process_value_hash(hash.clone()).unwrap(), hash);
    }

    #[test]
    fn test_url_out() {
        let dir = tempfile::tempdir().unwrap();
        let processor = BinaryFileProcessor::new(
            Arc::new(UploadRegistry::new(dir.path(), "x_")),
            "http://static.example.com",
        );
        let out = processor
            .post_process_value_hash(json!({"uri": "var/storage/original/a.pdf"}))
            .unwrap();
        assert_eq!(out["url"], "http://static.example.com/var/storage/original/a.pdf");
        assert_eq!(processor.post_process_value_hash(json!(null)).unwrap(), json!(null));
    }
}
