#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    // Global counter for unique temporary file names across parallel tests
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Creates a temporary file with a unique name
    pub fn create_temp_file(content: &str, ext: &str) -> PathBuf {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let path = std::env::temp_dir().join(format!(
            "restv_test_{}_{}_{}.{}",
            std::process::id(),
            counter,
            nanos,
            ext
        ));

        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn create_temp_yaml(content: &str) -> PathBuf {
        create_temp_file(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> PathBuf {
        create_temp_file(content, "json")
    }

    /// Cleanup temporary files (best effort)
    pub fn cleanup_temp_files(paths: &[PathBuf]) {
        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Value objects shared by the integration tests.
pub mod fixtures {
    use rest_visitors::values::{
        ContentInfo, ExceptionKind, Field, Location, Relation, RelationType, RestContent,
        RestException, Section, Version, VersionInfo, VersionStatus,
    };
    use serde_json::json;
    use std::collections::BTreeMap;

    pub fn section(id: u64) -> Section {
        Section {
            id,
            identifier: format!("section_{id}"),
            name: format!("Section {id}"),
        }
    }

    pub fn location(id: u64, path_string: &str, content_id: u64) -> Location {
        Location {
            id,
            priority: 0,
            hidden: false,
            invisible: false,
            parent_location_id: None,
            path_string: path_string.to_string(),
            depth: path_string.trim_matches('/').split('/').count() as u32 - 1,
            content_id,
            remote_id: format!("location-{id}"),
            sort_field: "PATH".to_string(),
            sort_order: "ASC".to_string(),
            children_count: Some(0),
        }
    }

    pub fn content_info(id: u64) -> ContentInfo {
        ContentInfo {
            id,
            content_type_id: 1,
            name: format!("Content {id}"),
            section_id: 1,
            current_version_no: 2,
            published: true,
            owner_id: 14,
            modification_date: "2024-03-01T10:00:00+00:00".to_string(),
            published_date: "2024-02-01T10:00:00+00:00".to_string(),
            always_available: true,
            remote_id: format!("remote-{id}"),
            main_language_code: "eng-GB".to_string(),
            main_location_id: Some(60 + id),
        }
    }

    /// Version 2 of `content_id` with a text field and a relation field.
    pub fn version(content_id: u64, related_content_id: u64) -> Version {
        let mut names = BTreeMap::new();
        names.insert("eng-GB".to_string(), format!("Content {content_id}"));
        Version {
            version_info: VersionInfo {
                id: 500 + content_id,
                content_id,
                version_no: 2,
                status: VersionStatus::Published,
                modification_date: "2024-03-01T10:00:00+00:00".to_string(),
                creation_date: "2024-02-28T09:00:00+00:00".to_string(),
                creator_id: 14,
                initial_language_code: "eng-GB".to_string(),
                language_codes: vec!["eng-GB".to_string()],
                names,
            },
            fields: vec![
                Field {
                    id: 1,
                    field_definition_identifier: "title".to_string(),
                    field_type_identifier: "string".to_string(),
                    language_code: "eng-GB".to_string(),
                    value: json!("Hello"),
                },
                Field {
                    id: 2,
                    field_definition_identifier: "related".to_string(),
                    field_type_identifier: "relation".to_string(),
                    language_code: "eng-GB".to_string(),
                    value: json!({"destinationContentId": related_content_id}),
                },
            ],
            relations: vec![Relation {
                id: 9,
                source_content_id: content_id,
                source_version_no: 2,
                destination_content_id: related_content_id,
                relation_type: RelationType::Attribute,
                source_field_definition_identifier: Some("related".to_string()),
            }],
        }
    }

    pub fn content(id: u64, current_version: Option<Version>) -> RestContent {
        RestContent {
            content_info: content_info(id),
            main_location: None,
            current_version,
        }
    }

    pub fn exception(kind: ExceptionKind, message: &str) -> RestException {
        RestException::new(kind, message)
    }
}

/// A fully assembled output layer whose uploads go to a private temp dir.
pub mod harness {
    use rest_visitors::config::ServiceConfig;
    use rest_visitors::dispatcher::RenderedResponse;
    use rest_visitors::layer::OutputLayer;
    use rest_visitors::lookup::{InMemoryLookup, RepositoryLookup};
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::TempDir;

    pub struct Harness {
        pub layer: OutputLayer,
        pub upload_dir: TempDir,
    }

    pub fn harness() -> Harness {
        harness_with(ServiceConfig::default(), InMemoryLookup::new())
    }

    pub fn debug_harness() -> Harness {
        let config = ServiceConfig {
            debug: true,
            ..ServiceConfig::default()
        };
        harness_with(config, InMemoryLookup::new())
    }

    pub fn harness_with(mut config: ServiceConfig, lookup: InMemoryLookup) -> Harness {
        let upload_dir = tempfile::tempdir().unwrap();
        config.uploads.temp_dir = Some(upload_dir.path().to_path_buf());
        let lookup: Arc<dyn RepositoryLookup> = Arc::new(lookup);
        let layer = OutputLayer::new(config, lookup).unwrap();
        Harness { layer, upload_dir }
    }

    /// Parse a JSON response body.
    pub fn json_body(response: &RenderedResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }
}
