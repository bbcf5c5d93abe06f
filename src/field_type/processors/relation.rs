//! `relation` and `relationlist` processors.
//!
//! Stored ids become hrefs on output. A destination that no longer exists, or that the
//! current user may not read, yields an empty href instead of failing the response; any
//! other lookup failure propagates.

use crate::field_type::processor::{FieldTypeProcessor, ProcessorError};
use crate::field_type::vocabulary::{RELATION_LIST_SELECTION, RELATION_SELECTION};
use crate::lookup::RepositoryLookup;
use crate::route_table::names;
use crate::router::Router;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Generates links for related objects, degrading to `""` when the target is unreadable.
pub(crate) struct RelationLinker {
    router: Arc<Router>,
    lookup: Arc<dyn RepositoryLookup>,
}

impl RelationLinker {
    pub(crate) fn new(router: Arc<Router>, lookup: Arc<dyn RepositoryLookup>) -> Self {
        Self { router, lookup }
    }

    pub(crate) fn content_href(&self, id: u64) -> Result<String, ProcessorError> {
        match self.lookup.load_content_info(id) {
            Ok(info) => Ok(self
                .router
                .generate(names::LOAD_CONTENT, &[("contentId", info.id.to_string())])?),
            Err(e) if e.is_degradable() => {
                warn!(content_id = id, error = %e, "Relation target unavailable, link omitted");
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn location_href(&self, id: u64) -> Result<String, ProcessorError> {
        match self.lookup.load_location(id) {
            Ok(location) => Ok(self
                .router
                .generate(names::LOAD_LOCATION, &[("locationPath", location.path_param())])?),
            Err(e) if e.is_degradable() => {
                warn!(location_id = id, error = %e, "Location unavailable, link omitted");
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Read an id that may be stored as a number or a numeric string.
fn as_id(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

/// Set `href_key` from the id under `id_key`, if there is one.
fn link_single(
    hash: &mut Value,
    id_key: &str,
    href_key: &str,
    href: impl Fn(u64) -> Result<String, ProcessorError>,
) -> Result<(), ProcessorError> {
    let Some(map) = hash.as_object_mut() else {
        return Ok(());
    };
    if let Some(id) = map.get(id_key).and_then(as_id) {
        let link = href(id)?;
        map.insert(href_key.to_string(), Value::String(link));
    }
    Ok(())
}

pub struct RelationProcessor {
    linker: RelationLinker,
}

impl RelationProcessor {
    #[must_use]
    pub fn new(router: Arc<Router>, lookup: Arc<dyn RepositoryLookup>) -> Self {
        Self {
            linker: RelationLinker::new(router, lookup),
        }
    }
}

impl FieldTypeProcessor for RelationProcessor {
    fn post_process_value_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        link_single(&mut hash, "destinationContentId", "destinationContentHref", |id| {
            self.linker.content_href(id)
        })?;
        Ok(hash)
    }

    fn pre_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        RELATION_SELECTION.to_internal(&mut hash);
        Ok(hash)
    }

    fn post_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        RELATION_SELECTION.to_token(&mut hash);
        link_single(&mut hash, "selectionRoot", "selectionRootHref", |id| {
            self.linker.location_href(id)
        })?;
        Ok(hash)
    }
}

pub struct RelationListProcessor {
    linker: RelationLinker,
}

impl RelationListProcessor {
    #[must_use]
    pub fn new(router: Arc<Router>, lookup: Arc<dyn RepositoryLookup>) -> Self {
        Self {
            linker: RelationLinker::new(router, lookup),
        }
    }
}

impl FieldTypeProcessor for RelationListProcessor {
    fn post_process_value_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        let Some(map) = hash.as_object_mut() else {
            return Ok(hash);
        };
        let ids: Vec<u64> = match map.get("destinationContentIds") {
            Some(Value::Array(ids)) => ids.iter().filter_map(as_id).collect(),
            _ => return Ok(hash),
        };
        let hrefs = ids
            .into_iter()
            .map(|id| self.linker.content_href(id).map(Value::String))
            .collect::<Result<Vec<_>, _>>()?;
        map.insert("destinationContentHrefs".to_string(), Value::Array(hrefs));
        Ok(hash)
    }

    fn pre_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        RELATION_LIST_SELECTION.to_internal(&mut hash);
        Ok(hash)
    }

    fn post_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        RELATION_LIST_SELECTION.to_token(&mut hash);
        link_single(
            &mut hash,
            "selectionDefaultLocation",
            "selectionDefaultLocationHref",
            |id| self.linker.location_href(id),
        )?;
        Ok(hash)
    }
}
