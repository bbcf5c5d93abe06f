//! Content types, their groups and field definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentType {
    pub id: u64,
    pub identifier: String,
    pub names: BTreeMap<String, String>,
    pub descriptions: BTreeMap<String, String>,
    pub creation_date: String,
    pub modification_date: String,
    pub creator_id: u64,
    pub modifier_id: u64,
    pub remote_id: String,
    pub url_alias_schema: String,
    pub name_schema: String,
    pub is_container: bool,
    pub main_language_code: String,
    pub default_always_available: bool,
    pub default_sort_field: String,
    pub default_sort_order: String,
    pub group_ids: Vec<u64>,
    pub field_definitions: Vec<FieldDefinition>,
}

/// Definition of one field of a content type.
///
/// `default_value`, `field_settings` and `validator_configuration` are kept in the field
/// type's internal representation and converted by the field type processors on output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: u64,
    pub content_type_id: u64,
    pub identifier: String,
    pub field_type_identifier: String,
    pub field_group: String,
    pub position: u32,
    pub is_translatable: bool,
    pub is_required: bool,
    pub is_info_collector: bool,
    pub is_searchable: bool,
    pub names: BTreeMap<String, String>,
    pub descriptions: BTreeMap<String, String>,
    pub default_value: Value,
    pub field_settings: Value,
    pub validator_configuration: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDefinitionList {
    pub content_type_id: u64,
    pub field_definitions: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentTypeGroup {
    pub id: u64,
    pub identifier: String,
    pub creation_date: String,
    pub modification_date: String,
    pub creator_id: u64,
    pub modifier_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentTypeList {
    pub path: String,
    pub content_types: Vec<ContentType>,
}
