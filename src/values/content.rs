//! Content, versions, fields and relations.

use super::location::Location;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Metadata of a content object, independent of any version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentInfo {
    pub id: u64,
    pub content_type_id: u64,
    pub name: String,
    pub section_id: u64,
    pub current_version_no: u32,
    pub published: bool,
    pub owner_id: u64,
    pub modification_date: String,
    pub published_date: String,
    pub always_available: bool,
    pub remote_id: String,
    pub main_language_code: String,
    pub main_location_id: Option<u64>,
}

/// A content object as returned by the REST layer.
///
/// `current_version` is only populated when the caller asked for the version to be
/// embedded; the rendered document always links to it either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RestContent {
    pub content_info: ContentInfo,
    pub main_location: Option<Location>,
    pub current_version: Option<Version>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl VersionStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Draft => "DRAFT",
            VersionStatus::Published => "PUBLISHED",
            VersionStatus::Archived => "ARCHIVED",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionInfo {
    pub id: u64,
    pub content_id: u64,
    pub version_no: u32,
    pub status: VersionStatus,
    pub modification_date: String,
    pub creation_date: String,
    pub creator_id: u64,
    pub initial_language_code: String,
    pub language_codes: Vec<String>,
    /// Language code → translated version name
    pub names: BTreeMap<String, String>,
}

/// One field value of a version, in the field type's internal representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
    pub id: u64,
    pub field_definition_identifier: String,
    pub field_type_identifier: String,
    pub language_code: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Version {
    pub version_info: VersionInfo,
    pub fields: Vec<Field>,
    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionList {
    pub content_id: u64,
    pub versions: Vec<VersionInfo>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    #[default]
    Common,
    Embed,
    Link,
    /// Relation created by a relation field
    Attribute,
}

impl RelationType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Common => "COMMON",
            RelationType::Embed => "EMBED",
            RelationType::Link => "LINK",
            RelationType::Attribute => "ATTRIBUTE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Relation {
    pub id: u64,
    pub source_content_id: u64,
    pub source_version_no: u32,
    pub destination_content_id: u64,
    pub relation_type: RelationType,
    pub source_field_definition_identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationList {
    pub content_id: u64,
    pub version_no: u32,
    pub relations: Vec<Relation>,
}
