//! # Values Module
//!
//! Every value object the output layer knows how to render, as one closed sum type.
//!
//! Controllers hand a [`DomainValue`] to the dispatcher; the dispatcher resolves a visitor
//! from the value's [`ValueKind`]. Kinds form a small specialisation hierarchy through
//! [`ValueKind::parent`] (a role draft is a role, a content field validation error is a bad
//! request, every exception is ultimately a generic one) so the most specific registered
//! visitor is chosen.
//!
//! Values deserialise from JSON with a `type` tag, which is how the command line and the
//! test fixtures build them:
//!
//! ```rust
//! use rest_visitors::values::{DomainValue, ValueKind};
//!
//! let value: DomainValue =
//!     serde_json::from_str(r#"{"type": "Section", "id": 1, "identifier": "standard"}"#).unwrap();
//! assert_eq!(value.kind(), ValueKind::Section);
//! ```

mod content;
mod content_type;
mod location;
mod response;
mod user;

pub use content::{
    ContentInfo, Field, Relation, RelationList, RelationType, RestContent, Version, VersionInfo,
    VersionList, VersionStatus,
};
pub use content_type::{
    ContentType, ContentTypeGroup, ContentTypeList, FieldDefinition, FieldDefinitionList,
};
pub use location::{Location, LocationList, Section, SectionList};
pub use response::{CachedValue, ExceptionKind, Options, RestException};
pub use user::{
    Limitation, Policy, PolicyList, Role, RoleAssignment, RoleAssignmentList, RoleList, User,
    UserGroup, UserGroupRefList, UserList,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value object handed to the output layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainValue {
    Root,
    Content(RestContent),
    Version(Version),
    VersionList(VersionList),
    Location(Location),
    LocationList(LocationList),
    Section(Section),
    SectionList(SectionList),
    ContentType(ContentType),
    ContentTypeList(ContentTypeList),
    ContentTypeGroup(ContentTypeGroup),
    FieldDefinition(FieldDefinition),
    FieldDefinitionList(FieldDefinitionList),
    Role(Role),
    RoleDraft(Role),
    RoleList(RoleList),
    Policy(Policy),
    PolicyDraft(Policy),
    PolicyList(PolicyList),
    RoleAssignment(RoleAssignment),
    RoleAssignmentList(RoleAssignmentList),
    User(User),
    UserList(UserList),
    UserGroup(UserGroup),
    UserGroupRefList(UserGroupRefList),
    Relation(Relation),
    RelationList(RelationList),
    Options(Options),
    /// A newly created resource; rendered as the inner value with status 201.
    Created {
        value: Box<DomainValue>,
    },
    NoContent,
    DeletedSession,
    Conflict,
    TemporaryRedirect {
        uri: String,
    },
    PermanentRedirect {
        uri: String,
    },
    SeeOther {
        uri: String,
    },
    /// Temporary redirect to a named route.
    ResourceRedirect {
        route: String,
        #[serde(default)]
        params: BTreeMap<String, String>,
    },
    Cached(CachedValue),
    Exception(RestException),
}

impl DomainValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            DomainValue::Root => ValueKind::Root,
            DomainValue::Content(_) => ValueKind::Content,
            DomainValue::Version(_) => ValueKind::Version,
            DomainValue::VersionList(_) => ValueKind::VersionList,
            DomainValue::Location(_) => ValueKind::Location,
            DomainValue::LocationList(_) => ValueKind::LocationList,
            DomainValue::Section(_) => ValueKind::Section,
            DomainValue::SectionList(_) => ValueKind::SectionList,
            DomainValue::ContentType(_) => ValueKind::ContentType,
            DomainValue::ContentTypeList(_) => ValueKind::ContentTypeList,
            DomainValue::ContentTypeGroup(_) => ValueKind::ContentTypeGroup,
            DomainValue::FieldDefinition(_) => ValueKind::FieldDefinition,
            DomainValue::FieldDefinitionList(_) => ValueKind::FieldDefinitionList,
            DomainValue::Role(_) => ValueKind::Role,
            DomainValue::RoleDraft(_) => ValueKind::RoleDraft,
            DomainValue::RoleList(_) => ValueKind::RoleList,
            DomainValue::Policy(_) => ValueKind::Policy,
            DomainValue::PolicyDraft(_) => ValueKind::PolicyDraft,
            DomainValue::PolicyList(_) => ValueKind::PolicyList,
            DomainValue::RoleAssignment(_) => ValueKind::RoleAssignment,
            DomainValue::RoleAssignmentList(_) => ValueKind::RoleAssignmentList,
            DomainValue::User(_) => ValueKind::User,
            DomainValue::UserList(_) => ValueKind::UserList,
            DomainValue::UserGroup(_) => ValueKind::UserGroup,
            DomainValue::UserGroupRefList(_) => ValueKind::UserGroupRefList,
            DomainValue::Relation(_) => ValueKind::Relation,
            DomainValue::RelationList(_) => ValueKind::RelationList,
            DomainValue::Options(_) => ValueKind::Options,
            DomainValue::Created { .. } => ValueKind::Created,
            DomainValue::NoContent => ValueKind::NoContent,
            DomainValue::DeletedSession => ValueKind::DeletedSession,
            DomainValue::Conflict => ValueKind::Conflict,
            DomainValue::TemporaryRedirect { .. } => ValueKind::TemporaryRedirect,
            DomainValue::PermanentRedirect { .. } => ValueKind::PermanentRedirect,
            DomainValue::SeeOther { .. } => ValueKind::SeeOther,
            DomainValue::ResourceRedirect { .. } => ValueKind::ResourceRedirect,
            DomainValue::Cached(_) => ValueKind::Cached,
            DomainValue::Exception(e) => ValueKind::Exception(e.kind),
        }
    }
}

/// Runtime type of a [`DomainValue`], the key visitors are registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Root,
    Content,
    Version,
    VersionList,
    Location,
    LocationList,
    Section,
    SectionList,
    ContentType,
    ContentTypeList,
    ContentTypeGroup,
    FieldDefinition,
    FieldDefinitionList,
    Role,
    RoleDraft,
    RoleList,
    Policy,
    PolicyDraft,
    PolicyList,
    RoleAssignment,
    RoleAssignmentList,
    User,
    UserList,
    UserGroup,
    UserGroupRefList,
    Relation,
    RelationList,
    Options,
    Created,
    NoContent,
    DeletedSession,
    Conflict,
    TemporaryRedirect,
    PermanentRedirect,
    SeeOther,
    ResourceRedirect,
    Cached,
    Exception(ExceptionKind),
}

impl ValueKind {
    /// Every kind a complete dispatcher must be able to render.
    pub const ALL: [ValueKind; 46] = [
        ValueKind::Root,
        ValueKind::Content,
        ValueKind::Version,
        ValueKind::VersionList,
        ValueKind::Location,
        ValueKind::LocationList,
        ValueKind::Section,
        ValueKind::SectionList,
        ValueKind::ContentType,
        ValueKind::ContentTypeList,
        ValueKind::ContentTypeGroup,
        ValueKind::FieldDefinition,
        ValueKind::FieldDefinitionList,
        ValueKind::Role,
        ValueKind::RoleDraft,
        ValueKind::RoleList,
        ValueKind::Policy,
        ValueKind::PolicyDraft,
        ValueKind::PolicyList,
        ValueKind::RoleAssignment,
        ValueKind::RoleAssignmentList,
        ValueKind::User,
        ValueKind::UserList,
        ValueKind::UserGroup,
        ValueKind::UserGroupRefList,
        ValueKind::Relation,
        ValueKind::RelationList,
        ValueKind::Options,
        ValueKind::Created,
        ValueKind::NoContent,
        ValueKind::DeletedSession,
        ValueKind::Conflict,
        ValueKind::TemporaryRedirect,
        ValueKind::PermanentRedirect,
        ValueKind::SeeOther,
        ValueKind::ResourceRedirect,
        ValueKind::Cached,
        ValueKind::Exception(ExceptionKind::BadRequest),
        ValueKind::Exception(ExceptionKind::ContentFieldValidation),
        ValueKind::Exception(ExceptionKind::Unauthorized),
        ValueKind::Exception(ExceptionKind::Forbidden),
        ValueKind::Exception(ExceptionKind::NotFound),
        ValueKind::Exception(ExceptionKind::InvalidArgument),
        ValueKind::Exception(ExceptionKind::BadState),
        ValueKind::Exception(ExceptionKind::Generic),
        ValueKind::Exception(ExceptionKind::NotImplemented),
    ];

    /// The more general kind whose visitor handles this kind when none is registered
    /// for it directly.
    #[must_use]
    pub fn parent(&self) -> Option<ValueKind> {
        match self {
            ValueKind::RoleDraft => Some(ValueKind::Role),
            ValueKind::PolicyDraft => Some(ValueKind::Policy),
            ValueKind::Exception(kind) => kind.parent().map(ValueKind::Exception),
            _ => None,
        }
    }

    /// This kind followed by its ancestors, most specific first.
    pub fn lineage(self) -> impl Iterator<Item = ValueKind> {
        std::iter::successors(Some(self), ValueKind::parent)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Exception(kind) => write!(f, "Exception({kind})"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineage_is_most_specific_first() {
        let chain: Vec<_> = ValueKind::Exception(ExceptionKind::ContentFieldValidation)
            .lineage()
            .collect();
        assert_eq!(
            chain,
            vec![
                ValueKind::Exception(ExceptionKind::ContentFieldValidation),
                ValueKind::Exception(ExceptionKind::BadRequest),
                ValueKind::Exception(ExceptionKind::Generic),
            ]
        );
        assert_eq!(
            ValueKind::PolicyDraft.lineage().collect::<Vec<_>>(),
            vec![ValueKind::PolicyDraft, ValueKind::Policy]
        );
        assert_eq!(ValueKind::Section.lineage().count(), 1);
    }

    #[test]
    fn test_all_kinds_are_distinct() {
        let unique: std::collections::HashSet<_> = ValueKind::ALL.iter().collect();
        assert_eq!(unique.len(), ValueKind::ALL.len());
    }

    #[test]
    fn test_tagged_json() {
        let value: DomainValue = serde_json::from_str(
            r#"{"type": "Created", "value": {"type": "Section", "id": 3, "identifier": "media", "name": "Media"}}"#,
        )
        .unwrap();
        assert_eq!(value.kind(), ValueKind::Created);

        let value: DomainValue = serde_json::from_str(
            r#"{"type": "Exception", "kind": "NotFound", "message": "no such content"}"#,
        )
        .unwrap();
        assert_eq!(value.kind(), ValueKind::Exception(ExceptionKind::NotFound));

        let value: DomainValue = serde_json::from_str(r#"{"type": "NoContent"}"#).unwrap();
        assert_eq!(value, DomainValue::NoContent);
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueKind::Content.to_string(), "Content");
        assert_eq!(
            ValueKind::Exception(ExceptionKind::NotFound).to_string(),
            "Exception(NotFound)"
        );
    }
}
