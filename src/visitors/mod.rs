//! # Visitors Module
//!
//! One [`ValueObjectVisitor`](crate::dispatcher::ValueObjectVisitor) per value kind. Each visitor emits a single top-level element
//! with a fixed name and media type, links related resources through the router and sets
//! `Content-Type` (plus `Accept-Patch` for resources clients may update).
//!
//! Kinds that share a body are served by one visitor through kind resolution: drafts
//! resolve to the role and policy visitors, which tell the two apart by the value they
//! receive.

mod content;
mod content_type;
mod exception;
mod links;
mod location;
mod root;
mod status;
mod user;

pub use content::{
    ContentVisitor, RelationListVisitor, RelationVisitor, VersionListVisitor, VersionVisitor,
};
pub use content_type::{
    ContentTypeGroupVisitor, ContentTypeListVisitor, ContentTypeVisitor,
    FieldDefinitionListVisitor, FieldDefinitionVisitor,
};
pub use exception::{exception_status, ExceptionVisitor};
pub use links::self_href;
pub use location::{LocationListVisitor, LocationVisitor, SectionListVisitor, SectionVisitor};
pub use root::RootVisitor;
pub use status::{
    CachedVisitor, ConflictVisitor, CreatedVisitor, DeletedSessionVisitor, NoContentVisitor,
    OptionsVisitor, RedirectVisitor, ResourceRedirectVisitor,
};
pub use user::{
    PolicyListVisitor, PolicyVisitor, RoleAssignmentListVisitor, RoleAssignmentVisitor,
    RoleListVisitor, RoleVisitor, UserGroupRefListVisitor, UserGroupVisitor, UserListVisitor,
    UserVisitor,
};

use crate::dispatcher::{DispatchError, DispatcherBuilder, RenderError};
use crate::values::{DomainValue, ExceptionKind, ValueKind};
use std::sync::Arc;

/// Register the built-in visitor for every kind that has no more general visitor to
/// fall back on.
pub fn register_all(builder: &mut DispatcherBuilder) -> Result<(), DispatchError> {
    builder
        .register(ValueKind::Root, Arc::new(RootVisitor))?
        .register(ValueKind::Content, Arc::new(ContentVisitor))?
        .register(ValueKind::Version, Arc::new(VersionVisitor))?
        .register(ValueKind::VersionList, Arc::new(VersionListVisitor))?
        .register(ValueKind::Relation, Arc::new(RelationVisitor))?
        .register(ValueKind::RelationList, Arc::new(RelationListVisitor))?
        .register(ValueKind::Location, Arc::new(LocationVisitor))?
        .register(ValueKind::LocationList, Arc::new(LocationListVisitor))?
        .register(ValueKind::Section, Arc::new(SectionVisitor))?
        .register(ValueKind::SectionList, Arc::new(SectionListVisitor))?
        .register(ValueKind::ContentType, Arc::new(ContentTypeVisitor))?
        .register(ValueKind::ContentTypeList, Arc::new(ContentTypeListVisitor))?
        .register(ValueKind::ContentTypeGroup, Arc::new(ContentTypeGroupVisitor))?
        .register(ValueKind::FieldDefinition, Arc::new(FieldDefinitionVisitor))?
        .register(
            ValueKind::FieldDefinitionList,
            Arc::new(FieldDefinitionListVisitor),
        )?
        .register(ValueKind::Role, Arc::new(RoleVisitor))?
        .register(ValueKind::RoleList, Arc::new(RoleListVisitor))?
        .register(ValueKind::Policy, Arc::new(PolicyVisitor))?
        .register(ValueKind::PolicyList, Arc::new(PolicyListVisitor))?
        .register(ValueKind::RoleAssignment, Arc::new(RoleAssignmentVisitor))?
        .register(
            ValueKind::RoleAssignmentList,
            Arc::new(RoleAssignmentListVisitor),
        )?
        .register(ValueKind::User, Arc::new(UserVisitor))?
        .register(ValueKind::UserList, Arc::new(UserListVisitor))?
        .register(ValueKind::UserGroup, Arc::new(UserGroupVisitor))?
        .register(ValueKind::UserGroupRefList, Arc::new(UserGroupRefListVisitor))?
        .register(ValueKind::Options, Arc::new(OptionsVisitor))?
        .register(ValueKind::Created, Arc::new(CreatedVisitor))?
        .register(ValueKind::NoContent, Arc::new(NoContentVisitor))?
        .register(ValueKind::DeletedSession, Arc::new(DeletedSessionVisitor))?
        .register(ValueKind::Conflict, Arc::new(ConflictVisitor))?
        .register(
            ValueKind::TemporaryRedirect,
            Arc::new(RedirectVisitor::new(307)),
        )?
        .register(
            ValueKind::PermanentRedirect,
            Arc::new(RedirectVisitor::new(301)),
        )?
        .register(ValueKind::SeeOther, Arc::new(RedirectVisitor::new(303)))?
        .register(ValueKind::ResourceRedirect, Arc::new(ResourceRedirectVisitor))?
        .register(ValueKind::Cached, Arc::new(CachedVisitor))?;

    for kind in ExceptionKind::ALL {
        builder.register(
            ValueKind::Exception(kind),
            Arc::new(ExceptionVisitor::for_kind(kind)),
        )?;
    }
    Ok(())
}

/// The error a visitor returns when handed a value it does not render.
pub(crate) fn unexpected(visitor: &'static str, value: &DomainValue) -> RenderError {
    DispatchError::UnexpectedValue {
        visitor,
        kind: value.kind(),
    }
    .into()
}
