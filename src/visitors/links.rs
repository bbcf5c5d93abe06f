//! Shared element helpers: reference stubs, multilingual hashes and canonical links.

use crate::dispatcher::{RenderError, Visit};
use crate::generator::Generator;
use crate::route_table::names;
use crate::router::Router;
use crate::values::{DomainValue, Limitation, VersionInfo};
use std::collections::BTreeMap;

/// `<name media-type="..." href="..."/>`
pub(crate) fn ref_element(
    visit: &mut Visit<'_>,
    name: &str,
    media_type_name: &str,
    href: String,
) -> Result<(), RenderError> {
    let generator = visit.generator();
    generator.start_object_element(name, Some(media_type_name))?;
    generator.attribute("href", href)?;
    generator.end_object_element(name)?;
    Ok(())
}

/// Reference stub whose href comes from a named route.
pub(crate) fn route_ref(
    visit: &mut Visit<'_>,
    name: &str,
    media_type_name: &str,
    route: &str,
    params: &[(&str, String)],
) -> Result<(), RenderError> {
    let href = visit.href(route, params)?;
    ref_element(visit, name, media_type_name, href)
}

/// Open the top-level element of a resource and give it its `href`.
pub(crate) fn start_resource(
    visit: &mut Visit<'_>,
    name: &str,
    media_type_name: &str,
    href: String,
) -> Result<(), RenderError> {
    let generator = visit.generator();
    generator.start_object_element(name, Some(media_type_name))?;
    generator.attribute("href", href)?;
    Ok(())
}

/// A list's own `path` when the value carries one, the collection route otherwise.
pub(crate) fn list_href(
    visit: &Visit<'_>,
    path: &str,
    route: &str,
    params: &[(&str, String)],
) -> Result<String, RenderError> {
    if path.is_empty() {
        visit.href(route, params)
    } else {
        Ok(path.to_string())
    }
}

/// `{name: {value: [{languageCode, #text}]}}`
pub(crate) fn multilingual(
    generator: &mut Generator,
    name: &str,
    values: &BTreeMap<String, String>,
) -> Result<(), RenderError> {
    generator.start_hash_element(name)?;
    generator.start_list("value")?;
    for (language_code, text) in values {
        generator.start_value_element("value", text.as_str())?;
        generator.attribute("languageCode", language_code.as_str())?;
        generator.end_value_element("value")?;
    }
    generator.end_list("value")?;
    generator.end_hash_element(name)?;
    Ok(())
}

pub(crate) fn limitation(
    generator: &mut Generator,
    limitation: &Limitation,
) -> Result<(), RenderError> {
    generator.start_hash_element("limitation")?;
    generator.attribute("identifier", limitation.identifier.as_str())?;
    generator.start_hash_element("values")?;
    generator.start_list("ref")?;
    for value in &limitation.values {
        generator.start_hash_element("ref")?;
        generator.attribute("href", value.as_str())?;
        generator.end_hash_element("ref")?;
    }
    generator.end_list("ref")?;
    generator.end_hash_element("values")?;
    generator.end_hash_element("limitation")?;
    Ok(())
}

/// The `VersionInfo` hash shared by versions and version lists.
pub(crate) fn version_info(visit: &mut Visit<'_>, info: &VersionInfo) -> Result<(), RenderError> {
    let creator = visit.href(names::LOAD_USER, &[("userId", info.creator_id.to_string())])?;
    let content = visit.href(
        names::LOAD_CONTENT,
        &[("contentId", info.content_id.to_string())],
    )?;

    let generator = visit.generator();
    generator.start_hash_element("VersionInfo")?;
    generator.value_element("id", info.id)?;
    generator.value_element("versionNo", info.version_no)?;
    generator.value_element("status", info.status.as_str())?;
    generator.value_element("modificationDate", info.modification_date.as_str())?;
    generator.value_element("creationDate", info.creation_date.as_str())?;
    generator.value_element("initialLanguageCode", info.initial_language_code.as_str())?;
    generator.value_element("languageCodes", info.language_codes.join(","))?;
    multilingual(generator, "names", &info.names)?;

    ref_element(visit, "Creator", "User", creator)?;
    ref_element(visit, "Content", "ContentInfo", content)?;
    visit.generator().end_hash_element("VersionInfo")?;
    Ok(())
}

/// Canonical href of a resource value, used for `Location` headers.
///
/// `None` for values that are not addressable resources.
pub fn self_href(router: &Router, value: &DomainValue) -> Result<Option<String>, RenderError> {
    let (route, params): (&str, Vec<(&str, String)>) = match value {
        DomainValue::Root => (names::LOAD_ROOT, vec![]),
        DomainValue::Content(content) => (
            names::LOAD_CONTENT,
            vec![("contentId", content.content_info.id.to_string())],
        ),
        DomainValue::Version(version) => (
            names::LOAD_CONTENT_IN_VERSION,
            vec![
                ("contentId", version.version_info.content_id.to_string()),
                ("versionNumber", version.version_info.version_no.to_string()),
            ],
        ),
        DomainValue::Location(location) => (
            names::LOAD_LOCATION,
            vec![("locationPath", location.path_param())],
        ),
        DomainValue::Section(section) => (
            names::LOAD_SECTION,
            vec![("sectionId", section.id.to_string())],
        ),
        DomainValue::ContentType(content_type) => (
            names::LOAD_CONTENT_TYPE,
            vec![("contentTypeId", content_type.id.to_string())],
        ),
        DomainValue::ContentTypeGroup(group) => (
            names::LOAD_CONTENT_TYPE_GROUP,
            vec![("contentTypeGroupId", group.id.to_string())],
        ),
        DomainValue::FieldDefinition(definition) => (
            names::LOAD_CONTENT_TYPE_FIELD_DEFINITION,
            vec![
                ("contentTypeId", definition.content_type_id.to_string()),
                ("fieldDefinitionId", definition.id.to_string()),
            ],
        ),
        DomainValue::Role(role) => (names::LOAD_ROLE, vec![("roleId", role.id.to_string())]),
        DomainValue::RoleDraft(role) => (
            names::LOAD_ROLE_DRAFT,
            vec![("roleId", role.id.to_string())],
        ),
        DomainValue::Policy(policy) | DomainValue::PolicyDraft(policy) => (
            names::LOAD_POLICY,
            vec![
                ("roleId", policy.role_id.to_string()),
                ("policyId", policy.id.to_string()),
            ],
        ),
        DomainValue::RoleAssignment(assignment) => (
            names::LOAD_ROLE_ASSIGNMENT_FOR_USER,
            vec![
                ("userId", assignment.user_id.to_string()),
                ("roleId", assignment.role.id.to_string()),
            ],
        ),
        DomainValue::User(user) => (names::LOAD_USER, vec![("userId", user.id.to_string())]),
        DomainValue::UserGroup(group) => (
            names::LOAD_USER_GROUP,
            vec![("groupPath", group.main_location.path_param())],
        ),
        DomainValue::Relation(relation) => (
            names::LOAD_VERSION_RELATION,
            vec![
                ("contentId", relation.source_content_id.to_string()),
                ("versionNumber", relation.source_version_no.to_string()),
                ("relationId", relation.id.to_string()),
            ],
        ),
        DomainValue::Cached(cached) => return self_href(router, &cached.value),
        _ => return Ok(None),
    };
    Ok(Some(router.generate(route, &params)?))
}
