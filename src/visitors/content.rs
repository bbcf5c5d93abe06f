use super::links::{route_ref, start_resource, version_info};
use super::unexpected;
use crate::dispatcher::{RenderError, ValueObjectVisitor, Visit};
use crate::route_table::names;
use crate::values::{DomainValue, RelationList};

/// Content object with its references. The current version is embedded only when loaded;
/// the `CurrentVersion` stub is always there.
pub struct ContentVisitor;

impl ValueObjectVisitor for ContentVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::Content(content) = value else {
            return Err(unexpected("ContentVisitor", value));
        };
        let info = &content.content_info;
        let content_id = ("contentId", info.id.to_string());
        let media_type_name = if content.current_version.is_some() {
            "Content"
        } else {
            "ContentInfo"
        };

        visit.set_content_type(media_type_name);
        visit.set_accept_patch("ContentUpdate");

        let href = visit.href(names::LOAD_CONTENT, &[content_id.clone()])?;
        start_resource(visit, "Content", media_type_name, href)?;
        let generator = visit.generator();
        generator.attribute("remoteId", info.remote_id.as_str())?;
        generator.attribute("id", info.id.to_string())?;

        route_ref(
            visit,
            "ContentType",
            "ContentType",
            names::LOAD_CONTENT_TYPE,
            &[("contentTypeId", info.content_type_id.to_string())],
        )?;
        visit.generator().value_element("Name", info.name.as_str())?;
        route_ref(
            visit,
            "Versions",
            "VersionList",
            names::LOAD_CONTENT_VERSIONS,
            &[content_id.clone()],
        )?;

        let current_version_href =
            visit.href(names::LOAD_CURRENT_VERSION, &[content_id.clone()])?;
        let generator = visit.generator();
        generator.start_object_element("CurrentVersion", Some("Version"))?;
        generator.attribute("href", current_version_href)?;
        if let Some(version) = &content.current_version {
            visit.dispatch(&DomainValue::Version(version.clone()))?;
        }
        visit.generator().end_object_element("CurrentVersion")?;

        route_ref(
            visit,
            "Section",
            "Section",
            names::LOAD_SECTION,
            &[("sectionId", info.section_id.to_string())],
        )?;
        let main_location_path = content
            .main_location
            .as_ref()
            .map(|location| location.path_param())
            .or_else(|| info.main_location_id.map(|id| id.to_string()));
        if let Some(path) = main_location_path {
            route_ref(
                visit,
                "MainLocation",
                "Location",
                names::LOAD_LOCATION,
                &[("locationPath", path)],
            )?;
        }
        route_ref(
            visit,
            "Locations",
            "LocationList",
            names::LOAD_LOCATIONS_FOR_CONTENT,
            &[content_id],
        )?;
        route_ref(
            visit,
            "Owner",
            "User",
            names::LOAD_USER,
            &[("userId", info.owner_id.to_string())],
        )?;

        let generator = visit.generator();
        generator.value_element("lastModificationDate", info.modification_date.as_str())?;
        if info.published {
            generator.value_element("publishedDate", info.published_date.as_str())?;
        }
        generator.value_element("mainLanguageCode", info.main_language_code.as_str())?;
        generator.value_element("currentVersionNo", info.current_version_no)?;
        generator.value_element("alwaysAvailable", info.always_available)?;
        generator.end_object_element("Content")?;
        Ok(())
    }
}

/// A version with its field values (through the field type processors) and relations.
pub struct VersionVisitor;

impl ValueObjectVisitor for VersionVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::Version(version) = value else {
            return Err(unexpected("VersionVisitor", value));
        };
        let info = &version.version_info;

        visit.set_content_type("Version");
        visit.set_accept_patch("VersionUpdate");

        let href = visit.href(
            names::LOAD_CONTENT_IN_VERSION,
            &[
                ("contentId", info.content_id.to_string()),
                ("versionNumber", info.version_no.to_string()),
            ],
        )?;
        start_resource(visit, "Version", "Version", href)?;
        version_info(visit, info)?;

        let fields = visit.fields();
        let generator = visit.generator();
        generator.start_hash_element("Fields")?;
        generator.start_list("field")?;
        for field in &version.fields {
            generator.start_hash_element("field")?;
            generator.value_element("id", field.id)?;
            generator.value_element(
                "fieldDefinitionIdentifier",
                field.field_definition_identifier.as_str(),
            )?;
            generator.value_element("languageCode", field.language_code.as_str())?;
            generator.value_element("fieldTypeIdentifier", field.field_type_identifier.as_str())?;
            fields.serialize_field_value(generator, &field.field_type_identifier, &field.value)?;
            generator.end_hash_element("field")?;
        }
        generator.end_list("field")?;
        generator.end_hash_element("Fields")?;

        visit.dispatch(&DomainValue::RelationList(RelationList {
            content_id: info.content_id,
            version_no: info.version_no,
            relations: version.relations.clone(),
        }))?;

        visit.generator().end_object_element("Version")?;
        Ok(())
    }
}

pub struct VersionListVisitor;

impl ValueObjectVisitor for VersionListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::VersionList(list) = value else {
            return Err(unexpected("VersionListVisitor", value));
        };
        visit.set_content_type("VersionList");

        let href = visit.href(
            names::LOAD_CONTENT_VERSIONS,
            &[("contentId", list.content_id.to_string())],
        )?;
        start_resource(visit, "VersionList", "VersionList", href)?;
        visit.generator().start_list("VersionItem")?;
        for info in &list.versions {
            visit.generator().start_hash_element("VersionItem")?;
            route_ref(
                visit,
                "Version",
                "Version",
                names::LOAD_CONTENT_IN_VERSION,
                &[
                    ("contentId", info.content_id.to_string()),
                    ("versionNumber", info.version_no.to_string()),
                ],
            )?;
            version_info(visit, info)?;
            visit.generator().end_hash_element("VersionItem")?;
        }
        let generator = visit.generator();
        generator.end_list("VersionItem")?;
        generator.end_object_element("VersionList")?;
        Ok(())
    }
}

pub struct RelationVisitor;

impl ValueObjectVisitor for RelationVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::Relation(relation) = value else {
            return Err(unexpected("RelationVisitor", value));
        };
        visit.set_content_type("Relation");

        let href = visit.href(
            names::LOAD_VERSION_RELATION,
            &[
                ("contentId", relation.source_content_id.to_string()),
                ("versionNumber", relation.source_version_no.to_string()),
                ("relationId", relation.id.to_string()),
            ],
        )?;
        start_resource(visit, "Relation", "Relation", href)?;
        route_ref(
            visit,
            "SourceContent",
            "ContentInfo",
            names::LOAD_CONTENT,
            &[("contentId", relation.source_content_id.to_string())],
        )?;
        route_ref(
            visit,
            "DestinationContent",
            "ContentInfo",
            names::LOAD_CONTENT,
            &[("contentId", relation.destination_content_id.to_string())],
        )?;

        let generator = visit.generator();
        if let Some(identifier) = &relation.source_field_definition_identifier {
            generator.value_element("SourceFieldDefinitionIdentifier", identifier.as_str())?;
        }
        generator.value_element("RelationType", relation.relation_type.as_str())?;
        generator.end_object_element("Relation")?;
        Ok(())
    }
}

/// `Relations` element of a version; each relation is dispatched on its own.
pub struct RelationListVisitor;

impl ValueObjectVisitor for RelationListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::RelationList(list) = value else {
            return Err(unexpected("RelationListVisitor", value));
        };
        visit.set_content_type("RelationList");

        let href = visit.href(
            names::LOAD_VERSION_RELATIONS,
            &[
                ("contentId", list.content_id.to_string()),
                ("versionNumber", list.version_no.to_string()),
            ],
        )?;
        start_resource(visit, "Relations", "RelationList", href)?;
        visit.generator().start_list("Relation")?;
        for relation in &list.relations {
            visit.dispatch(&DomainValue::Relation(relation.clone()))?;
        }
        let generator = visit.generator();
        generator.end_list("Relation")?;
        generator.end_object_element("Relations")?;
        Ok(())
    }
}

