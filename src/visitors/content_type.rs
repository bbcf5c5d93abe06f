use super::links::{list_href, multilingual, route_ref, start_resource};
use super::unexpected;
use crate::dispatcher::{RenderError, ValueObjectVisitor, Visit};
use crate::route_table::names;
use crate::values::{DomainValue, FieldDefinitionList};

pub struct ContentTypeVisitor;

impl ValueObjectVisitor for ContentTypeVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::ContentType(content_type) = value else {
            return Err(unexpected("ContentTypeVisitor", value));
        };
        visit.set_content_type("ContentType");
        visit.set_accept_patch("ContentTypeUpdate");

        let href = visit.href(
            names::LOAD_CONTENT_TYPE,
            &[("contentTypeId", content_type.id.to_string())],
        )?;
        start_resource(visit, "ContentType", "ContentType", href)?;
        let generator = visit.generator();
        generator.value_element("id", content_type.id)?;
        generator.value_element("identifier", content_type.identifier.as_str())?;
        multilingual(generator, "names", &content_type.names)?;
        multilingual(generator, "descriptions", &content_type.descriptions)?;
        generator.value_element("creationDate", content_type.creation_date.as_str())?;
        generator.value_element("modificationDate", content_type.modification_date.as_str())?;

        route_ref(
            visit,
            "Creator",
            "User",
            names::LOAD_USER,
            &[("userId", content_type.creator_id.to_string())],
        )?;
        route_ref(
            visit,
            "Modifier",
            "User",
            names::LOAD_USER,
            &[("userId", content_type.modifier_id.to_string())],
        )?;

        visit.generator().start_list("ContentTypeGroupRef")?;
        for group_id in &content_type.group_ids {
            route_ref(
                visit,
                "ContentTypeGroupRef",
                "ContentTypeGroup",
                names::LOAD_CONTENT_TYPE_GROUP,
                &[("contentTypeGroupId", group_id.to_string())],
            )?;
        }

        let generator = visit.generator();
        generator.end_list("ContentTypeGroupRef")?;
        generator.value_element("remoteId", content_type.remote_id.as_str())?;
        generator.value_element("urlAliasSchema", content_type.url_alias_schema.as_str())?;
        generator.value_element("nameSchema", content_type.name_schema.as_str())?;
        generator.value_element("isContainer", content_type.is_container)?;
        generator.value_element("mainLanguageCode", content_type.main_language_code.as_str())?;
        generator.value_element(
            "defaultAlwaysAvailable",
            content_type.default_always_available,
        )?;
        generator.value_element("defaultSortField", content_type.default_sort_field.as_str())?;
        generator.value_element("defaultSortOrder", content_type.default_sort_order.as_str())?;

        visit.dispatch(&DomainValue::FieldDefinitionList(FieldDefinitionList {
            content_type_id: content_type.id,
            field_definitions: content_type.field_definitions.clone(),
        }))?;

        visit.generator().end_object_element("ContentType")?;
        Ok(())
    }
}

pub struct ContentTypeListVisitor;

impl ValueObjectVisitor for ContentTypeListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::ContentTypeList(list) = value else {
            return Err(unexpected("ContentTypeListVisitor", value));
        };
        visit.set_content_type("ContentTypeList");

        let href = list_href(visit, &list.path, names::LIST_CONTENT_TYPES, &[])?;
        start_resource(visit, "ContentTypeList", "ContentTypeList", href)?;
        visit.generator().start_list("ContentType")?;
        for content_type in &list.content_types {
            visit.dispatch(&DomainValue::ContentType(content_type.clone()))?;
        }
        let generator = visit.generator();
        generator.end_list("ContentType")?;
        generator.end_object_element("ContentTypeList")?;
        Ok(())
    }
}

pub struct ContentTypeGroupVisitor;

impl ValueObjectVisitor for ContentTypeGroupVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::ContentTypeGroup(group) = value else {
            return Err(unexpected("ContentTypeGroupVisitor", value));
        };
        let group_id = ("contentTypeGroupId", group.id.to_string());
        visit.set_content_type("ContentTypeGroup");
        visit.set_accept_patch("ContentTypeGroupInput");

        let href = visit.href(names::LOAD_CONTENT_TYPE_GROUP, &[group_id.clone()])?;
        start_resource(visit, "ContentTypeGroup", "ContentTypeGroup", href)?;
        let generator = visit.generator();
        generator.value_element("id", group.id)?;
        generator.value_element("identifier", group.identifier.as_str())?;
        generator.value_element("created", group.creation_date.as_str())?;
        generator.value_element("modified", group.modification_date.as_str())?;

        route_ref(
            visit,
            "Creator",
            "User",
            names::LOAD_USER,
            &[("userId", group.creator_id.to_string())],
        )?;
        route_ref(
            visit,
            "Modifier",
            "User",
            names::LOAD_USER,
            &[("userId", group.modifier_id.to_string())],
        )?;
        route_ref(
            visit,
            "ContentTypes",
            "ContentTypeInfoList",
            names::LOAD_CONTENT_TYPES_FOR_GROUP,
            &[group_id],
        )?;
        visit.generator().end_object_element("ContentTypeGroup")?;
        Ok(())
    }
}

/// Field definition; default value, settings and validator configuration go through the
/// field type's processor.
pub struct FieldDefinitionVisitor;

impl ValueObjectVisitor for FieldDefinitionVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::FieldDefinition(definition) = value else {
            return Err(unexpected("FieldDefinitionVisitor", value));
        };
        let field_type = definition.field_type_identifier.as_str();
        visit.set_content_type("FieldDefinition");
        visit.set_accept_patch("FieldDefinitionUpdate");

        let href = visit.href(
            names::LOAD_CONTENT_TYPE_FIELD_DEFINITION,
            &[
                ("contentTypeId", definition.content_type_id.to_string()),
                ("fieldDefinitionId", definition.id.to_string()),
            ],
        )?;
        start_resource(visit, "FieldDefinition", "FieldDefinition", href)?;

        let fields = visit.fields();
        let generator = visit.generator();
        generator.value_element("id", definition.id)?;
        generator.value_element("identifier", definition.identifier.as_str())?;
        generator.value_element("fieldType", field_type)?;
        generator.value_element("fieldGroup", definition.field_group.as_str())?;
        generator.value_element("position", definition.position)?;
        generator.value_element("isTranslatable", definition.is_translatable)?;
        generator.value_element("isRequired", definition.is_required)?;
        generator.value_element("isInfoCollector", definition.is_info_collector)?;
        generator.value_element("isSearchable", definition.is_searchable)?;
        fields.serialize_field_default_value(generator, field_type, &definition.default_value)?;
        fields.serialize_field_settings(generator, field_type, &definition.field_settings)?;
        fields.serialize_validator_configuration(
            generator,
            field_type,
            &definition.validator_configuration,
        )?;
        multilingual(generator, "names", &definition.names)?;
        multilingual(generator, "descriptions", &definition.descriptions)?;
        generator.end_object_element("FieldDefinition")?;
        Ok(())
    }
}

/// `FieldDefinitions` element of a content type.
pub struct FieldDefinitionListVisitor;

impl ValueObjectVisitor for FieldDefinitionListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::FieldDefinitionList(list) = value else {
            return Err(unexpected("FieldDefinitionListVisitor", value));
        };
        visit.set_content_type("FieldDefinitionList");

        let href = visit.href(
            names::LOAD_CONTENT_TYPE_FIELD_DEFINITIONS,
            &[("contentTypeId", list.content_type_id.to_string())],
        )?;
        start_resource(visit, "FieldDefinitions", "FieldDefinitionList", href)?;
        visit.generator().start_list("FieldDefinition")?;
        for definition in &list.field_definitions {
            visit.dispatch(&DomainValue::FieldDefinition(definition.clone()))?;
        }
        let generator = visit.generator();
        generator.end_list("FieldDefinition")?;
        generator.end_object_element("FieldDefinitions")?;
        Ok(())
    }
}
