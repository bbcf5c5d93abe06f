use super::links::{list_href, route_ref, start_resource};
use super::unexpected;
use crate::dispatcher::{RenderError, ValueObjectVisitor, Visit};
use crate::route_table::names;
use crate::values::DomainValue;

pub struct LocationVisitor;

impl ValueObjectVisitor for LocationVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::Location(location) = value else {
            return Err(unexpected("LocationVisitor", value));
        };
        let path = ("locationPath", location.path_param());

        visit.set_content_type("Location");
        visit.set_accept_patch("LocationUpdate");

        let href = visit.href(names::LOAD_LOCATION, &[path.clone()])?;
        start_resource(visit, "Location", "Location", href)?;
        let generator = visit.generator();
        generator.value_element("id", location.id)?;
        generator.value_element("priority", location.priority)?;
        generator.value_element("hidden", location.hidden)?;
        generator.value_element("invisible", location.invisible)?;

        // Root locations have no parent to link to.
        if let Some(parent_path) = location.parent_path_param() {
            route_ref(
                visit,
                "ParentLocation",
                "Location",
                names::LOAD_LOCATION,
                &[("locationPath", parent_path)],
            )?;
        }

        let generator = visit.generator();
        generator.value_element("pathString", location.path_string.as_str())?;
        generator.value_element("depth", location.depth)?;
        if let Some(count) = location.children_count {
            generator.value_element("childCount", count)?;
        }
        generator.value_element("remoteId", location.remote_id.as_str())?;

        route_ref(
            visit,
            "Children",
            "LocationList",
            names::LOAD_LOCATION_CHILDREN,
            &[path],
        )?;
        route_ref(
            visit,
            "Content",
            "Content",
            names::LOAD_CONTENT,
            &[("contentId", location.content_id.to_string())],
        )?;

        let generator = visit.generator();
        generator.value_element("sortField", location.sort_field.as_str())?;
        generator.value_element("sortOrder", location.sort_order.as_str())?;
        generator.end_object_element("Location")?;
        Ok(())
    }
}

/// Location references, not full locations.
pub struct LocationListVisitor;

impl ValueObjectVisitor for LocationListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::LocationList(list) = value else {
            return Err(unexpected("LocationListVisitor", value));
        };
        visit.set_content_type("LocationList");

        let params: Vec<_> = list
            .content_id
            .map(|id| ("contentId", id.to_string()))
            .into_iter()
            .collect();
        let href = list_href(visit, &list.path, names::LOAD_LOCATIONS_FOR_CONTENT, &params)?;
        start_resource(visit, "LocationList", "LocationList", href)?;
        visit.generator().start_list("Location")?;
        for location in &list.locations {
            route_ref(
                visit,
                "Location",
                "Location",
                names::LOAD_LOCATION,
                &[("locationPath", location.path_param())],
            )?;
        }
        let generator = visit.generator();
        generator.end_list("Location")?;
        generator.end_object_element("LocationList")?;
        Ok(())
    }
}

pub struct SectionVisitor;

impl ValueObjectVisitor for SectionVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::Section(section) = value else {
            return Err(unexpected("SectionVisitor", value));
        };
        visit.set_content_type("Section");
        visit.set_accept_patch("SectionInput");

        let href = visit.href(names::LOAD_SECTION, &[("sectionId", section.id.to_string())])?;
        start_resource(visit, "Section", "Section", href)?;
        let generator = visit.generator();
        generator.value_element("sectionId", section.id)?;
        generator.value_element("identifier", section.identifier.as_str())?;
        generator.value_element("name", section.name.as_str())?;
        generator.end_object_element("Section")?;
        Ok(())
    }
}

pub struct SectionListVisitor;

impl ValueObjectVisitor for SectionListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::SectionList(list) = value else {
            return Err(unexpected("SectionListVisitor", value));
        };
        visit.set_content_type("SectionList");

        let href = list_href(visit, &list.path, names::LIST_SECTIONS, &[])?;
        start_resource(visit, "SectionList", "SectionList", href)?;
        visit.generator().start_list("Section")?;
        for section in &list.sections {
            visit.dispatch(&DomainValue::Section(section.clone()))?;
        }
        let generator = visit.generator();
        generator.end_list("Section")?;
        generator.end_object_element("SectionList")?;
        Ok(())
    }
}
