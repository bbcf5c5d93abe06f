use super::links::{route_ref, start_resource};
use super::unexpected;
use crate::dispatcher::{RenderError, ValueObjectVisitor, Visit};
use crate::route_table::names;
use crate::values::DomainValue;

/// Location path of the top-level content tree.
const ROOT_LOCATION_PATH: &str = "1/2";

/// Entry point document linking to the main resource collections.
pub struct RootVisitor;

impl ValueObjectVisitor for RootVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        if !matches!(value, DomainValue::Root) {
            return Err(unexpected("RootVisitor", value));
        }
        visit.set_content_type("Root");

        let href = visit.href(names::LOAD_ROOT, &[])?;
        start_resource(visit, "Root", "Root", href)?;
        route_ref(visit, "content", "ContentInfo", names::CREATE_CONTENT, &[])?;
        route_ref(
            visit,
            "contentTypes",
            "ContentTypeInfoList",
            names::LIST_CONTENT_TYPES,
            &[],
        )?;
        route_ref(visit, "sections", "SectionList", names::LIST_SECTIONS, &[])?;
        route_ref(visit, "roles", "RoleList", names::LIST_ROLES, &[])?;
        route_ref(visit, "users", "UserRefList", names::LIST_USERS, &[])?;
        route_ref(
            visit,
            "rootLocation",
            "Location",
            names::LOAD_LOCATION,
            &[("locationPath", ROOT_LOCATION_PATH.to_string())],
        )?;
        visit.generator().end_object_element("Root")?;
        Ok(())
    }
}
