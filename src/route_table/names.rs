//! Names of the routes visitors generate links to.

pub const LOAD_ROOT: &str = "load_root";

pub const CREATE_CONTENT: &str = "create_content";
pub const LOAD_CONTENT: &str = "load_content";
pub const LOAD_CONTENT_VERSIONS: &str = "load_content_versions";
pub const LOAD_CURRENT_VERSION: &str = "load_current_version";
pub const LOAD_CONTENT_IN_VERSION: &str = "load_content_in_version";
pub const LOAD_VERSION_RELATIONS: &str = "load_version_relations";
pub const LOAD_VERSION_RELATION: &str = "load_version_relation";
pub const LOAD_LOCATIONS_FOR_CONTENT: &str = "load_locations_for_content";

pub const LOAD_LOCATION: &str = "load_location";
pub const LOAD_LOCATION_CHILDREN: &str = "load_location_children";

pub const LIST_SECTIONS: &str = "list_sections";
pub const LOAD_SECTION: &str = "load_section";

pub const LIST_CONTENT_TYPES: &str = "list_content_types";
pub const LOAD_CONTENT_TYPE: &str = "load_content_type";
pub const LOAD_CONTENT_TYPE_FIELD_DEFINITIONS: &str = "load_content_type_field_definitions";
pub const LOAD_CONTENT_TYPE_FIELD_DEFINITION: &str = "load_content_type_field_definition";
pub const LOAD_CONTENT_TYPE_GROUP: &str = "load_content_type_group";
pub const LOAD_CONTENT_TYPES_FOR_GROUP: &str = "load_content_types_for_group";

pub const LOAD_IMAGE_VARIATION: &str = "load_image_variation";

pub const LIST_ROLES: &str = "list_roles";
pub const LOAD_ROLE: &str = "load_role";
pub const LOAD_ROLE_DRAFT: &str = "load_role_draft";
pub const LOAD_POLICIES: &str = "load_policies";
pub const LOAD_POLICY: &str = "load_policy";

pub const LIST_USERS: &str = "list_users";
pub const LOAD_USER: &str = "load_user";
pub const LOAD_USER_GROUPS_OF_USER: &str = "load_user_groups_of_user";
pub const LOAD_ROLE_ASSIGNMENTS_FOR_USER: &str = "load_role_assignments_for_user";
pub const LOAD_ROLE_ASSIGNMENT_FOR_USER: &str = "load_role_assignment_for_user";
pub const LOAD_USER_GROUP: &str = "load_user_group";

/// Every route above; a route table missing any of them cannot back the output layer.
pub const LINKED: &[&str] = &[
    LOAD_ROOT,
    CREATE_CONTENT,
    LOAD_CONTENT,
    LOAD_CONTENT_VERSIONS,
    LOAD_CURRENT_VERSION,
    LOAD_CONTENT_IN_VERSION,
    LOAD_VERSION_RELATIONS,
    LOAD_VERSION_RELATION,
    LOAD_LOCATIONS_FOR_CONTENT,
    LOAD_LOCATION,
    LOAD_LOCATION_CHILDREN,
    LIST_SECTIONS,
    LOAD_SECTION,
    LIST_CONTENT_TYPES,
    LOAD_CONTENT_TYPE,
    LOAD_CONTENT_TYPE_FIELD_DEFINITIONS,
    LOAD_CONTENT_TYPE_FIELD_DEFINITION,
    LOAD_CONTENT_TYPE_GROUP,
    LOAD_CONTENT_TYPES_FOR_GROUP,
    LOAD_IMAGE_VARIATION,
    LIST_ROLES,
    LOAD_ROLE,
    LOAD_ROLE_DRAFT,
    LOAD_POLICIES,
    LOAD_POLICY,
    LIST_USERS,
    LOAD_USER,
    LOAD_USER_GROUPS_OF_USER,
    LOAD_ROLE_ASSIGNMENTS_FOR_USER,
    LOAD_ROLE_ASSIGNMENT_FOR_USER,
    LOAD_USER_GROUP,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route_table::RouteTable;

    #[test]
    fn test_builtin_table_defines_every_linked_route() {
        let table = RouteTable::builtin().unwrap();
        for name in LINKED {
            assert!(table.get(name).is_some(), "missing route {name}");
        }
    }
}
