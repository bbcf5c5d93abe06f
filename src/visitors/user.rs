use super::links::{limitation, list_href, route_ref, start_resource};
use super::unexpected;
use crate::dispatcher::{RenderError, ValueObjectVisitor, Visit};
use crate::route_table::names;
use crate::values::DomainValue;

/// Roles and role drafts. A draft renders the same body under the `RoleDraft` media type
/// and links to the draft resource.
pub struct RoleVisitor;

impl ValueObjectVisitor for RoleVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let (role, media_type_name, route) = match value {
            DomainValue::Role(role) => (role, "Role", names::LOAD_ROLE),
            DomainValue::RoleDraft(role) => (role, "RoleDraft", names::LOAD_ROLE_DRAFT),
            _ => return Err(unexpected("RoleVisitor", value)),
        };
        let role_id = ("roleId", role.id.to_string());
        visit.set_content_type(media_type_name);
        visit.set_accept_patch("RoleInput");

        let href = visit.href(route, &[role_id.clone()])?;
        start_resource(visit, "Role", media_type_name, href)?;
        visit
            .generator()
            .value_element("identifier", role.identifier.as_str())?;
        route_ref(visit, "Policies", "PolicyList", names::LOAD_POLICIES, &[role_id])?;
        visit.generator().end_object_element("Role")?;
        Ok(())
    }
}

pub struct RoleListVisitor;

impl ValueObjectVisitor for RoleListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::RoleList(list) = value else {
            return Err(unexpected("RoleListVisitor", value));
        };
        visit.set_content_type("RoleList");

        let href = list_href(visit, &list.path, names::LIST_ROLES, &[])?;
        start_resource(visit, "RoleList", "RoleList", href)?;
        visit.generator().start_list("Role")?;
        for role in &list.roles {
            visit.dispatch(&DomainValue::Role(role.clone()))?;
        }
        let generator = visit.generator();
        generator.end_list("Role")?;
        generator.end_object_element("RoleList")?;
        Ok(())
    }
}

/// Policies and policy drafts; a draft also carries the id of the policy it replaces.
pub struct PolicyVisitor;

impl ValueObjectVisitor for PolicyVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let (policy, is_draft) = match value {
            DomainValue::Policy(policy) => (policy, false),
            DomainValue::PolicyDraft(policy) => (policy, true),
            _ => return Err(unexpected("PolicyVisitor", value)),
        };
        visit.set_content_type("Policy");
        visit.set_accept_patch("PolicyUpdate");

        let href = visit.href(
            names::LOAD_POLICY,
            &[
                ("roleId", policy.role_id.to_string()),
                ("policyId", policy.id.to_string()),
            ],
        )?;
        start_resource(visit, "Policy", "Policy", href)?;
        let generator = visit.generator();
        generator.value_element("id", policy.id)?;
        if is_draft {
            if let Some(original_id) = policy.original_id {
                generator.value_element("originalId", original_id)?;
            }
        }
        generator.value_element("module", policy.module.as_str())?;
        generator.value_element("function", policy.function.as_str())?;

        if !policy.limitations.is_empty() {
            generator.start_hash_element("limitations")?;
            generator.start_list("limitation")?;
            for item in &policy.limitations {
                limitation(generator, item)?;
            }
            generator.end_list("limitation")?;
            generator.end_hash_element("limitations")?;
        }
        generator.end_object_element("Policy")?;
        Ok(())
    }
}

pub struct PolicyListVisitor;

impl ValueObjectVisitor for PolicyListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::PolicyList(list) = value else {
            return Err(unexpected("PolicyListVisitor", value));
        };
        visit.set_content_type("PolicyList");

        let href = list_href(
            visit,
            &list.path,
            names::LOAD_POLICIES,
            &[("roleId", list.role_id.to_string())],
        )?;
        start_resource(visit, "PolicyList", "PolicyList", href)?;
        visit.generator().start_list("Policy")?;
        for policy in &list.policies {
            visit.dispatch(&DomainValue::Policy(policy.clone()))?;
        }
        let generator = visit.generator();
        generator.end_list("Policy")?;
        generator.end_object_element("PolicyList")?;
        Ok(())
    }
}

pub struct RoleAssignmentVisitor;

impl ValueObjectVisitor for RoleAssignmentVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::RoleAssignment(assignment) = value else {
            return Err(unexpected("RoleAssignmentVisitor", value));
        };
        let role_id = ("roleId", assignment.role.id.to_string());
        visit.set_content_type("RoleAssignment");

        let href = visit.href(
            names::LOAD_ROLE_ASSIGNMENT_FOR_USER,
            &[("userId", assignment.user_id.to_string()), role_id.clone()],
        )?;
        start_resource(visit, "RoleAssignment", "RoleAssignment", href)?;
        if let Some(item) = &assignment.limitation {
            limitation(visit.generator(), item)?;
        }
        route_ref(visit, "Role", "Role", names::LOAD_ROLE, &[role_id])?;
        visit.generator().end_object_element("RoleAssignment")?;
        Ok(())
    }
}

pub struct RoleAssignmentListVisitor;

impl ValueObjectVisitor for RoleAssignmentListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::RoleAssignmentList(list) = value else {
            return Err(unexpected("RoleAssignmentListVisitor", value));
        };
        visit.set_content_type("RoleAssignmentList");

        let href = visit.href(
            names::LOAD_ROLE_ASSIGNMENTS_FOR_USER,
            &[("userId", list.user_id.to_string())],
        )?;
        start_resource(visit, "RoleAssignmentList", "RoleAssignmentList", href)?;
        visit.generator().start_list("RoleAssignment")?;
        for assignment in &list.assignments {
            visit.dispatch(&DomainValue::RoleAssignment(assignment.clone()))?;
        }
        let generator = visit.generator();
        generator.end_list("RoleAssignment")?;
        generator.end_object_element("RoleAssignmentList")?;
        Ok(())
    }
}

pub struct UserVisitor;

impl ValueObjectVisitor for UserVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::User(user) = value else {
            return Err(unexpected("UserVisitor", value));
        };
        let user_id = ("userId", user.id.to_string());
        visit.set_content_type("User");
        visit.set_accept_patch("UserUpdate");

        let href = visit.href(names::LOAD_USER, &[user_id.clone()])?;
        start_resource(visit, "User", "User", href)?;
        let generator = visit.generator();
        generator.attribute("id", user.id.to_string())?;
        generator.value_element("name", user.name.as_str())?;
        generator.value_element("login", user.login.as_str())?;
        generator.value_element("email", user.email.as_str())?;
        generator.value_element("enabled", user.enabled)?;

        if let Some(location) = &user.main_location {
            route_ref(
                visit,
                "MainLocation",
                "Location",
                names::LOAD_LOCATION,
                &[("locationPath", location.path_param())],
            )?;
        }
        route_ref(
            visit,
            "UserGroups",
            "UserGroupRefList",
            names::LOAD_USER_GROUPS_OF_USER,
            &[user_id.clone()],
        )?;
        route_ref(
            visit,
            "Roles",
            "RoleAssignmentList",
            names::LOAD_ROLE_ASSIGNMENTS_FOR_USER,
            &[user_id],
        )?;
        visit.generator().end_object_element("User")?;
        Ok(())
    }
}

pub struct UserListVisitor;

impl ValueObjectVisitor for UserListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::UserList(list) = value else {
            return Err(unexpected("UserListVisitor", value));
        };
        visit.set_content_type("UserList");

        let href = list_href(visit, &list.path, names::LIST_USERS, &[])?;
        start_resource(visit, "UserList", "UserList", href)?;
        visit.generator().start_list("User")?;
        for user in &list.users {
            visit.dispatch(&DomainValue::User(user.clone()))?;
        }
        let generator = visit.generator();
        generator.end_list("User")?;
        generator.end_object_element("UserList")?;
        Ok(())
    }
}

/// User groups are addressed by the path of their main location.
pub struct UserGroupVisitor;

impl ValueObjectVisitor for UserGroupVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::UserGroup(group) = value else {
            return Err(unexpected("UserGroupVisitor", value));
        };
        let location = &group.main_location;
        visit.set_content_type("UserGroup");
        visit.set_accept_patch("UserGroupUpdate");

        let href = visit.href(
            names::LOAD_USER_GROUP,
            &[("groupPath", location.path_param())],
        )?;
        start_resource(visit, "UserGroup", "UserGroup", href)?;
        let generator = visit.generator();
        generator.attribute("id", group.id.to_string())?;
        generator.value_element("name", group.name.as_str())?;
        generator.value_element("description", group.description.as_str())?;

        if let Some(parent_path) = location.parent_path_param() {
            route_ref(
                visit,
                "ParentUserGroup",
                "UserGroup",
                names::LOAD_USER_GROUP,
                &[("groupPath", parent_path)],
            )?;
        }
        route_ref(
            visit,
            "MainLocation",
            "Location",
            names::LOAD_LOCATION,
            &[("locationPath", location.path_param())],
        )?;
        visit.generator().end_object_element("UserGroup")?;
        Ok(())
    }
}

pub struct UserGroupRefListVisitor;

impl ValueObjectVisitor for UserGroupRefListVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::UserGroupRefList(list) = value else {
            return Err(unexpected("UserGroupRefListVisitor", value));
        };
        visit.set_content_type("UserGroupRefList");

        let params: Vec<_> = list
            .user_id
            .map(|id| ("userId", id.to_string()))
            .into_iter()
            .collect();
        let href = list_href(visit, &list.path, names::LOAD_USER_GROUPS_OF_USER, &params)?;
        start_resource(visit, "UserGroupRefList", "UserGroupRefList", href)?;
        visit.generator().start_list("UserGroup")?;
        for group in &list.user_groups {
            route_ref(
                visit,
                "UserGroup",
                "UserGroup",
                names::LOAD_USER_GROUP,
                &[("groupPath", group.main_location.path_param())],
            )?;
        }
        let generator = visit.generator();
        generator.end_list("UserGroup")?;
        generator.end_object_element("UserGroupRefList")?;
        Ok(())
    }
}
