//! Users, user groups, roles, policies and role assignments.

use super::location::Location;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limitation {
    pub identifier: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Policy {
    pub id: u64,
    pub role_id: u64,
    pub module: String,
    pub function: String,
    pub limitations: Vec<Limitation>,
    /// Id of the published policy this draft was created from
    pub original_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyList {
    pub path: String,
    pub role_id: u64,
    pub policies: Vec<Policy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: u64,
    pub identifier: String,
    pub policies: Vec<Policy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleList {
    pub path: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoleAssignment {
    pub user_id: u64,
    pub role: Role,
    pub limitation: Option<Limitation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoleAssignmentList {
    pub user_id: u64,
    pub assignments: Vec<RoleAssignment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub login: String,
    pub email: String,
    pub enabled: bool,
    pub name: String,
    pub main_location: Option<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserList {
    pub path: String,
    pub users: Vec<User>,
}

/// A user group, addressed by the path of its main location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserGroup {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub main_location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserGroupRefList {
    pub path: String,
    /// Member whose groups these are; links the list when `path` is empty
    pub user_id: Option<u64>,
    pub user_groups: Vec<UserGroup>,
}
