use http::Method;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// A named route the output layer generates links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub name: String,
    /// Path relative to the table's base path, with `{param}` placeholders
    pub path_pattern: String,
    pub methods: Vec<Method>,
    /// Parameter name → regular expression the value must match in full
    pub requirements: BTreeMap<String, String>,
    pub defaults: BTreeMap<String, String>,
}

impl RouteMeta {
    /// Placeholder names in the order they appear in the path.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.path_pattern
            .split('/')
            .filter(|s| s.starts_with('{') && s.ends_with('}'))
            .map(|s| s.trim_start_matches('{').trim_end_matches('}'))
            .collect()
    }

    /// Comma separated method list, e.g. `GET,PATCH`.
    #[must_use]
    pub fn methods_string(&self) -> String {
        self.methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// All routes of the service, sharing one base path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    pub base_path: String,
    pub routes: Vec<RouteMeta>,
}

impl RouteTable {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RouteMeta> {
        self.routes.iter().find(|r| r.name == name)
    }
}

/// On-disk shape of a route table.
#[derive(Debug, Deserialize)]
pub(super) struct RawRouteTable {
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawRoute {
    pub name: String,
    pub path: String,
    pub methods: Vec<String>,
    #[serde(default)]
    pub requirements: BTreeMap<String, String>,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

/// Malformed route definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    Parse(String),
    DuplicateName(String),
    InvalidPath { route: String, path: String },
    InvalidMethod { route: String, method: String },
    NoMethods(String),
}

impl fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTableError::Parse(msg) => write!(f, "invalid route table: {msg}"),
            RouteTableError::DuplicateName(name) => write!(f, "duplicate route name '{name}'"),
            RouteTableError::InvalidPath { route, path } => {
                write!(f, "route '{route}': path '{path}' must start with '/'")
            }
            RouteTableError::InvalidMethod { route, method } => {
                write!(f, "route '{route}': invalid HTTP method '{method}'")
            }
            RouteTableError::NoMethods(route) => write!(f, "route '{route}' has no methods"),
        }
    }
}

impl std::error::Error for RouteTableError {}
