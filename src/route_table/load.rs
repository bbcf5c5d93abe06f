use super::types::{RawRouteTable, RouteMeta, RouteTable, RouteTableError};
use anyhow::Context;
use http::Method;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

const BUILTIN_ROUTES: &str = include_str!("../../config/routes.yaml");

impl RouteTable {
    /// The route table bundled with the crate.
    pub fn builtin() -> Result<Self, RouteTableError> {
        Self::from_yaml_str(BUILTIN_ROUTES)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, RouteTableError> {
        let raw: RawRouteTable =
            serde_yaml::from_str(yaml).map_err(|e| RouteTableError::Parse(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut routes = Vec::with_capacity(raw.routes.len());
        for route in raw.routes {
            if !seen.insert(route.name.clone()) {
                return Err(RouteTableError::DuplicateName(route.name));
            }
            if !route.path.starts_with('/') {
                return Err(RouteTableError::InvalidPath {
                    route: route.name,
                    path: route.path,
                });
            }
            if route.methods.is_empty() {
                return Err(RouteTableError::NoMethods(route.name));
            }
            let mut methods = Vec::with_capacity(route.methods.len());
            for m in &route.methods {
                let method = Method::from_bytes(m.to_ascii_uppercase().as_bytes()).map_err(|_| {
                    RouteTableError::InvalidMethod {
                        route: route.name.clone(),
                        method: m.clone(),
                    }
                })?;
                methods.push(method);
            }
            routes.push(RouteMeta {
                name: route.name,
                path_pattern: route.path,
                methods,
                requirements: route.requirements,
                defaults: route.defaults,
            });
        }

        Ok(RouteTable {
            base_path: raw.base_path.trim_end_matches('/').to_string(),
            routes,
        })
    }
}

/// Load a route table from a YAML file.
pub fn load_routes(path: impl AsRef<Path>) -> anyhow::Result<RouteTable> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    let table = RouteTable::from_yaml_str(&content)
        .with_context(|| format!("failed to load routes from {}", path.display()))?;
    info!(
        path = %path.display(),
        routes_count = table.routes.len(),
        base_path = %table.base_path,
        "Route table loaded"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let table = RouteTable::builtin().unwrap();
        assert_eq!(table.base_path, "/api/rest/v2");
        let route = table.get("load_content").unwrap();
        assert_eq!(route.path_pattern, "/content/objects/{contentId}");
        assert_eq!(route.methods, vec![Method::GET]);
        assert_eq!(route.param_names(), vec!["contentId"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let yaml = "routes:\n  - {name: a, path: /a, methods: [GET]}\n  - {name: a, path: /b, methods: [GET]}\n";
        assert_eq!(
            RouteTable::from_yaml_str(yaml),
            Err(RouteTableError::DuplicateName("a".to_string()))
        );
    }

    #[test]
    fn test_invalid_definitions_rejected() {
        let no_slash = "routes:\n  - {name: a, path: a, methods: [GET]}\n";
        assert!(matches!(
            RouteTable::from_yaml_str(no_slash),
            Err(RouteTableError::InvalidPath { .. })
        ));
        let no_methods = "routes:\n  - {name: a, path: /a, methods: []}\n";
        assert!(matches!(
            RouteTable::from_yaml_str(no_methods),
            Err(RouteTableError::NoMethods(_))
        ));
        assert!(matches!(
            RouteTable::from_yaml_str("routes: 12"),
            Err(RouteTableError::Parse(_))
        ));
    }

    #[test]
    fn test_load_routes_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.yaml");
        std::fs::write(
            &path,
            "base_path: /api/\nroutes:\n  - {name: list, path: /items, methods: [get, post]}\n",
        )
        .unwrap();
        let table = load_routes(&path).unwrap();
        assert_eq!(table.base_path, "/api");
        assert_eq!(table.routes[0].methods_string(), "GET,POST");

        assert!(load_routes(dir.path().join("missing.yaml")).is_err());
    }
}
