use super::types::{RouteMeta, RouteTable};
use http::Method;

/// Name prefix of derived OPTIONS routes.
pub const OPTIONS_ROUTE_PREFIX: &str = "options.";

/// Default key holding the comma separated methods a derived OPTIONS route answers for.
pub const ALLOWED_METHODS_DEFAULT: &str = "allowed_methods";

/// Derive one OPTIONS route per input route.
///
/// Each derived route keeps the path, requirements and defaults of its source, answers
/// only `OPTIONS`, is named `options.<source name>` and lists in its `allowed_methods`
/// default the methods of every source route sharing that path.
#[must_use]
pub fn derive_options_routes(routes: &[RouteMeta]) -> Vec<RouteMeta> {
    routes
        .iter()
        .map(|route| {
            let mut methods: Vec<&Method> = Vec::new();
            for other in routes.iter().filter(|r| r.path_pattern == route.path_pattern) {
                for m in &other.methods {
                    if !methods.contains(&m) {
                        methods.push(m);
                    }
                }
            }
            let allowed = methods
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(",");

            let mut defaults = route.defaults.clone();
            defaults.insert(ALLOWED_METHODS_DEFAULT.to_string(), allowed);

            RouteMeta {
                name: format!("{OPTIONS_ROUTE_PREFIX}{}", route.name),
                path_pattern: route.path_pattern.clone(),
                methods: vec![Method::OPTIONS],
                requirements: route.requirements.clone(),
                defaults,
            }
        })
        .collect()
}

impl RouteTable {
    /// This table followed by the OPTIONS routes derived from it.
    #[must_use]
    pub fn with_options_routes(mut self) -> Self {
        let derived = derive_options_routes(&self.routes);
        self.routes.extend(derived);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn route(name: &str, path: &str, methods: &[Method]) -> RouteMeta {
        RouteMeta {
            name: name.to_string(),
            path_pattern: path.to_string(),
            methods: methods.to_vec(),
            requirements: BTreeMap::from([("id".to_string(), r"\d+".to_string())]),
            defaults: BTreeMap::from([("_controller".to_string(), "x".to_string())]),
        }
    }

    #[test]
    fn test_one_options_route_per_input() {
        let routes = vec![
            route("load", "/items/{id}", &[Method::GET]),
            route("update", "/items/{id}", &[Method::PATCH]),
            route("delete", "/items/{id}", &[Method::DELETE, Method::GET]),
            route("list", "/items", &[Method::GET]),
        ];
        let derived = derive_options_routes(&routes);
        assert_eq!(derived.len(), routes.len());

        for (source, options) in routes.iter().zip(&derived) {
            assert_eq!(options.name, format!("options.{}", source.name));
            assert_eq!(options.path_pattern, source.path_pattern);
            assert_eq!(options.methods, vec![Method::OPTIONS]);
            assert_eq!(options.requirements, source.requirements);
            assert_eq!(options.defaults.get("_controller").map(String::as_str), Some("x"));
        }
        assert_eq!(
            derived[0].defaults.get(ALLOWED_METHODS_DEFAULT).map(String::as_str),
            Some("GET,PATCH,DELETE")
        );
        assert_eq!(
            derived[3].defaults.get(ALLOWED_METHODS_DEFAULT).map(String::as_str),
            Some("GET")
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(derive_options_routes(&[]).is_empty());
    }

    #[test]
    fn test_with_options_routes_appends() {
        let table = RouteTable {
            base_path: "/api".to_string(),
            routes: vec![route("list", "/items", &[Method::GET])],
        }
        .with_options_routes();
        assert_eq!(table.routes.len(), 2);
        assert!(table.get("options.list").is_some());
    }
}
