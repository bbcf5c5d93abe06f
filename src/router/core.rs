//! Router core - route compilation, reverse routing and matching.

use crate::route_table::{RouteMeta, RouteTable};
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Parameter storage for matched routes.
///
/// Param names are `Arc<str>` shared with the compiled route; values are per-request.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Capture pattern for a placeholder without a requirement.
const DEFAULT_REQUIREMENT: &str = "[^/]+";

/// Result of matching a request path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<RouteMeta>,
    /// Path parameters extracted from the URL (e.g., `{contentId}` → `42`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Link generation failures.
///
/// These are configuration defects (a visitor asking for a route that does not exist or
/// passing a value its requirement rejects), never client errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    UnknownRoute(String),
    MissingParameter {
        route: String,
        param: String,
    },
    InvalidParameter {
        route: String,
        param: String,
        value: String,
        requirement: String,
    },
    InvalidPattern {
        route: String,
        error: String,
    },
    /// Routes that links are generated to but the table does not define
    MissingRoutes(Vec<String>),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnknownRoute(name) => write!(f, "unknown route '{name}'"),
            RouteError::MissingParameter { route, param } => {
                write!(f, "route '{route}': missing parameter '{param}'")
            }
            RouteError::InvalidParameter {
                route,
                param,
                value,
                requirement,
            } => write!(
                f,
                "route '{route}': parameter '{param}' value '{value}' does not match '{requirement}'"
            ),
            RouteError::InvalidPattern { route, error } => {
                write!(f, "route '{route}': invalid pattern: {error}")
            }
            RouteError::MissingRoutes(names) => {
                write!(f, "missing routes: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for RouteError {}

#[derive(Debug, Clone)]
struct CompiledRoute {
    meta: Arc<RouteMeta>,
    regex: Regex,
    param_names: Vec<Arc<str>>,
    /// Anchored requirement per parameter, used when generating links
    requirements: HashMap<String, Regex>,
}

/// Named route table compiled for link generation and matching.
#[derive(Debug, Clone)]
pub struct Router {
    base_path: String,
    routes: Vec<CompiledRoute>,
    by_name: HashMap<String, usize>,
}

impl Router {
    /// Compile every route of the table.
    ///
    /// Fails when a requirement is not a valid regular expression.
    pub fn new(table: RouteTable) -> Result<Self, RouteError> {
        let RouteTable { base_path, routes } = table;
        let mut compiled = Vec::with_capacity(routes.len());
        let mut by_name = HashMap::with_capacity(routes.len());

        for meta in routes {
            let invalid = |e: regex::Error| RouteError::InvalidPattern {
                route: meta.name.clone(),
                error: e.to_string(),
            };
            let full_path = format!("{}{}", base_path, meta.path_pattern);
            let (regex, param_names) = Self::path_to_regex(&full_path, &meta)
                .map_err(&invalid)?;
            let mut requirements = HashMap::with_capacity(meta.requirements.len());
            for (param, requirement) in &meta.requirements {
                let anchored = Regex::new(&format!("^(?:{requirement})$")).map_err(&invalid)?;
                requirements.insert(param.clone(), anchored);
            }
            by_name.insert(meta.name.clone(), compiled.len());
            compiled.push(CompiledRoute {
                meta: Arc::new(meta),
                regex,
                param_names: param_names.into_iter().map(Arc::from).collect(),
                requirements,
            });
        }

        let routes_summary: Vec<String> = compiled
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.meta.name, r.meta.path_pattern))
            .collect();
        info!(
            routes_count = compiled.len(),
            base_path = %base_path,
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Ok(Self {
            base_path,
            routes: compiled,
            by_name,
        })
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Check that every named route exists, reporting all missing names at once.
    pub fn require_routes(&self, names: &[&str]) -> Result<(), RouteError> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| !self.by_name.contains_key(**name))
            .map(|name| (*name).to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RouteError::MissingRoutes(missing))
        }
    }

    /// Route definitions in table order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteMeta> {
        self.routes.iter().map(|r| r.meta.as_ref())
    }

    /// Generate the path of a named route.
    ///
    /// Parameters not consumed by the path are appended as a query string. Missing
    /// parameters fall back to the route's defaults. Values are percent-encoded except
    /// for `/`, which path parameters such as `locationPath` rely on.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rest_visitors::route_table::RouteTable;
    /// use rest_visitors::router::Router;
    ///
    /// let router = Router::new(RouteTable::builtin().unwrap()).unwrap();
    /// let href = router
    ///     .generate("load_location", &[("locationPath", "1/2/42".to_string())])
    ///     .unwrap();
    /// assert_eq!(href, "/api/rest/v2/content/locations/1/2/42");
    /// ```
    pub fn generate(&self, name: &str, params: &[(&str, String)]) -> Result<String, RouteError> {
        let route = self
            .by_name
            .get(name)
            .and_then(|idx| self.routes.get(*idx))
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;
        let meta = &route.meta;

        let mut path = String::with_capacity(self.base_path.len() + meta.path_pattern.len() + 16);
        path.push_str(&self.base_path);

        let mut rest = meta.path_pattern.as_str();
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            path.push_str(&rest[..start]);
            let param = &rest[start + 1..start + len];
            let value = params
                .iter()
                .rfind(|(k, _)| *k == param)
                .map(|(_, v)| v.as_str())
                .or_else(|| meta.defaults.get(param).map(String::as_str))
                .ok_or_else(|| RouteError::MissingParameter {
                    route: name.to_string(),
                    param: param.to_string(),
                })?;
            if let Some(requirement) = route.requirements.get(param) {
                if !requirement.is_match(value) {
                    return Err(RouteError::InvalidParameter {
                        route: name.to_string(),
                        param: param.to_string(),
                        value: value.to_string(),
                        requirement: meta.requirements.get(param).cloned().unwrap_or_default(),
                    });
                }
            }
            path.push_str(&encode_path_value(value));
            rest = &rest[start + len + 1..];
        }
        path.push_str(rest);

        let query: Vec<String> = params
            .iter()
            .filter(|(k, _)| !route.param_names.iter().any(|p| p.as_ref() == *k))
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }

        debug!(route = %name, href = %path, "Generated link");
        Ok(path)
    }

    /// Match a request path (query string ignored) against the routes accepting `method`.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let path = path.split('?').next().unwrap_or(path);
        for route in &self.routes {
            if !route.meta.methods.contains(method) {
                continue;
            }
            if let Some(caps) = route.regex.captures(path) {
                let mut path_params = ParamVec::new();
                for name in &route.param_names {
                    if let Some(m) = caps.name(name) {
                        let value = urlencoding::decode(m.as_str())
                            .map(|v| v.into_owned())
                            .unwrap_or_else(|_| m.as_str().to_string());
                        path_params.push((Arc::clone(name), value));
                    }
                }
                debug!(
                    method = %method,
                    path = %path,
                    route = %route.meta.name,
                    path_params = ?path_params,
                    "Route matched"
                );
                return Some(RouteMatch {
                    route: Arc::clone(&route.meta),
                    path_params,
                });
            }
        }
        debug!(method = %method, path = %path, "No route matched");
        None
    }

    /// Every method of every route whose path matches, in table order without duplicates.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let path = path.split('?').next().unwrap_or(path);
        let mut methods: Vec<Method> = Vec::new();
        for route in self.routes.iter().filter(|r| r.regex.is_match(path)) {
            for m in &route.meta.methods {
                if !methods.contains(m) {
                    methods.push(m.clone());
                }
            }
        }
        methods
    }

    /// Convert a path pattern to an anchored regex with one named group per placeholder.
    ///
    /// `/content/objects/{contentId}` with requirement `\d+` becomes
    /// `^/content/objects/(?P<contentId>\d+)$`. Literal text is escaped.
    pub(crate) fn path_to_regex(
        path: &str,
        meta: &RouteMeta,
    ) -> Result<(Regex, Vec<String>), regex::Error> {
        let mut pattern = String::with_capacity(path.len() + 16);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        let mut rest = path;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            pattern.push_str(&regex::escape(&rest[..start]));
            let name = &rest[start + 1..start + len];
            let requirement = meta
                .requirements
                .get(name)
                .map(String::as_str)
                .unwrap_or(DEFAULT_REQUIREMENT);
            pattern.push_str("(?P<");
            pattern.push_str(name);
            pattern.push_str(">(?:");
            pattern.push_str(requirement);
            pattern.push_str("))");
            param_names.push(name.to_string());
            rest = &rest[start + len + 1..];
        }
        pattern.push_str(&regex::escape(rest));
        pattern.push('$');

        Ok((Regex::new(&pattern)?, param_names))
    }
}

/// Percent-encode a path parameter value, keeping `/` verbatim.
fn encode_path_value(value: &str) -> String {
    urlencoding::encode(value).replace("%2F", "/")
}
