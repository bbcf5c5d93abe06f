//! # Router Module
//!
//! Reverse routing for the output layer: every href a visitor emits is generated here
//! from a route name and its parameters.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling the named routes of a [`RouteTable`](crate::route_table::RouteTable)
//! - Generating paths from route names (`generate`)
//! - Matching request paths back to routes (`route`)
//! - Listing the methods a path accepts (`allowed_methods`), the input of `Options` values
//!
//! ## Architecture
//!
//! 1. **Compilation**: at construction every path pattern (e.g.
//!    `/content/objects/{contentId}`) is turned into an anchored regex with one named
//!    group per placeholder. A requirement declared for the placeholder becomes the
//!    group's pattern, `[^/]+` otherwise.
//!
//! 2. **Generation**: placeholders are substituted with percent-encoded values. `/` is
//!    kept verbatim so tree paths like `1/2/42` stay readable. A value that violates its
//!    requirement is a [`RouteError`], as is an unknown route or a missing parameter.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use rest_visitors::route_table::RouteTable;
//! use rest_visitors::router::Router;
//!
//! let router = Router::new(RouteTable::builtin().unwrap()).unwrap();
//!
//! let href = router.generate("load_content", &[("contentId", "42".to_string())]).unwrap();
//! assert_eq!(href, "/api/rest/v2/content/objects/42");
//!
//! let matched = router.route(&Method::GET, &href).unwrap();
//! assert_eq!(matched.route.name, "load_content");
//! assert_eq!(matched.get_path_param("contentId"), Some("42"));
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::{ParamVec, RouteError, RouteMatch, Router, MAX_INLINE_PARAMS};
