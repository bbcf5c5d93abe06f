//! Route definitions the output layer links against.
//!
//! Visitors and field type processors never build URLs by hand; they ask the
//! [`Router`](crate::router::Router) to generate one from a route name in this table.

pub mod names;
mod load;
mod options;
mod types;

pub use load::load_routes;
pub use options::{derive_options_routes, ALLOWED_METHODS_DEFAULT, OPTIONS_ROUTE_PREFIX};
pub use types::{RouteMeta, RouteTable, RouteTableError};
