//! # CLI Module
//!
//! Command-line front end for the output layer, mainly for inspecting what a value object
//! renders to without a hosting HTTP framework.
//!
//! ## Commands
//!
//! ### `render`
//!
//! Render a JSON-serialised value object and print the status line, headers and body:
//!
//! ```bash
//! rest-visitors render --value section.json --format xml
//! ```
//!
//! Options:
//! - `--value <FILE>` - The value object, tagged with its `type` (required)
//! - `--format <json|xml>` - Output format (default: the configured format)
//! - `--config <FILE>` - Service configuration YAML
//! - `--repository <FILE>` - Repository fixture used to resolve relation links
//! - `--debug` - Include exception messages, traces and previous exceptions
//!
//! ### `routes`
//!
//! Print the route table, optionally with the derived OPTIONS routes:
//!
//! ```bash
//! rest-visitors routes --options
//! ```
//!
//! ### `field`
//!
//! Run one field type processor operation:
//!
//! ```bash
//! rest-visitors field --field-type author --target settings --direction out \
//!     --hash '{"defaultAuthor": 1}'
//! ```
//!
//! ## Environment
//!
//! `RESTV_DEBUG`, `RESTV_FORMAT`, `RESTV_MAX_DEPTH` and `RESTV_TMPDIR` override the
//! configuration file; `RESTV_LOG_*` control logging.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{format_response, format_routes, run_cli, service_config, Cli, Commands};
