//! # Runtime Configuration Module
//!
//! Environment variable overrides applied on top of the YAML service configuration.
//!
//! ## Environment Variables
//!
//! ### `RESTV_DEBUG`
//!
//! `1`, `true`, `yes` or `on` enable debug rendering of exceptions (messages, traces and
//! nested exceptions). Anything else disables it.
//!
//! ### `RESTV_FORMAT`
//!
//! Output format, `json` or `xml`.
//!
//! ### `RESTV_MAX_DEPTH`
//!
//! Maximum visitor nesting depth. Accepts values in:
//! - Decimal: `64`
//! - Hexadecimal: `0x40`
//!
//! Invalid or zero values are ignored.
//!
//! ### `RESTV_TMPDIR`
//!
//! Directory decoded binary uploads are written to.
//!
//! ## Usage
//!
//! ```rust
//! use rest_visitors::config::ServiceConfig;
//! use rest_visitors::runtime_config::RuntimeConfig;
//!
//! let mut config = ServiceConfig::default();
//! RuntimeConfig::from_env().apply(&mut config);
//! assert!(config.max_depth > 0);
//! ```

use crate::config::ServiceConfig;
use crate::generator::Format;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Overrides read from the environment. `None` leaves the configured value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub debug: Option<bool>,
    pub format: Option<Format>,
    pub max_depth: Option<usize>,
    pub temp_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Load overrides from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load overrides through an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = lookup("RESTV_DEBUG").map(|val| {
            matches!(
                val.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        });

        let format = lookup("RESTV_FORMAT").and_then(|val| match val.parse::<Format>() {
            Ok(format) => Some(format),
            Err(e) => {
                warn!(value = %val, error = %e, "Ignoring RESTV_FORMAT");
                None
            }
        });

        let max_depth = lookup("RESTV_MAX_DEPTH").and_then(|val| {
            let parsed = if let Some(hex) = val.strip_prefix("0x") {
                usize::from_str_radix(hex, 16).ok()
            } else {
                val.parse().ok()
            };
            match parsed {
                Some(depth) if depth > 0 => Some(depth),
                _ => {
                    warn!(value = %val, "Ignoring RESTV_MAX_DEPTH");
                    None
                }
            }
        });

        let temp_dir = lookup("RESTV_TMPDIR")
            .filter(|val| !val.is_empty())
            .map(PathBuf::from);

        RuntimeConfig {
            debug,
            format,
            max_depth,
            temp_dir,
        }
    }

    /// Write every override into `config`.
    pub fn apply(&self, config: &mut ServiceConfig) {
        if let Some(debug) = self.debug {
            config.debug = debug;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(dir) = &self.temp_dir {
            config.uploads.temp_dir = Some(dir.clone());
        }
        if *self != Self::default() {
            info!(
                debug = config.debug,
                format = %config.format,
                max_depth = config.max_depth,
                "Runtime overrides applied"
            );
        }
    }
}
