//! Service configuration loaded from YAML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a working
//! configuration:
//!
//! ```yaml
//! vendor: cms
//! format: json
//! debug: false
//! max_depth: 64
//! routes: config/routes.yaml
//! uploads:
//!   temp_dir: /var/tmp
//!   prefix: restv_upload_
//! binary:
//!   host_prefix: https://cdn.example.com
//! image:
//!   variations: [original, small, medium, large]
//! session:
//!   cookie_name: restv_session
//! ```

use crate::generator::Format;
use crate::route_table::{load_routes, RouteTable};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_GENERIC_ERROR_MESSAGE: &str =
    "An error has occurred. Please try again later or contact your Administrator.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Vendor segment of media types: `application/vnd.<vendor>.api.<Name>+<format>`
    pub vendor: String,
    pub format: Format,
    /// Render exception messages, traces and nested exceptions
    pub debug: bool,
    /// Maximum nesting of visitor dispatch in one render pass
    pub max_depth: usize,
    /// Replaces exception messages when `debug` is off
    pub generic_error_message: String,
    /// Route file; the bundled table is used when unset
    pub routes: Option<PathBuf>,
    pub uploads: UploadConfig,
    pub binary: BinaryConfig,
    pub image: ImageConfig,
    pub session: SessionConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            vendor: "cms".to_string(),
            format: Format::Json,
            debug: false,
            max_depth: 64,
            generic_error_message: DEFAULT_GENERIC_ERROR_MESSAGE.to_string(),
            routes: None,
            uploads: UploadConfig::default(),
            binary: BinaryConfig::default(),
            image: ImageConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory for decoded uploads; the system temp dir when unset
    pub temp_dir: Option<PathBuf>,
    pub prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            prefix: "restv_upload_".to_string(),
        }
    }
}

impl UploadConfig {
    #[must_use]
    pub fn resolved_temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryConfig {
    /// Prepended to stored binary file URIs
    pub host_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub variations: Vec<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            variations: ["original", "small", "medium", "large"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "restv_session".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ServiceConfig =
            serde_yaml::from_str(yaml).context("Failed to parse service config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.vendor.is_empty() || !self.vendor.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.') {
            anyhow::bail!("invalid vendor '{}': expected [A-Za-z0-9.-]+", self.vendor);
        }
        if self.max_depth == 0 {
            anyhow::bail!("max_depth must be at least 1");
        }
        Ok(())
    }

    /// The configured route table, or the bundled one.
    pub fn route_table(&self) -> anyhow::Result<RouteTable> {
        match &self.routes {
            Some(path) => load_routes(path),
            None => RouteTable::builtin().context("bundled route table is invalid"),
        }
    }
}

/// Load the service configuration from a YAML file.
pub fn load_config(path: &Path) -> anyhow::Result<ServiceConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read service config: {}", path.display()))?;
    let config = ServiceConfig::from_yaml_str(&contents)
        .with_context(|| format!("Invalid service config: {}", path.display()))?;
    info!(
        path = %path.display(),
        vendor = %config.vendor,
        format = %config.format,
        debug = config.debug,
        max_depth = config.max_depth,
        "Service config loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ServiceConfig::from_yaml_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.vendor, "cms");
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.uploads.prefix, "restv_upload_");
        assert_eq!(config.image.variations.len(), 4);
        assert_eq!(config.session.cookie_name, "restv_session");
    }

    #[test]
    fn test_partial_config() {
        let config = ServiceConfig::from_yaml_str(
            "vendor: acme\nformat: xml\ndebug: true\nbinary:\n  host_prefix: https://cdn.test\n",
        )
        .unwrap();
        assert_eq!(config.vendor, "acme");
        assert_eq!(config.format, Format::Xml);
        assert!(config.debug);
        assert_eq!(config.binary.host_prefix, "https://cdn.test");
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(ServiceConfig::from_yaml_str("vendor: 'a b'").is_err());
        assert!(ServiceConfig::from_yaml_str("max_depth: 0").is_err());
        assert!(ServiceConfig::from_yaml_str("format: yaml").is_err());
    }

    #[test]
    fn test_load_config_and_routes() {
        let dir = tempfile::tempdir().unwrap();
        let routes = dir.path().join("routes.yaml");
        std::fs::write(&routes, "routes:\n  - {name: a, path: /a, methods: [GET]}\n").unwrap();
        let config_path = dir.path().join("service.yaml");
        std::fs::write(&config_path, format!("routes: {}\n", routes.display())).unwrap();

        let config = load_config(&config_path).unwrap();
        let table = config.route_table().unwrap();
        assert_eq!(table.routes.len(), 1);

        assert!(ServiceConfig::default().route_table().unwrap().get("load_root").is_some());
    }
}
