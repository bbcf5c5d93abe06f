use crate::config::{load_config, ServiceConfig};
use crate::dispatcher::RenderedResponse;
use crate::field_type::{Direction, HashTarget};
use crate::generator::Format;
use crate::layer::OutputLayer;
use crate::lookup::{InMemoryLookup, RepositoryLookup};
use crate::route_table::RouteTable;
use crate::runtime_config::RuntimeConfig;
use crate::values::DomainValue;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Command-line interface for the REST output layer
///
/// Renders value objects, dumps the route table and runs single field type
/// processor operations.
#[derive(Parser)]
#[command(name = "rest-visitors")]
#[command(about = "Render repository value objects as hypermedia documents", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a JSON-serialised value object and print the HTTP response
    Render {
        /// File holding the value, e.g. `{"type": "Section", "id": 1, ...}`
        #[arg(long)]
        value: PathBuf,

        /// Output format (json or xml); defaults to the configured one
        #[arg(short, long)]
        format: Option<Format>,

        /// Service configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Repository fixture backing relation links
        #[arg(long)]
        repository: Option<PathBuf>,

        /// Render exception detail
        #[arg(long, default_value_t = false)]
        debug: bool,
    },
    /// Print the route table
    Routes {
        /// Service configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Include the derived OPTIONS routes
        #[arg(long, default_value_t = false)]
        options: bool,
    },
    /// Run one field type processor operation on a hash
    Field {
        /// Field type identifier, e.g. `relation`
        #[arg(long)]
        field_type: String,

        /// value, settings or validator
        #[arg(long, default_value = "value")]
        target: HashTarget,

        /// in (client to internal) or out (internal to client)
        #[arg(long, default_value = "out")]
        direction: Direction,

        /// The hash as JSON
        #[arg(long)]
        hash: String,

        /// Service configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Repository fixture backing relation links
        #[arg(long)]
        repository: Option<PathBuf>,
    },
}

/// Execute a parsed command and write its output to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - A configuration, route or fixture file cannot be read or parsed
/// - The value cannot be rendered
/// - A processor operation fails
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let output = match cli.command {
        Commands::Render {
            value,
            format,
            config,
            repository,
            debug,
        } => {
            let mut service_config = service_config(config.as_deref())?;
            if debug {
                service_config.debug = true;
            }
            let layer = OutputLayer::new(service_config, repository_lookup(repository.as_deref())?)?;
            let value = read_value(&value)?;
            let format = format.unwrap_or(layer.dispatcher().config().format);
            let response = layer
                .render(&value, format)
                .context("Failed to render value")?;
            format_response(&response)
        }
        Commands::Routes { config, options } => {
            let table = service_config(config.as_deref())?.route_table()?;
            let table = if options {
                table.with_options_routes()
            } else {
                table
            };
            format_routes(&table)
        }
        Commands::Field {
            field_type,
            target,
            direction,
            hash,
            config,
            repository,
        } => {
            let hash: Value = serde_json::from_str(&hash).context("--hash is not valid JSON")?;
            let layer = OutputLayer::new(
                service_config(config.as_deref())?,
                repository_lookup(repository.as_deref())?,
            )?;
            let processed = layer
                .registry()
                .process(&field_type, target, direction, hash)
                .with_context(|| format!("'{field_type}' processor failed"))?;
            info!(
                field_type = %field_type,
                uploads = layer.uploads().len(),
                "Field hash processed"
            );
            serde_json::to_string_pretty(&processed)?
        }
    };
    println!("{output}");
    Ok(())
}

/// Configuration file (or defaults) with environment overrides applied.
pub fn service_config(path: Option<&Path>) -> anyhow::Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    RuntimeConfig::from_env().apply(&mut config);
    Ok(config)
}

fn repository_lookup(path: Option<&Path>) -> anyhow::Result<Arc<dyn RepositoryLookup>> {
    let lookup = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read repository fixture: {}", path.display()))?;
            InMemoryLookup::from_json_str(&contents)?
        }
        None => InMemoryLookup::new(),
    };
    Ok(Arc::new(lookup))
}

fn read_value(path: &Path) -> anyhow::Result<DomainValue> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read value: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid value object: {}", path.display()))
}

/// Status line, headers, a blank line and the body.
pub fn format_response(response: &RenderedResponse) -> String {
    let mut out = response.status_line();
    out.push('\n');
    for (name, value) in &response.headers {
        out.push_str(&format!("{name}: {value}\n"));
    }
    if !response.body.is_empty() {
        out.push('\n');
        out.push_str(&response.body);
    }
    out
}

/// One line per route: name, methods and the full path.
pub fn format_routes(table: &RouteTable) -> String {
    let width = table
        .routes
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for route in &table.routes {
        out.push_str(&format!(
            "{:<width$}  {:<14}  {}{}\n",
            route.name,
            route.methods_string(),
            table.base_path,
            route.path_pattern
        ));
    }
    out.trim_end().to_string()
}
