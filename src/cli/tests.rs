//! Unit tests for CLI commands

use crate::cli::{format_response, format_routes, Cli, Commands};
use crate::dispatcher::{HeaderVec, RenderedResponse};
use crate::field_type::{Direction, HashTarget};
use crate::generator::Format;
use crate::route_table::RouteTable;
use clap::Parser;
use std::sync::Arc;

#[test]
fn test_render_command_parses() {
    let cli = Cli::try_parse_from([
        "rest-visitors",
        "render",
        "--value",
        "section.json",
        "--format",
        "xml",
        "--debug",
    ])
    .unwrap();

    match cli.command {
        Commands::Render {
            value,
            format,
            config,
            repository,
            debug,
        } => {
            assert_eq!(value.to_string_lossy(), "section.json");
            assert_eq!(format, Some(Format::Xml));
            assert!(config.is_none());
            assert!(repository.is_none());
            assert!(debug);
        }
        _ => panic!("Expected Render command"),
    }
}

#[test]
fn test_field_command_defaults() {
    let cli = Cli::try_parse_from([
        "rest-visitors",
        "field",
        "--field-type",
        "author",
        "--hash",
        "{}",
    ])
    .unwrap();

    match cli.command {
        Commands::Field {
            field_type,
            target,
            direction,
            hash,
            ..
        } => {
            assert_eq!(field_type, "author");
            assert_eq!(target, HashTarget::Value);
            assert_eq!(direction, Direction::Out);
            assert_eq!(hash, "{}");
        }
        _ => panic!("Expected Field command"),
    }
}

#[test]
fn test_field_command_accepts_aliases() {
    let cli = Cli::try_parse_from([
        "rest-visitors",
        "field",
        "--field-type",
        "relation",
        "--target",
        "settings",
        "--direction",
        "pre",
        "--hash",
        "{}",
    ])
    .unwrap();

    match cli.command {
        Commands::Field {
            target, direction, ..
        } => {
            assert_eq!(target, HashTarget::FieldSettings);
            assert_eq!(direction, Direction::In);
        }
        _ => panic!("Expected Field command"),
    }
}

#[test]
fn test_invalid_format_rejected() {
    let result = Cli::try_parse_from([
        "rest-visitors",
        "render",
        "--value",
        "v.json",
        "--format",
        "yaml",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_routes_command_parses() {
    let cli = Cli::try_parse_from(["rest-visitors", "routes", "--options"]).unwrap();
    match cli.command {
        Commands::Routes { config, options } => {
            assert!(config.is_none());
            assert!(options);
        }
        _ => panic!("Expected Routes command"),
    }
}

#[test]
fn test_format_response() {
    let mut headers = HeaderVec::new();
    headers.push((Arc::from("Location"), "/api/x".to_string()));
    let response = RenderedResponse {
        status: 201,
        headers,
        body: "{}".to_string(),
    };
    assert_eq!(
        format_response(&response),
        "HTTP/1.1 201 Created\nLocation: /api/x\n\n{}"
    );

    let empty = RenderedResponse {
        status: 204,
        headers: HeaderVec::new(),
        body: String::new(),
    };
    assert_eq!(format_response(&empty), "HTTP/1.1 204 No Content\n");
}

#[test]
fn test_format_routes_lists_every_route() {
    let table = RouteTable::builtin().unwrap();
    let output = format_routes(&table);
    assert_eq!(output.lines().count(), table.routes.len());
    assert!(output
        .lines()
        .any(|line| line.starts_with("load_section ") && line.ends_with("/api/rest/v2/content/sections/{sectionId}")));

    let with_options = format_routes(&table.clone().with_options_routes());
    assert!(with_options.contains("options.load_section"));
    assert!(with_options.contains("OPTIONS"));
}
