//! Tests for the `rest-visitors` binary
//!
//! # Test Coverage
//!
//! - `render`: a value file rendered as JSON and XML, printed as an HTTP response
//! - `render --debug`: exception detail only on request
//! - `routes`: the bundled table, with and without derived OPTIONS routes
//! - `field`: one processor operation on a hash
//! - Failures exit non-zero
//!
//! # Test Strategy
//!
//! Runs the compiled binary with temporary input files and inspects stdout. Logging goes
//! to stderr, so stdout only holds command output.

use std::process::{Command, Output};

mod common;

use common::temp_files::{cleanup_temp_files, create_temp_json, create_temp_yaml};

const SECTION: &str = r#"{"type": "Section", "id": 3, "identifier": "media", "name": "Media"}"#;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rest-visitors"))
        .args(args)
        .env_remove("RESTV_DEBUG")
        .env_remove("RESTV_FORMAT")
        .env("RESTV_LOG_LEVEL", "warn")
        .output()
        .expect("failed to run rest-visitors")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_render_json() {
    let value = create_temp_json(SECTION);
    let out = stdout(&run(&["render", "--value", value.to_str().unwrap()]));

    assert!(out.starts_with("HTTP/1.1 200 OK"));
    assert!(out.contains("application/vnd.cms.api.Section+json"));
    assert!(out.contains("\"_href\":\"/api/rest/v2/content/sections/3\""));
    cleanup_temp_files(&[value]);
}

#[test]
fn test_render_xml_with_config() {
    let value = create_temp_json(SECTION);
    let config = create_temp_yaml("vendor: acme\n");
    let out = stdout(&run(&[
        "render",
        "--value",
        value.to_str().unwrap(),
        "--format",
        "xml",
        "--config",
        config.to_str().unwrap(),
    ]));

    assert!(out.contains("application/vnd.acme.api.Section+xml"));
    assert!(out.contains("<identifier>media</identifier>"));
    cleanup_temp_files(&[value, config]);
}

#[test]
fn test_render_exception_debug_flag() {
    let value = create_temp_json(
        r#"{"type": "Exception", "kind": "NotFound", "message": "Section 9 is gone"}"#,
    );
    let path = value.to_str().unwrap();

    let plain = stdout(&run(&["render", "--value", path]));
    assert!(plain.starts_with("HTTP/1.1 404 Not Found"));
    assert!(!plain.contains("Section 9 is gone"));

    let debug = stdout(&run(&["render", "--value", path, "--debug"]));
    assert!(debug.contains("Section 9 is gone"));
    cleanup_temp_files(&[value]);
}

#[test]
fn test_routes() {
    let out = stdout(&run(&["routes"]));
    assert!(out.contains("load_section"));
    assert!(out.contains("/api/rest/v2/content/sections/{sectionId}"));
    assert!(!out.contains("options."));

    let with_options = stdout(&run(&["routes", "--options"]));
    assert!(with_options.contains("options.load_section"));
    assert!(with_options.contains("OPTIONS"));
}

#[test]
fn test_field_settings_out() {
    let out = stdout(&run(&[
        "field",
        "--field-type",
        "author",
        "--target",
        "settings",
        "--hash",
        r#"{"defaultAuthor": 1}"#,
    ]));
    assert!(out.contains("DEFAULT_CURRENT_USER"));
}

#[test]
fn test_failures_exit_non_zero() {
    let invalid_hash = run(&["field", "--field-type", "author", "--hash", "{not json"]);
    assert!(!invalid_hash.status.success());

    let missing = run(&["render", "--value", "/nonexistent/restv/value.json"]);
    assert!(!missing.status.success());

    let bad_format = run(&["render", "--value", "v.json", "--format", "yaml"]);
    assert!(!bad_format.status.success());
}
