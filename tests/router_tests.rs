//! Tests for route tables loaded from configuration
//!
//! # Test Coverage
//!
//! - The bundled table: every route compiles, links round-trip through matching
//! - Custom route files referenced from the service configuration
//! - Layers refuse route tables that lack routes they link to
//! - OPTIONS routes and the methods allowed on a path
//!
//! # Test Strategy
//!
//! Route files and configurations are written to temporary files and loaded the way the
//! binary loads them, then exercised through the [`Router`] or a full [`OutputLayer`].

use http::Method;
use rest_visitors::config::load_config;
use rest_visitors::generator::Format;
use rest_visitors::layer::OutputLayer;
use rest_visitors::lookup::InMemoryLookup;
use rest_visitors::route_table::{load_routes, RouteTable};
use rest_visitors::router::Router;
use rest_visitors::values::DomainValue;
use std::sync::Arc;

mod common;

use common::fixtures;
use common::temp_files::{cleanup_temp_files, create_temp_yaml};

const CUSTOM_ROUTES: &str = r#"
base_path: /cms/v3/
routes:
  - name: load_section
    path: /sections/{sectionId}
    methods: [GET]
    requirements: { sectionId: '\d+' }
  - name: update_section
    path: /sections/{sectionId}
    methods: [PATCH, DELETE]
    requirements: { sectionId: '\d+' }
"#;

#[test]
fn test_builtin_links_route_back() {
    let router = Router::new(RouteTable::builtin().unwrap()).unwrap();

    let href = router
        .generate("load_content", &[("contentId", "42".to_string())])
        .unwrap();
    let matched = router.route(&Method::GET, &href).unwrap();
    assert_eq!(matched.route.name, "load_content");
    assert_eq!(matched.get_path_param("contentId"), Some("42"));

    let href = router
        .generate(
            "load_image_variation",
            &[
                ("imageId", "12-34-5".to_string()),
                ("variationIdentifier", "small".to_string()),
            ],
        )
        .unwrap();
    assert_eq!(
        href,
        "/api/rest/v2/content/binary/images/12-34-5/variations/small"
    );
    assert!(router
        .generate(
            "load_image_variation",
            &[
                ("imageId", "12".to_string()),
                ("variationIdentifier", "small".to_string()),
            ],
        )
        .is_err());
}

const BUILTIN_ROUTES: &str = include_str!("../config/routes.yaml");

#[test]
fn test_custom_route_file_from_config() {
    let routes = create_temp_yaml(
        &BUILTIN_ROUTES.replace("base_path: /api/rest/v2", "base_path: /cms/v3/"),
    );
    let config = create_temp_yaml(&format!("routes: {}\n", routes.display()));

    let config_loaded = load_config(&config).unwrap();
    let layer = OutputLayer::new(config_loaded, Arc::new(InMemoryLookup::new())).unwrap();
    assert_eq!(layer.router().base_path(), "/cms/v3");

    let response = layer
        .render(&DomainValue::Section(fixtures::section(5)), Format::Json)
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["Section"]["_href"], "/cms/v3/content/sections/5");

    cleanup_temp_files(&[routes, config]);
}

#[test]
fn test_layer_rejects_table_missing_linked_routes() {
    let routes = create_temp_yaml(CUSTOM_ROUTES);
    let config = create_temp_yaml(&format!("routes: {}\n", routes.display()));

    let config_loaded = load_config(&config).unwrap();
    let err = OutputLayer::new(config_loaded, Arc::new(InMemoryLookup::new()))
        .err()
        .unwrap();
    let message = format!("{err:#}");
    assert!(message.contains("missing routes"));
    assert!(message.contains("load_content"));
    assert!(message.contains("load_location"));
    assert!(!message.contains("load_section,"));

    cleanup_temp_files(&[routes, config]);
}

#[test]
fn test_allowed_methods_and_options_routes() {
    let routes = create_temp_yaml(CUSTOM_ROUTES);
    let table = load_routes(&routes).unwrap().with_options_routes();
    let router = Router::new(table).unwrap();

    assert_eq!(
        router.allowed_methods("/cms/v3/sections/5"),
        vec![Method::GET, Method::PATCH, Method::DELETE, Method::OPTIONS]
    );
    assert!(router.allowed_methods("/cms/v3/sections/abc").is_empty());

    let matched = router.route(&Method::OPTIONS, "/cms/v3/sections/5").unwrap();
    assert_eq!(matched.route.name, "options.load_section");
    assert_eq!(
        matched
            .route
            .defaults
            .get("allowed_methods")
            .map(String::as_str),
        Some("GET,PATCH,DELETE")
    );

    cleanup_temp_files(&[routes]);
}

#[test]
fn test_invalid_route_files_are_rejected() {
    let duplicate = create_temp_yaml(
        "routes:\n  - { name: a, path: /a, methods: [GET] }\n  - { name: a, path: /b, methods: [GET] }\n",
    );
    let err = load_routes(&duplicate).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate route name 'a'"));

    let bad_requirement = create_temp_yaml(
        "routes:\n  - { name: a, path: '/a/{id}', methods: [GET], requirements: { id: '(' } }\n",
    );
    let table = load_routes(&bad_requirement).unwrap();
    assert!(Router::new(table).is_err());

    cleanup_temp_files(&[duplicate, bad_requirement]);
}
