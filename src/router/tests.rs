use super::{RouteError, Router};
use crate::route_table::{RouteMeta, RouteTable};
use http::Method;
use std::collections::BTreeMap;

fn meta(path: &str, requirements: &[(&str, &str)]) -> RouteMeta {
    RouteMeta {
        name: "test".to_string(),
        path_pattern: path.to_string(),
        methods: vec![Method::GET],
        requirements: requirements
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        defaults: BTreeMap::new(),
    }
}

fn builtin() -> Router {
    Router::new(RouteTable::builtin().unwrap()).unwrap()
}

#[test]
fn test_root_path() {
    let (re, params) = Router::path_to_regex("/", &meta("/", &[])).unwrap();
    assert!(re.is_match("/"));
    assert!(!re.is_match("/x"));
    assert!(params.is_empty());
}

#[test]
fn test_parameterized_path() {
    let m = meta("/items/{id}", &[]);
    let (re, params) = Router::path_to_regex("/items/{id}", &m).unwrap();
    assert!(re.is_match("/items/123"));
    assert!(!re.is_match("/items/1/2"));
    assert_eq!(params, vec!["id"]);
}

#[test]
fn test_requirement_becomes_capture_pattern() {
    let m = meta("/locations/{locationPath}/children", &[("locationPath", "[0-9]+(/[0-9]+)*")]);
    let (re, params) = Router::path_to_regex(&m.path_pattern, &m).unwrap();
    let caps = re.captures("/locations/1/2/42/children").unwrap();
    assert_eq!(caps.name("locationPath").unwrap().as_str(), "1/2/42");
    assert!(!re.is_match("/locations/abc/children"));
    assert_eq!(params, vec!["locationPath"]);
}

#[test]
fn test_literal_text_is_escaped() {
    let m = meta("/a.b/{x}", &[]);
    let (re, _) = Router::path_to_regex(&m.path_pattern, &m).unwrap();
    assert!(re.is_match("/a.b/1"));
    assert!(!re.is_match("/aXb/1"));
}

#[test]
fn test_generate_prefixes_base_path() {
    let router = builtin();
    assert_eq!(router.generate("load_root", &[]).unwrap(), "/api/rest/v2/");
    assert_eq!(
        router
            .generate(
                "load_content_in_version",
                &[("contentId", "4".to_string()), ("versionNumber", "2".to_string())]
            )
            .unwrap(),
        "/api/rest/v2/content/objects/4/versions/2"
    );
}

#[test]
fn test_generate_percent_encodes_but_keeps_slash() {
    let table = RouteTable::from_yaml_str(
        "base_path: /api\nroutes:\n  - {name: tag, path: '/tags/{tag}', methods: [GET]}\n",
    )
    .unwrap();
    let router = Router::new(table).unwrap();
    assert_eq!(
        router.generate("tag", &[("tag", "a b/c&d".to_string())]).unwrap(),
        "/api/tags/a%20b/c%26d"
    );
}

#[test]
fn test_generate_appends_extra_params_as_query() {
    let router = builtin();
    let href = router
        .generate(
            "load_location_children",
            &[
                ("locationPath", "1/2".to_string()),
                ("offset", "10".to_string()),
                ("sort key", "a&b".to_string()),
            ],
        )
        .unwrap();
    assert_eq!(
        href,
        "/api/rest/v2/content/locations/1/2/children?offset=10&sort%20key=a%26b"
    );
}

#[test]
fn test_generate_errors() {
    let router = builtin();
    assert_eq!(
        router.generate("no_such_route", &[]),
        Err(RouteError::UnknownRoute("no_such_route".to_string()))
    );
    assert!(matches!(
        router.generate("load_content", &[]),
        Err(RouteError::MissingParameter { .. })
    ));
    assert!(matches!(
        router.generate("load_content", &[("contentId", "abc".to_string())]),
        Err(RouteError::InvalidParameter { .. })
    ));
    assert!(matches!(
        router.generate("load_image_variation", &[
            ("imageId", "12".to_string()),
            ("variationIdentifier", "small".to_string())
        ]),
        Err(RouteError::InvalidParameter { .. })
    ));
}

#[test]
fn test_generate_uses_defaults() {
    let mut route = meta("/feeds/{format}", &[]);
    route.name = "feed".to_string();
    route.defaults.insert("format".to_string(), "atom".to_string());
    let router = Router::new(RouteTable {
        base_path: String::new(),
        routes: vec![route],
    })
    .unwrap();
    assert_eq!(router.generate("feed", &[]).unwrap(), "/feeds/atom");
}

#[test]
fn test_invalid_requirement_is_rejected() {
    let route = meta("/x/{id}", &[("id", "([0-9")]);
    assert!(matches!(
        Router::new(RouteTable {
            base_path: String::new(),
            routes: vec![route],
        }),
        Err(RouteError::InvalidPattern { .. })
    ));
}

#[test]
fn test_route_matches_method_and_path() {
    let router = builtin();
    let m = router
        .route(&Method::PATCH, "/api/rest/v2/content/locations/1/2/42?x=1")
        .unwrap();
    assert_eq!(m.route.name, "update_location");
    assert_eq!(m.get_path_param("locationPath"), Some("1/2/42"));

    assert!(router.route(&Method::PUT, "/api/rest/v2/content/sections/1").is_none());
    assert!(router.route(&Method::GET, "/api/rest/v2/nowhere").is_none());
}

#[test]
fn test_allowed_methods() {
    let router = builtin();
    assert_eq!(
        router.allowed_methods("/api/rest/v2/content/objects/12"),
        vec![Method::GET, Method::PATCH, Method::DELETE]
    );
    assert_eq!(
        router.allowed_methods("/api/rest/v2/content/sections"),
        vec![Method::GET]
    );
    assert!(router.allowed_methods("/elsewhere").is_empty());
}

#[test]
fn test_options_routes_are_routable() {
    let router = Router::new(RouteTable::builtin().unwrap().with_options_routes()).unwrap();
    let m = router
        .route(&Method::OPTIONS, "/api/rest/v2/content/sections/3")
        .unwrap();
    assert_eq!(m.route.name, "options.load_section");
    assert_eq!(
        m.route.defaults.get("allowed_methods").map(String::as_str),
        Some("GET,PATCH")
    );
}

#[test]
fn test_require_routes_reports_every_missing_name() {
    let router = builtin();
    assert_eq!(router.require_routes(&["load_content", "load_section"]), Ok(()));
    assert_eq!(
        router.require_routes(&["load_content", "nope", "gone"]),
        Err(RouteError::MissingRoutes(vec![
            "nope".to_string(),
            "gone".to_string()
        ]))
    );
}
