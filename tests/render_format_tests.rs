//! Tests for rendering the same values as JSON and XML
//!
//! # Test Coverage
//!
//! - Media type suffixes (`+json` / `+xml`) in attributes and `Content-Type`
//! - XML shape: attributes on start tags, lists without wrappers, field hashes as
//!   nested `<value key="...">` elements, escaping
//! - JSON shape: `_`-prefixed attributes, `#text` for attributed values, arrays for lists
//! - The configured default format and vendor

use rest_visitors::config::ServiceConfig;
use rest_visitors::generator::Format;
use rest_visitors::lookup::InMemoryLookup;
use rest_visitors::values::{DomainValue, ExceptionKind, Section, SectionList};

mod common;

use common::fixtures;
use common::harness::{harness, harness_with, json_body};

fn section_list() -> DomainValue {
    DomainValue::SectionList(SectionList {
        path: String::new(),
        sections: vec![fixtures::section(1), fixtures::section(2)],
    })
}

#[test]
fn test_section_xml() {
    let h = harness();
    let response = h
        .layer
        .render(&DomainValue::Section(fixtures::section(3)), Format::Xml)
        .unwrap();
    assert_eq!(
        response.content_type(),
        Some("application/vnd.cms.api.Section+xml")
    );
    assert_eq!(
        response.body,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <Section media-type=\"application/vnd.cms.api.Section+xml\" \
         href=\"/api/rest/v2/content/sections/3\">\
         <sectionId>3</sectionId>\
         <identifier>section_3</identifier>\
         <name>Section 3</name>\
         </Section>"
    );
}

#[test]
fn test_section_json() {
    let h = harness();
    let response = h
        .layer
        .render(&DomainValue::Section(fixtures::section(3)), Format::Json)
        .unwrap();
    assert_eq!(
        response.body,
        "{\"Section\":{\
         \"_media-type\":\"application/vnd.cms.api.Section+json\",\
         \"_href\":\"/api/rest/v2/content/sections/3\",\
         \"sectionId\":3,\
         \"identifier\":\"section_3\",\
         \"name\":\"Section 3\"}}"
    );
}

#[test]
fn test_list_has_no_wrapper_in_xml_and_is_an_array_in_json() {
    let h = harness();

    let xml = h.layer.render(&section_list(), Format::Xml).unwrap().body;
    assert!(xml.contains("<SectionList media-type=\"application/vnd.cms.api.SectionList+xml\" href=\"/api/rest/v2/content/sections\">"));
    assert_eq!(xml.matches("<Section ").count(), 2);
    assert!(!xml.contains("<Sections"));

    let json = json_body(&h.layer.render(&section_list(), Format::Json).unwrap());
    let sections = json["SectionList"]["Section"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[1]["identifier"], "section_2");
}

#[test]
fn test_list_path_overrides_route() {
    let h = harness();
    let list = DomainValue::SectionList(SectionList {
        path: "/api/rest/v2/content/sections?identifier=media".to_string(),
        sections: Vec::new(),
    });
    let json = json_body(&h.layer.render(&list, Format::Json).unwrap());
    assert_eq!(
        json["SectionList"]["_href"],
        "/api/rest/v2/content/sections?identifier=media"
    );
    assert_eq!(json["SectionList"]["Section"], serde_json::json!([]));
}

#[test]
fn test_xml_escaping() {
    let h = harness();
    let section = Section {
        id: 1,
        identifier: "a&b".to_string(),
        name: "<Tom & \"Jerry\">".to_string(),
    };
    let xml = h
        .layer
        .render(&DomainValue::Section(section), Format::Xml)
        .unwrap()
        .body;
    assert!(xml.contains("<identifier>a&amp;b</identifier>"));
    assert!(xml.contains("&lt;Tom &amp;"));
    assert!(!xml.contains("<Tom"));
}

#[test]
fn test_field_hash_in_xml() {
    let lookup = InMemoryLookup::new().with_content(fixtures::content_info(7));
    let h = harness_with(ServiceConfig::default(), lookup);
    let xml = h
        .layer
        .render(&DomainValue::Version(fixtures::version(42, 7)), Format::Xml)
        .unwrap()
        .body;

    assert!(xml.contains("<fieldValue>Hello</fieldValue>"));
    assert!(xml.contains(
        "<fieldValue><value key=\"destinationContentId\">7</value>\
         <value key=\"destinationContentHref\">/api/rest/v2/content/objects/7</value></fieldValue>"
    ));
    // One <field> element per field, no list wrapper.
    assert_eq!(xml.matches("<field>").count(), 2);
}

#[test]
fn test_multilingual_value_attributes() {
    let h = harness();
    let value = DomainValue::Version(fixtures::version(42, 7));

    let xml = h.layer.render(&value, Format::Xml).unwrap().body;
    assert!(xml.contains("<names><value languageCode=\"eng-GB\">Content 42</value></names>"));

    let json = json_body(&h.layer.render(&value, Format::Json).unwrap());
    assert_eq!(
        json["Version"]["VersionInfo"]["names"]["value"][0]["#text"],
        "Content 42"
    );
    assert_eq!(
        json["Version"]["VersionInfo"]["names"]["value"][0]["_languageCode"],
        "eng-GB"
    );
}

#[test]
fn test_exception_xml() {
    let h = harness();
    let response = h
        .layer
        .render(
            &DomainValue::Exception(fixtures::exception(ExceptionKind::NotFound, "gone")),
            Format::Xml,
        )
        .unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(
        response.content_type(),
        Some("application/vnd.cms.api.ErrorMessage+xml")
    );
    assert!(response.body.contains("<errorCode>404</errorCode>"));
    assert!(response.body.contains("<errorMessage>Not Found</errorMessage>"));
}

#[test]
fn test_configured_format_and_vendor() {
    let config = ServiceConfig {
        vendor: "acme".to_string(),
        format: Format::Xml,
        ..ServiceConfig::default()
    };
    let h = harness_with(config, InMemoryLookup::new());
    let response = h
        .layer
        .render_default(&DomainValue::Section(fixtures::section(1)))
        .unwrap();
    assert_eq!(
        response.content_type(),
        Some("application/vnd.acme.api.Section+xml")
    );
    assert!(response.body.starts_with("<?xml"));
}
