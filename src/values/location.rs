//! Locations and sections.

use serde::{Deserialize, Serialize};

/// A node of the content tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub id: u64,
    pub priority: i32,
    pub hidden: bool,
    pub invisible: bool,
    pub parent_location_id: Option<u64>,
    /// Materialised path, e.g. `/1/2/42/`
    pub path_string: String,
    pub depth: u32,
    pub content_id: u64,
    pub remote_id: String,
    pub sort_field: String,
    pub sort_order: String,
    pub children_count: Option<u32>,
}

impl Location {
    /// The `locationPath` route parameter: the path string without its outer slashes.
    #[must_use]
    pub fn path_param(&self) -> String {
        self.path_string.trim_matches('/').to_string()
    }

    /// Path parameter of the parent node, `None` for a root node.
    #[must_use]
    pub fn parent_path_param(&self) -> Option<String> {
        let path = self.path_param();
        path.rfind('/').map(|idx| path[..idx].to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationList {
    /// Self href of the list, supplied by the controller that loaded it
    pub path: String,
    /// Content the locations belong to; links the list when `path` is empty
    pub content_id: Option<u64>,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub id: u64,
    pub identifier: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionList {
    pub path: String,
    pub sections: Vec<Section>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params() {
        let location = Location {
            path_string: "/1/2/42/".to_string(),
            ..Default::default()
        };
        assert_eq!(location.path_param(), "1/2/42");
        assert_eq!(location.parent_path_param().as_deref(), Some("1/2"));

        let root = Location {
            path_string: "/1/".to_string(),
            ..Default::default()
        };
        assert_eq!(root.parent_path_param(), None);
    }
}
