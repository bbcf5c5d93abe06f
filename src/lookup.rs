//! Repository lookups used while rendering.
//!
//! Some field type processors turn stored ids into links (a relation's destination
//! content, a selection root location). Those ids may point at objects that were deleted
//! or that the current user cannot read; [`LookupError::NotFound`] and
//! [`LookupError::Unauthorized`] let the processor degrade the link instead of failing
//! the whole response.

use crate::values::{ContentInfo, Location};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    NotFound { kind: &'static str, id: u64 },
    Unauthorized { kind: &'static str, id: u64 },
    /// Any other repository failure; never degraded
    Backend(String),
}

impl LookupError {
    /// True for the failures a link may silently degrade on.
    #[must_use]
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            LookupError::NotFound { .. } | LookupError::Unauthorized { .. }
        )
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound { kind, id } => write!(f, "{kind} {id} not found"),
            LookupError::Unauthorized { kind, id } => {
                write!(f, "not authorized to read {kind} {id}")
            }
            LookupError::Backend(msg) => write!(f, "repository error: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Read access to the repository, as seen by the output layer.
pub trait RepositoryLookup: Send + Sync {
    fn load_content_info(&self, id: u64) -> Result<ContentInfo, LookupError>;

    fn load_location(&self, id: u64) -> Result<Location, LookupError>;
}

/// A repository held in memory, for the command line and for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLookup {
    contents: HashMap<u64, ContentInfo>,
    locations: HashMap<u64, Location>,
    forbidden_contents: HashSet<u64>,
    forbidden_locations: HashSet<u64>,
    backend_failure: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RepositoryFixture {
    contents: Vec<ContentInfo>,
    locations: Vec<Location>,
    forbidden_content_ids: Vec<u64>,
    forbidden_location_ids: Vec<u64>,
}

impl InMemoryLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON document with `contents`, `locations`, `forbiddenContentIds`
    /// and `forbiddenLocationIds` arrays.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let fixture: RepositoryFixture = serde_json::from_str(json)?;
        let mut lookup = Self::new();
        for content in fixture.contents {
            lookup = lookup.with_content(content);
        }
        for location in fixture.locations {
            lookup = lookup.with_location(location);
        }
        lookup.forbidden_contents.extend(fixture.forbidden_content_ids);
        lookup.forbidden_locations.extend(fixture.forbidden_location_ids);
        Ok(lookup)
    }

    #[must_use]
    pub fn with_content(mut self, content: ContentInfo) -> Self {
        self.contents.insert(content.id, content);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.insert(location.id, location);
        self
    }

    /// The content exists but reading it is not allowed.
    #[must_use]
    pub fn forbid_content(mut self, id: u64) -> Self {
        self.forbidden_contents.insert(id);
        self
    }

    #[must_use]
    pub fn forbid_location(mut self, id: u64) -> Self {
        self.forbidden_locations.insert(id);
        self
    }

    /// Make every lookup fail with [`LookupError::Backend`].
    #[must_use]
    pub fn failing(mut self, message: &str) -> Self {
        self.backend_failure = Some(message.to_string());
        self
    }

    fn check_backend(&self) -> Result<(), LookupError> {
        match &self.backend_failure {
            Some(msg) => Err(LookupError::Backend(msg.clone())),
            None => Ok(()),
        }
    }
}

impl RepositoryLookup for InMemoryLookup {
    fn load_content_info(&self, id: u64) -> Result<ContentInfo, LookupError> {
        self.check_backend()?;
        if self.forbidden_contents.contains(&id) {
            return Err(LookupError::Unauthorized {
                kind: "content",
                id,
            });
        }
        self.contents
            .get(&id)
            .cloned()
            .ok_or(LookupError::NotFound {
                kind: "content",
                id,
            })
    }

    fn load_location(&self, id: u64) -> Result<Location, LookupError> {
        self.check_backend()?;
        if self.forbidden_locations.contains(&id) {
            return Err(LookupError::Unauthorized {
                kind: "location",
                id,
            });
        }
        self.locations
            .get(&id)
            .cloned()
            .ok_or(LookupError::NotFound {
                kind: "location",
                id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_outcomes() {
        let lookup = InMemoryLookup::new()
            .with_content(ContentInfo {
                id: 1,
                ..Default::default()
            })
            .with_content(ContentInfo {
                id: 2,
                ..Default::default()
            })
            .forbid_content(2);

        assert_eq!(lookup.load_content_info(1).unwrap().id, 1);
        let forbidden = lookup.load_content_info(2).unwrap_err();
        assert!(matches!(forbidden, LookupError::Unauthorized { .. }));
        assert!(forbidden.is_degradable());
        let missing = lookup.load_location(9).unwrap_err();
        assert!(matches!(missing, LookupError::NotFound { .. }));
        assert!(missing.is_degradable());

        let broken = lookup.failing("db down");
        let err = broken.load_content_info(1).unwrap_err();
        assert_eq!(err, LookupError::Backend("db down".to_string()));
        assert!(!err.is_degradable());
    }

    #[test]
    fn test_from_json_fixture() {
        let lookup = InMemoryLookup::from_json_str(
            r#"{
                "contents": [{"id": 4, "name": "Home"}],
                "locations": [{"id": 2, "pathString": "/1/2/"}],
                "forbiddenLocationIds": [5]
            }"#,
        )
        .unwrap();
        assert_eq!(lookup.load_content_info(4).unwrap().name, "Home");
        assert_eq!(lookup.load_location(2).unwrap().path_param(), "1/2");
        assert!(matches!(
            lookup.load_location(5),
            Err(LookupError::Unauthorized { .. })
        ));
    }
}
