use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Header storage; names are shared `Arc<str>`, values per response.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Status code and headers accumulated by the visitors of one render pass.
///
/// Every write is tagged with the depth of the visitor making it. A write never overrides
/// one made at a shallower depth, so the outermost visitor owns the status and any header
/// it sets, while nested visitors can still fill in what the outer ones left open.
#[derive(Debug, Default)]
pub struct ResponseContext {
    status: Option<(u16, usize)>,
    headers: Vec<(Arc<str>, String, usize)>,
}

impl ResponseContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: u16, depth: usize) {
        match self.status {
            Some((current, owner)) if owner < depth => {
                debug!(
                    status,
                    depth,
                    current,
                    owner_depth = owner,
                    "Status already set by an outer visitor"
                );
            }
            _ => self.status = Some((status, depth)),
        }
    }

    /// Set a header (case-insensitive name).
    pub fn set_header(&mut self, name: &str, value: String, depth: usize) {
        if let Some((_, _, owner)) = self
            .headers
            .iter()
            .find(|(k, _, _)| k.eq_ignore_ascii_case(name))
        {
            if *owner < depth {
                debug!(header = %name, depth, owner_depth = *owner, "Header already set by an outer visitor");
                return;
            }
        }
        self.headers.retain(|(k, _, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value, depth));
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(k, _, _)| !k.eq_ignore_ascii_case(name));
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status.map(|(status, _)| status)
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v, _)| v.as_str())
    }

    #[must_use]
    pub fn into_headers(self) -> HeaderVec {
        self.headers
            .into_iter()
            .map(|(name, value, _)| (name, value))
            .collect()
    }
}

/// The outcome of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub status: u16,
    pub headers: HeaderVec,
    pub body: String,
}

impl RenderedResponse {
    /// Get a header by name (case-insensitive per RFC 7230)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rfind(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// e.g. `HTTP/1.1 201 Created`
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("HTTP/1.1 {} {}", self.status, status_reason(self.status))
    }
}

/// Reason phrase for the status codes the output layer produces.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        303 => "See Other",
        307 => "Temporary Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        406 => "Not Acceptable",
        409 => "Conflict",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        _ => http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outermost_status_wins() {
        let mut response = ResponseContext::new();
        response.set_status(201, 0);
        response.set_status(409, 1);
        assert_eq!(response.status(), Some(201));
    }

    #[test]
    fn test_nested_status_used_when_outer_sets_none() {
        let mut response = ResponseContext::new();
        response.set_status(404, 2);
        response.set_status(403, 1);
        assert_eq!(response.status(), Some(403));
    }

    #[test]
    fn test_same_depth_last_write_wins() {
        let mut response = ResponseContext::new();
        response.set_status(200, 0);
        response.set_status(204, 0);
        assert_eq!(response.status(), Some(204));

        response.set_header("Content-Type", "a".to_string(), 0);
        response.set_header("content-type", "b".to_string(), 0);
        assert_eq!(response.header("CONTENT-TYPE"), Some("b"));
        assert_eq!(response.into_headers().len(), 1);
    }

    #[test]
    fn test_nested_header_does_not_override_outer() {
        let mut response = ResponseContext::new();
        response.set_header("Content-Type", "outer".to_string(), 0);
        response.set_header("Content-Type", "inner".to_string(), 1);
        response.set_header("Accept-Patch", "inner".to_string(), 1);
        assert_eq!(response.header("content-type"), Some("outer"));
        assert_eq!(response.header("accept-patch"), Some("inner"));
    }

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(406), "Not Acceptable");
        assert_eq!(status_reason(418), "I'm a teapot");
        assert_eq!(status_reason(999), "Unknown");
    }
}
