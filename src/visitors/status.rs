//! Visitors for response wrappers: they set status and headers and render at most the
//! value they wrap.

use super::links::self_href;
use super::unexpected;
use crate::dispatcher::{DispatchError, RenderError, ValueObjectVisitor, Visit};
use crate::values::DomainValue;

/// `Allow` header for an OPTIONS request; no body.
pub struct OptionsVisitor;

impl ValueObjectVisitor for OptionsVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::Options(options) = value else {
            return Err(unexpected("OptionsVisitor", value));
        };
        visit.set_header("Allow", options.allowed_methods.join(","));
        visit.set_header("Content-Length", "0");
        Ok(())
    }
}

/// Renders the wrapped value with status 201 and a `Location` header pointing at it.
pub struct CreatedVisitor;

impl ValueObjectVisitor for CreatedVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::Created { value: inner } = value else {
            return Err(unexpected("CreatedVisitor", value));
        };
        let location = self_href(visit.router(), inner)?
            .ok_or(DispatchError::NoSelfLink(inner.kind()))?;

        visit.set_status(201);
        visit.set_header("Location", location);
        visit.dispatch(inner)
    }
}

pub struct NoContentVisitor;

impl ValueObjectVisitor for NoContentVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        if !matches!(value, DomainValue::NoContent) {
            return Err(unexpected("NoContentVisitor", value));
        }
        visit.set_status(204);
        Ok(())
    }
}

/// 204 and an expired session cookie.
pub struct DeletedSessionVisitor;

impl ValueObjectVisitor for DeletedSessionVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        if !matches!(value, DomainValue::DeletedSession) {
            return Err(unexpected("DeletedSessionVisitor", value));
        }
        let cookie_name = &visit.config().session.cookie_name;
        visit.set_status(204);
        visit.set_header(
            "Set-Cookie",
            format!("{cookie_name}=deleted; Max-Age=0; path=/"),
        );
        Ok(())
    }
}

pub struct ConflictVisitor;

impl ValueObjectVisitor for ConflictVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        if !matches!(value, DomainValue::Conflict) {
            return Err(unexpected("ConflictVisitor", value));
        }
        visit.set_status(409);
        Ok(())
    }
}

/// Redirect to a literal URI with a fixed status (301, 303 or 307).
pub struct RedirectVisitor {
    status: u16,
}

impl RedirectVisitor {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

impl ValueObjectVisitor for RedirectVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let uri = match value {
            DomainValue::TemporaryRedirect { uri }
            | DomainValue::PermanentRedirect { uri }
            | DomainValue::SeeOther { uri } => uri,
            _ => return Err(unexpected("RedirectVisitor", value)),
        };
        visit.set_status(self.status);
        visit.set_header("Location", uri.as_str());
        Ok(())
    }
}

/// Temporary redirect to a named route.
pub struct ResourceRedirectVisitor;

impl ValueObjectVisitor for ResourceRedirectVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::ResourceRedirect { route, params } = value else {
            return Err(unexpected("ResourceRedirectVisitor", value));
        };
        let params: Vec<(&str, String)> = params
            .iter()
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect();
        let location = visit.href(route, &params)?;
        visit.set_status(307);
        visit.set_header("Location", location);
        Ok(())
    }
}

/// Cache headers around the wrapped value.
pub struct CachedVisitor;

impl ValueObjectVisitor for CachedVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::Cached(cached) = value else {
            return Err(unexpected("CachedVisitor", value));
        };
        visit.set_header("Cache-Control", format!("public, max-age={}", cached.max_age));
        visit.set_header("Vary", "Accept");
        if let Some(location_id) = cached.location_id {
            visit.set_header("X-Location-Id", location_id.to_string());
        }
        visit.dispatch(&cached.value)
    }
}
