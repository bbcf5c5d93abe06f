use super::unexpected;
use crate::dispatcher::{status_reason, RenderError, ValueObjectVisitor, Visit};
use crate::values::{DomainValue, ExceptionKind};
use tracing::debug;

/// HTTP status an exception kind is reported with.
#[must_use]
pub fn exception_status(kind: ExceptionKind) -> u16 {
    match kind {
        ExceptionKind::BadRequest | ExceptionKind::ContentFieldValidation => 400,
        ExceptionKind::Unauthorized => 401,
        ExceptionKind::Forbidden => 403,
        ExceptionKind::NotFound => 404,
        ExceptionKind::InvalidArgument => 406,
        ExceptionKind::BadState => 409,
        ExceptionKind::Generic => 500,
        ExceptionKind::NotImplemented => 501,
    }
}

/// `ErrorMessage` document for one exception kind.
///
/// The status is fixed when the visitor is built, whatever the exception says. Message,
/// trace, source location and the previous exception are only rendered in debug mode;
/// otherwise the description is the configured generic message.
pub struct ExceptionVisitor {
    status: u16,
    field_details: bool,
}

impl ExceptionVisitor {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            field_details: false,
        }
    }

    #[must_use]
    pub fn for_kind(kind: ExceptionKind) -> Self {
        Self {
            status: exception_status(kind),
            field_details: kind == ExceptionKind::ContentFieldValidation,
        }
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }
}

impl ValueObjectVisitor for ExceptionVisitor {
    fn visit(&self, visit: &mut Visit<'_>, value: &DomainValue) -> Result<(), RenderError> {
        let DomainValue::Exception(exception) = value else {
            return Err(unexpected("ExceptionVisitor", value));
        };
        let config = visit.config();
        let debug_mode = config.debug;
        debug!(
            kind = %exception.kind,
            status = self.status,
            debug_mode,
            "Rendering exception"
        );

        visit.set_status(self.status);
        visit.set_content_type("ErrorMessage");

        let generator = visit.generator();
        generator.start_object_element("ErrorMessage", None)?;
        generator.value_element("errorCode", self.status)?;
        generator.value_element("errorMessage", status_reason(self.status))?;
        if debug_mode {
            generator.value_element("errorDescription", exception.message.as_str())?;
        } else {
            generator.value_element(
                "errorDescription",
                config.generic_error_message.as_str(),
            )?;
        }

        if self.field_details && !exception.field_errors.is_empty() {
            generator.start_hash_element("errorDetails")?;
            generator.start_list("field")?;
            for (field, messages) in &exception.field_errors {
                generator.start_hash_element("field")?;
                generator.attribute("fieldIdentifier", field.as_str())?;
                generator.start_list("errors")?;
                for message in messages {
                    generator.value_element("error", message.as_str())?;
                }
                generator.end_list("errors")?;
                generator.end_hash_element("field")?;
            }
            generator.end_list("field")?;
            generator.end_hash_element("errorDetails")?;
        }

        if debug_mode {
            if let Some(trace) = &exception.trace {
                generator.value_element("trace", trace.as_str())?;
            }
            if let Some(file) = &exception.file {
                generator.value_element("file", file.as_str())?;
            }
            if let Some(line) = exception.line {
                generator.value_element("line", line)?;
            }
            if let Some(previous) = &exception.previous {
                generator.start_object_element("Previous", Some("ErrorMessage"))?;
                visit.dispatch(&DomainValue::Exception((**previous).clone()))?;
                visit.generator().end_object_element("Previous")?;
            }
        }

        visit.generator().end_object_element("ErrorMessage")?;
        Ok(())
    }
}
