use crate::field_type::ProcessorError;
use crate::generator::GeneratorError;
use crate::router::RouteError;
use crate::values::ValueKind;
use std::fmt;

/// Visitor lookup and registration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No visitor is registered for the kind or any of its ancestors
    NoVisitor(ValueKind),
    DuplicateVisitor(ValueKind),
    /// Kinds a complete dispatcher cannot render
    MissingVisitors(Vec<ValueKind>),
    DepthExceeded { max_depth: usize, kind: ValueKind },
    /// A visitor was handed a value it does not render
    UnexpectedValue {
        visitor: &'static str,
        kind: ValueKind,
    },
    /// A wrapped value has no canonical href to point a `Location` header at
    NoSelfLink(ValueKind),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoVisitor(kind) => write!(f, "no visitor registered for {kind}"),
            DispatchError::DuplicateVisitor(kind) => {
                write!(f, "a visitor is already registered for {kind}")
            }
            DispatchError::MissingVisitors(kinds) => {
                let names: Vec<String> = kinds.iter().map(ToString::to_string).collect();
                write!(f, "no visitor registered for: {}", names.join(", "))
            }
            DispatchError::DepthExceeded { max_depth, kind } => write!(
                f,
                "maximum visitor depth {max_depth} exceeded while dispatching {kind}"
            ),
            DispatchError::UnexpectedValue { visitor, kind } => {
                write!(f, "{visitor} cannot render a {kind} value")
            }
            DispatchError::NoSelfLink(kind) => write!(f, "{kind} has no self link"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Anything that can abort a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    Dispatch(DispatchError),
    Generator(GeneratorError),
    Route(RouteError),
    Processor(ProcessorError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Dispatch(e) => write!(f, "dispatch error: {e}"),
            RenderError::Generator(e) => write!(f, "generator error: {e}"),
            RenderError::Route(e) => write!(f, "link generation error: {e}"),
            RenderError::Processor(e) => write!(f, "field type error: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Dispatch(e) => Some(e),
            RenderError::Generator(e) => Some(e),
            RenderError::Route(e) => Some(e),
            RenderError::Processor(e) => Some(e),
        }
    }
}

impl From<DispatchError> for RenderError {
    fn from(e: DispatchError) -> Self {
        RenderError::Dispatch(e)
    }
}

impl From<GeneratorError> for RenderError {
    fn from(e: GeneratorError) -> Self {
        RenderError::Generator(e)
    }
}

impl From<RouteError> for RenderError {
    fn from(e: RouteError) -> Self {
        RenderError::Route(e)
    }
}

impl From<ProcessorError> for RenderError {
    fn from(e: ProcessorError) -> Self {
        RenderError::Processor(e)
    }
}
