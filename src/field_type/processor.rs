use crate::lookup::LookupError;
use crate::router::RouteError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Which hash of a field a processor operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashTarget {
    Value,
    FieldSettings,
    ValidatorConfiguration,
}

impl FromStr for HashTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(HashTarget::Value),
            "settings" | "field-settings" => Ok(HashTarget::FieldSettings),
            "validator" | "validator-configuration" => Ok(HashTarget::ValidatorConfiguration),
            other => Err(format!("unknown hash target '{other}'")),
        }
    }
}

/// `In` converts client hashes to internal ones, `Out` the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" | "pre" => Ok(Direction::In),
            "out" | "post" => Ok(Direction::Out),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    InvalidBase64 { field_type: String, error: String },
    /// The hash does not have the shape the processor expects
    InvalidHash { field_type: String, reason: String },
    /// Writing a decoded upload failed
    Upload(String),
    Lookup(LookupError),
    Route(RouteError),
}

impl fmt::Display for ProcessorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorError::InvalidBase64 { field_type, error } => {
                write!(f, "{field_type}: invalid base64 data: {error}")
            }
            ProcessorError::InvalidHash { field_type, reason } => {
                write!(f, "{field_type}: invalid hash: {reason}")
            }
            ProcessorError::Upload(msg) => write!(f, "failed to store upload: {msg}"),
            ProcessorError::Lookup(e) => write!(f, "{e}"),
            ProcessorError::Route(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ProcessorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessorError::Lookup(e) => Some(e),
            ProcessorError::Route(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LookupError> for ProcessorError {
    fn from(e: LookupError) -> Self {
        ProcessorError::Lookup(e)
    }
}

impl From<RouteError> for ProcessorError {
    fn from(e: RouteError) -> Self {
        ProcessorError::Route(e)
    }
}

/// Converts the hashes of one field type between their REST and internal shapes.
///
/// Every operation defaults to the identity, so a processor only overrides the hashes it
/// cares about.
pub trait FieldTypeProcessor: Send + Sync {
    fn pre_process_value_hash(&self, hash: Value) -> Result<Value, ProcessorError> {
        Ok(hash)
    }

    fn post_process_value_hash(&self, hash: Value) -> Result<Value, ProcessorError> {
        Ok(hash)
    }

    fn pre_process_field_settings_hash(&self, hash: Value) -> Result<Value, ProcessorError> {
        Ok(hash)
    }

    fn post_process_field_settings_hash(&self, hash: Value) -> Result<Value, ProcessorError> {
        Ok(hash)
    }

    fn pre_process_validator_configuration_hash(
        &self,
        hash: Value,
    ) -> Result<Value, ProcessorError> {
        Ok(hash)
    }

    fn post_process_validator_configuration_hash(
        &self,
        hash: Value,
    ) -> Result<Value, ProcessorError> {
        Ok(hash)
    }
}

/// Run the operation selected by `target` and `direction`.
pub fn apply(
    processor: &dyn FieldTypeProcessor,
    target: HashTarget,
    direction: Direction,
    hash: Value,
) -> Result<Value, ProcessorError> {
    match (target, direction) {
        (HashTarget::Value, Direction::In) => processor.pre_process_value_hash(hash),
        (HashTarget::Value, Direction::Out) => processor.post_process_value_hash(hash),
        (HashTarget::FieldSettings, Direction::In) => {
            processor.pre_process_field_settings_hash(hash)
        }
        (HashTarget::FieldSettings, Direction::Out) => {
            processor.post_process_field_settings_hash(hash)
        }
        (HashTarget::ValidatorConfiguration, Direction::In) => {
            processor.pre_process_validator_configuration_hash(hash)
        }
        (HashTarget::ValidatorConfiguration, Direction::Out) => {
            processor.post_process_validator_configuration_hash(hash)
        }
    }
}
