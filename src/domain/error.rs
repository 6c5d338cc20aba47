//! Codec error vocabulary
//!
//! Two error kinds surface from the codec: [`DecodeError`] for anything that
//! goes wrong while turning a wire frame into a validated request, and
//! [`ValidationError`] for payload contract violations. The charging profile
//! normalizer reuses [`ValidationError`] with field-scoped messages.

use serde_json::{Map, Value};
use thiserror::Error;

/// Registry lookup miss: the action is not defined for that protocol version
/// (or the version itself is unknown).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported action '{action}' for protocol '{version}'")]
pub struct UnsupportedAction {
    pub action: String,
    pub version: String,
}

/// A protocol version string that is not one of the negotiated subprotocols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown OCPP protocol version '{0}'")]
pub struct UnknownVersion(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("field '{field}' expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: &'static str,
    },

    #[error("payload must be an object, got {0}")]
    PayloadNotObject(&'static str),

    #[error("response is missing message_id")]
    MissingMessageId,

    #[error("payload could not be serialized: {0}")]
    Serialization(String),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedAction),

    /// Field-scoped rejection, rendered to callers as `{"<field>": "<message>"}`.
    #[error("{field}: {message}")]
    Field { field: String, message: String },
}

impl ValidationError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, when the error is scoped to one.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::MissingField(field) => Some(field.as_str()),
            Self::TypeMismatch { field, .. } | Self::Field { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }

    /// Field-level feedback map, e.g.
    /// `{"chargingRateUnit": "Charging rate unit must be 'A' or 'W'."}`.
    ///
    /// Errors that are not tied to a field are keyed under `non_field_errors`.
    pub fn to_field_map(&self) -> Value {
        let mut map = Map::new();
        let message = match self {
            Self::Field { message, .. } => message.clone(),
            other => other.to_string(),
        };
        let key = self.field_name().unwrap_or("non_field_errors");
        map.insert(key.to_string(), Value::String(message));
        Value::Object(map)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("message must be an OCPP call array")]
    NotAnArray,

    #[error("message is not a Call")]
    NotACall,

    #[error("message is not a CallResult")]
    NotACallResult,

    #[error(transparent)]
    Unsupported(#[from] UnsupportedAction),

    #[error(transparent)]
    Validation(ValidationError),
}

impl From<ValidationError> for DecodeError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Unsupported(unsupported) => Self::Unsupported(unsupported),
            other => Self::Validation(other),
        }
    }
}

/// JSON type name used in type-mismatch messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_map_uses_field_scope() {
        let err = ValidationError::field("chargingRateUnit", "Charging rate unit must be 'A' or 'W'.");
        assert_eq!(err.field_name(), Some("chargingRateUnit"));
        assert_eq!(
            err.to_field_map(),
            json!({"chargingRateUnit": "Charging rate unit must be 'A' or 'W'."})
        );
    }

    #[test]
    fn field_map_falls_back_to_non_field_errors() {
        let map = ValidationError::MissingMessageId.to_field_map();
        assert_eq!(map, json!({"non_field_errors": "response is missing message_id"}));
    }

    #[test]
    fn decode_error_keeps_validation_message() {
        let err: DecodeError = ValidationError::MissingField("chargePointModel".into()).into();
        assert_eq!(err.to_string(), "missing required field 'chargePointModel'");
    }

    #[test]
    fn unsupported_lifts_out_of_validation() {
        let unsupported = UnsupportedAction {
            action: "Foo".into(),
            version: "ocpp1.6".into(),
        };
        let err: DecodeError = ValidationError::from(unsupported.clone()).into();
        assert_eq!(err, DecodeError::Unsupported(unsupported));
        assert_eq!(err.to_string(), "unsupported action 'Foo' for protocol 'ocpp1.6'");
    }

    #[test]
    fn json_type_names() {
        assert_eq!(json_type_name(&json!(1)), "integer");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
