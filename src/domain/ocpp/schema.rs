//! Action schemas
//!
//! An [`ActionSchema`] is plain immutable data: which action, for which
//! protocol generation, in which direction, and the ordered table of required
//! fields. All schemas come out of the same factory ([`ActionSchema::build`])
//! so validation behaves identically across versions.

use std::fmt;

use serde_json::{Map, Value};

use super::field::{describe, RequiredFields};
use super::version::OcppVersion;
use crate::domain::error::{json_type_name, ValidationError};

/// Which side of an exchange a schema describes, tied to its OCPP-J frame type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// CALL payload (frame type 2).
    Request,
    /// CALLRESULT payload (frame type 3).
    Response,
}

impl MessageKind {
    pub fn frame_type(&self) -> u64 {
        match self {
            Self::Request => 2,
            Self::Response => 3,
        }
    }

    pub fn from_frame_type(frame_type: u64) -> Option<Self> {
        match frame_type {
            2 => Some(Self::Request),
            3 => Some(Self::Response),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("request"),
            Self::Response => f.write_str("response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSchema {
    action: &'static str,
    version: OcppVersion,
    kind: MessageKind,
    required: RequiredFields,
}

impl ActionSchema {
    /// Bind an action name and its required-field contract into a schema.
    pub fn build(
        kind: MessageKind,
        version: OcppVersion,
        action: &'static str,
        required: RequiredFields,
    ) -> Self {
        Self {
            action,
            version,
            kind,
            required,
        }
    }

    pub fn action(&self) -> &'static str {
        self.action
    }

    pub fn version(&self) -> OcppVersion {
        self.version
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn required_fields(&self) -> RequiredFields {
        self.required
    }

    /// Check the payload against the required-field table.
    ///
    /// Fields are checked in declaration order and the first missing or
    /// mistyped field aborts validation.
    pub fn validate(&self, payload: &Map<String, Value>) -> Result<(), ValidationError> {
        for (name, accepted) in self.required {
            let value = payload
                .get(*name)
                .ok_or_else(|| ValidationError::MissingField((*name).to_string()))?;

            if !accepted.iter().any(|t| t.matches(value)) {
                return Err(ValidationError::TypeMismatch {
                    field: (*name).to_string(),
                    expected: describe(accepted),
                    actual: json_type_name(value),
                });
            }
        }
        Ok(())
    }
}
