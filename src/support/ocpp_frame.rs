//! OCPP-J message framing
//!
//! The envelope is identical across OCPP 1.6, 2.0.1 and 2.1:
//!
//! - **Call**       `[2, "<uniqueId>", "<action>", {<payload>}]`
//! - **CallResult** `[3, "<uniqueId>", {<payload>}]`
//!
//! CallError frames (type 4) are not handled here; the transport layer owns
//! error replies.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::error::DecodeError;
use crate::domain::ocpp::MessageKind;

// ── OcppFrame ──────────────────────────────────────────────────

/// A parsed OCPP-J frame (version-agnostic transport envelope).
#[derive(Debug, Clone, PartialEq)]
pub enum OcppFrame {
    /// `[2, uniqueId, action, payload]`
    Call {
        unique_id: String,
        action: String,
        payload: Value,
    },
    /// `[3, uniqueId, payload]`
    CallResult { unique_id: String, payload: Value },
}

impl OcppFrame {
    // ── Parsing ────────────────────────────────────────────

    /// Parse raw JSON text into an `OcppFrame`.
    pub fn parse(text: &str) -> Result<Self, FrameError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| FrameError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }

    /// Interpret an already-parsed JSON value as a frame.
    ///
    /// Frames need at least three elements. Ids and actions that are not JSON
    /// strings are coerced to their JSON text; a Call without a payload gets
    /// an empty object.
    pub fn from_value(value: Value) -> Result<Self, FrameError> {
        let items = match value {
            Value::Array(items) if items.len() >= 3 => items,
            _ => return Err(FrameError::NotAnArray),
        };

        match frame_type(&items[0]).and_then(MessageKind::from_frame_type) {
            Some(MessageKind::Request) => Ok(Self::Call {
                unique_id: coerce_string(&items[1]),
                action: coerce_string(&items[2]),
                payload: items
                    .get(3)
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new())),
            }),
            Some(MessageKind::Response) => Ok(Self::CallResult {
                unique_id: coerce_string(&items[1]),
                payload: items[2].clone(),
            }),
            _ => Err(FrameError::UnknownMessageType(items[0].to_string())),
        }
    }

    // ── Serialization ──────────────────────────────────────

    pub fn to_value(&self) -> Value {
        match self {
            Self::Call {
                unique_id,
                action,
                payload,
            } => Value::Array(vec![
                Value::from(MessageKind::Request.frame_type()),
                Value::String(unique_id.clone()),
                Value::String(action.clone()),
                payload.clone(),
            ]),
            Self::CallResult { unique_id, payload } => Value::Array(vec![
                Value::from(MessageKind::Response.frame_type()),
                Value::String(unique_id.clone()),
                payload.clone(),
            ]),
        }
    }

    /// Serialize this frame to compact JSON text.
    pub fn serialize(&self) -> String {
        self.to_value().to_string()
    }

    // ── Helpers ────────────────────────────────────────────

    /// Get the unique message ID.
    pub fn unique_id(&self) -> &str {
        match self {
            Self::Call { unique_id, .. } | Self::CallResult { unique_id, .. } => unique_id,
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Call { .. } => MessageKind::Request,
            Self::CallResult { .. } => MessageKind::Response,
        }
    }

    /// Returns `true` if this is a `Call` frame.
    pub fn is_call(&self) -> bool {
        matches!(self, Self::Call { .. })
    }

    /// Returns `true` if this is a `CallResult` frame.
    pub fn is_call_result(&self) -> bool {
        matches!(self, Self::CallResult { .. })
    }
}

/// `2` and `2.0` are the same frame type; strings are not.
fn frame_type(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0)
            .map(|f| f as u64)
    })
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Errors ─────────────────────────────────────────────────────

/// Errors that can occur when parsing an OCPP-J frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("message must be an OCPP call array")]
    NotAnArray,

    #[error("unknown message type: {0}")]
    UnknownMessageType(String),
}

impl From<FrameError> for DecodeError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::InvalidJson(msg) => DecodeError::InvalidJson(msg),
            FrameError::NotAnArray => DecodeError::NotAnArray,
            FrameError::UnknownMessageType(_) => DecodeError::NotACall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_call() {
        let text = r#"[2,"abc123","BootNotification",{"chargePointVendor":"Vendor","chargePointModel":"Model"}]"#;
        let frame = OcppFrame::parse(text).unwrap();
        match frame {
            OcppFrame::Call {
                unique_id,
                action,
                payload,
            } => {
                assert_eq!(unique_id, "abc123");
                assert_eq!(action, "BootNotification");
                assert_eq!(payload["chargePointVendor"], "Vendor");
            }
            _ => panic!("Expected Call frame"),
        }
    }

    #[test]
    fn parse_call_result() {
        let text = r#"[3,"abc123",{"status":"Accepted","currentTime":"2024-01-01T00:00:00Z","interval":300}]"#;
        let frame = OcppFrame::parse(text).unwrap();
        assert!(frame.is_call_result());
        assert_eq!(frame.unique_id(), "abc123");
    }

    #[test]
    fn call_without_payload_gets_empty_object() {
        let frame = OcppFrame::from_value(json!([2, "id", "Heartbeat"])).unwrap();
        assert_eq!(
            frame,
            OcppFrame::Call {
                unique_id: "id".into(),
                action: "Heartbeat".into(),
                payload: json!({}),
            }
        );
    }

    #[test]
    fn non_string_ids_are_coerced() {
        let frame = OcppFrame::from_value(json!([2.0, 17, "Heartbeat", {}])).unwrap();
        assert!(frame.is_call());
        assert_eq!(frame.unique_id(), "17");
    }

    #[test]
    fn rejects_short_or_non_array_frames() {
        assert_eq!(OcppFrame::from_value(json!([2, "id"])), Err(FrameError::NotAnArray));
        assert_eq!(OcppFrame::from_value(json!({"a": 1})), Err(FrameError::NotAnArray));
        assert!(matches!(OcppFrame::parse("not json"), Err(FrameError::InvalidJson(_))));
    }

    #[test]
    fn rejects_unknown_message_type() {
        let err = OcppFrame::from_value(json!([4, "id", "GenericError", "", {}])).unwrap_err();
        assert_eq!(err, FrameError::UnknownMessageType("4".into()));
        assert_eq!(DecodeError::from(err), DecodeError::NotACall);
    }

    #[test]
    fn serialize_call_result() {
        let frame = OcppFrame::CallResult {
            unique_id: "id2".into(),
            payload: json!({"currentTime": "2024-01-01T00:00:00Z"}),
        };
        assert_eq!(
            frame.serialize(),
            r#"[3,"id2",{"currentTime":"2024-01-01T00:00:00Z"}]"#
        );
        assert_eq!(frame.kind(), MessageKind::Response);
    }
}
