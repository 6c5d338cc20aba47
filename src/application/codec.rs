//! OCPP-J codec
//!
//! Pure functions over the [`ProtocolRegistry`]:
//!
//! ```text
//! wire ──► decode_call ──► DecodedCall { request } ──► (dispatcher)
//!
//! build_request ──► encode_call ──► [2, id, action, payload]
//! build_response ─► encode_call_result ──► [3, id, payload]
//! ```
//!
//! Every failure is returned immediately; there is no partial decode and no
//! fallback version.

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use super::registry::ProtocolRegistry;
use crate::domain::error::{DecodeError, ValidationError};
use crate::domain::ocpp::{
    Direction, MessageKind, OcppMessage, OcppRequest, OcppResponse, OcppVersion,
};
use crate::support::ocpp_frame::OcppFrame;

/// Inbound wire message: JSON text or an already-parsed value.
#[derive(Debug, Clone)]
pub enum RawMessage<'a> {
    Text(&'a str),
    Parsed(Value),
}

impl<'a> From<&'a str> for RawMessage<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for RawMessage<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for RawMessage<'_> {
    fn from(value: Value) -> Self {
        Self::Parsed(value)
    }
}

impl RawMessage<'_> {
    fn into_frame(self) -> Result<OcppFrame, DecodeError> {
        let frame = match self {
            Self::Text(text) => OcppFrame::parse(text)?,
            Self::Parsed(value) => OcppFrame::from_value(value)?,
        };
        Ok(frame)
    }
}

/// A validated inbound Call, ready to be routed on `action`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    pub message_id: String,
    pub action: String,
    pub protocol_version: OcppVersion,
    pub request: OcppRequest,
}

/// Decode and validate a CALL frame for the negotiated `protocol_version`.
pub fn decode_call<'a>(
    raw: impl Into<RawMessage<'a>>,
    protocol_version: &str,
) -> Result<DecodedCall, DecodeError> {
    let (message_id, action, payload) = match raw.into().into_frame()? {
        OcppFrame::Call {
            unique_id,
            action,
            payload,
        } => (unique_id, action, payload),
        OcppFrame::CallResult { .. } => return Err(DecodeError::NotACall),
    };

    let schema = ProtocolRegistry::global().lookup(MessageKind::Request, &action, protocol_version)?;
    let request = OcppRequest::new(schema, payload)?.with_message_id(message_id.clone());

    trace!(
        message_id = message_id.as_str(),
        action = action.as_str(),
        version = protocol_version,
        "Decoded Call"
    );

    Ok(DecodedCall {
        message_id,
        action,
        protocol_version: schema.version(),
        request,
    })
}

/// Decode and validate a CALLRESULT frame answering a Call for `action`.
///
/// The frame itself does not name its action, so the caller supplies the one
/// it correlated through the message id.
pub fn decode_call_result<'a>(
    raw: impl Into<RawMessage<'a>>,
    action: &str,
    protocol_version: &str,
) -> Result<OcppResponse, DecodeError> {
    let (message_id, payload) = match raw.into().into_frame()? {
        OcppFrame::CallResult { unique_id, payload } => (unique_id, payload),
        OcppFrame::Call { .. } => return Err(DecodeError::NotACallResult),
    };

    let schema = ProtocolRegistry::global().lookup(MessageKind::Response, action, protocol_version)?;
    Ok(OcppResponse::new(schema, payload)?.with_message_id(message_id))
}

/// Serialize a validated request to `[2, message_id, action, payload]`.
///
/// The message id is stamped onto `request` so the eventual response can be
/// correlated with it.
pub fn encode_call(request: &mut OcppRequest, message_id: impl Into<String>) -> Value {
    request.set_message_id(message_id);
    call_frame(request).to_value()
}

/// [`encode_call`], as JSON text.
pub fn encode_call_text(request: &mut OcppRequest, message_id: impl Into<String>) -> String {
    request.set_message_id(message_id);
    call_frame(request).serialize()
}

/// Serialize a validated response to `[3, message_id, payload]`.
pub fn encode_call_result(response: &OcppResponse) -> Result<Value, ValidationError> {
    Ok(call_result_frame(response)?.to_value())
}

/// [`encode_call_result`], as JSON text.
pub fn encode_call_result_text(response: &OcppResponse) -> Result<String, ValidationError> {
    Ok(call_result_frame(response)?.serialize())
}

/// Construct and validate an outbound (or out-of-band) request payload.
pub fn build_request<P: Serialize>(
    action: &str,
    protocol_version: &str,
    payload: P,
) -> Result<OcppRequest, ValidationError> {
    build(action, protocol_version, payload)
}

/// Construct and validate a response payload.
pub fn build_response<P: Serialize>(
    action: &str,
    protocol_version: &str,
    payload: P,
) -> Result<OcppResponse, ValidationError> {
    build(action, protocol_version, payload)
}

fn build<D: Direction, P: Serialize>(
    action: &str,
    protocol_version: &str,
    payload: P,
) -> Result<OcppMessage<D>, ValidationError> {
    let schema = ProtocolRegistry::global().lookup(D::KIND, action, protocol_version)?;
    let payload =
        serde_json::to_value(payload).map_err(|e| ValidationError::Serialization(e.to_string()))?;
    OcppMessage::new(schema, payload)
}

fn call_frame(request: &OcppRequest) -> OcppFrame {
    OcppFrame::Call {
        unique_id: request.message_id().unwrap_or_default().to_string(),
        action: request.action().to_string(),
        payload: request.to_payload(),
    }
}

fn call_result_frame(response: &OcppResponse) -> Result<OcppFrame, ValidationError> {
    let message_id = response
        .message_id()
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingMessageId)?;

    Ok(OcppFrame::CallResult {
        unique_id: message_id.to_string(),
        payload: response.to_payload(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ocpp::enums::RegistrationStatus;
    use serde_json::json;

    fn boot_v16() -> Value {
        json!({"chargePointVendor": "Acme", "chargePointModel": "X1"})
    }

    #[test]
    fn decode_boot_notification_v16() {
        let text = r#"[2,"msg-1","BootNotification",{"chargePointVendor":"Acme","chargePointModel":"X1"}]"#;
        let call = decode_call(text, "ocpp1.6").unwrap();
        assert_eq!(call.message_id, "msg-1");
        assert_eq!(call.action, "BootNotification");
        assert_eq!(call.protocol_version, OcppVersion::V16);
        assert_eq!(call.request.message_id(), Some("msg-1"));
        assert_eq!(call.request.payload()["chargePointModel"], "X1");
    }

    #[test]
    fn decode_reports_missing_field() {
        let text = r#"[2,"msg-1","BootNotification",{"chargePointVendor":"Acme"}]"#;
        let err = decode_call(text, "ocpp1.6").unwrap_err();
        assert_eq!(
            err,
            DecodeError::Validation(ValidationError::MissingField("chargePointModel".into()))
        );
    }

    #[test]
    fn decode_rejects_wrong_shapes() {
        assert!(matches!(decode_call("{oops", "ocpp1.6"), Err(DecodeError::InvalidJson(_))));
        assert_eq!(decode_call(r#"{"a":1}"#, "ocpp1.6").unwrap_err(), DecodeError::NotAnArray);
        assert_eq!(decode_call(json!([2, "id"]), "ocpp1.6").unwrap_err(), DecodeError::NotAnArray);
        assert_eq!(
            decode_call(json!([3, "id", {"currentTime": "x"}]), "ocpp1.6").unwrap_err(),
            DecodeError::NotACall
        );
        assert_eq!(
            decode_call(json!(["2", "id", "Heartbeat", {}]), "ocpp1.6").unwrap_err(),
            DecodeError::NotACall
        );
    }

    #[test]
    fn decode_has_no_cross_version_fallback() {
        let frame = json!([2, "m", "BootNotification", boot_v16()]);
        let err = decode_call(frame, "ocpp2.0.1").unwrap_err();
        assert_eq!(err.to_string(), "missing required field 'chargingStation'");

        let err = decode_call(json!([2, "m", "StartTransaction", {}]), "ocpp2.1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported action 'StartTransaction' for protocol 'ocpp2.1'"
        );
    }

    #[test]
    fn decode_missing_payload_defaults_to_empty() {
        let call = decode_call(json!([2, "hb", "Heartbeat"]), "ocpp2.0.1").unwrap();
        assert!(call.request.payload().is_empty());
    }

    #[test]
    fn encode_call_stamps_message_id() {
        let mut request = build_request("BootNotification", "ocpp1.6", boot_v16()).unwrap();
        let wire = encode_call(&mut request, "out-7");
        assert_eq!(wire, json!([2, "out-7", "BootNotification", boot_v16()]));
        assert_eq!(request.message_id(), Some("out-7"));
    }

    #[test]
    fn build_response_requires_all_fields() {
        let err = build_response("BootNotification", "ocpp1.6", json!({"interval": 1})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("status".into()));
    }

    #[test]
    fn encode_call_result_needs_message_id() {
        let response = build_response(
            "BootNotification",
            "ocpp1.6",
            json!({
                "status": RegistrationStatus::Accepted,
                "currentTime": "2024-01-01T00:00:00Z",
                "interval": 300,
            }),
        )
        .unwrap();
        assert_eq!(
            encode_call_result(&response).unwrap_err(),
            ValidationError::MissingMessageId
        );
        assert_eq!(
            encode_call_result(&response.clone().with_message_id("")).unwrap_err(),
            ValidationError::MissingMessageId
        );

        let wire = encode_call_result(&response.with_message_id("msg-1")).unwrap();
        assert_eq!(wire[0], 3);
        assert_eq!(wire[1], "msg-1");
        assert_eq!(wire[2]["status"], "Accepted");
    }

    #[test]
    fn response_correlates_with_decoded_request() {
        let call = decode_call(json!([2, "hb-1", "Heartbeat", {}]), "ocpp1.6").unwrap();
        let response = build_response(
            &call.action,
            "ocpp1.6",
            json!({"currentTime": "2024-01-01T00:00:00Z"}),
        )
        .unwrap()
        .correlate(&call.request);
        assert_eq!(
            encode_call_result_text(&response).unwrap(),
            r#"[3,"hb-1",{"currentTime":"2024-01-01T00:00:00Z"}]"#
        );
    }

    #[test]
    fn decode_call_result_validates_response_schema() {
        let text = r#"[3,"cs-1",{"status":"Accepted"}]"#;
        let response = decode_call_result(text, "Reset", "ocpp2.0.1").unwrap();
        assert_eq!(response.message_id(), Some("cs-1"));
        assert_eq!(response.action(), "Reset");

        let err = decode_call_result(r#"[3,"cs-1",{}]"#, "Reset", "ocpp2.0.1").unwrap_err();
        assert_eq!(err.to_string(), "missing required field 'status'");

        let err = decode_call_result(json!([2, "x", "Reset", {}]), "Reset", "ocpp2.0.1").unwrap_err();
        assert_eq!(err, DecodeError::NotACallResult);
    }

    #[test]
    fn unserializable_payload_is_a_validation_error() {
        let mut bad = std::collections::HashMap::new();
        bad.insert(vec![1u8], 1);
        let err = build_request("Heartbeat", "ocpp1.6", bad).unwrap_err();
        assert!(matches!(err, ValidationError::Serialization(_)));
    }
}
