//! Message model
//!
//! A single generic message type covers every action: the behaviour comes from
//! the [`ActionSchema`] it is bound to, and the direction marker (`Request` /
//! `Response`) keeps CALL and CALLRESULT payloads from being mixed up at
//! compile time.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::schema::{ActionSchema, MessageKind};
use super::version::OcppVersion;
use crate::domain::error::{json_type_name, ValidationError};

mod sealed {
    pub trait Sealed {}
}

/// Message direction marker.
pub trait Direction: sealed::Sealed {
    const KIND: MessageKind;
}

/// CALL payload marker.
#[derive(Debug, Clone, Copy)]
pub enum Request {}

/// CALLRESULT payload marker.
#[derive(Debug, Clone, Copy)]
pub enum Response {}

impl sealed::Sealed for Request {}
impl sealed::Sealed for Response {}

impl Direction for Request {
    const KIND: MessageKind = MessageKind::Request;
}

impl Direction for Response {
    const KIND: MessageKind = MessageKind::Response;
}

/// A validated action payload.
pub struct OcppMessage<D: Direction> {
    schema: &'static ActionSchema,
    payload: Map<String, Value>,
    message_id: Option<String>,
    _direction: PhantomData<D>,
}

pub type OcppRequest = OcppMessage<Request>;
pub type OcppResponse = OcppMessage<Response>;

impl<D: Direction> OcppMessage<D> {
    /// Validate `payload` against `schema`.
    ///
    /// `null` is treated as an empty object; any other non-object payload is
    /// rejected before the required-field table is consulted.
    pub fn new(schema: &'static ActionSchema, payload: Value) -> Result<Self, ValidationError> {
        debug_assert_eq!(schema.kind(), D::KIND, "schema direction mismatch");

        let payload = match payload {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => return Err(ValidationError::PayloadNotObject(json_type_name(&other))),
        };
        schema.validate(&payload)?;

        Ok(Self {
            schema,
            payload,
            message_id: None,
            _direction: PhantomData,
        })
    }

    pub fn action(&self) -> &'static str {
        self.schema.action()
    }

    pub fn schema(&self) -> &'static ActionSchema {
        self.schema
    }

    pub fn protocol_version(&self) -> OcppVersion {
        self.schema.version()
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    pub fn set_message_id(&mut self, message_id: impl Into<String>) {
        self.message_id = Some(message_id.into());
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.set_message_id(message_id);
        self
    }

    /// Typed access to a single payload field.
    ///
    /// Returns `None` when the field is absent or does not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&self, field: &str) -> Option<T> {
        self.payload
            .get(field)
            .and_then(|v| T::deserialize(v).ok())
    }

    /// Wire form of the payload.
    ///
    /// Payloads only ever enter through `serde_json::Value` (builders take any
    /// `Serialize` and convert it first), so typed enums are already reduced
    /// to their wire string here.
    pub fn to_payload(&self) -> Value {
        Value::Object(self.payload.clone())
    }
}

impl OcppResponse {
    /// Copy the message id of the request this response answers.
    pub fn correlate(mut self, request: &OcppRequest) -> Self {
        self.message_id = request.message_id.clone();
        self
    }
}

impl<D: Direction> Clone for OcppMessage<D> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema,
            payload: self.payload.clone(),
            message_id: self.message_id.clone(),
            _direction: PhantomData,
        }
    }
}

impl<D: Direction> PartialEq for OcppMessage<D> {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
            && self.payload == other.payload
            && self.message_id == other.message_id
    }
}

impl<D: Direction> fmt::Debug for OcppMessage<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcppMessage")
            .field("kind", &D::KIND)
            .field("action", &self.action())
            .field("version", &self.protocol_version())
            .field("message_id", &self.message_id)
            .field("payload", &self.payload)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ocpp::field::{RequiredFields, STRING};
    use once_cell::sync::Lazy;
    use serde_json::json;

    static AUTHORIZE_FIELDS: RequiredFields = &[("idTag", STRING)];

    static AUTHORIZE: Lazy<ActionSchema> = Lazy::new(|| {
        ActionSchema::build(
            MessageKind::Request,
            OcppVersion::V16,
            "Authorize",
            AUTHORIZE_FIELDS,
        )
    });

    static HEARTBEAT: Lazy<ActionSchema> = Lazy::new(|| {
        ActionSchema::build(MessageKind::Request, OcppVersion::V16, "Heartbeat", &[])
    });

    #[test]
    fn null_payload_is_empty_object() {
        let msg = OcppRequest::new(&HEARTBEAT, Value::Null).unwrap();
        assert!(msg.payload().is_empty());
        assert_eq!(msg.to_payload(), json!({}));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = OcppRequest::new(&HEARTBEAT, json!([1, 2])).unwrap_err();
        assert_eq!(err, ValidationError::PayloadNotObject("array"));
    }

    #[test]
    fn validates_on_construction() {
        assert!(OcppRequest::new(&AUTHORIZE, json!({})).is_err());
        let msg = OcppRequest::new(&AUTHORIZE, json!({"idTag": "TAG-1"})).unwrap();
        assert_eq!(msg.action(), "Authorize");
        assert_eq!(msg.protocol_version(), OcppVersion::V16);
        assert_eq!(msg.get::<String>("idTag").as_deref(), Some("TAG-1"));
        assert_eq!(msg.get::<i64>("idTag"), None);
    }

    #[test]
    fn message_id_is_stamped() {
        let msg = OcppRequest::new(&AUTHORIZE, json!({"idTag": "TAG-1"}))
            .unwrap()
            .with_message_id("m-1");
        assert_eq!(msg.message_id(), Some("m-1"));
    }
}
