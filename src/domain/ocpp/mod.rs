//! OCPP protocol model
//!
//! Version identifiers, wire enumerations, field-type contracts, action
//! schemas and the generic message type validated against them.

pub mod enums;
pub mod field;
pub mod message;
pub mod schema;
pub mod version;

pub use enums::EnumRef;
pub use field::{FieldType, FieldTypes, RequiredFields};
pub use message::{Direction, OcppMessage, OcppRequest, OcppResponse, Request, Response};
pub use schema::{ActionSchema, MessageKind};
pub use version::OcppVersion;
