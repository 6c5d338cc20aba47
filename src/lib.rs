//! # OCPP codec
//!
//! OCPP-J message codec and per-version payload validation for OCPP 1.6,
//! 2.0.1 and 2.1, plus the charging profile normalizer used before a
//! `SetChargingProfile` is sent.
//!
//! ## Architecture
//!
//! - **domain**: protocol versions, wire enums, action schemas, the message
//!   model, charging profiles and the error vocabulary
//! - **application**: per-version catalogs, the protocol registry and the codec
//! - **support**: OCPP-J frame envelope and message-id generation
//! - **config** / **logging**: TOML configuration and `tracing` setup for
//!   binaries embedding the codec
//!
//! ```
//! use ocpp_codec::decode_call;
//!
//! let call = decode_call(r#"[2,"1","Heartbeat",{}]"#, "ocpp1.6").unwrap();
//! assert_eq!(call.action, "Heartbeat");
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export the codec surface
pub use application::{
    build_request, build_response, decode_call, decode_call_result, encode_call,
    encode_call_result, encode_call_result_text, encode_call_text, DecodedCall, ProtocolRegistry,
    RawMessage,
};
pub use domain::{
    normalize_cs_charging_profile, DecodeError, OcppRequest, OcppResponse, OcppVersion,
    ProfileSummary, SanitizedChargingProfile, UnsupportedAction, ValidationError,
};
pub use support::new_message_id;
