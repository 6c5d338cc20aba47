pub mod charging_profile;
pub mod error;
pub mod ocpp;

// Re-export commonly used types
pub use charging_profile::{
    normalize_cs_charging_profile, ChargingSchedule, ChargingSchedulePeriod, ProfileSummary,
    SanitizedChargingProfile,
};
pub use error::{DecodeError, UnknownVersion, UnsupportedAction, ValidationError};
pub use ocpp::{
    ActionSchema, FieldType, MessageKind, OcppMessage, OcppRequest, OcppResponse, OcppVersion,
};
