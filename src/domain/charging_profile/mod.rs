//! Charging profile validation
//!
//! Sanitized `csChargingProfiles` structures and the normalizer that produces
//! them from untrusted input before a `SetChargingProfile` is built.

pub mod model;
pub mod normalizer;

pub use model::{ChargingSchedule, ChargingSchedulePeriod, ProfileSummary, SanitizedChargingProfile};
pub use normalizer::normalize_cs_charging_profile;
