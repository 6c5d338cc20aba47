//! Sanitized charging profile structures

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::domain::ocpp::enums::{
    ChargingProfileKind, ChargingProfilePurpose, ChargingRateUnit, RecurrencyKind,
};

/// A `csChargingProfiles` value that passed every field rule.
///
/// Serializes back to the OCPP camelCase shape, so the output of the
/// normalizer is itself valid normalizer input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedChargingProfile {
    pub charging_profile_id: i64,
    pub stack_level: i64,
    pub charging_profile_purpose: ChargingProfilePurpose,
    pub charging_profile_kind: ChargingProfileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrency_kind: Option<RecurrencyKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Always non-empty. Emitted as `chargingSchedule`: an object for a single
    /// schedule (1.6 shape), a list otherwise.
    #[serde(rename = "chargingSchedule", serialize_with = "one_or_many")]
    pub charging_schedules: Vec<ChargingSchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub charging_rate_unit: ChargingRateUnit,
    /// Always non-empty.
    pub charging_schedule_period: Vec<ChargingSchedulePeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_schedule: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_charging_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSchedulePeriod {
    pub start_period: i64,
    /// Parsed as a decimal, exposed as a plain number for JSON.
    pub limit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_phases: Option<i64>,
}

/// Flat audit record of a normalized profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub profile_id: i64,
    pub stack_level: i64,
    pub purpose: ChargingProfilePurpose,
    pub kind: ChargingProfileKind,
    pub recurrency: Option<RecurrencyKind>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub transaction_id: Option<String>,
}

impl SanitizedChargingProfile {
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            profile_id: self.charging_profile_id,
            stack_level: self.stack_level,
            purpose: self.charging_profile_purpose,
            kind: self.charging_profile_kind,
            recurrency: self.recurrency_kind,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
            transaction_id: self.transaction_id.clone(),
        }
    }

    /// JSON form, ready to be placed under `csChargingProfiles`.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

fn one_or_many<S: Serializer>(schedules: &[ChargingSchedule], serializer: S) -> Result<S::Ok, S::Error> {
    match schedules {
        [single] => single.serialize(serializer),
        many => many.serialize(serializer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schedule(limit: f64) -> ChargingSchedule {
        ChargingSchedule {
            id: None,
            charging_rate_unit: ChargingRateUnit::Amperes,
            charging_schedule_period: vec![ChargingSchedulePeriod {
                start_period: 0,
                limit,
                number_phases: None,
            }],
            duration: None,
            start_schedule: None,
            min_charging_rate: None,
        }
    }

    fn profile(schedules: Vec<ChargingSchedule>) -> SanitizedChargingProfile {
        SanitizedChargingProfile {
            charging_profile_id: 7,
            stack_level: 1,
            charging_profile_purpose: ChargingProfilePurpose::TxDefaultProfile,
            charging_profile_kind: ChargingProfileKind::Absolute,
            recurrency_kind: None,
            valid_from: None,
            valid_to: None,
            transaction_id: None,
            charging_schedules: schedules,
        }
    }

    #[test]
    fn single_schedule_serializes_as_object() {
        let value = profile(vec![schedule(16.0)]).to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "chargingProfileId": 7,
                "stackLevel": 1,
                "chargingProfilePurpose": "TxDefaultProfile",
                "chargingProfileKind": "Absolute",
                "chargingSchedule": {
                    "chargingRateUnit": "A",
                    "chargingSchedulePeriod": [{"startPeriod": 0, "limit": 16.0}]
                }
            })
        );
    }

    #[test]
    fn several_schedules_serialize_as_list() {
        let value = profile(vec![schedule(16.0), schedule(32.0)]).to_value().unwrap();
        assert_eq!(value["chargingSchedule"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn summary_mirrors_profile() {
        let summary = profile(vec![schedule(6.0)]).summary();
        assert_eq!(summary.profile_id, 7);
        assert_eq!(summary.purpose, ChargingProfilePurpose::TxDefaultProfile);
        assert_eq!(serde_json::to_value(&summary).unwrap()["kind"], "Absolute");
    }
}
