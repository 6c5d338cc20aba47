//! `csChargingProfiles` normalizer
//!
//! Turns an arbitrary `SetChargingProfile` profile value into a
//! [`SanitizedChargingProfile`] or fails on the first offending field with a
//! field-scoped [`ValidationError`]. Limits and rates are parsed as decimals so
//! values like `16.5` reach the hardware exactly as written.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::debug;

use super::model::{ChargingSchedule, ChargingSchedulePeriod, ProfileSummary, SanitizedChargingProfile};
use crate::domain::error::ValidationError;
use crate::domain::ocpp::enums::{
    ChargingProfileKind, ChargingProfilePurpose, ChargingRateUnit, RecurrencyKind,
};

const PROFILE_FIELD: &str = "csChargingProfiles";
const SCHEDULE_FIELD: &str = "chargingSchedule";
const PERIOD_FIELD: &str = "chargingSchedulePeriod";
const REQUIRED: &str = "This field is required.";

/// Validate and sanitize a charging profile.
///
/// Accepts either a JSON string or an already-parsed value. Returns the
/// sanitized profile together with a flat summary for audit logging.
pub fn normalize_cs_charging_profile(
    raw: &Value,
) -> Result<(SanitizedChargingProfile, ProfileSummary), ValidationError> {
    let parsed;
    let value = match raw {
        Value::String(text) => {
            parsed = serde_json::from_str::<Value>(text).map_err(|_| {
                ValidationError::field(PROFILE_FIELD, "Charging profile must be valid JSON.")
            })?;
            &parsed
        }
        other => other,
    };

    let fields = Fields::object(value, PROFILE_FIELD, "Charging profile must be a JSON object.")?;

    let charging_profile_id = fields.required_non_negative_int(
        "chargingProfileId",
        "Charging profile id must be a non-negative integer.",
    )?;
    let stack_level =
        fields.required_non_negative_int("stackLevel", "Stack level must be a non-negative integer.")?;

    let charging_profile_purpose: ChargingProfilePurpose = fields.required_choice(
        "chargingProfilePurpose",
        "Charging profile purpose must be one of ChargePointMaxProfile, TxDefaultProfile, TxProfile.",
    )?;
    let charging_profile_kind: ChargingProfileKind = fields.required_choice(
        "chargingProfileKind",
        "Charging profile kind must be one of Absolute, Recurring, Relative.",
    )?;
    let recurrency_kind: Option<RecurrencyKind> =
        fields.optional_choice("recurrencyKind", "Recurrency kind must be 'Daily' or 'Weekly'.")?;

    let valid_from = fields.optional_datetime("validFrom")?;
    let valid_to = fields.optional_datetime("validTo")?;
    let transaction_id = fields.optional_trimmed_string("transactionId")?;

    let charging_schedules = collect_schedules(&fields)?
        .into_iter()
        .map(normalize_schedule)
        .collect::<Result<Vec<_>, _>>()?;

    let profile = SanitizedChargingProfile {
        charging_profile_id,
        stack_level,
        charging_profile_purpose,
        charging_profile_kind,
        recurrency_kind,
        valid_from,
        valid_to,
        transaction_id,
        charging_schedules,
    };
    let summary = profile.summary();

    debug!(
        profile_id = summary.profile_id,
        stack_level = summary.stack_level,
        purpose = %summary.purpose,
        kind = %summary.kind,
        schedules = profile.charging_schedules.len(),
        "Normalized charging profile"
    );

    Ok((profile, summary))
}

/// Schedules come from `chargingSchedules` (list) or `chargingSchedule`
/// (single object or list).
fn collect_schedules<'a>(fields: &Fields<'a>) -> Result<Vec<&'a Value>, ValidationError> {
    let source = fields
        .present("chargingSchedules")
        .or_else(|| fields.present(SCHEDULE_FIELD));

    let schedules = one_or_many(source);
    if schedules.is_empty() {
        return Err(ValidationError::field(
            SCHEDULE_FIELD,
            "Provide at least one charging schedule.",
        ));
    }
    Ok(schedules)
}

fn normalize_schedule(value: &Value) -> Result<ChargingSchedule, ValidationError> {
    let fields = Fields::object(value, SCHEDULE_FIELD, "Each charging schedule must be an object.")?;

    let charging_rate_unit: ChargingRateUnit = fields.required_choice(
        "chargingRateUnit",
        "Charging rate unit must be 'A' or 'W'.",
    )?;

    let periods = one_or_many(fields.present(PERIOD_FIELD));
    if periods.is_empty() {
        return Err(ValidationError::field(
            PERIOD_FIELD,
            "Provide at least one charging schedule period.",
        ));
    }

    let id = fields.optional_non_negative_int("id", "Schedule id must be a non-negative integer.")?;
    let duration =
        fields.optional_non_negative_int("duration", "Duration must be a non-negative integer.")?;
    let start_schedule = fields.optional_datetime("startSchedule")?;
    let min_charging_rate = fields.optional_non_negative_decimal(
        "minChargingRate",
        "Minimum charging rate must be a non-negative decimal.",
    )?;

    let charging_schedule_period = periods
        .into_iter()
        .map(normalize_period)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ChargingSchedule {
        id,
        charging_rate_unit,
        charging_schedule_period,
        duration,
        start_schedule,
        min_charging_rate,
    })
}

fn normalize_period(value: &Value) -> Result<ChargingSchedulePeriod, ValidationError> {
    let fields = Fields::object(value, PERIOD_FIELD, "Each charging schedule period must be an object.")?;

    let start_period = fields
        .required_non_negative_int("startPeriod", "Start period must be a non-negative integer.")?;

    let limit_message = "Limit must be a non-negative decimal.";
    let limit = fields
        .optional_non_negative_decimal("limit", limit_message)?
        .ok_or_else(|| ValidationError::field("limit", REQUIRED))?;

    let number_phases = match fields.present("numberPhases") {
        None => None,
        Some(value) => Some(
            coerce_int(value)
                .filter(|phases| *phases >= 1)
                .ok_or_else(|| {
                    ValidationError::field("numberPhases", "Number of phases must be an integer of at least 1.")
                })?,
        ),
    };

    Ok(ChargingSchedulePeriod {
        start_period,
        limit,
        number_phases,
    })
}

// ── Field access ───────────────────────────────────────────────

struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn object(value: &'a Value, field: &str, message: &str) -> Result<Self, ValidationError> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or_else(|| ValidationError::field(field, message))
    }

    /// Value of `key` unless absent or `null`.
    fn present(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn required(&self, key: &str) -> Result<&'a Value, ValidationError> {
        self.present(key)
            .ok_or_else(|| ValidationError::field(key, REQUIRED))
    }

    fn required_non_negative_int(&self, key: &str, message: &str) -> Result<i64, ValidationError> {
        let value = self.required(key)?;
        coerce_int(value)
            .filter(|n| *n >= 0)
            .ok_or_else(|| ValidationError::field(key, message))
    }

    fn optional_non_negative_int(&self, key: &str, message: &str) -> Result<Option<i64>, ValidationError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => coerce_int(value)
                .filter(|n| *n >= 0)
                .map(Some)
                .ok_or_else(|| ValidationError::field(key, message)),
        }
    }

    fn optional_non_negative_decimal(&self, key: &str, message: &str) -> Result<Option<f64>, ValidationError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => coerce_decimal(value)
                .filter(|d| !d.is_sign_negative() || d.is_zero())
                .and_then(|d| d.normalize().to_f64())
                .map(Some)
                .ok_or_else(|| ValidationError::field(key, message)),
        }
    }

    fn required_choice<T: FromStr>(&self, key: &str, message: &str) -> Result<T, ValidationError> {
        let value = self.required(key)?;
        value
            .as_str()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| ValidationError::field(key, message))
    }

    /// Absent, `null` and blank strings all mean "not set".
    fn optional_choice<T: FromStr>(&self, key: &str, message: &str) -> Result<Option<T>, ValidationError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(value) => value
                .as_str()
                .and_then(|s| s.trim().parse().ok())
                .map(Some)
                .ok_or_else(|| ValidationError::field(key, message)),
        }
    }

    fn optional_datetime(&self, key: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(value) => value
                .as_str()
                .and_then(parse_datetime)
                .map(Some)
                .ok_or_else(|| ValidationError::field(key, "Enter a valid ISO 8601 datetime.")),
        }
    }

    fn optional_trimmed_string(&self, key: &str) -> Result<Option<String>, ValidationError> {
        let text = match self.present(key) {
            None => return Ok(None),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => {
                return Err(ValidationError::field(
                    key,
                    "Transaction id must be a string or a number.",
                ))
            }
        };
        Ok(Some(text).filter(|s| !s.is_empty()))
    }
}

fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// Integers, integral floats (`5.0`) and integer strings (`" 5 "`). Booleans
/// and fractional values are rejected rather than truncated.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            if let Some(u) = n.as_u64() {
                return i64::try_from(u).ok();
            }
            // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// RFC 3339 with offset, or a naive timestamp taken as UTC.
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
