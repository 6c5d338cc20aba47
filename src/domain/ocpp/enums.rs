//! OCPP wire enumerations
//!
//! Every enum serializes to (and parses from) its exact wire value. Schemas
//! reference an enum through its [`EnumRef`] so the validator can check a
//! string against the accepted wire values without knowing the Rust type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type-erased view of a wire enum: its name and the accepted wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumRef {
    pub name: &'static str,
    pub values: &'static [&'static str],
}

impl EnumRef {
    pub fn accepts(&self, value: &str) -> bool {
        self.values.contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {enum_name}")]
pub struct ParseEnumError {
    pub enum_name: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($wire),+];
            pub const ENUM: EnumRef = EnumRef {
                name: stringify!($name),
                values: Self::VALUES,
            };

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError {
                        enum_name: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

// ── Shared across generations ──────────────────────────────────

wire_enum!(
    /// BootNotification response status (all versions).
    RegistrationStatus {
        Accepted => "Accepted",
        Pending => "Pending",
        Rejected => "Rejected",
    }
);

wire_enum!(
    DataTransferStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        UnknownMessageId => "UnknownMessageId",
        UnknownVendorId => "UnknownVendorId",
    }
);

wire_enum!(
    /// Accepted/Rejected status used by most 2.x command responses.
    GenericStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
);

// ── OCPP 1.6 ───────────────────────────────────────────────────

wire_enum!(
    DiagnosticsStatus {
        Idle => "Idle",
        Uploaded => "Uploaded",
        UploadFailed => "UploadFailed",
        Uploading => "Uploading",
    }
);

wire_enum!(
    FirmwareStatus {
        Downloaded => "Downloaded",
        DownloadFailed => "DownloadFailed",
        Downloading => "Downloading",
        Idle => "Idle",
        InstallationFailed => "InstallationFailed",
        Installing => "Installing",
        Installed => "Installed",
    }
);

wire_enum!(
    ChargePointErrorCode {
        ConnectorLockFailure => "ConnectorLockFailure",
        EvCommunicationError => "EVCommunicationError",
        GroundFailure => "GroundFailure",
        HighTemperature => "HighTemperature",
        InternalError => "InternalError",
        LocalListConflict => "LocalListConflict",
        NoError => "NoError",
        OtherError => "OtherError",
        OverCurrentFailure => "OverCurrentFailure",
        PowerMeterFailure => "PowerMeterFailure",
        PowerSwitchFailure => "PowerSwitchFailure",
        ReaderFailure => "ReaderFailure",
        ResetFailure => "ResetFailure",
        UnderVoltage => "UnderVoltage",
        OverVoltage => "OverVoltage",
        WeakSignal => "WeakSignal",
    }
);

wire_enum!(
    ChargePointStatus {
        Available => "Available",
        Preparing => "Preparing",
        Charging => "Charging",
        SuspendedEvse => "SuspendedEVSE",
        SuspendedEv => "SuspendedEV",
        Finishing => "Finishing",
        Reserved => "Reserved",
        Unavailable => "Unavailable",
        Faulted => "Faulted",
    }
);

wire_enum!(
    AvailabilityType {
        Inoperative => "Inoperative",
        Operative => "Operative",
    }
);

wire_enum!(
    AvailabilityStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        Scheduled => "Scheduled",
    }
);

wire_enum!(
    ResetType {
        Hard => "Hard",
        Soft => "Soft",
    }
);

wire_enum!(
    UpdateType {
        Differential => "Differential",
        Full => "Full",
    }
);

wire_enum!(
    MessageTrigger {
        BootNotification => "BootNotification",
        DiagnosticsStatusNotification => "DiagnosticsStatusNotification",
        FirmwareStatusNotification => "FirmwareStatusNotification",
        Heartbeat => "Heartbeat",
        MeterValues => "MeterValues",
        StatusNotification => "StatusNotification",
    }
);

wire_enum!(
    ChargingProfileStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        NotSupported => "NotSupported",
    }
);

// ── OCPP 2.x ───────────────────────────────────────────────────

wire_enum!(
    BootReason {
        ApplicationReset => "ApplicationReset",
        FirmwareUpdate => "FirmwareUpdate",
        LocalReset => "LocalReset",
        PowerUp => "PowerUp",
        RemoteReset => "RemoteReset",
        ScheduledReset => "ScheduledReset",
        Triggered => "Triggered",
        Unknown => "Unknown",
        Watchdog => "Watchdog",
    }
);

wire_enum!(
    OperationalStatus {
        Inoperative => "Inoperative",
        Operative => "Operative",
    }
);

wire_enum!(
    ConnectorStatus {
        Available => "Available",
        Occupied => "Occupied",
        Reserved => "Reserved",
        Unavailable => "Unavailable",
        Faulted => "Faulted",
    }
);

wire_enum!(
    TransactionEventType {
        Ended => "Ended",
        Started => "Started",
        Updated => "Updated",
    }
);

wire_enum!(
    /// 2.x reset request type. `ImmediateAndResume` only exists from 2.1 on.
    ResetTypeV2 {
        Immediate => "Immediate",
        OnIdle => "OnIdle",
        ImmediateAndResume => "ImmediateAndResume",
    }
);

// ── Charging profiles (SetChargingProfile) ─────────────────────

wire_enum!(
    ChargingProfilePurpose {
        ChargePointMaxProfile => "ChargePointMaxProfile",
        TxDefaultProfile => "TxDefaultProfile",
        TxProfile => "TxProfile",
    }
);

wire_enum!(
    ChargingProfileKind {
        Absolute => "Absolute",
        Recurring => "Recurring",
        Relative => "Relative",
    }
);

wire_enum!(
    RecurrencyKind {
        Daily => "Daily",
        Weekly => "Weekly",
    }
);

wire_enum!(
    ChargingRateUnit {
        Amperes => "A",
        Watts => "W",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_parse_and_print() {
        assert_eq!(
            "SuspendedEVSE".parse::<ChargePointStatus>().unwrap(),
            ChargePointStatus::SuspendedEvse
        );
        assert_eq!(ChargingRateUnit::Watts.to_string(), "W");
        assert_eq!(ChargePointErrorCode::EvCommunicationError.as_str(), "EVCommunicationError");
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = "accepted".parse::<RegistrationStatus>().unwrap_err();
        assert_eq!(err.enum_name, "RegistrationStatus");
        assert_eq!(err.to_string(), "'accepted' is not a valid RegistrationStatus");
    }

    #[test]
    fn serde_matches_wire_value() {
        let json = serde_json::to_value(ChargingProfilePurpose::TxDefaultProfile).unwrap();
        assert_eq!(json, "TxDefaultProfile");
        let unit: ChargingRateUnit = serde_json::from_value(serde_json::json!("A")).unwrap();
        assert_eq!(unit, ChargingRateUnit::Amperes);
    }

    #[test]
    fn enum_ref_accepts_wire_values_only() {
        let r = RecurrencyKind::ENUM;
        assert_eq!(r.name, "RecurrencyKind");
        assert!(r.accepts("Daily"));
        assert!(!r.accepts("Monthly"));
    }
}
