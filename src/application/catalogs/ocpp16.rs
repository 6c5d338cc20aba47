//! OCPP 1.6 (OCPP-J) action catalog

use super::{ActionDef, Catalog};
use crate::domain::ocpp::enums::{
    AvailabilityStatus, AvailabilityType, ChargePointErrorCode,
    ChargePointStatus, ChargingProfileStatus, DataTransferStatus, DiagnosticsStatus,
    FirmwareStatus, MessageTrigger, RegistrationStatus, ResetType, UpdateType,
};
use crate::domain::ocpp::field::{ARRAY, INTEGER, OBJECT, STRING};
use crate::domain::ocpp::OcppVersion;
use crate::string_or;

pub fn catalog() -> Catalog {
    Catalog::from_table(OcppVersion::V16, ACTIONS)
}

pub(crate) static ACTIONS: &[ActionDef] = &[
    // ── Charge point → central system ──────────────────────────
    ActionDef {
        action: "Authorize",
        request: &[("idTag", STRING)],
        response: &[("idTagInfo", OBJECT)],
    },
    ActionDef {
        action: "BootNotification",
        request: &[("chargePointVendor", STRING), ("chargePointModel", STRING)],
        response: &[
            ("status", string_or!(RegistrationStatus)),
            ("currentTime", STRING),
            ("interval", INTEGER),
        ],
    },
    ActionDef {
        action: "DataTransfer",
        request: &[("vendorId", STRING)],
        response: &[("status", string_or!(DataTransferStatus))],
    },
    ActionDef {
        action: "DiagnosticsStatusNotification",
        request: &[("status", string_or!(DiagnosticsStatus))],
        response: &[],
    },
    ActionDef {
        action: "FirmwareStatusNotification",
        request: &[("status", string_or!(FirmwareStatus))],
        response: &[],
    },
    ActionDef {
        action: "Heartbeat",
        request: &[],
        response: &[("currentTime", STRING)],
    },
    ActionDef {
        action: "MeterValues",
        request: &[("connectorId", INTEGER), ("meterValue", ARRAY)],
        response: &[],
    },
    ActionDef {
        action: "StartTransaction",
        request: &[
            ("connectorId", INTEGER),
            ("idTag", STRING),
            ("meterStart", INTEGER),
            ("timestamp", STRING),
        ],
        response: &[("idTagInfo", OBJECT), ("transactionId", INTEGER)],
    },
    ActionDef {
        action: "StatusNotification",
        request: &[
            ("connectorId", INTEGER),
            ("errorCode", string_or!(ChargePointErrorCode)),
            ("status", string_or!(ChargePointStatus)),
        ],
        response: &[],
    },
    ActionDef {
        action: "StopTransaction",
        request: &[
            ("meterStop", INTEGER),
            ("timestamp", STRING),
            ("transactionId", INTEGER),
        ],
        response: &[],
    },
    // ── Central system → charge point ──────────────────────────
    ActionDef {
        action: "CancelReservation",
        request: &[("reservationId", INTEGER)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "ChangeAvailability",
        request: &[("connectorId", INTEGER), ("type", string_or!(AvailabilityType))],
        response: &[("status", string_or!(AvailabilityStatus))],
    },
    ActionDef {
        action: "ChangeConfiguration",
        request: &[("key", STRING), ("value", STRING)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "ClearCache",
        request: &[],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "ClearChargingProfile",
        request: &[],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "GetCompositeSchedule",
        request: &[("connectorId", INTEGER), ("duration", INTEGER)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "GetConfiguration",
        request: &[],
        response: &[],
    },
    ActionDef {
        action: "GetDiagnostics",
        request: &[("location", STRING)],
        response: &[],
    },
    ActionDef {
        action: "GetLocalListVersion",
        request: &[],
        response: &[("listVersion", INTEGER)],
    },
    ActionDef {
        action: "RemoteStartTransaction",
        request: &[("idTag", STRING)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "RemoteStopTransaction",
        request: &[("transactionId", INTEGER)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "ReserveNow",
        request: &[
            ("connectorId", INTEGER),
            ("expiryDate", STRING),
            ("idTag", STRING),
            ("reservationId", INTEGER),
        ],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "Reset",
        request: &[("type", string_or!(ResetType))],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "SendLocalList",
        request: &[("listVersion", INTEGER), ("updateType", string_or!(UpdateType))],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "SetChargingProfile",
        request: &[("connectorId", INTEGER), ("csChargingProfiles", OBJECT)],
        response: &[("status", string_or!(ChargingProfileStatus))],
    },
    ActionDef {
        action: "TriggerMessage",
        request: &[("requestedMessage", string_or!(MessageTrigger))],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "UnlockConnector",
        request: &[("connectorId", INTEGER)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "UpdateFirmware",
        request: &[("location", STRING), ("retrieveDate", STRING)],
        response: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ocpp::MessageKind;
    use serde_json::json;

    #[test]
    fn covers_core_profile() {
        let catalog = catalog();
        for action in ["Authorize", "BootNotification", "Heartbeat", "StartTransaction", "StopTransaction"] {
            assert!(catalog.requests.contains_key(action), "missing {action}");
        }
        assert!(!catalog.requests.contains_key("TransactionEvent"));
    }

    #[test]
    fn status_notification_accepts_wire_enums() {
        let catalog = catalog();
        let schema = &catalog.requests["StatusNotification"];
        assert_eq!(schema.kind(), MessageKind::Request);
        let payload = json!({
            "connectorId": 1,
            "errorCode": ChargePointErrorCode::NoError,
            "status": ChargePointStatus::Charging,
        });
        assert!(schema.validate(payload.as_object().unwrap()).is_ok());
    }
}
