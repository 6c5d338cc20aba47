//! OCPP 2.0.1 action catalog

use super::{ActionDef, Catalog};
use crate::domain::ocpp::enums::{
    BootReason, ConnectorStatus, DataTransferStatus, GenericStatus, OperationalStatus,
    RegistrationStatus, ResetTypeV2, TransactionEventType,
};
use crate::domain::ocpp::field::{ARRAY, BOOLEAN, INTEGER, NUMBER, OBJECT, STRING};
use crate::domain::ocpp::OcppVersion;
use crate::string_or;

pub fn catalog() -> Catalog {
    Catalog::from_table(OcppVersion::V201, ACTIONS)
}

pub(crate) static ACTIONS: &[ActionDef] = &[
    // ── Charging station → CSMS ────────────────────────────────
    ActionDef {
        action: "Authorize",
        request: &[("idToken", OBJECT)],
        response: &[("idTokenInfo", OBJECT)],
    },
    ActionDef {
        action: "BootNotification",
        request: &[("chargingStation", OBJECT), ("reason", string_or!(BootReason))],
        response: &[
            ("currentTime", STRING),
            ("interval", INTEGER),
            ("status", string_or!(RegistrationStatus)),
        ],
    },
    ActionDef {
        action: "ClearedChargingLimit",
        request: &[("chargingLimitSource", STRING)],
        response: &[],
    },
    ActionDef {
        action: "DataTransfer",
        request: &[("vendorId", STRING)],
        response: &[("status", string_or!(DataTransferStatus))],
    },
    ActionDef {
        action: "FirmwareStatusNotification",
        request: &[("status", STRING)],
        response: &[],
    },
    ActionDef {
        action: "Get15118EVCertificate",
        request: &[
            ("iso15118SchemaVersion", STRING),
            ("action", STRING),
            ("exiRequest", STRING),
        ],
        response: &[("status", string_or!(GenericStatus)), ("exiResponse", STRING)],
    },
    ActionDef {
        action: "Heartbeat",
        request: &[],
        response: &[("currentTime", STRING)],
    },
    ActionDef {
        action: "LogStatusNotification",
        request: &[("status", STRING)],
        response: &[],
    },
    ActionDef {
        action: "MeterValues",
        request: &[("evseId", INTEGER), ("meterValue", ARRAY)],
        response: &[],
    },
    ActionDef {
        action: "NotifyChargingLimit",
        request: &[("chargingLimit", OBJECT)],
        response: &[],
    },
    ActionDef {
        action: "NotifyEvent",
        request: &[("generatedAt", STRING), ("seqNo", INTEGER), ("eventData", ARRAY)],
        response: &[],
    },
    ActionDef {
        action: "NotifyMonitoringReport",
        request: &[("requestId", INTEGER), ("seqNo", INTEGER), ("generatedAt", STRING)],
        response: &[],
    },
    ActionDef {
        action: "NotifyReport",
        request: &[("requestId", INTEGER), ("generatedAt", STRING), ("seqNo", INTEGER)],
        response: &[],
    },
    ActionDef {
        action: "ReportChargingProfiles",
        request: &[
            ("requestId", INTEGER),
            ("chargingLimitSource", STRING),
            ("chargingProfile", ARRAY),
            ("evseId", INTEGER),
        ],
        response: &[],
    },
    ActionDef {
        action: "SecurityEventNotification",
        request: &[("type", STRING), ("timestamp", STRING)],
        response: &[],
    },
    ActionDef {
        action: "SignCertificate",
        request: &[("csr", STRING)],
        response: &[("status", string_or!(GenericStatus))],
    },
    ActionDef {
        action: "StatusNotification",
        request: &[
            ("timestamp", STRING),
            ("connectorStatus", string_or!(ConnectorStatus)),
            ("evseId", INTEGER),
            ("connectorId", INTEGER),
        ],
        response: &[],
    },
    ActionDef {
        action: "TransactionEvent",
        request: &[
            ("eventType", string_or!(TransactionEventType)),
            ("timestamp", STRING),
            ("triggerReason", STRING),
            ("seqNo", INTEGER),
            ("transactionInfo", OBJECT),
        ],
        response: &[],
    },
    // ── CSMS → charging station ────────────────────────────────
    ActionDef {
        action: "CancelReservation",
        request: &[("reservationId", INTEGER)],
        response: &[("status", string_or!(GenericStatus))],
    },
    ActionDef {
        action: "ChangeAvailability",
        request: &[("operationalStatus", string_or!(OperationalStatus))],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "ClearCache",
        request: &[],
        response: &[("status", string_or!(GenericStatus))],
    },
    ActionDef {
        action: "ClearChargingProfile",
        request: &[],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "ClearDisplayMessage",
        request: &[("id", INTEGER)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "ClearVariableMonitoring",
        request: &[("id", ARRAY)],
        response: &[("clearMonitoringResult", ARRAY)],
    },
    ActionDef {
        action: "CostUpdated",
        request: &[("totalCost", NUMBER), ("transactionId", STRING)],
        response: &[],
    },
    ActionDef {
        action: "GetBaseReport",
        request: &[("requestId", INTEGER), ("reportBase", STRING)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "GetChargingProfiles",
        request: &[("requestId", INTEGER), ("chargingProfile", OBJECT)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "GetCompositeSchedule",
        request: &[("duration", INTEGER), ("evseId", INTEGER)],
        response: &[("status", string_or!(GenericStatus))],
    },
    ActionDef {
        action: "GetLocalListVersion",
        request: &[],
        response: &[("versionNumber", INTEGER)],
    },
    ActionDef {
        action: "GetLog",
        request: &[("log", OBJECT), ("logType", STRING), ("requestId", INTEGER)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "GetTransactionStatus",
        request: &[],
        response: &[("messagesInQueue", BOOLEAN)],
    },
    ActionDef {
        action: "GetVariables",
        request: &[("getVariableData", ARRAY)],
        response: &[("getVariableResult", ARRAY)],
    },
    ActionDef {
        action: "RequestStartTransaction",
        request: &[("idToken", OBJECT), ("remoteStartId", INTEGER)],
        response: &[("status", string_or!(GenericStatus))],
    },
    ActionDef {
        action: "RequestStopTransaction",
        request: &[("transactionId", STRING)],
        response: &[("status", string_or!(GenericStatus))],
    },
    ActionDef {
        action: "ReserveNow",
        request: &[("id", INTEGER), ("expiryDateTime", STRING), ("idToken", OBJECT)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "Reset",
        request: &[("type", string_or!(ResetTypeV2))],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "SendLocalList",
        request: &[("versionNumber", INTEGER), ("updateType", STRING)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "SetChargingProfile",
        request: &[("evseId", INTEGER), ("chargingProfile", OBJECT)],
        response: &[("status", string_or!(GenericStatus))],
    },
    ActionDef {
        action: "SetVariableMonitoring",
        request: &[("setMonitoringData", ARRAY)],
        response: &[("setMonitoringResult", ARRAY)],
    },
    ActionDef {
        action: "SetVariables",
        request: &[("setVariableData", ARRAY)],
        response: &[("setVariableResult", ARRAY)],
    },
    ActionDef {
        action: "TriggerMessage",
        request: &[("requestedMessage", STRING)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "UnlockConnector",
        request: &[("evseId", INTEGER), ("connectorId", INTEGER)],
        response: &[("status", STRING)],
    },
    ActionDef {
        action: "UpdateFirmware",
        request: &[("requestId", INTEGER), ("firmware", OBJECT)],
        response: &[("status", STRING)],
    },
];
