//! Per-version action catalogs
//!
//! Each protocol generation declares its own table of actions with the
//! required-field contract of the request (CALL) and of the response
//! (CALLRESULT). Catalogs are independent: an action missing from a version's
//! table is unsupported for that version, even if another version defines it.
//! They are only ever combined through the
//! [`ProtocolRegistry`](crate::application::registry::ProtocolRegistry).

pub mod ocpp16;
pub mod ocpp201;
pub mod ocpp21;

use std::collections::BTreeMap;

use crate::domain::ocpp::{ActionSchema, MessageKind, OcppVersion, RequiredFields};

/// One catalog row: an action and the required fields of both directions.
#[derive(Debug, Clone, Copy)]
pub struct ActionDef {
    pub action: &'static str,
    pub request: RequiredFields,
    pub response: RequiredFields,
}

/// A protocol generation's request and response schemas, keyed by action.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub version: OcppVersion,
    pub requests: BTreeMap<&'static str, ActionSchema>,
    pub responses: BTreeMap<&'static str, ActionSchema>,
}

impl Catalog {
    fn from_table(version: OcppVersion, table: &'static [ActionDef]) -> Self {
        let schemas = |kind: MessageKind| {
            table
                .iter()
                .map(|def| {
                    let required = match kind {
                        MessageKind::Request => def.request,
                        MessageKind::Response => def.response,
                    };
                    (def.action, ActionSchema::build(kind, version, def.action, required))
                })
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            version,
            requests: schemas(MessageKind::Request),
            responses: schemas(MessageKind::Response),
        }
    }
}

/// All catalogs, oldest generation first.
pub fn all() -> [Catalog; 3] {
    [ocpp16::catalog(), ocpp201::catalog(), ocpp21::catalog()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_has_both_directions_for_each_action() {
        for catalog in all() {
            assert!(!catalog.requests.is_empty(), "{} is empty", catalog.version);
            assert_eq!(
                catalog.requests.keys().collect::<Vec<_>>(),
                catalog.responses.keys().collect::<Vec<_>>()
            );
            for (action, schema) in &catalog.requests {
                assert_eq!(schema.action(), *action);
                assert_eq!(schema.version(), catalog.version);
                assert_eq!(schema.kind(), MessageKind::Request);
            }
        }
    }

    #[test]
    fn tables_have_no_duplicate_actions() {
        for (table, version) in [
            (ocpp16::ACTIONS, OcppVersion::V16),
            (ocpp201::ACTIONS, OcppVersion::V201),
            (ocpp21::ACTIONS, OcppVersion::V21),
        ] {
            let catalog = Catalog::from_table(version, table);
            assert_eq!(catalog.requests.len(), table.len(), "duplicate action in {version}");
        }
    }

    #[test]
    fn boot_notification_differs_between_generations() {
        let v16 = ocpp16::catalog();
        let v201 = ocpp201::catalog();
        let fields = |c: &Catalog| {
            c.requests["BootNotification"]
                .required_fields()
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
        };
        assert_eq!(fields(&v16), ["chargePointVendor", "chargePointModel"]);
        assert_eq!(fields(&v201), ["chargingStation", "reason"]);
    }
}
