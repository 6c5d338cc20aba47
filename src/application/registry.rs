//! Protocol registry
//!
//! Merges the per-version catalogs into two lookup tables: one for requests
//! (CALL, frame type 2) and one for responses (CALLRESULT, frame type 3).
//! The tables are built once, on first use, and are read-only afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use super::catalogs;
use crate::domain::error::UnsupportedAction;
use crate::domain::ocpp::{ActionSchema, MessageKind, OcppVersion};

type SchemaTable = HashMap<OcppVersion, HashMap<&'static str, ActionSchema>>;

static REGISTRY: Lazy<ProtocolRegistry> = Lazy::new(ProtocolRegistry::build);

/// `(frame type, action, version)` → schema.
#[derive(Debug)]
pub struct ProtocolRegistry {
    requests: SchemaTable,
    responses: SchemaTable,
}

impl ProtocolRegistry {
    /// Process-wide registry shared by the codec.
    pub fn global() -> &'static ProtocolRegistry {
        &REGISTRY
    }

    /// Build the tables from every catalog.
    pub fn build() -> Self {
        let mut requests = SchemaTable::new();
        let mut responses = SchemaTable::new();

        for catalog in catalogs::all() {
            debug!(
                version = catalog.version.subprotocol(),
                actions = catalog.requests.len(),
                "Registering OCPP catalog"
            );
            requests.insert(catalog.version, catalog.requests.into_iter().collect());
            responses.insert(catalog.version, catalog.responses.into_iter().collect());
        }

        Self {
            requests,
            responses,
        }
    }

    fn table(&self, kind: MessageKind) -> &SchemaTable {
        match kind {
            MessageKind::Request => &self.requests,
            MessageKind::Response => &self.responses,
        }
    }

    /// Resolve a schema for a negotiated subprotocol string (`"ocpp1.6"`, ...).
    ///
    /// An unknown version is treated like an unknown action: there is no
    /// default version to fall back to.
    pub fn lookup(
        &self,
        kind: MessageKind,
        action: &str,
        protocol_version: &str,
    ) -> Result<&ActionSchema, UnsupportedAction> {
        OcppVersion::from_subprotocol(protocol_version)
            .and_then(|version| self.find(kind, action, version))
            .ok_or_else(|| UnsupportedAction {
                action: action.to_string(),
                version: protocol_version.to_string(),
            })
    }

    /// Resolve a schema for an already-parsed version.
    pub fn lookup_version(
        &self,
        kind: MessageKind,
        action: &str,
        version: OcppVersion,
    ) -> Result<&ActionSchema, UnsupportedAction> {
        self.find(kind, action, version)
            .ok_or_else(|| UnsupportedAction {
                action: action.to_string(),
                version: version.subprotocol().to_string(),
            })
    }

    fn find(&self, kind: MessageKind, action: &str, version: OcppVersion) -> Option<&ActionSchema> {
        self.table(kind).get(&version)?.get(action)
    }

    pub fn supports(&self, kind: MessageKind, action: &str, version: OcppVersion) -> bool {
        self.find(kind, action, version).is_some()
    }

    /// Actions defined for a version, sorted by name.
    pub fn actions(&self, kind: MessageKind, version: OcppVersion) -> Vec<&'static str> {
        let mut actions: Vec<_> = self
            .table(kind)
            .get(&version)
            .map(|schemas| schemas.keys().copied().collect())
            .unwrap_or_default();
        actions.sort_unstable();
        actions
    }

    pub fn len(&self, kind: MessageKind) -> usize {
        self.table(kind).values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.responses.is_empty()
    }
}
