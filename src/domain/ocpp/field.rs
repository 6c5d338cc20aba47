//! Semantic field types used by required-field contracts

use serde_json::Value;

use super::enums::EnumRef;

/// One acceptable semantic type for a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// Whole JSON number. Booleans are never integers.
    Integer,
    /// Any JSON number, integral or not.
    Number,
    Boolean,
    Object,
    Array,
    /// A string that is one of the enum's wire values.
    Enum(EnumRef),
}

/// Set of acceptable types for one field; a value passes if it matches any.
pub type FieldTypes = &'static [FieldType];

/// Ordered required-field table: field name → acceptable types.
pub type RequiredFields = &'static [(&'static str, FieldTypes)];

pub const STRING: FieldTypes = &[FieldType::String];
pub const INTEGER: FieldTypes = &[FieldType::Integer];
pub const NUMBER: FieldTypes = &[FieldType::Number];
pub const BOOLEAN: FieldTypes = &[FieldType::Boolean];
pub const OBJECT: FieldTypes = &[FieldType::Object];
pub const ARRAY: FieldTypes = &[FieldType::Array];

/// `String | <Enum>` field: any string is accepted, and so is the enum's wire
/// value.
#[macro_export]
macro_rules! string_or {
    ($enum:ty) => {
        &[
            $crate::domain::ocpp::FieldType::String,
            $crate::domain::ocpp::FieldType::Enum(<$enum>::ENUM),
        ]
    };
}

impl FieldType {
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_)) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::Number, Value::Number(_)) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Object, Value::Object(_)) => true,
            (Self::Array, Value::Array(_)) => true,
            (Self::Enum(e), Value::String(s)) => e.accepts(s),
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Enum(e) => e.name,
        }
    }
}

/// Render an accepted-type set for error messages, e.g. `string | RegistrationStatus`.
pub fn describe(types: FieldTypes) -> String {
    types
        .iter()
        .map(FieldType::name)
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ocpp::enums::RegistrationStatus;
    use serde_json::json;

    #[test]
    fn integer_rejects_floats_and_booleans() {
        assert!(FieldType::Integer.matches(&json!(300)));
        assert!(FieldType::Integer.matches(&json!(-1)));
        assert!(!FieldType::Integer.matches(&json!(1.5)));
        assert!(!FieldType::Integer.matches(&json!(true)));
        assert!(!FieldType::Integer.matches(&json!("300")));
    }

    #[test]
    fn number_accepts_both_kinds() {
        assert!(FieldType::Number.matches(&json!(3)));
        assert!(FieldType::Number.matches(&json!(3.25)));
        assert!(!FieldType::Number.matches(&json!(null)));
    }

    #[test]
    fn enum_checks_wire_value() {
        let t = FieldType::Enum(RegistrationStatus::ENUM);
        assert!(t.matches(&json!("Pending")));
        assert!(!t.matches(&json!("pending")));
        assert!(!t.matches(&json!(1)));
    }

    #[test]
    fn string_or_enum_describes_both() {
        let types: FieldTypes = string_or!(RegistrationStatus);
        assert_eq!(describe(types), "string | RegistrationStatus");
        assert!(types.iter().any(|t| t.matches(&json!("anything"))));
    }
}
