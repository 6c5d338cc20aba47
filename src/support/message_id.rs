//! Message id generation

use uuid::Uuid;

/// Fresh OCPP-J unique id for an outbound Call.
///
/// OCPP caps ids at 36 characters, exactly the length of a hyphenated UUID.
pub fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_fit_the_limit() {
        let a = new_message_id();
        let b = new_message_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
