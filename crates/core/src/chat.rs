//! Chat/activity log vocabulary and validation.

/// Known message types for the session activity log.
pub mod message_types {
    /// A message typed by a participant.
    pub const CHAT: &str = "chat";
    /// A system-generated activity line (joined, left, approved a part).
    pub const ACTION: &str = "action";
}

/// The set of all valid message types.
pub const VALID_MESSAGE_TYPES: &[&str] = &[message_types::CHAT, message_types::ACTION];

/// Default number of messages returned by a backlog read.
pub const DEFAULT_MESSAGE_LIMIT: i64 = 50;

/// Returns `true` if the given message type is valid.
pub fn is_valid_message_type(message_type: &str) -> bool {
    VALID_MESSAGE_TYPES.contains(&message_type)
}

/// Validate an incoming chat message body.
pub fn validate_message(message: &str) -> Result<(), String> {
    if message.trim().is_empty() {
        return Err("Message must not be empty".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_message_types() {
        assert!(is_valid_message_type("chat"));
        assert!(is_valid_message_type("action"));
    }

    #[test]
    fn test_invalid_message_types() {
        assert!(!is_valid_message_type(""));
        assert!(!is_valid_message_type("system"));
        assert!(!is_valid_message_type("Chat"));
    }

    #[test]
    fn test_blank_message_rejected() {
        assert!(validate_message("   ").is_err());
        assert!(validate_message("").is_err());
    }

    #[test]
    fn test_normal_message_accepted() {
        assert!(validate_message("let's add a railgun").is_ok());
    }
}
