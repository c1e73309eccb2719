//! Presence roster constants and validation.
//!
//! The roster itself lives in the API layer (it is in-memory, shared state);
//! this module holds the timings and the join-request validation so the
//! background sweep and the handlers agree on them.

/// Participants idle longer than this are removed by the sweep.
pub const PRESENCE_IDLE_TIMEOUT_SECS: i64 = 300;

/// How often the inactive-participant sweep runs.
pub const PRESENCE_SWEEP_INTERVAL_SECS: u64 = 300;

/// Color assigned to a participant who joins without picking one.
pub const DEFAULT_USER_COLOR: &str = "#08B0D5";

/// Validate a join request's identity fields.
pub fn validate_join(user_id: &str, user_name: &str) -> Result<(), String> {
    if user_id.is_empty() {
        return Err("userId is required".to_string());
    }
    if user_name.is_empty() {
        return Err("userName is required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_join() {
        assert!(validate_join("u1", "Asuka").is_ok());
    }

    #[test]
    fn test_join_requires_user_id() {
        let result = validate_join("", "Asuka");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("userId"));
    }

    #[test]
    fn test_join_requires_user_name() {
        let result = validate_join("u1", "");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("userName"));
    }

    #[test]
    fn test_idle_timeout_matches_sweep_interval() {
        assert_eq!(PRESENCE_IDLE_TIMEOUT_SECS as u64, PRESENCE_SWEEP_INTERVAL_SECS);
    }
}
