use serde::Serialize;

/// Minimal success acknowledgement: `{ "success": true }`.
///
/// Endpoints with richer payloads define their own response structs in
/// their handler modules; this exists for the delete/leave style
/// endpoints that only confirm the operation happened.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_serializes_success_flag() {
        let json = serde_json::to_value(Ack::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
    }
}
