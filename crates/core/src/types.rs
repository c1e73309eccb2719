/// All entity identifiers are opaque strings (e.g. `session-...`,
/// `ai-component-...`), matching the wire contract.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
