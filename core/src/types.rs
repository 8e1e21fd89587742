//! Shared primitive types used across the entire desk.

/// Identifier of a case. Copied from the raw record's `id`.
pub type CaseId = u64;

/// Identifier of the user who authored a raw record.
pub type UserId = i64;

/// Monotonic sequence number of an event log entry.
pub type Seq = u64;
