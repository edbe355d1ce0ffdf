//! Clock port for report timestamps.

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current time as an RFC 3339 string.
    fn now_rfc3339(&self) -> String;
}
