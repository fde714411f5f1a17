//! Time helpers
//!
//! All model timestamps are Unix millis; conversion to display formats
//! happens client-side.

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
