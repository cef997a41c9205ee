//! # Shared Utility Functions
//!
//! ## Principal Formatting
//!
//! Principals are long dash-separated strings; logs and status lines show a
//! shortened form:
//! - [`format_principal`] - First N and last M characters with an ellipsis
//! - [`truncate_principal`] - `format_principal` with 5/3 defaults
//!
//! ## Canister Time
//!
//! - [`time_to_utc`] / [`utc_to_time`] - Convert between canister `Time`
//!   (nanoseconds since epoch) and `chrono` UTC timestamps
//!
//! ```rust
//! use shared::utils::format_principal;
//!
//! let principal = "rrkah-fqaaa-aaaaa-aaaaq-cai";
//! assert_eq!(format_principal(principal, 5, 3), "rrkah...cai");
//! ```

use chrono::{DateTime, Utc};

/// Format a principal by showing the first `prefix_len` and last `suffix_len` characters.
///
/// Strings too short to shorten meaningfully are returned as-is.
pub fn format_principal(principal: &str, prefix_len: usize, suffix_len: usize) -> String {
    let len = principal.len();

    if len <= prefix_len + suffix_len || !principal.is_ascii() {
        return principal.to_string();
    }

    format!("{}...{}", &principal[..prefix_len], &principal[len - suffix_len..])
}

pub fn truncate_principal(principal: &str) -> String {
    format_principal(principal, 5, 3)
}

/// Canister `Time` (ns since epoch) to a UTC timestamp.
pub fn time_to_utc(time_ns: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(time_ns)
}

/// UTC timestamp to canister `Time`. Saturates outside the i64 nanosecond range.
pub fn utc_to_time(at: DateTime<Utc>) -> i64 {
    at.timestamp_nanos_opt().unwrap_or(i64::MAX)
}
