//! # Unit Conversions
//!
//! The custody canister counts in integer minor units; everything above the
//! facade works in native-unit floats. The conversions live here and nowhere
//! else.

use chrono::{DateTime, Duration, Utc};

/// Minor units per native unit.
pub const MINOR_UNITS_PER_NATIVE: u64 = 100_000_000;

/// Amount in custody minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MinorUnits(pub u64);

impl MinorUnits {
    /// Convert a native amount, rounding to the nearest minor unit.
    ///
    /// Float-to-int casts saturate, so negative amounts and NaN map to zero.
    pub fn from_native(amount: f64) -> Self {
        MinorUnits((amount * MINOR_UNITS_PER_NATIVE as f64).round() as u64)
    }

    pub fn to_native(self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_NATIVE as f64
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Absolute canister deadline `days` after `now`.
pub fn deadline_after_days(now: DateTime<Utc>, days: u32) -> i64 {
    shared::utc_to_time(now + Duration::days(i64::from(days)))
}
