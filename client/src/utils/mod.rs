//! # Utility Functions
//!
//! - **[`validation`]**: argument checks run by store actions before any remote call
//!
//! See also [`shared::utils`] for principal formatting and time conversions.

pub mod validation;
