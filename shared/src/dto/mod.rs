//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the remote canisters.
//!
//! ## Module Organization
//!
//! - [`result`] - Tagged command result shared by every service
//! - [`identity`] - Principal handle and user profile (identity service)
//! - [`savings`] - Savings pools and investments (identity service)
//! - [`custody`] - Wallet info (custody service)
//! - [`governance`] - Proposals and votes (governance service)
//! - [`yield_farm`] - Strategies and positions (yield service)
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/canister/{canister_id}/createSavingsPool
//! Content-Type: application/json
//!
//! ["Trip", 3.0, 1767225600000000000, "group"]
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "ok": 12 }
//! ```

pub mod custody;
pub mod governance;
pub mod identity;
pub mod result;
pub mod savings;
pub mod yield_farm;

pub use custody::*;
pub use governance::*;
pub use identity::*;
pub use result::*;
pub use savings::*;
pub use yield_farm::*;
