//! # Shared Wire Types Library
//!
//! This library defines the contract between the Nuru client core and the four
//! remote services ("canisters") it talks to. Every type here mirrors a value that
//! crosses the canister gateway as JSON.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects, grouped by remote service
//!   - **[`dto::result`]**: The tagged `{"ok": ..}` / `{"err": ..}` command result
//!   - **[`dto::identity`]**: Principals and user profiles
//!   - **[`dto::savings`]**: Savings pools and investments
//!   - **[`dto::custody`]**: Custody wallets
//!   - **[`dto::governance`]**: Proposals and votes
//!   - **[`dto::yield_farm`]**: Yield strategies and user positions
//! - **[`utils`]**: Principal formatting and canister time helpers
//!
//! ## Wire Format
//!
//! - Field names use **camelCase** on the wire (`targetAmount`, `currentApy`)
//! - Enum variants serialize as camelCase strings (`"group"`, `"treasurySpend"`)
//! - Timestamps are canister `Time` values: nanoseconds since the Unix epoch
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::result::CallResult;
//! use shared::dto::savings::PoolType;
//!
//! let result: CallResult<u64> = serde_json::from_str(r#"{"ok": 7}"#).unwrap();
//! assert_eq!(result.into_result(), Ok(7));
//!
//! let pool_type: PoolType = "group".parse().unwrap();
//! assert_eq!(pool_type, PoolType::Group);
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
