//! # Canister Gateway Client Module
//!
//! HTTP implementation of the four canister service traits.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs         - Module exports and documentation
//! ├── client.rs      - ApiClient, gateway call and reply decoding
//! ├── identity.rs    - Identity canister (profiles, pools, investments)
//! ├── custody.rs     - Custody canister (wallet, balance, transfers)
//! ├── governance.rs  - Governance canister (proposals, votes)
//! └── yield_farm.rs  - Yield canister (strategies, positions)
//! ```

pub mod client;
pub mod custody;
pub mod governance;
pub mod identity;
pub mod yield_farm;

pub use client::{ApiClient, Canister};
