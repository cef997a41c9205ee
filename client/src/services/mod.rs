//! # Services
//!
//! Everything between the store and the canister gateway:
//!
//! - **[`api`]**: HTTP gateway client implementing the four service traits
//! - **[`facade`]**: uniform, stateless wrapper over the canisters
//! - **[`units`]**: native/minor unit and deadline conversions

pub mod api;
pub mod facade;
pub mod units;

#[cfg(test)]
pub(crate) mod mock;

pub use facade::{FacadeError, FacadeResult, RetryPolicy, ServiceFacade};
pub use units::MinorUnits;
