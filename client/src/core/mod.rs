//! # Core Abstractions
//!
//! Foundational types shared by every layer of the client:
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`service`]**: One trait per remote canister, plus the [`Canisters`] bundle
//! - **[`config`]**: Client configuration loaded from the environment
//!
//! ## Dependency Injection
//!
//! The store never talks to the network directly. It is built from a
//! [`Canisters`] bundle, so tests can inject in-memory canisters:
//!
//! ```rust,ignore
//! // In production: the HTTP gateway client implements all four services
//! let canisters = Canisters::uniform(Arc::new(ApiClient::new(&config, caller.clone())?), caller);
//!
//! // In tests: scripted in-memory canisters
//! let canisters = MockCanisters::new().canisters();
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::ClientConfig;
pub use error::{AppError, Result};
pub use service::{
    CallerSlot, Canisters, CustodyService, GovernanceService, IdentityService, TransportError,
    YieldService,
};
