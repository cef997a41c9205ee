//! # Nuru Client - Library Root
//!
//! Client-side state and orchestration core for the Nuru savings platform.
//! The platform is four remote canisters; this crate wraps them in one
//! uniform facade and keeps the session and domain collections consistent
//! after every action.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ consumers (UI, CLI)                                  │
//! └───────────────┬──────────────────────▲───────────────┘
//!                 │ actions              │ AppEvent
//! ┌───────────────▼──────────────────────┴───────────────┐
//! │ app::AppStore    session state machine, collections  │
//! ├──────────────────────────────────────────────────────┤
//! │ services::ServiceFacade   tagged results, retries    │
//! ├──────────────────────────────────────────────────────┤
//! │ core::service traits  ◄── services::api::ApiClient   │
//! └───────────────┬──────────────────────────────────────┘
//!                 │ HTTP (canister gateway)
//!   identity · custody · governance · yield canisters
//! ```
//!
//! ## Module Structure
//!
//! - **app**: the store, its actions ([`app::handlers`]) and refreshes ([`app::tasks`])
//! - **services**: gateway client, facade and unit conversions
//! - **core**: error type, service traits, configuration
//! - **debug**: logging setup
//! - **utils**: argument validation
//!
//! Wire types live in the [`shared`] crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nuru_client::{AppStore, ClientConfig};
//! use shared::Principal;
//!
//! # async fn run() -> nuru_client::core::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let store = AppStore::from_config(&config)?;
//! store.init().await;
//!
//! store.sign_in(Principal::new("rrkah-fqaaa-aaaaa-aaaaq-cai")).await?;
//! store.deposit_to_pool(3, 0.5).await?;
//! println!("balance: {}", store.balance());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;

pub use app::events::AppEvent;
pub use app::state::{AppState, Session, SessionPhase};
pub use app::AppStore;
pub use crate::core::{AppError, ClientConfig, Result};
pub use services::{FacadeError, ServiceFacade};
