//! # Application State Store
//!
//! [`AppStore`] is the single source of truth for the session and the domain
//! collections. It is an explicit context object: construct one per client (or
//! per test), call [`AppStore::init`] once, and hand clones to consumers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ AppStore (Clone, all handles shared)         │
//! │  state:   Arc<RwLock<AppState>>              │
//! │  facade:  ServiceFacade ──► four canisters   │
//! │  locks:   one token per ActionKey            │
//! │  events:  async_channel per subscriber      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Action Contract
//!
//! Every mutating action in [`handlers`]:
//!
//! 1. checks the session and its arguments locally (no remote call on failure)
//! 2. takes the [`locks::ActionKey`] token, failing with `Busy` if held
//! 3. counts itself as in flight and clears the previous error
//! 4. calls the facade, then joins its refresh set from [`tasks`]
//! 5. on failure stores `"<action failed>: <reason>"` as the current error
//!
//! The in-flight count and the key token are released by `Drop`, so neither
//! can stay set after an early return or a panic.
//!
//! ## Thread Safety
//!
//! No lock guard is held across an `.await`: local state transitions are atomic
//! between remote calls on any runtime flavour.

pub mod events;
pub mod guard;
pub mod handlers;
pub mod locks;
pub mod state;
pub mod tasks;

use async_channel::Receiver;
use parking_lot::RwLock;
use shared::{Principal, Proposal, SavingsPool, UserPosition, YieldStrategy};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::core::config::ClientConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::{CallerSlot, Canisters};
use crate::services::api::ApiClient;
use crate::services::facade::{RetryPolicy, ServiceFacade};

use events::{AppEvent, EventBus};
use guard::LoadingGuard;
use locks::{ActionKey, ActionLocks};
use state::{AppState, Session, SessionPhase};

#[derive(Clone)]
pub struct AppStore {
    state: Arc<RwLock<AppState>>,
    facade: ServiceFacade,
    events: EventBus,
    locks: ActionLocks,
    initialized: Arc<OnceCell<()>>,
}

impl AppStore {
    pub fn new(facade: ServiceFacade, config: &ClientConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            facade,
            events: EventBus::new(config.event_buffer),
            locks: ActionLocks::new(),
            initialized: Arc::new(OnceCell::new()),
        }
    }

    /// Store talking to the canister gateway described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let caller = CallerSlot::new();
        let client = ApiClient::new(config, caller.clone())?;
        let facade = ServiceFacade::new(
            Canisters::uniform(Arc::new(client), caller),
            RetryPolicy::from(config),
        );
        Ok(Self::new(facade, config))
    }

    /// Load pools, proposals and strategies concurrently, then mark the store
    /// ready. Runs once per store; concurrent and later callers wait for (or
    /// skip) the same load.
    pub async fn init(&self) {
        self.initialized
            .get_or_init(|| async {
                tracing::info!("Loading public collections");
                futures::join!(
                    self.refresh_pools(),
                    self.refresh_proposals(),
                    self.refresh_strategies()
                );
                self.state.write().ready = true;
                self.events.emit(AppEvent::Ready);
                tracing::info!("Store ready");
            })
            .await;
    }

    /// Clear the session and stop publishing events. Actions keep working.
    pub fn shutdown(&self) {
        self.logout();
        self.events.close();
        tracing::info!("Store shut down");
    }

    /// Receiver of the state change notifications published from now on.
    /// Each call gets its own queue of `event_buffer` events.
    pub fn subscribe(&self) -> Receiver<AppEvent> {
        self.events.subscribe()
    }

    // ==================== READ-ONLY SURFACE ====================

    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    pub fn session(&self) -> Session {
        self.state.read().session.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.read().session.phase
    }

    pub fn principal(&self) -> Option<Principal> {
        self.state.read().session.principal.clone()
    }

    pub fn balance(&self) -> f64 {
        self.state.read().session.balance
    }

    pub fn pools(&self) -> Vec<SavingsPool> {
        self.state.read().pools.clone()
    }

    pub fn proposals(&self) -> Vec<Proposal> {
        self.state.read().proposals.clone()
    }

    pub fn strategies(&self) -> Vec<YieldStrategy> {
        self.state.read().strategies.clone()
    }

    pub fn positions(&self) -> Vec<UserPosition> {
        self.state.read().session.positions.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.state.read().ready
    }

    /// True while an action with this key is in flight.
    pub fn is_busy(&self, key: &ActionKey) -> bool {
        self.locks.is_held(key)
    }

    // ==================== ACTION PLUMBING ====================

    /// Run `work` under the action contract for `key`.
    pub(crate) async fn perform<T, Fut>(&self, key: ActionKey, failed: &'static str, work: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let _token = match self.locks.acquire(key) {
            Ok(token) => token,
            Err(e) => return Err(self.fail(failed, e)),
        };
        let _loading = LoadingGuard::new(self.state.clone(), self.events.clone());
        self.state.write().error = None;

        work.await.map_err(|e| self.fail(failed, e))
    }

    /// Principal of an authenticated session, or a precondition failure.
    pub(crate) fn require_session(&self, failed: &'static str) -> Result<Principal> {
        let session = self.session();
        match session.principal {
            Some(principal) if session.phase.is_authenticated() => Ok(principal),
            _ => Err(self.fail(failed, AppError::Precondition("Sign in first".to_string()))),
        }
    }

    /// Reject locally, before any remote call.
    pub(crate) fn check(&self, failed: &'static str, outcome: Result<()>) -> Result<()> {
        outcome.map_err(|e| self.fail(failed, e))
    }

    /// Record `err` as the current error and hand it back.
    pub(crate) fn fail(&self, failed: &'static str, err: AppError) -> AppError {
        let message = match &err {
            AppError::Precondition(reason) => reason.clone(),
            other => format!("{}: {}", failed, other),
        };
        tracing::warn!(action = failed, error = %err, "Action failed");
        self.state.write().error = Some(message.clone());
        self.events.emit(AppEvent::ActionFailed {
            action: failed.to_string(),
            message,
        });
        err
    }

    pub(crate) fn set_phase(&self, phase: SessionPhase) {
        self.state.write().session.phase = phase;
        self.events.emit(AppEvent::SessionChanged(phase));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::config::CanisterIds;
    use crate::services::mock::MockCanisters;
    use std::time::Duration;

    pub(crate) fn config() -> ClientConfig {
        ClientConfig::new(
            "http://localhost:4943",
            CanisterIds {
                identity: "rrkah-fqaaa-aaaaa-aaaaq-cai".to_string(),
                custody: "ryjl3-tyaaa-aaaaa-aaaba-cai".to_string(),
                governance: "r7inp-6aaaa-aaaaa-aaabq-cai".to_string(),
                yield_farm: "rdmx6-jaaaa-aaaaa-aaadq-cai".to_string(),
            },
        )
    }

    pub(crate) fn store(mock: &MockCanisters) -> AppStore {
        let facade = ServiceFacade::new(
            mock.canisters(),
            RetryPolicy {
                read_retries: 0,
                backoff: Duration::ZERO,
            },
        );
        AppStore::new(facade, &config())
    }

    /// Store already signed in as `owner` with a registered profile.
    pub(crate) async fn signed_in(mock: &MockCanisters, owner: &str) -> AppStore {
        let store = store(mock);
        let phase = store.login(Principal::new(owner)).await;
        assert_eq!(phase, Ok(SessionPhase::AuthenticatedWithProfile));
        store
    }
}
