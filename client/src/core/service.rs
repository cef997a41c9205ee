//! # Service Traits
//!
//! One trait per remote canister, mirroring its declared procedures and wire
//! shapes. Read procedures return the value directly; command procedures return
//! the tagged [`CallResult`]. Every call can additionally fail in transport,
//! which is reported as [`TransportError`].
//!
//! These traits are the seam between the facade and the network: the production
//! [`crate::services::api::ApiClient`] implements all four, tests substitute
//! in-memory canisters.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::{
    CallResult, Investment, PoolType, Principal, Proposal, ProposalType, SavingsPool,
    UserPosition, UserProfile, VoteChoice, Wallet, YieldStrategy,
};
use std::sync::Arc;
use thiserror::Error;

/// Failure to complete a remote call at all.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// Connection refused, timeout, DNS failure
    #[error("Network error: {0}")]
    Network(String),
    /// Gateway answered with a non-success status
    #[error("Gateway returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// Reply body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Identity canister: profiles, savings pools, investments.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn get_user_profile(&self) -> Result<CallResult<UserProfile>, TransportError>;

    async fn register_user(&self) -> Result<CallResult<UserProfile>, TransportError>;

    async fn get_all_active_pools(&self) -> Result<Vec<SavingsPool>, TransportError>;

    /// `deadline` is an absolute canister time (ns since epoch).
    async fn create_savings_pool(
        &self,
        name: &str,
        target_amount: f64,
        deadline: i64,
        pool_type: PoolType,
    ) -> Result<CallResult<u64>, TransportError>;

    async fn join_pool(&self, pool_id: u64) -> Result<CallResult<()>, TransportError>;

    async fn deposit_to_pool(&self, pool_id: u64, amount: f64) -> Result<CallResult<()>, TransportError>;

    async fn get_user_investments(&self, user: &Principal) -> Result<Vec<Investment>, TransportError>;

    async fn start_investment(&self, amount: f64, duration_days: u64) -> Result<CallResult<()>, TransportError>;

    async fn calculate_returns(&self) -> Result<f64, TransportError>;
}

/// Custody canister. All amounts are integer minor units.
#[async_trait]
pub trait CustodyService: Send + Sync {
    async fn get_wallet_info(&self) -> Result<CallResult<Wallet>, TransportError>;

    async fn get_balance(&self) -> Result<CallResult<u64>, TransportError>;

    async fn create_wallet(&self) -> Result<CallResult<String>, TransportError>;

    async fn transfer_to_savings(&self, amount_minor: u64, pool_id: u64) -> Result<CallResult<()>, TransportError>;

    async fn simulate_deposit(&self, amount_minor: u64) -> Result<CallResult<()>, TransportError>;
}

/// Governance canister.
#[async_trait]
pub trait GovernanceService: Send + Sync {
    async fn get_active_proposals(&self) -> Result<Vec<Proposal>, TransportError>;

    async fn get_proposal(&self, proposal_id: u64) -> Result<CallResult<Proposal>, TransportError>;

    async fn vote(&self, proposal_id: u64, choice: VoteChoice) -> Result<CallResult<()>, TransportError>;

    async fn create_proposal(
        &self,
        title: &str,
        description: &str,
        proposal_type: ProposalType,
    ) -> Result<CallResult<u64>, TransportError>;
}

/// Yield canister.
#[async_trait]
pub trait YieldService: Send + Sync {
    async fn get_available_strategies(&self) -> Result<Vec<YieldStrategy>, TransportError>;

    async fn enter_position(&self, strategy_id: &str, amount: f64) -> Result<CallResult<()>, TransportError>;

    async fn get_user_positions(&self) -> Result<Vec<UserPosition>, TransportError>;

    async fn calculate_current_yield(&self) -> Result<CallResult<f64>, TransportError>;

    async fn claim_yields(&self) -> Result<CallResult<f64>, TransportError>;

    async fn project_returns(
        &self,
        amount: f64,
        strategy_id: &str,
        duration_days: u64,
    ) -> Result<CallResult<f64>, TransportError>;

    async fn get_strategy_performance(&self, strategy_id: &str) -> Result<CallResult<f64>, TransportError>;
}

/// Principal presented on outgoing calls, shared between the facade (writer)
/// and the transport (reader).
#[derive(Debug, Clone, Default)]
pub struct CallerSlot(Arc<RwLock<Option<Principal>>>);

impl CallerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, principal: Principal) {
        *self.0.write() = Some(principal);
    }

    pub fn clear(&self) {
        *self.0.write() = None;
    }

    pub fn get(&self) -> Option<Principal> {
        self.0.read().clone()
    }
}

/// Handles to the four canisters plus the caller slot they read from.
#[derive(Clone)]
pub struct Canisters {
    pub identity: Arc<dyn IdentityService>,
    pub custody: Arc<dyn CustodyService>,
    pub governance: Arc<dyn GovernanceService>,
    pub yield_farm: Arc<dyn YieldService>,
    pub caller: CallerSlot,
}

impl Canisters {
    /// Use one client for all four services.
    pub fn uniform<C>(client: Arc<C>, caller: CallerSlot) -> Self
    where
        C: IdentityService + CustodyService + GovernanceService + YieldService + 'static,
    {
        Self {
            identity: client.clone(),
            custody: client.clone(),
            governance: client.clone(),
            yield_farm: client,
            caller,
        }
    }
}
