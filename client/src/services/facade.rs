//! # Service Facade
//!
//! One method per remote capability, translating between the canisters' wire
//! shapes and a uniform local contract:
//!
//! - inputs are plain domain values, never transport handles
//! - the output is the decoded payload or a [`FacadeError`]; nothing panics and
//!   no transport error escapes untyped
//! - no caching and no state: the store owns all state
//!
//! Failures are tagged so callers can tell a network problem
//! ([`FacadeError::Transport`]) from a canister saying no
//! ([`FacadeError::Declined`]). Callers that only want the neutral value
//! (`None`, `0.0`, empty `Vec`) take `unwrap_or_default()`.
//!
//! Read procedures are retried on transport failures according to the
//! [`RetryPolicy`]. Commands are sent exactly once: the canisters make no
//! idempotency promise.

use chrono::Utc;
use shared::{
    CallResult, Investment, PoolType, Principal, Proposal, ProposalType, SavingsPool,
    UserPosition, UserProfile, VoteChoice, Wallet, YieldStrategy,
};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::core::config::ClientConfig;
use crate::core::service::{Canisters, TransportError};
use crate::services::units::{deadline_after_days, MinorUnits};

/// Why a facade call produced no value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FacadeError {
    /// Gateway unreachable or reply undecodable
    #[error("{0}")]
    Transport(String),
    /// Canister answered `{"err": reason}`
    #[error("{0}")]
    Declined(String),
}

pub type FacadeResult<T> = Result<T, FacadeError>;

/// Retry behaviour for read procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first transport failure
    pub read_retries: u32,
    /// Linear backoff step: attempt `n` waits `n * backoff`
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            read_retries: 1,
            backoff: Duration::from_millis(200),
        }
    }
}

impl From<&ClientConfig> for RetryPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self {
            read_retries: config.read_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

#[derive(Clone)]
pub struct ServiceFacade {
    canisters: Canisters,
    retry: RetryPolicy,
}

impl ServiceFacade {
    pub fn new(canisters: Canisters, retry: RetryPolicy) -> Self {
        Self { canisters, retry }
    }

    /// Present `principal` on all subsequent calls.
    pub fn set_caller(&self, principal: Principal) {
        self.canisters.caller.set(principal);
    }

    /// Subsequent calls go out anonymously.
    pub fn clear_caller(&self) {
        self.canisters.caller.clear();
    }

    pub fn caller(&self) -> Option<Principal> {
        self.canisters.caller.get()
    }

    /// Run a read procedure, retrying transport failures.
    async fn read<T, F, Fut>(&self, procedure: &'static str, mut call: F) -> Result<T, TransportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.retry.read_retries => {
                    attempt += 1;
                    tracing::warn!(procedure, attempt, error = %e, "Read failed, retrying");
                    tokio::time::sleep(self.retry.backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    // ==================== IDENTITY ====================

    /// Profile of the current caller. A decline means "not registered" and
    /// comes back as `Ok(None)`.
    #[tracing::instrument(skip(self))]
    pub async fn get_user_profile(&self) -> FacadeResult<Option<UserProfile>> {
        let identity = &self.canisters.identity;
        match self.read("getUserProfile", move || identity.get_user_profile()).await {
            Ok(CallResult::Ok(profile)) => Ok(Some(profile)),
            Ok(CallResult::Err(reason)) => {
                tracing::debug!(reason = %reason, "No user profile found");
                Ok(None)
            }
            Err(e) => Err(transport("getUserProfile", e)),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn register_user(&self) -> FacadeResult<UserProfile> {
        settle("registerUser", self.canisters.identity.register_user().await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all_active_pools(&self) -> FacadeResult<Vec<SavingsPool>> {
        let identity = &self.canisters.identity;
        self.read("getAllActivePools", move || identity.get_all_active_pools())
            .await
            .map_err(|e| transport("getAllActivePools", e))
    }

    /// Create a pool closing `deadline_days` from now. Returns the new pool id.
    #[tracing::instrument(skip(self, pool_type), fields(pool_type = %pool_type))]
    pub async fn create_savings_pool(
        &self,
        name: &str,
        target_amount: f64,
        deadline_days: u32,
        pool_type: PoolType,
    ) -> FacadeResult<u64> {
        let deadline = deadline_after_days(Utc::now(), deadline_days);
        tracing::debug!(deadline, "Resolved pool deadline");
        settle(
            "createSavingsPool",
            self.canisters
                .identity
                .create_savings_pool(name, target_amount, deadline, pool_type)
                .await,
        )
    }

    #[tracing::instrument(skip(self))]
    pub async fn join_pool(&self, pool_id: u64) -> FacadeResult<()> {
        settle("joinPool", self.canisters.identity.join_pool(pool_id).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn deposit_to_pool(&self, pool_id: u64, amount: f64) -> FacadeResult<()> {
        settle("depositToPool", self.canisters.identity.deposit_to_pool(pool_id, amount).await)
    }

    #[tracing::instrument(skip(self, user), fields(user = %shared::truncate_principal(user.as_str())))]
    pub async fn get_user_investments(&self, user: &Principal) -> FacadeResult<Vec<Investment>> {
        let identity = &self.canisters.identity;
        self.read("getUserInvestments", move || identity.get_user_investments(user))
            .await
            .map_err(|e| transport("getUserInvestments", e))
    }

    #[tracing::instrument(skip(self))]
    pub async fn start_investment(&self, amount: f64, duration_days: u64) -> FacadeResult<()> {
        settle(
            "startInvestment",
            self.canisters.identity.start_investment(amount, duration_days).await,
        )
    }

    #[tracing::instrument(skip(self))]
    pub async fn calculate_returns(&self) -> FacadeResult<f64> {
        let identity = &self.canisters.identity;
        self.read("calculateReturns", move || identity.calculate_returns())
            .await
            .map_err(|e| transport("calculateReturns", e))
    }

    // ==================== CUSTODY ====================

    /// Custody balance in native units.
    #[tracing::instrument(skip(self))]
    pub async fn get_balance(&self) -> FacadeResult<f64> {
        let custody = &self.canisters.custody;
        let minor = settle(
            "getBalance",
            self.read("getBalance", move || custody.get_balance()).await,
        )?;
        Ok(MinorUnits(minor).to_native())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_wallet_info(&self) -> FacadeResult<Wallet> {
        let custody = &self.canisters.custody;
        settle(
            "getWalletInfo",
            self.read("getWalletInfo", move || custody.get_wallet_info()).await,
        )
    }

    /// Returns the new wallet address.
    #[tracing::instrument(skip(self))]
    pub async fn create_wallet(&self) -> FacadeResult<String> {
        settle("createWallet", self.canisters.custody.create_wallet().await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn transfer_to_savings(&self, amount: MinorUnits, pool_id: u64) -> FacadeResult<()> {
        settle(
            "transferToSavings",
            self.canisters.custody.transfer_to_savings(amount.get(), pool_id).await,
        )
    }

    /// Test faucet on local networks.
    #[tracing::instrument(skip(self))]
    pub async fn simulate_deposit(&self, amount: MinorUnits) -> FacadeResult<()> {
        settle("simulateDeposit", self.canisters.custody.simulate_deposit(amount.get()).await)
    }

    // ==================== GOVERNANCE ====================

    #[tracing::instrument(skip(self))]
    pub async fn get_active_proposals(&self) -> FacadeResult<Vec<Proposal>> {
        let governance = &self.canisters.governance;
        self.read("getActiveProposals", move || governance.get_active_proposals())
            .await
            .map_err(|e| transport("getActiveProposals", e))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_proposal(&self, proposal_id: u64) -> FacadeResult<Proposal> {
        let governance = &self.canisters.governance;
        settle(
            "getProposal",
            self.read("getProposal", move || governance.get_proposal(proposal_id)).await,
        )
    }

    #[tracing::instrument(skip(self))]
    pub async fn vote(&self, proposal_id: u64, support: bool) -> FacadeResult<()> {
        settle(
            "vote",
            self.canisters
                .governance
                .vote(proposal_id, VoteChoice::from(support))
                .await,
        )
    }

    /// Returns the new proposal id.
    #[tracing::instrument(skip(self, description, proposal_type), fields(proposal_type = %proposal_type))]
    pub async fn create_proposal(
        &self,
        title: &str,
        description: &str,
        proposal_type: ProposalType,
    ) -> FacadeResult<u64> {
        settle(
            "createProposal",
            self.canisters
                .governance
                .create_proposal(title, description, proposal_type)
                .await,
        )
    }

    // ==================== YIELD ====================

    #[tracing::instrument(skip(self))]
    pub async fn get_available_strategies(&self) -> FacadeResult<Vec<YieldStrategy>> {
        let yield_farm = &self.canisters.yield_farm;
        self.read("getAvailableStrategies", move || yield_farm.get_available_strategies())
            .await
            .map_err(|e| transport("getAvailableStrategies", e))
    }

    #[tracing::instrument(skip(self))]
    pub async fn enter_position(&self, strategy_id: &str, amount: f64) -> FacadeResult<()> {
        settle(
            "enterPosition",
            self.canisters.yield_farm.enter_position(strategy_id, amount).await,
        )
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_user_positions(&self) -> FacadeResult<Vec<UserPosition>> {
        let yield_farm = &self.canisters.yield_farm;
        self.read("getUserPositions", move || yield_farm.get_user_positions())
            .await
            .map_err(|e| transport("getUserPositions", e))
    }

    #[tracing::instrument(skip(self))]
    pub async fn calculate_current_yield(&self) -> FacadeResult<f64> {
        let yield_farm = &self.canisters.yield_farm;
        settle(
            "calculateCurrentYield",
            self.read("calculateCurrentYield", move || yield_farm.calculate_current_yield())
                .await,
        )
    }

    /// Claim all accrued yield. Returns the amount claimed.
    #[tracing::instrument(skip(self))]
    pub async fn claim_yields(&self) -> FacadeResult<f64> {
        settle("claimYields", self.canisters.yield_farm.claim_yields().await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn project_returns(
        &self,
        amount: f64,
        strategy_id: &str,
        duration_days: u64,
    ) -> FacadeResult<f64> {
        let yield_farm = &self.canisters.yield_farm;
        settle(
            "projectReturns",
            self.read("projectReturns", move || {
                yield_farm.project_returns(amount, strategy_id, duration_days)
            })
            .await,
        )
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_strategy_performance(&self, strategy_id: &str) -> FacadeResult<f64> {
        let yield_farm = &self.canisters.yield_farm;
        settle(
            "getStrategyPerformance",
            self.read("getStrategyPerformance", move || {
                yield_farm.get_strategy_performance(strategy_id)
            })
            .await,
        )
    }
}

fn transport(procedure: &'static str, err: TransportError) -> FacadeError {
    tracing::error!(procedure, error = %err, "Canister call failed");
    FacadeError::Transport(err.to_string())
}

/// Branch on the result tag. Declines log at `warn`, transport failures at `error`.
fn settle<T>(procedure: &'static str, outcome: Result<CallResult<T>, TransportError>) -> FacadeResult<T> {
    match outcome {
        Ok(CallResult::Ok(value)) => Ok(value),
        Ok(CallResult::Err(reason)) => {
            tracing::warn!(procedure, reason = %reason, "Canister declined request");
            Err(FacadeError::Declined(reason))
        }
        Err(e) => Err(transport(procedure, e)),
    }
}
