//! In-memory canisters for tests.
//!
//! Implements all four service traits over a small ledger, with scripting hooks:
//! per-procedure declines, transport failures (permanent or for the next `n`
//! calls), panics, and gates that hold a call until released. Every call is
//! counted so tests can assert that a re-fetch really hit the "network".

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{
    CallResult, Investment, PoolType, Principal, Proposal, ProposalStatus, ProposalType,
    RiskLevel, SavingsPool, UserPosition, UserProfile, VoteChoice, Wallet, YieldStrategy,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::core::service::{
    CallerSlot, Canisters, CustodyService, GovernanceService, IdentityService, TransportError,
    YieldService,
};

#[derive(Default)]
struct Ledger {
    profile: Option<UserProfile>,
    balance_minor: u64,
    wallet: Option<Wallet>,
    pools: Vec<SavingsPool>,
    proposals: Vec<Proposal>,
    strategies: Vec<YieldStrategy>,
    positions: Vec<UserPosition>,
    investments: Vec<Investment>,
    next_id: u64,
    last_deadline: Option<i64>,
    calls: HashMap<&'static str, usize>,
    declines: HashMap<&'static str, String>,
    broken: HashSet<&'static str>,
    flaky: HashMap<&'static str, u32>,
    panics: HashSet<&'static str>,
    gates: HashMap<&'static str, Arc<Notify>>,
}

#[derive(Clone, Default)]
pub(crate) struct MockCanisters {
    ledger: Arc<Mutex<Ledger>>,
    caller: CallerSlot,
}

impl MockCanisters {
    pub(crate) fn new() -> Self {
        let mock = Self::default();
        mock.ledger.lock().next_id = 100;
        mock
    }

    pub(crate) fn canisters(&self) -> Canisters {
        Canisters::uniform(Arc::new(self.clone()), self.caller.clone())
    }

    // ----- seeding -----

    pub(crate) fn with_profile(self, profile: UserProfile) -> Self {
        self.ledger.lock().profile = Some(profile);
        self
    }

    pub(crate) fn with_balance_minor(self, minor: u64) -> Self {
        self.ledger.lock().balance_minor = minor;
        self
    }

    pub(crate) fn with_pools(self, pools: Vec<SavingsPool>) -> Self {
        self.ledger.lock().pools = pools;
        self
    }

    pub(crate) fn with_proposals(self, proposals: Vec<Proposal>) -> Self {
        self.ledger.lock().proposals = proposals;
        self
    }

    pub(crate) fn with_strategies(self, strategies: Vec<YieldStrategy>) -> Self {
        self.ledger.lock().strategies = strategies;
        self
    }

    pub(crate) fn with_positions(self, positions: Vec<UserPosition>) -> Self {
        self.ledger.lock().positions = positions;
        self
    }

    pub(crate) fn with_investments(self, investments: Vec<Investment>) -> Self {
        self.ledger.lock().investments = investments;
        self
    }

    // ----- scripting -----

    /// `procedure` answers `{"err": reason}` (commands and tagged reads).
    pub(crate) fn decline(&self, procedure: &'static str, reason: &str) {
        self.ledger.lock().declines.insert(procedure, reason.to_string());
    }

    /// `procedure` fails in transport until [`MockCanisters::heal`], which also
    /// lifts scripted declines and panics.
    pub(crate) fn break_transport(&self, procedure: &'static str) {
        self.ledger.lock().broken.insert(procedure);
    }

    pub(crate) fn heal(&self, procedure: &'static str) {
        let mut ledger = self.ledger.lock();
        ledger.broken.remove(procedure);
        ledger.declines.remove(procedure);
        ledger.panics.remove(procedure);
    }

    /// The next `times` calls of `procedure` fail in transport.
    pub(crate) fn fail_next(&self, procedure: &'static str, times: u32) {
        self.ledger.lock().flaky.insert(procedure, times);
    }

    pub(crate) fn panic_on(&self, procedure: &'static str) {
        self.ledger.lock().panics.insert(procedure);
    }

    /// Calls of `procedure` wait until [`MockCanisters::open_gate`].
    pub(crate) fn gate(&self, procedure: &'static str) {
        self.ledger
            .lock()
            .gates
            .insert(procedure, Arc::new(Notify::new()));
    }

    /// Release the calls waiting on `procedure`; later calls pass straight through.
    pub(crate) fn open_gate(&self, procedure: &'static str) {
        if let Some(gate) = self.ledger.lock().gates.remove(procedure) {
            gate.notify_waiters();
        }
    }

    // ----- inspection -----

    pub(crate) fn calls(&self, procedure: &str) -> usize {
        self.ledger.lock().calls.get(procedure).copied().unwrap_or(0)
    }

    pub(crate) fn last_deadline(&self) -> Option<i64> {
        self.ledger.lock().last_deadline
    }

    pub(crate) fn caller(&self) -> Option<Principal> {
        self.caller.get()
    }

    pub(crate) fn balance_minor(&self) -> u64 {
        self.ledger.lock().balance_minor
    }

    pub(crate) fn pool(&self, id: u64) -> Option<SavingsPool> {
        self.ledger.lock().pools.iter().find(|p| p.id == id).cloned()
    }

    pub(crate) fn set_pool_amount(&self, id: u64, amount: f64) {
        if let Some(pool) = self.ledger.lock().pools.iter_mut().find(|p| p.id == id) {
            pool.current_amount = amount;
        }
    }

    /// Count the call and apply any script. `Ok(Some(reason))` means "decline".
    async fn enter(&self, procedure: &'static str) -> Result<Option<String>, TransportError> {
        let gate = {
            let mut ledger = self.ledger.lock();
            *ledger.calls.entry(procedure).or_insert(0) += 1;
            ledger.gates.get(procedure).cloned()
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut ledger = self.ledger.lock();
        if ledger.panics.contains(procedure) {
            drop(ledger);
            panic!("scripted panic in {}", procedure);
        }
        if ledger.broken.contains(procedure) {
            return Err(TransportError::Network(format!("{}: connection refused", procedure)));
        }
        if let Some(remaining) = ledger.flaky.get_mut(procedure) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(TransportError::Network(format!("{}: connection reset", procedure)));
            }
        }
        Ok(ledger.declines.get(procedure).cloned())
    }

    fn caller_or_anonymous(&self) -> Principal {
        self.caller.get().unwrap_or_else(|| Principal::new("2vxsx-fae"))
    }
}

#[async_trait]
impl IdentityService for MockCanisters {
    async fn get_user_profile(&self) -> Result<CallResult<UserProfile>, TransportError> {
        if let Some(reason) = self.enter("getUserProfile").await? {
            return Ok(CallResult::Err(reason));
        }
        Ok(match self.ledger.lock().profile.clone() {
            Some(profile) => CallResult::Ok(profile),
            None => CallResult::Err("User not found".to_string()),
        })
    }

    async fn register_user(&self) -> Result<CallResult<UserProfile>, TransportError> {
        if let Some(reason) = self.enter("registerUser").await? {
            return Ok(CallResult::Err(reason));
        }
        let caller = self.caller_or_anonymous();
        let mut ledger = self.ledger.lock();
        if ledger.profile.is_some() {
            return Ok(CallResult::Err("User already registered".to_string()));
        }
        let profile = UserProfile {
            id: caller,
            created_at: 1,
            total_savings: 0.0,
            pool_memberships: Vec::new(),
        };
        ledger.profile = Some(profile.clone());
        Ok(CallResult::Ok(profile))
    }

    async fn get_all_active_pools(&self) -> Result<Vec<SavingsPool>, TransportError> {
        self.enter("getAllActivePools").await?;
        Ok(self.ledger.lock().pools.clone())
    }

    async fn create_savings_pool(
        &self,
        name: &str,
        target_amount: f64,
        deadline: i64,
        pool_type: PoolType,
    ) -> Result<CallResult<u64>, TransportError> {
        if let Some(reason) = self.enter("createSavingsPool").await? {
            return Ok(CallResult::Err(reason));
        }
        let creator = self.caller_or_anonymous();
        let mut ledger = self.ledger.lock();
        ledger.next_id += 1;
        let id = ledger.next_id;
        ledger.last_deadline = Some(deadline);
        ledger.pools.push(SavingsPool {
            id,
            name: name.to_string(),
            target_amount,
            current_amount: 0.0,
            deadline,
            pool_type,
            members: vec![creator.clone()],
            creator,
            is_active: true,
        });
        Ok(CallResult::Ok(id))
    }

    async fn join_pool(&self, pool_id: u64) -> Result<CallResult<()>, TransportError> {
        if let Some(reason) = self.enter("joinPool").await? {
            return Ok(CallResult::Err(reason));
        }
        let caller = self.caller_or_anonymous();
        let mut ledger = self.ledger.lock();
        match ledger.pools.iter_mut().find(|p| p.id == pool_id) {
            Some(pool) if pool.members.contains(&caller) => {
                Ok(CallResult::Err("Already a member".to_string()))
            }
            Some(pool) => {
                pool.members.push(caller);
                Ok(CallResult::Ok(()))
            }
            None => Ok(CallResult::Err("Pool not found".to_string())),
        }
    }

    async fn deposit_to_pool(&self, pool_id: u64, amount: f64) -> Result<CallResult<()>, TransportError> {
        if let Some(reason) = self.enter("depositToPool").await? {
            return Ok(CallResult::Err(reason));
        }
        let minor = (amount * 100_000_000.0).round() as u64;
        let mut ledger = self.ledger.lock();
        if ledger.balance_minor < minor {
            return Ok(CallResult::Err("Insufficient balance".to_string()));
        }
        ledger.balance_minor -= minor;
        match ledger.pools.iter_mut().find(|p| p.id == pool_id) {
            Some(pool) => {
                pool.current_amount += amount;
                Ok(CallResult::Ok(()))
            }
            None => Ok(CallResult::Err("Pool not found".to_string())),
        }
    }

    async fn get_user_investments(&self, _user: &Principal) -> Result<Vec<Investment>, TransportError> {
        self.enter("getUserInvestments").await?;
        Ok(self.ledger.lock().investments.clone())
    }

    async fn start_investment(&self, amount: f64, duration_days: u64) -> Result<CallResult<()>, TransportError> {
        if let Some(reason) = self.enter("startInvestment").await? {
            return Ok(CallResult::Err(reason));
        }
        self.ledger.lock().investments.push(Investment {
            amount,
            duration_days,
            start_time: 0,
            expected_return: amount * 0.05,
        });
        Ok(CallResult::Ok(()))
    }

    async fn calculate_returns(&self) -> Result<f64, TransportError> {
        self.enter("calculateReturns").await?;
        Ok(self.ledger.lock().investments.iter().map(|i| i.expected_return).sum())
    }
}

#[async_trait]
impl CustodyService for MockCanisters {
    async fn get_wallet_info(&self) -> Result<CallResult<Wallet>, TransportError> {
        if let Some(reason) = self.enter("getWalletInfo").await? {
            return Ok(CallResult::Err(reason));
        }
        Ok(match self.ledger.lock().wallet.clone() {
            Some(wallet) => CallResult::Ok(wallet),
            None => CallResult::Err("Wallet not found".to_string()),
        })
    }

    async fn get_balance(&self) -> Result<CallResult<u64>, TransportError> {
        if let Some(reason) = self.enter("getBalance").await? {
            return Ok(CallResult::Err(reason));
        }
        Ok(CallResult::Ok(self.ledger.lock().balance_minor))
    }

    async fn create_wallet(&self) -> Result<CallResult<String>, TransportError> {
        if let Some(reason) = self.enter("createWallet").await? {
            return Ok(CallResult::Err(reason));
        }
        let owner = self.caller_or_anonymous();
        let mut ledger = self.ledger.lock();
        if ledger.wallet.is_some() {
            return Ok(CallResult::Err("Wallet already exists".to_string()));
        }
        let address = format!("bc1q{}", owner.as_str().replace('-', ""));
        let balance_minor = ledger.balance_minor;
        ledger.wallet = Some(Wallet {
            address: address.clone(),
            balance_minor,
            owner,
        });
        Ok(CallResult::Ok(address))
    }

    async fn transfer_to_savings(&self, amount_minor: u64, pool_id: u64) -> Result<CallResult<()>, TransportError> {
        if let Some(reason) = self.enter("transferToSavings").await? {
            return Ok(CallResult::Err(reason));
        }
        let mut ledger = self.ledger.lock();
        if ledger.balance_minor < amount_minor {
            return Ok(CallResult::Err("Insufficient balance".to_string()));
        }
        ledger.balance_minor -= amount_minor;
        if let Some(pool) = ledger.pools.iter_mut().find(|p| p.id == pool_id) {
            pool.current_amount += amount_minor as f64 / 100_000_000.0;
        }
        Ok(CallResult::Ok(()))
    }

    async fn simulate_deposit(&self, amount_minor: u64) -> Result<CallResult<()>, TransportError> {
        if let Some(reason) = self.enter("simulateDeposit").await? {
            return Ok(CallResult::Err(reason));
        }
        self.ledger.lock().balance_minor += amount_minor;
        Ok(CallResult::Ok(()))
    }
}

#[async_trait]
impl GovernanceService for MockCanisters {
    async fn get_active_proposals(&self) -> Result<Vec<Proposal>, TransportError> {
        self.enter("getActiveProposals").await?;
        Ok(self.ledger.lock().proposals.clone())
    }

    async fn get_proposal(&self, proposal_id: u64) -> Result<CallResult<Proposal>, TransportError> {
        if let Some(reason) = self.enter("getProposal").await? {
            return Ok(CallResult::Err(reason));
        }
        Ok(match self.ledger.lock().proposals.iter().find(|p| p.id == proposal_id) {
            Some(proposal) => CallResult::Ok(proposal.clone()),
            None => CallResult::Err("Proposal not found".to_string()),
        })
    }

    async fn vote(&self, proposal_id: u64, choice: VoteChoice) -> Result<CallResult<()>, TransportError> {
        if let Some(reason) = self.enter("vote").await? {
            return Ok(CallResult::Err(reason));
        }
        let mut ledger = self.ledger.lock();
        match ledger.proposals.iter_mut().find(|p| p.id == proposal_id) {
            Some(proposal) => {
                match choice {
                    VoteChoice::For => proposal.votes_for += 1,
                    VoteChoice::Against => proposal.votes_against += 1,
                }
                Ok(CallResult::Ok(()))
            }
            None => Ok(CallResult::Err("Proposal not found".to_string())),
        }
    }

    async fn create_proposal(
        &self,
        title: &str,
        description: &str,
        proposal_type: ProposalType,
    ) -> Result<CallResult<u64>, TransportError> {
        if let Some(reason) = self.enter("createProposal").await? {
            return Ok(CallResult::Err(reason));
        }
        let proposer = self.caller_or_anonymous();
        let mut ledger = self.ledger.lock();
        ledger.next_id += 1;
        let id = ledger.next_id;
        ledger.proposals.push(Proposal {
            id,
            title: title.to_string(),
            description: description.to_string(),
            proposal_type,
            proposer,
            votes_for: 0,
            votes_against: 0,
            created_at: 0,
            deadline: 0,
            status: ProposalStatus::Active,
        });
        Ok(CallResult::Ok(id))
    }
}

#[async_trait]
impl YieldService for MockCanisters {
    async fn get_available_strategies(&self) -> Result<Vec<YieldStrategy>, TransportError> {
        self.enter("getAvailableStrategies").await?;
        Ok(self.ledger.lock().strategies.clone())
    }

    async fn enter_position(&self, strategy_id: &str, amount: f64) -> Result<CallResult<()>, TransportError> {
        if let Some(reason) = self.enter("enterPosition").await? {
            return Ok(CallResult::Err(reason));
        }
        let minor = (amount * 100_000_000.0).round() as u64;
        let mut ledger = self.ledger.lock();
        let Some(strategy) = ledger.strategies.iter().find(|s| s.id == strategy_id).cloned() else {
            return Ok(CallResult::Err("Strategy not found".to_string()));
        };
        if amount < strategy.min_amount {
            return Ok(CallResult::Err("Amount below strategy minimum".to_string()));
        }
        if ledger.balance_minor < minor {
            return Ok(CallResult::Err("Insufficient balance".to_string()));
        }
        ledger.balance_minor -= minor;
        ledger.positions.push(UserPosition {
            strategy_id: strategy_id.to_string(),
            amount,
            entry_time: 0,
            current_yield: 0.0,
            claimed_yield: 0.0,
        });
        Ok(CallResult::Ok(()))
    }

    async fn get_user_positions(&self) -> Result<Vec<UserPosition>, TransportError> {
        self.enter("getUserPositions").await?;
        Ok(self.ledger.lock().positions.clone())
    }

    async fn calculate_current_yield(&self) -> Result<CallResult<f64>, TransportError> {
        if let Some(reason) = self.enter("calculateCurrentYield").await? {
            return Ok(CallResult::Err(reason));
        }
        Ok(CallResult::Ok(
            self.ledger.lock().positions.iter().map(|p| p.current_yield).sum(),
        ))
    }

    async fn claim_yields(&self) -> Result<CallResult<f64>, TransportError> {
        if let Some(reason) = self.enter("claimYields").await? {
            return Ok(CallResult::Err(reason));
        }
        let mut ledger = self.ledger.lock();
        let mut claimed = 0.0;
        for position in ledger.positions.iter_mut() {
            claimed += position.current_yield;
            position.claimed_yield += position.current_yield;
            position.current_yield = 0.0;
        }
        if claimed <= 0.0 {
            return Ok(CallResult::Err("No yield to claim".to_string()));
        }
        ledger.balance_minor += (claimed * 100_000_000.0).round() as u64;
        Ok(CallResult::Ok(claimed))
    }

    async fn project_returns(
        &self,
        amount: f64,
        strategy_id: &str,
        duration_days: u64,
    ) -> Result<CallResult<f64>, TransportError> {
        if let Some(reason) = self.enter("projectReturns").await? {
            return Ok(CallResult::Err(reason));
        }
        Ok(match self.ledger.lock().strategies.iter().find(|s| s.id == strategy_id) {
            Some(strategy) => {
                CallResult::Ok(amount * strategy.current_apy / 100.0 * duration_days as f64 / 365.0)
            }
            None => CallResult::Err("Strategy not found".to_string()),
        })
    }

    async fn get_strategy_performance(&self, strategy_id: &str) -> Result<CallResult<f64>, TransportError> {
        if let Some(reason) = self.enter("getStrategyPerformance").await? {
            return Ok(CallResult::Err(reason));
        }
        Ok(match self.ledger.lock().strategies.iter().find(|s| s.id == strategy_id) {
            Some(strategy) => CallResult::Ok(strategy.current_apy),
            None => CallResult::Err("Strategy not found".to_string()),
        })
    }
}

// ==================== FIXTURES ====================

pub(crate) fn principal(text: &str) -> Principal {
    Principal::new(text)
}

pub(crate) fn profile(owner: &str) -> UserProfile {
    UserProfile {
        id: principal(owner),
        created_at: 1,
        total_savings: 0.0,
        pool_memberships: Vec::new(),
    }
}

pub(crate) fn pool(id: u64, name: &str) -> SavingsPool {
    SavingsPool {
        id,
        name: name.to_string(),
        target_amount: 10.0,
        current_amount: 0.0,
        deadline: 1_767_225_600_000_000_000,
        pool_type: PoolType::Group,
        members: vec![principal("aaaaa-aa")],
        creator: principal("aaaaa-aa"),
        is_active: true,
    }
}

pub(crate) fn proposal(id: u64, title: &str) -> Proposal {
    Proposal {
        id,
        title: title.to_string(),
        description: format!("{} description", title),
        proposal_type: ProposalType::ParameterChange,
        proposer: principal("aaaaa-aa"),
        votes_for: 0,
        votes_against: 0,
        created_at: 0,
        deadline: 0,
        status: ProposalStatus::Active,
    }
}

pub(crate) fn strategy(id: &str, apy: f64) -> YieldStrategy {
    YieldStrategy {
        id: id.to_string(),
        name: format!("{} strategy", id),
        base_apy: apy,
        current_apy: apy,
        risk_level: RiskLevel::Low,
        min_amount: 0.01,
        is_active: true,
    }
}

pub(crate) fn position(strategy_id: &str, amount: f64, current_yield: f64) -> UserPosition {
    UserPosition {
        strategy_id: strategy_id.to_string(),
        amount,
        entry_time: 0,
        current_yield,
        claimed_yield: 0.0,
    }
}
