//! # Collection Refreshes
//!
//! Each refresh fetches one collection and replaces it wholesale. Failures are
//! logged and absorbed: the previous collection stays, and neither the loading
//! flag nor the current error is touched, so a failed refresh never masks the
//! outcome of the action that triggered it.

use shared::{Principal, SavingsPool};
use tracing::{debug, warn};

use crate::app::events::AppEvent;
use crate::app::state::SessionPhase;
use crate::app::AppStore;

impl AppStore {
    pub async fn refresh_pools(&self) {
        match self.facade.get_all_active_pools().await {
            Ok(pools) => {
                let count = pools.len();
                self.state.write().pools = pools;
                debug!(count, "Pools refreshed");
                self.events.emit(AppEvent::PoolsUpdated(count));
            }
            Err(e) => warn!(error = %e, "Failed to refresh pools, keeping previous"),
        }
    }

    pub async fn refresh_proposals(&self) {
        match self.facade.get_active_proposals().await {
            Ok(proposals) => {
                let count = proposals.len();
                self.state.write().proposals = proposals;
                debug!(count, "Proposals refreshed");
                self.events.emit(AppEvent::ProposalsUpdated(count));
            }
            Err(e) => warn!(error = %e, "Failed to refresh proposals, keeping previous"),
        }
    }

    pub async fn refresh_strategies(&self) {
        match self.facade.get_available_strategies().await {
            Ok(strategies) => {
                let count = strategies.len();
                self.state.write().strategies = strategies;
                debug!(count, "Strategies refreshed");
                self.events.emit(AppEvent::StrategiesUpdated(count));
            }
            Err(e) => warn!(error = %e, "Failed to refresh strategies, keeping previous"),
        }
    }

    /// No-op without a principal.
    pub async fn refresh_balance(&self) {
        let Some(principal) = self.principal() else {
            return;
        };
        match self.facade.get_balance().await {
            Ok(balance) => {
                if self.still_signed_in(&principal) {
                    self.state.write().session.balance = balance;
                    debug!(balance, "Balance refreshed");
                    self.events.emit(AppEvent::BalanceUpdated(balance));
                }
            }
            Err(e) => warn!(error = %e, "Failed to refresh balance, keeping previous"),
        }
    }

    /// No-op without a principal.
    pub async fn refresh_positions(&self) {
        let Some(principal) = self.principal() else {
            return;
        };
        match self.facade.get_user_positions().await {
            Ok(positions) => {
                if self.still_signed_in(&principal) {
                    let count = positions.len();
                    self.state.write().session.positions = positions;
                    debug!(count, "Positions refreshed");
                    self.events.emit(AppEvent::PositionsUpdated(count));
                }
            }
            Err(e) => warn!(error = %e, "Failed to refresh positions, keeping previous"),
        }
    }

    /// Refresh pools and return the new collection.
    pub async fn get_all_active_pools(&self) -> Vec<SavingsPool> {
        self.refresh_pools().await;
        self.pools()
    }

    /// Refresh the balance and return it in native units.
    pub async fn get_balance(&self) -> f64 {
        self.refresh_balance().await;
        self.balance()
    }

    pub async fn refresh_yield_strategies(&self) {
        self.refresh_strategies().await;
    }

    /// Re-fetch the caller's profile. Returns true when a profile was stored.
    pub(crate) async fn refresh_profile(&self) -> bool {
        let Some(principal) = self.principal() else {
            return false;
        };
        match self.facade.get_user_profile().await {
            Ok(Some(profile)) if self.still_signed_in(&principal) => {
                self.state.write().session.profile = Some(profile);
                self.set_phase(SessionPhase::AuthenticatedWithProfile);
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!(error = %e, "Failed to refresh profile");
                false
            }
        }
    }

    /// Session-scoped results are dropped if the user logged out (or switched)
    /// while the fetch was in flight.
    pub(crate) fn still_signed_in(&self, principal: &Principal) -> bool {
        self.state.read().session.principal.as_ref() == Some(principal)
    }
}
