//! # Yield Handlers
//!
//! Positions in yield strategies. Yield figures are computed by the canister;
//! the store only displays them.

use tracing::info;

use crate::app::locks::ActionKey;
use crate::app::AppStore;
use crate::core::error::{AppError, Result};
use crate::utils::validation::{validate_amount, validate_strategy_id};

impl AppStore {
    pub async fn enter_position(&self, strategy_id: &str, amount: f64) -> Result<()> {
        const FAILED: &str = "Failed to enter position";

        self.require_session(FAILED)?;
        self.check(FAILED, validate_strategy_id(strategy_id).into_result())?;
        self.check(FAILED, validate_amount(amount).into_result())?;

        self.perform(ActionKey::EnterPosition(strategy_id.to_string()), FAILED, async {
            self.facade.enter_position(strategy_id, amount).await?;
            info!(strategy_id, amount, "Entered position");
            futures::join!(
                self.refresh_balance(),
                self.refresh_strategies(),
                self.refresh_positions()
            );
            Ok::<_, AppError>(())
        })
        .await
    }

    /// Claim all accrued yield. Returns the amount claimed.
    pub async fn claim_yields(&self) -> Result<f64> {
        const FAILED: &str = "Failed to claim yields";

        self.require_session(FAILED)?;

        self.perform(ActionKey::ClaimYields, FAILED, async {
            let claimed = self.facade.claim_yields().await?;
            info!(claimed, "Yields claimed");
            futures::join!(self.refresh_balance(), self.refresh_positions());
            Ok::<_, AppError>(claimed)
        })
        .await
    }

    pub async fn project_returns(&self, amount: f64, strategy_id: &str, duration_days: u64) -> Result<f64> {
        Ok(self
            .facade
            .project_returns(amount, strategy_id, duration_days)
            .await?)
    }

    pub async fn strategy_performance(&self, strategy_id: &str) -> Result<f64> {
        Ok(self.facade.get_strategy_performance(strategy_id).await?)
    }

    /// Unclaimed yield across all positions of the signed-in user.
    pub async fn current_yield(&self) -> Result<f64> {
        if self.principal().is_none() {
            return Err(AppError::Precondition("Sign in first".to_string()));
        }
        Ok(self.facade.calculate_current_yield().await?)
    }
}
