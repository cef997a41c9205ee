//! # Savings Handlers
//!
//! Pool creation, membership and deposits on the identity canister.

use shared::{Investment, PoolType};
use tracing::info;

use crate::app::locks::ActionKey;
use crate::app::AppStore;
use crate::core::error::{AppError, Result};
use crate::utils::validation::{validate_amount, validate_deadline_days, validate_pool_name};

impl AppStore {
    /// Create a pool closing `deadline_days` from now. Returns its id.
    pub async fn create_savings_pool(
        &self,
        name: &str,
        target_amount: f64,
        deadline_days: u32,
        pool_type: PoolType,
    ) -> Result<u64> {
        const FAILED: &str = "Failed to create savings pool";

        self.require_session(FAILED)?;
        self.check(FAILED, validate_pool_name(name).into_result())?;
        self.check(FAILED, validate_amount(target_amount).into_result())?;
        self.check(FAILED, validate_deadline_days(deadline_days).into_result())?;

        self.perform(ActionKey::CreatePool, FAILED, async {
            let pool_id = self
                .facade
                .create_savings_pool(name.trim(), target_amount, deadline_days, pool_type)
                .await?;
            info!(pool_id, %pool_type, "Savings pool created");
            self.refresh_pools().await;
            Ok::<_, AppError>(pool_id)
        })
        .await
    }

    pub async fn join_pool(&self, pool_id: u64) -> Result<()> {
        const FAILED: &str = "Failed to join pool";

        self.require_session(FAILED)?;

        self.perform(ActionKey::JoinPool(pool_id), FAILED, async {
            self.facade.join_pool(pool_id).await?;
            info!(pool_id, "Joined pool");
            self.refresh_pools().await;
            Ok::<_, AppError>(())
        })
        .await
    }

    /// Deposit `amount` native units into a pool.
    pub async fn deposit_to_pool(&self, pool_id: u64, amount: f64) -> Result<()> {
        const FAILED: &str = "Failed to deposit to pool";

        self.require_session(FAILED)?;
        self.check(FAILED, validate_amount(amount).into_result())?;

        self.perform(ActionKey::Deposit(pool_id), FAILED, async {
            self.facade.deposit_to_pool(pool_id, amount).await?;
            info!(pool_id, amount, "Deposited to pool");
            futures::join!(self.refresh_balance(), self.refresh_pools());
            Ok::<_, AppError>(())
        })
        .await
    }

    /// Investments of the signed-in user. Does not touch store state.
    pub async fn user_investments(&self) -> Result<Vec<Investment>> {
        let principal = self
            .principal()
            .ok_or_else(|| AppError::Precondition("Sign in first".to_string()))?;
        Ok(self.facade.get_user_investments(&principal).await?)
    }
}
