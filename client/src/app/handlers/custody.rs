//! # Custody Handlers
//!
//! Wallet creation and transfers. Amounts enter in native units and are
//! converted to minor units on the way to the custody canister.

use shared::Wallet;
use tracing::info;

use crate::app::locks::ActionKey;
use crate::app::AppStore;
use crate::core::error::{AppError, Result};
use crate::services::units::MinorUnits;
use crate::utils::validation::validate_amount;

impl AppStore {
    /// Returns the new wallet address.
    pub async fn create_wallet(&self) -> Result<String> {
        const FAILED: &str = "Failed to create wallet";

        self.require_session(FAILED)?;

        self.perform(ActionKey::CreateWallet, FAILED, async {
            let address = self.facade.create_wallet().await?;
            info!(address = %address, "Wallet created");
            self.refresh_balance().await;
            Ok::<_, AppError>(address)
        })
        .await
    }

    /// Move `amount` native units from custody into a savings pool.
    pub async fn transfer_to_savings(&self, amount: f64, pool_id: u64) -> Result<()> {
        const FAILED: &str = "Failed to transfer to savings";

        self.require_session(FAILED)?;
        self.check(FAILED, validate_amount(amount).into_result())?;

        self.perform(ActionKey::Transfer(pool_id), FAILED, async {
            let minor = MinorUnits::from_native(amount);
            self.facade.transfer_to_savings(minor, pool_id).await?;
            info!(pool_id, amount_minor = minor.get(), "Transferred to savings");
            futures::join!(self.refresh_balance(), self.refresh_pools());
            Ok::<_, AppError>(())
        })
        .await
    }

    /// Credit test funds. Only local replicas accept this.
    pub async fn simulate_deposit(&self, amount: f64) -> Result<()> {
        const FAILED: &str = "Failed to simulate deposit";

        self.require_session(FAILED)?;
        self.check(FAILED, validate_amount(amount).into_result())?;

        self.perform(ActionKey::SimulateDeposit, FAILED, async {
            self.facade
                .simulate_deposit(MinorUnits::from_native(amount))
                .await?;
            self.refresh_balance().await;
            Ok::<_, AppError>(())
        })
        .await
    }

    /// Custody wallet of the signed-in user. Does not touch store state.
    pub async fn wallet_info(&self) -> Result<Wallet> {
        if self.principal().is_none() {
            return Err(AppError::Precondition("Sign in first".to_string()));
        }
        Ok(self.facade.get_wallet_info().await?)
    }
}
