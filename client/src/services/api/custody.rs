//! # Custody Canister Procedures
//!
//! Wallet creation, balances and transfers. Amounts on this canister are
//! integer minor units; conversion happens in the facade.

use async_trait::async_trait;
use serde_json::json;
use shared::{CallResult, Wallet};

use super::client::{ApiClient, Canister};
use crate::core::service::{CustodyService, TransportError};

#[async_trait]
impl CustodyService for ApiClient {
    async fn get_wallet_info(&self) -> Result<CallResult<Wallet>, TransportError> {
        self.call(Canister::Custody, "getWalletInfo", json!([])).await
    }

    async fn get_balance(&self) -> Result<CallResult<u64>, TransportError> {
        self.call(Canister::Custody, "getBalance", json!([])).await
    }

    async fn create_wallet(&self) -> Result<CallResult<String>, TransportError> {
        self.call(Canister::Custody, "createWallet", json!([])).await
    }

    async fn transfer_to_savings(&self, amount_minor: u64, pool_id: u64) -> Result<CallResult<()>, TransportError> {
        self.call(Canister::Custody, "transferToSavings", json!([amount_minor, pool_id])).await
    }

    async fn simulate_deposit(&self, amount_minor: u64) -> Result<CallResult<()>, TransportError> {
        self.call(Canister::Custody, "simulateDeposit", json!([amount_minor])).await
    }
}
