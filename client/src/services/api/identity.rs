//! # Identity Canister Procedures
//!
//! Profiles, savings pools and investments.

use async_trait::async_trait;
use serde_json::json;
use shared::{CallResult, Investment, PoolType, Principal, SavingsPool, UserProfile};

use super::client::{ApiClient, Canister};
use crate::core::service::{IdentityService, TransportError};

#[async_trait]
impl IdentityService for ApiClient {
    async fn get_user_profile(&self) -> Result<CallResult<UserProfile>, TransportError> {
        self.call(Canister::Identity, "getUserProfile", json!([])).await
    }

    async fn register_user(&self) -> Result<CallResult<UserProfile>, TransportError> {
        self.call(Canister::Identity, "registerUser", json!([])).await
    }

    async fn get_all_active_pools(&self) -> Result<Vec<SavingsPool>, TransportError> {
        self.call(Canister::Identity, "getAllActivePools", json!([])).await
    }

    async fn create_savings_pool(
        &self,
        name: &str,
        target_amount: f64,
        deadline: i64,
        pool_type: PoolType,
    ) -> Result<CallResult<u64>, TransportError> {
        self.call(
            Canister::Identity,
            "createSavingsPool",
            json!([name, target_amount, deadline, pool_type]),
        )
        .await
    }

    async fn join_pool(&self, pool_id: u64) -> Result<CallResult<()>, TransportError> {
        self.call(Canister::Identity, "joinPool", json!([pool_id])).await
    }

    async fn deposit_to_pool(&self, pool_id: u64, amount: f64) -> Result<CallResult<()>, TransportError> {
        self.call(Canister::Identity, "depositToPool", json!([pool_id, amount])).await
    }

    async fn get_user_investments(&self, user: &Principal) -> Result<Vec<Investment>, TransportError> {
        self.call(Canister::Identity, "getUserInvestments", json!([user])).await
    }

    async fn start_investment(&self, amount: f64, duration_days: u64) -> Result<CallResult<()>, TransportError> {
        self.call(Canister::Identity, "startInvestment", json!([amount, duration_days])).await
    }

    async fn calculate_returns(&self) -> Result<f64, TransportError> {
        self.call(Canister::Identity, "calculateReturns", json!([])).await
    }
}
