//! # Yield Canister Procedures

use async_trait::async_trait;
use serde_json::json;
use shared::{CallResult, UserPosition, YieldStrategy};

use super::client::{ApiClient, Canister};
use crate::core::service::{TransportError, YieldService};

#[async_trait]
impl YieldService for ApiClient {
    async fn get_available_strategies(&self) -> Result<Vec<YieldStrategy>, TransportError> {
        self.call(Canister::Yield, "getAvailableStrategies", json!([])).await
    }

    async fn enter_position(&self, strategy_id: &str, amount: f64) -> Result<CallResult<()>, TransportError> {
        self.call(Canister::Yield, "enterPosition", json!([strategy_id, amount])).await
    }

    async fn get_user_positions(&self) -> Result<Vec<UserPosition>, TransportError> {
        self.call(Canister::Yield, "getUserPositions", json!([])).await
    }

    async fn calculate_current_yield(&self) -> Result<CallResult<f64>, TransportError> {
        self.call(Canister::Yield, "calculateCurrentYield", json!([])).await
    }

    async fn claim_yields(&self) -> Result<CallResult<f64>, TransportError> {
        self.call(Canister::Yield, "claimYields", json!([])).await
    }

    async fn project_returns(
        &self,
        amount: f64,
        strategy_id: &str,
        duration_days: u64,
    ) -> Result<CallResult<f64>, TransportError> {
        self.call(
            Canister::Yield,
            "projectReturns",
            json!([amount, strategy_id, duration_days]),
        )
        .await
    }

    async fn get_strategy_performance(&self, strategy_id: &str) -> Result<CallResult<f64>, TransportError> {
        self.call(Canister::Yield, "getStrategyPerformance", json!([strategy_id])).await
    }
}
