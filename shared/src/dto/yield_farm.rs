use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Yield strategy offered by the yield canister. APYs are percentages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YieldStrategy {
    pub id: String,
    pub name: String,
    pub base_apy: f64,
    pub current_apy: f64,
    pub risk_level: RiskLevel,
    pub min_amount: f64,
    pub is_active: bool,
}

/// A user's stake in a strategy. Yield figures are computed by the canister only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPosition {
    pub strategy_id: String,
    pub amount: f64,
    pub entry_time: i64,
    pub current_yield: f64,
    pub claimed_yield: f64,
}
