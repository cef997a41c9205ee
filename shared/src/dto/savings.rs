use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::identity::Principal;

/// Kind of savings pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolType {
    /// Single saver
    Individual,
    /// Shared target, open to members
    Group,
}

impl PoolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolType::Individual => "individual",
            PoolType::Group => "group",
        }
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(PoolType::Individual),
            "group" => Ok(PoolType::Group),
            other => Err(format!("Unknown pool type: {}", other)),
        }
    }
}

/// Savings pool as listed by the identity canister.
///
/// `current_amount` may exceed `target_amount`; the canister does not cap
/// deposits and the client must not assume it does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPool {
    pub id: u64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    /// Absolute deadline (ns since epoch)
    pub deadline: i64,
    pub pool_type: PoolType,
    #[serde(default)]
    pub members: Vec<Principal>,
    pub creator: Principal,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl SavingsPool {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Fraction of the target reached. Not clamped: overfunded pools report > 1.0.
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        self.current_amount / self.target_amount
    }
}

/// Fixed-term investment held by the identity canister
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub amount: f64,
    pub duration_days: u64,
    pub start_time: i64,
    pub expected_return: f64,
}
